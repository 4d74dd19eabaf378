use log::debug;

use super::{Network, activations::ActFn, layer::Layer};
use crate::{
    MlErr, Result,
    initialization::{DEFAULT_SEED, ParamGen, RandParamGen},
};

/// Builds `Network`s given their topology.
///
/// The builder holds the input width, the amount of classes and the hidden layers in order. The
/// last layer is always sized to the amount of classes, so a builder without hidden layers
/// yields a single layer network.
#[derive(Clone, Debug)]
pub struct NetworkBuilder {
    inputs: usize,
    outputs: usize,
    hidden: Vec<(usize, Option<ActFn>)>,
    act_fn: ActFn,
    output_act_fn: Option<ActFn>,
}

impl NetworkBuilder {
    /// Creates a new `NetworkBuilder`.
    ///
    /// # Arguments
    /// * `inputs` - The width of the input vectors.
    /// * `outputs` - The amount of classes.
    pub fn new(inputs: usize, outputs: usize) -> Self {
        Self {
            inputs,
            outputs,
            hidden: Vec::new(),
            act_fn: ActFn::default(),
            output_act_fn: None,
        }
    }

    /// Appends a hidden layer of `width` neurons using the default activation function.
    pub fn add_layer(mut self, width: usize) -> Self {
        self.hidden.push((width, None));
        self
    }

    /// Appends a hidden layer of `width` neurons using `act_fn`.
    pub fn add_layer_with(mut self, width: usize, act_fn: ActFn) -> Self {
        self.hidden.push((width, Some(act_fn)));
        self
    }

    /// Sets the default activation function, used by every layer without an explicit one.
    pub fn act_fn(mut self, act_fn: ActFn) -> Self {
        self.act_fn = act_fn;
        self
    }

    /// Sets the activation function of the output layer.
    pub fn output_act_fn(mut self, act_fn: ActFn) -> Self {
        self.output_act_fn = Some(act_fn);
        self
    }

    /// Builds the network, either zero initialized or with every parameter drawn uniformly from
    /// `[0, 0.5)` using a generator seeded with `DEFAULT_SEED`.
    ///
    /// Two networks built with random weights from equal builders are identical.
    ///
    /// # Returns
    /// The network or an error naming the violated topology constraint.
    pub fn build(self, random_weights: bool) -> Result<Network> {
        if !random_weights {
            return self.build_layers();
        }

        let mut network = self.build_layers()?;
        let mut param_gen = RandParamGen::seeded(DEFAULT_SEED, network.size());

        network.initialize(&mut param_gen)?;
        Ok(network)
    }

    /// Builds the network and initializes its parameters with `param_gen`.
    ///
    /// # Returns
    /// The network, or an error naming the violated topology constraint or telling the
    /// generator ran dry.
    pub fn build_with<G: ParamGen + ?Sized>(self, param_gen: &mut G) -> Result<Network> {
        let mut network = self.build_layers()?;
        network.initialize(param_gen)?;
        Ok(network)
    }

    fn validate(&self) -> Result<()> {
        if self.inputs == 0 {
            return Err(MlErr::configuration("the number of inputs must be positive"));
        }

        if self.outputs == 0 {
            return Err(MlErr::configuration("the number of outputs must be positive"));
        }

        if self.hidden.iter().any(|&(width, _)| width == 0) {
            return Err(MlErr::configuration(
                "the number of neurons of every hidden layer must be positive",
            ));
        }

        Ok(())
    }

    fn build_layers(self) -> Result<Network> {
        self.validate()?;

        let Self {
            inputs,
            outputs,
            hidden,
            act_fn,
            output_act_fn,
        } = self;

        let mut layers = Vec::with_capacity(hidden.len() + 1);
        let mut width = inputs;

        for (neurons, layer_act_fn) in hidden {
            layers.push(Layer::new(neurons, width, layer_act_fn.unwrap_or(act_fn)));
            width = neurons;
        }

        layers.push(Layer::new(outputs, width, output_act_fn.unwrap_or(act_fn)));

        let topology: Vec<_> = layers.iter().map(Layer::width).collect();
        debug!("building network: inputs={inputs} layers={topology:?}");

        Network::from_layers(inputs, layers)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array1;
    use rand::{SeedableRng, rngs::StdRng};
    use rand_distr::{Distribution, Uniform};

    use super::*;

    /// Hands out neurons whose every parameter is the same value.
    struct Fixed(f32);

    impl ParamGen for Fixed {
        fn neuron(&mut self, inputs: usize) -> Option<(Vec<f32>, f32)> {
            Some((vec![self.0; inputs], self.0))
        }
    }

    #[test]
    fn topology_follows_the_hidden_layers() {
        let net = NetworkBuilder::new(4, 3)
            .add_layer(5)
            .add_layer(2)
            .build(false)
            .unwrap();

        let shape: Vec<_> = net.layers().iter().map(|l| (l.inputs(), l.width())).collect();
        assert_eq!(shape, [(4, 5), (5, 2), (2, 3)]);
        assert_eq!(net.inputs(), 4);
        assert_eq!(net.outputs(), 3);
    }

    #[test]
    fn no_hidden_layers_builds_a_single_layer() {
        let net = NetworkBuilder::new(784, 10).build(false).unwrap();

        assert_eq!(net.layers().len(), 1);
        assert_eq!(net.layers()[0].inputs(), 784);
        assert_eq!(net.outputs(), 10);
    }

    #[test]
    fn non_positive_widths_are_rejected() {
        let cases = [
            NetworkBuilder::new(0, 2),
            NetworkBuilder::new(2, 0),
            NetworkBuilder::new(2, 2).add_layer(3).add_layer(0),
        ];

        for builder in cases {
            let err = builder.build(true).unwrap_err();
            assert!(matches!(err, MlErr::Configuration { .. }), "got {err:?}");
        }
    }

    #[test]
    fn zero_initialized_networks_are_all_zeros() {
        let net = NetworkBuilder::new(3, 2).add_layer(4).build(false).unwrap();

        for neuron in net.layers().iter().flat_map(|l| l.neurons()) {
            assert!(neuron.weights().iter().all(|&w| w == 0.));
            assert_eq!(neuron.bias(), 0.);
        }
    }

    #[test]
    fn zero_initialized_networks_pick_the_first_class() {
        let net = NetworkBuilder::new(3, 4).add_layer(2).build(false).unwrap();

        for x in [[0., 0., 0.], [1., -2., 3.], [100., 0.5, -7.]] {
            assert_eq!(net.recognize(Array1::from(x.to_vec()).view()), Some(0));
        }
    }

    #[test]
    fn random_weights_are_reproducible() {
        let a = NetworkBuilder::new(6, 3).add_layer(4).build(true).unwrap();
        let b = NetworkBuilder::new(6, 3).add_layer(4).build(true).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, NetworkBuilder::new(6, 3).add_layer(4).build(false).unwrap());
    }

    #[test]
    fn random_weights_stay_in_range() {
        let net = NetworkBuilder::new(10, 3).add_layer(8).build(true).unwrap();

        for neuron in net.layers().iter().flat_map(|l| l.neurons()) {
            assert!(neuron.weights().iter().all(|w| (0. ..0.5).contains(w)));
            assert!((0. ..0.5).contains(&neuron.bias()));
        }
    }

    #[test]
    fn random_weights_are_drawn_weights_first_then_bias() {
        let net = NetworkBuilder::new(2, 1).add_layer(2).build(true).unwrap();
        let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
        let distribution = Uniform::new(0f32, 0.5).unwrap();
        let expected: Vec<f32> = (0..net.size())
            .map(|_| distribution.sample(&mut rng))
            .collect();

        let drawn: Vec<f32> = net
            .layers()
            .iter()
            .flat_map(|l| l.neurons())
            .flat_map(|n| n.weights().iter().copied().chain([n.bias()]).collect::<Vec<_>>())
            .collect();

        assert_eq!(drawn, expected);
    }

    #[test]
    fn build_with_uses_the_given_generator() {
        let builder = NetworkBuilder::new(2, 2).add_layer(3);
        let net = builder.build_with(&mut Fixed(0.25)).unwrap();

        assert_eq!(net.size(), 17);
        for neuron in net.layers().iter().flat_map(|l| l.neurons()) {
            assert!(neuron.weights().iter().all(|&w| w == 0.25));
            assert_eq!(neuron.bias(), 0.25);
        }
    }

    #[test]
    fn unbounded_budgets_only_draw_what_the_network_needs() {
        let builder = NetworkBuilder::new(4, 3).add_layer(5);
        let mut param_gen = RandParamGen::seeded(DEFAULT_SEED, usize::MAX);

        let net = builder.clone().build_with(&mut param_gen).unwrap();

        assert_eq!(net, builder.build(true).unwrap());
    }

    #[test]
    fn exhausted_generators_fail_the_build() {
        let mut param_gen = RandParamGen::seeded(DEFAULT_SEED, 4);
        let err = NetworkBuilder::new(2, 2).build_with(&mut param_gen).unwrap_err();

        assert_eq!(err, MlErr::ParamGenExhausted { got: 3, expected: 6 });
    }

    #[test]
    fn activation_functions_are_assigned_per_layer() {
        let net = NetworkBuilder::new(2, 2)
            .act_fn(ActFn::tanh())
            .add_layer(3)
            .add_layer_with(3, ActFn::sigmoid(2.))
            .output_act_fn(ActFn::sigmoid(1.))
            .build(false)
            .unwrap();

        let act_fns: Vec<_> = net.layers().iter().map(|l| l.neurons()[0].act_fn()).collect();
        assert_eq!(act_fns, [ActFn::tanh(), ActFn::sigmoid(2.), ActFn::sigmoid(1.)]);
    }
}
