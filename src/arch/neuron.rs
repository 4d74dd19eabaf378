use ndarray::{Array1, ArrayView1};

use super::activations::ActFn;

/// A single unit: a weight per input, a bias and an activation function.
///
/// The unit computes `act_fn(w · x - bias)`. Note the bias is *subtracted*, and accordingly the
/// learning rule moves it in the opposite direction of the weights.
#[derive(Clone, Debug, PartialEq)]
pub struct Neuron {
    weights: Array1<f32>,
    bias: f32,
    act_fn: ActFn,

    // Forward metadata
    output: f32,
}

impl Neuron {
    /// Creates a new `Neuron` with every weight and the bias set to zero.
    ///
    /// # Arguments
    /// * `inputs` - The amount of inputs the neuron accepts.
    /// * `act_fn` - The neuron's activation function.
    ///
    /// # Returns
    /// A new `Neuron` instance.
    pub fn new(inputs: usize, act_fn: ActFn) -> Self {
        Self::with_params(vec![0.; inputs], 0., act_fn)
    }

    /// Creates a new `Neuron` with the given parameters.
    ///
    /// # Arguments
    /// * `weights` - One weight per input.
    /// * `bias` - The value subtracted from the weighted sum.
    /// * `act_fn` - The neuron's activation function.
    ///
    /// # Returns
    /// A new `Neuron` instance.
    pub fn with_params(weights: Vec<f32>, bias: f32, act_fn: ActFn) -> Self {
        Self {
            weights: Array1::from(weights),
            bias,
            act_fn,
            output: 0.,
        }
    }

    /// Returns the amount of inputs this neuron accepts.
    pub fn inputs(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> ArrayView1<'_, f32> {
        self.weights.view()
    }

    pub fn bias(&self) -> f32 {
        self.bias
    }

    pub fn act_fn(&self) -> ActFn {
        self.act_fn
    }

    /// Returns the output cached by the last `activate` call.
    pub fn output(&self) -> f32 {
        self.output
    }

    /// Overwrites the weights and the bias, keeping the amount of inputs.
    ///
    /// # Panics
    /// If `weights` does not hold exactly one value per input.
    pub(crate) fn assign(&mut self, weights: Vec<f32>, bias: f32) {
        assert_eq!(
            weights.len(),
            self.inputs(),
            "expected {} weights, got {}",
            self.inputs(),
            weights.len()
        );

        self.weights = Array1::from(weights);
        self.bias = bias;
    }

    /// Computes the neuron's output and caches it for the backward pass.
    ///
    /// # Panics
    /// If `x` does not have one value per weight.
    pub fn activate(&mut self, x: ArrayView1<f32>) -> f32 {
        self.output = self.evaluate(x);
        self.output
    }

    /// Computes the neuron's output without touching the cached one.
    ///
    /// # Panics
    /// If `x` does not have one value per weight.
    pub fn evaluate(&self, x: ArrayView1<f32>) -> f32 {
        self.check_inputs(x);
        let z = self.weights.dot(&x) - self.bias;
        self.act_fn.activate(z)
    }

    /// Takes a gradient descent step given this neuron's error signal.
    ///
    /// # Arguments
    /// * `learning_rate` - The length of the step.
    /// * `delta` - The error signal of this neuron.
    /// * `x` - The inputs this neuron saw on the forward pass.
    ///
    /// # Panics
    /// If `x` does not have one value per weight.
    pub fn update_weights(&mut self, learning_rate: f32, delta: f32, x: ArrayView1<f32>) {
        self.check_inputs(x);
        let step = learning_rate * delta;

        self.weights.scaled_add(step, &x);
        self.bias -= step;
    }

    fn check_inputs(&self, x: ArrayView1<f32>) {
        assert_eq!(
            x.len(),
            self.weights.len(),
            "dimension mismatch: got {} inputs for a neuron with {} weights",
            x.len(),
            self.weights.len()
        );
    }
}
