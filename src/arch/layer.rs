use ndarray::{Array1, ArrayView1};

use super::{activations::ActFn, neuron::Neuron};
use crate::{MlErr, Result};

/// An ordered group of neurons fed by the same input vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Creates a new `Layer` of zero-initialized neurons.
    ///
    /// # Arguments
    /// * `width` - The amount of neurons, i.e. the amount of outputs.
    /// * `inputs` - The amount of inputs every neuron accepts.
    /// * `act_fn` - The activation function shared by the neurons.
    ///
    /// # Returns
    /// A new `Layer` instance.
    pub fn new(width: usize, inputs: usize, act_fn: ActFn) -> Self {
        Self {
            neurons: (0..width).map(|_| Neuron::new(inputs, act_fn)).collect(),
        }
    }

    /// Creates a new `Layer` out of already built neurons.
    ///
    /// # Returns
    /// A new `Layer` or an error if `neurons` is empty or its neurons disagree on their amount
    /// of inputs.
    pub fn from_neurons(neurons: Vec<Neuron>) -> Result<Self> {
        let Some(first) = neurons.first() else {
            return Err(MlErr::configuration("a layer must have at least one neuron"));
        };

        let inputs = first.inputs();
        if neurons.iter().any(|n| n.inputs() != inputs) {
            return Err(MlErr::configuration(
                "every neuron in a layer must accept the same amount of inputs",
            ));
        }

        Ok(Self { neurons })
    }

    /// Returns the amount of neurons in this layer.
    pub fn width(&self) -> usize {
        self.neurons.len()
    }

    /// Returns the amount of inputs this layer accepts.
    pub fn inputs(&self) -> usize {
        self.neurons.first().map(Neuron::inputs).unwrap_or_default()
    }

    /// Returns the amount of parameters (weights and biases) in this layer.
    pub fn size(&self) -> usize {
        self.neurons.iter().map(|n| n.inputs() + 1).sum()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub(crate) fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    /// Activates every neuron against `x`, caching their outputs.
    ///
    /// # Returns
    /// The outputs in neuron order.
    pub fn activate(&mut self, x: ArrayView1<f32>) -> Array1<f32> {
        self.neurons.iter_mut().map(|n| n.activate(x)).collect()
    }

    /// Same as `activate` but leaves the neurons untouched.
    pub fn evaluate(&self, x: ArrayView1<f32>) -> Array1<f32> {
        self.neurons.iter().map(|n| n.evaluate(x)).collect()
    }

    /// Updates the weights of the `idx`-th neuron only.
    ///
    /// # Panics
    /// If `idx` is out of bounds or `x` has the wrong width.
    pub fn update_weights(
        &mut self,
        idx: usize,
        learning_rate: f32,
        delta: f32,
        x: ArrayView1<f32>,
    ) {
        self.neurons[idx].update_weights(learning_rate, delta, x);
    }
}
