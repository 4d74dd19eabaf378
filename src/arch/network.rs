use log::debug;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use rayon::prelude::*;

use super::layer::Layer;
use crate::{MlErr, Result, initialization::ParamGen};

/// A feedforward network: information flows through its layers in order, every layer's output
/// being the next one's input.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    inputs: usize,
    layers: Vec<Layer>,
}

impl Network {
    /// Creates a new `Network` out of already built layers.
    ///
    /// # Arguments
    /// * `inputs` - The width of the input vectors.
    /// * `layers` - The layers, first to last.
    ///
    /// # Returns
    /// A new `Network` or an error if there are no layers or two consecutive layers (or the
    /// input and the first layer) disagree on their widths.
    pub fn from_layers(inputs: usize, layers: Vec<Layer>) -> Result<Self> {
        if inputs == 0 {
            return Err(MlErr::configuration("the number of inputs must be positive"));
        }

        if layers.is_empty() {
            return Err(MlErr::configuration("a network must have at least one layer"));
        }

        let mut width = inputs;
        for layer in &layers {
            if layer.width() == 0 {
                return Err(MlErr::configuration("every layer must have at least one neuron"));
            }

            if layer.inputs() != width {
                return Err(MlErr::configuration(
                    "every layer's inputs must match the previous layer's width",
                ));
            }

            width = layer.width();
        }

        Ok(Self { inputs, layers })
    }

    /// Returns the width of the input vectors.
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    /// Checks that examples with `width` features can be fed to this network.
    ///
    /// # Returns
    /// An error naming both widths if they differ.
    pub fn check_width(&self, width: usize) -> Result<()> {
        if width != self.inputs {
            return Err(MlErr::InputWidth {
                got: width,
                expected: self.inputs,
            });
        }

        Ok(())
    }

    /// Returns the amount of classes, the last layer's width.
    pub fn outputs(&self) -> usize {
        self.layers.last().map(Layer::width).unwrap_or_default()
    }

    /// Returns the amount of parameters in the network.
    pub fn size(&self) -> usize {
        self.layers.iter().map(Layer::size).sum()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Overwrites every parameter with values drawn from `param_gen`, layer by layer and neuron
    /// by neuron, weights first and then the bias.
    ///
    /// # Returns
    /// An error if the generator is exhausted before every parameter was drawn.
    pub fn initialize<G: ParamGen + ?Sized>(&mut self, param_gen: &mut G) -> Result<()> {
        let expected = self.size();
        let mut got = 0;

        for layer in &mut self.layers {
            for neuron in layer.neurons_mut() {
                let inputs = neuron.inputs();
                let (weights, bias) = param_gen
                    .neuron(inputs)
                    .ok_or(MlErr::ParamGenExhausted { got, expected })?;

                neuron.assign(weights, bias);
                got += inputs + 1;
            }
        }

        debug!("initialized {got} parameters");
        Ok(())
    }

    /// Makes a forward pass through the network.
    ///
    /// # Panics
    /// If `x` does not have `inputs()` values.
    pub fn forward(&self, x: ArrayView1<f32>) -> Array1<f32> {
        let mut y = x.to_owned();

        for layer in &self.layers {
            y = layer.evaluate(y.view());
        }

        y
    }

    /// Classifies `x`.
    ///
    /// # Returns
    /// The index of the greatest output, or `None` if the network has no outputs.
    pub fn recognize(&self, x: ArrayView1<f32>) -> Option<usize> {
        index_max(self.forward(x).view())
    }

    /// Classifies every row of `x`, in parallel.
    ///
    /// # Returns
    /// One class per row, in row order.
    pub fn recognize_all(&self, x: ArrayView2<f32>) -> Vec<Option<usize>> {
        x.axis_iter(Axis(0))
            .into_par_iter()
            .map(|row| self.recognize(row))
            .collect()
    }
}

/// Returns the index of the greatest value, the first one on ties, or `None` for an empty
/// slice.
pub fn index_max(values: ArrayView1<f32>) -> Option<usize> {
    let mut iter = values.iter().enumerate();
    let (mut index, mut max) = iter.next()?;

    for (i, v) in iter {
        if v > max {
            index = i;
            max = v;
        }
    }

    Some(index)
}
