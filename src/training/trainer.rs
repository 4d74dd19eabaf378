use std::num::NonZeroUsize;

use log::{info, trace};
use ndarray::{Array1, ArrayView1};

use super::EpochStats;
use crate::{
    arch::{Network, index_max},
    dataset::Dataset,
};

/// Per layer scratch of a single example: its forward outputs and its error signals.
struct LayerData {
    outputs: Array1<f32>,
    deltas: Array1<f32>,
}

impl LayerData {
    fn new(outputs: Array1<f32>) -> Self {
        let deltas = Array1::zeros(outputs.len());
        Self { outputs, deltas }
    }
}

/// Trains a `Network` with online gradient descent, one example at a time, backpropagating
/// each example's error before the next one is seen.
pub struct BackpropTrainer<'a> {
    network: &'a mut Network,
    learning_rate: f32,
}

impl<'a> BackpropTrainer<'a> {
    /// Creates a new `BackpropTrainer`.
    ///
    /// # Arguments
    /// * `network` - The network to train in place.
    /// * `learning_rate` - The length of every gradient descent step.
    pub fn new(network: &'a mut Network, learning_rate: f32) -> Self {
        Self {
            network,
            learning_rate,
        }
    }

    pub fn network(&self) -> &Network {
        self.network
    }

    /// Runs `max_epochs` full passes over `dataset`, always in dataset order.
    ///
    /// # Returns
    /// The statistics of every epoch, first to last.
    pub fn train(&mut self, dataset: &Dataset, max_epochs: NonZeroUsize) -> Vec<EpochStats> {
        (1..=max_epochs.get())
            .map(|epoch| {
                let stats = self.train_epoch(epoch, dataset);
                info!(
                    epoch = stats.epoch(),
                    right = stats.right_recognized(),
                    samples = stats.samples(),
                    accuracy = stats.accuracy();
                    "finished epoch"
                );
                stats
            })
            .collect()
    }

    /// Makes a single pass over `dataset`.
    pub fn train_epoch(&mut self, epoch: usize, dataset: &Dataset) -> EpochStats {
        let mut right_recognized = 0;

        for (label, x) in dataset.iter() {
            if self.train_sample(label, x) {
                right_recognized += 1;
            }
        }

        EpochStats::new(epoch, right_recognized, dataset.len())
    }

    /// Trains the network on a single example.
    ///
    /// # Arguments
    /// * `label` - The expected class. Out of range labels get an all-zero target.
    /// * `x` - The example's features.
    ///
    /// # Returns
    /// Whether the network recognized the example before learning from it.
    pub fn train_sample(&mut self, label: usize, x: ArrayView1<f32>) -> bool {
        let mut data = self.forward_propagation(x);

        let prediction = data.last().and_then(|d| index_max(d.outputs.view()));
        self.prepare_deltas(label, &mut data);
        self.update_weights(x, &data);

        prediction == Some(label)
    }

    fn forward_propagation(&mut self, x: ArrayView1<f32>) -> Vec<LayerData> {
        let layers = self.network.layers_mut();
        let mut data: Vec<LayerData> = Vec::with_capacity(layers.len());

        for layer in layers {
            let outputs = match data.last() {
                Some(prev) => layer.activate(prev.outputs.view()),
                None => layer.activate(x),
            };

            data.push(LayerData::new(outputs));
        }

        data
    }

    fn prepare_deltas(&self, label: usize, data: &mut [LayerData]) {
        let layers = self.network.layers();
        let Some(last) = data.len().checked_sub(1) else {
            return;
        };

        let output = &mut data[last];
        for (j, neuron) in layers[last].neurons().iter().enumerate() {
            let o = output.outputs[j];
            let target = if j == label { 1. } else { 0. };
            output.deltas[j] = (target - o) * neuron.act_fn().derivative(o);
        }

        for l in (0..last).rev() {
            let (head, tail) = data.split_at_mut(l + 1);
            let (current, next) = (&mut head[l], &tail[0]);
            let next_neurons = layers[l + 1].neurons();

            for (i, neuron) in layers[l].neurons().iter().enumerate() {
                let sum: f32 = next_neurons
                    .iter()
                    .zip(&next.deltas)
                    .map(|(n, delta)| delta * n.weights()[i])
                    .sum();

                current.deltas[i] = sum * neuron.act_fn().derivative(current.outputs[i]);
            }
        }

        trace!("output deltas: {}", data[last].deltas);
    }

    fn update_weights(&mut self, x: ArrayView1<f32>, data: &[LayerData]) {
        let lr = self.learning_rate;

        for (l, layer) in self.network.layers_mut().iter_mut().enumerate() {
            let inputs = match l {
                0 => x,
                _ => data[l - 1].outputs.view(),
            };

            for (i, &delta) in data[l].deltas.iter().enumerate() {
                layer.update_weights(i, lr, delta, inputs);
            }
        }
    }
}
