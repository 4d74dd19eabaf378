/// Source of the initial weights and biases of a network.
///
/// Networks are initialized layer by layer and neuron by neuron, so a generator hands out the
/// parameters of one whole neuron at a time.
pub trait ParamGen {
    /// Draws the parameters of a neuron with `inputs` weights.
    ///
    /// # Returns
    /// The weights and the bias, in that order, or `None` once the generator can no longer
    /// provide a whole neuron.
    fn neuron(&mut self, inputs: usize) -> Option<(Vec<f32>, f32)>;
}
