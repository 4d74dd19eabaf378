use super::{Sigmoid, Tanh};

/// The activation function carried by every neuron.
///
/// Both operations work on scalars: `activate` maps a weighted sum to the neuron's output and
/// `derivative` gives the slope of the function **in terms of that output**, not of the weighted
/// sum. Backpropagation only keeps the outputs around, so this is the form it needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActFn {
    Sigmoid(Sigmoid),
    Tanh(Tanh),
}

impl ActFn {
    /// Returns a sigmoid activation with amplitude `amp`.
    pub fn sigmoid(amp: f32) -> Self {
        Self::Sigmoid(Sigmoid::new(amp))
    }

    /// Returns a hyperbolic tangent activation.
    pub fn tanh() -> Self {
        Self::Tanh(Tanh::new())
    }

    /// Applies the function to a weighted sum.
    pub fn activate(&self, z: f32) -> f32 {
        match self {
            Self::Sigmoid(a) => a.f(z),
            Self::Tanh(a) => a.f(z),
        }
    }

    /// Computes the derivative given `y`, a value previously returned by `activate`.
    pub fn derivative(&self, y: f32) -> f32 {
        match self {
            Self::Sigmoid(a) => a.df(y),
            Self::Tanh(a) => a.df(y),
        }
    }
}

impl Default for ActFn {
    fn default() -> Self {
        Self::Sigmoid(Sigmoid::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_unit_sigmoid() {
        assert_eq!(ActFn::default(), ActFn::sigmoid(1.));
    }

    #[test]
    fn dispatches_to_the_variant() {
        let sigmoid = ActFn::sigmoid(1.);
        let tanh = ActFn::tanh();

        assert_eq!(sigmoid.activate(0.), 0.5);
        assert_eq!(tanh.activate(0.), 0.);
        assert_eq!(sigmoid.derivative(0.5), 0.25);
        assert_eq!(tanh.derivative(0.5), 0.75);
    }
}
