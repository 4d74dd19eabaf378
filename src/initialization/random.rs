use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Uniform};

use super::{ParamGen, Result};

/// The seed used whenever a network is built with random weights and no explicit generator.
pub const DEFAULT_SEED: u64 = 0;

const INIT_LOW: f32 = 0.;
const INIT_HIGH: f32 = 0.5;

/// Draws every parameter independently from a distribution.
///
/// The generator owns its random number generator, so two instances created from the same seed
/// initialize identical networks. It stops handing out neurons once `budget` parameters would be
/// exceeded.
pub struct RandParamGen<R: Rng, D: Distribution<f32>> {
    rng: R,
    distribution: D,
    budget: usize,
}

impl<R: Rng, D: Distribution<f32>> RandParamGen<R, D> {
    /// Creates a new `RandParamGen`.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `distribution` - The distribution every weight and bias is drawn from.
    /// * `budget` - The maximum amount of parameters to draw.
    pub fn new(rng: R, distribution: D, budget: usize) -> Self {
        Self {
            rng,
            distribution,
            budget,
        }
    }

    fn draw(&mut self) -> f32 {
        self.distribution.sample(&mut self.rng)
    }
}

impl<R: Rng> RandParamGen<R, Uniform<f32>> {
    /// Creates a new `RandParamGen` drawing uniformly from `[low, high)`.
    ///
    /// # Returns
    /// An error if the range is empty or not finite.
    pub fn uniform(rng: R, budget: usize, low: f32, high: f32) -> Result<Self> {
        Ok(Self::new(rng, Uniform::new(low, high)?, budget))
    }
}

impl RandParamGen<StdRng, Uniform<f32>> {
    /// Creates the generator used for randomly initialized networks: uniform over `[0, 0.5)`,
    /// driven by a `StdRng` seeded with `seed`.
    pub fn seeded(seed: u64, budget: usize) -> Self {
        // Finite constant bounds with low < high, `Uniform::new` cannot fail.
        let distribution = Uniform::new(INIT_LOW, INIT_HIGH).expect("[0, 0.5) is a valid range");
        Self::new(StdRng::seed_from_u64(seed), distribution, budget)
    }
}

impl<R: Rng, D: Distribution<f32>> ParamGen for RandParamGen<R, D> {
    fn neuron(&mut self, inputs: usize) -> Option<(Vec<f32>, f32)> {
        self.budget = self.budget.checked_sub(inputs + 1)?;

        let weights = (0..inputs).map(|_| self.draw()).collect();
        let bias = self.draw();
        Some((weights, bias))
    }
}
