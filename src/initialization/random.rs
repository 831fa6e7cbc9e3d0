use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

use super::WeightGen;
use crate::{
    Result,
    arch::{Topology, WeightIndex},
};

/// A weight generator that follows a certain probabilistic distribution, the same for every
/// layer.
pub struct RandWeightGen<R: Rng, D: Distribution<f32>> {
    rng: R,
    distribution: D,
}

impl<R: Rng, D: Distribution<f32>> RandWeightGen<R, D> {
    /// Creates a new `RandWeightGen` weight generator.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `distribution` - The distribution to sample the random numbers from.
    pub fn new(rng: R, distribution: D) -> Self {
        Self { rng, distribution }
    }
}

impl<R: Rng> RandWeightGen<R, Uniform<f32>> {
    /// Creates a new `RandWeightGen` weight generator with a uniform distribution.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high).
    pub fn uniform(rng: R, low: f32, high: f32) -> Result<Self> {
        Ok(Self::new(rng, Uniform::new(low, high)?))
    }

    /// Creates a new `RandWeightGen` weight generator uniform in `[-0.5, 0.5)`.
    pub fn centered(rng: R) -> Result<Self> {
        Self::uniform(rng, -0.5, 0.5)
    }
}

impl<R: Rng> RandWeightGen<R, Normal<f32>> {
    /// Creates a new `RandWeightGen` weight generator with a normal distribution.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `mean` - The mean of the distribution.
    /// * `std_dev` - The standard deviation of the distribution.
    ///
    /// # Returns
    /// An error if `std_dev` is not finite (Nan or infinite).
    pub fn normal(rng: R, mean: f32, std_dev: f32) -> Result<Self> {
        Ok(Self::new(rng, Normal::new(mean, std_dev)?))
    }
}

impl<R: Rng, D: Distribution<f32>> WeightGen for RandWeightGen<R, D> {
    fn sample(&mut self, _topology: &Topology, _at: WeightIndex) -> Option<f32> {
        Some(Distribution::sample(&self.distribution, &mut self.rng))
    }
}
