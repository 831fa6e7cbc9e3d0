use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::WeightGen;
use crate::{
    Result,
    arch::{Topology, WeightIndex},
};

/// He uniform initialization: the weights leaving layer `i` are uniform in `[-r, r)` with
/// `r = sqrt(2 / size[i])`.
pub struct HeWeightGen<R: Rng> {
    rng: R,
    layers: Vec<Uniform<f32>>,
}

impl<R: Rng> HeWeightGen<R> {
    /// Creates a new `HeWeightGen` weight generator.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `topology` - The topology whose layer sizes are used as fan-in.
    ///
    /// # Returns
    /// An error if some calculated range is invalid.
    pub fn new(rng: R, topology: &Topology) -> Result<Self> {
        let sizes = topology.sizes();
        let layers = sizes[..sizes.len() - 1]
            .iter()
            .map(|&fan_in| {
                let range = (2. / fan_in as f32).sqrt();
                Uniform::new(-range, range)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { rng, layers })
    }
}

impl<R: Rng> WeightGen for HeWeightGen<R> {
    fn sample(&mut self, _topology: &Topology, at: WeightIndex) -> Option<f32> {
        let distribution = self.layers.get(at.i)?;
        Some(Distribution::sample(distribution, &mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn bounded_by_fan_in() {
        let topology = Topology::new([8, 2, 1]).unwrap();
        let mut weight_gen = HeWeightGen::new(StdRng::seed_from_u64(42), &topology).unwrap();

        let first = 0.5;
        let second = 1.;

        for j in 0..8 {
            for k in 0..2 {
                let w = weight_gen
                    .sample(&topology, WeightIndex { i: 0, j, k })
                    .unwrap();
                assert!(w.abs() <= first);
            }
        }

        for j in 0..2 {
            let w = weight_gen
                .sample(&topology, WeightIndex { i: 1, j, k: 0 })
                .unwrap();
            assert!(w.abs() <= second);
        }
    }

    #[test]
    fn unknown_layer() {
        let topology = Topology::new([2, 1]).unwrap();
        let mut weight_gen = HeWeightGen::new(StdRng::seed_from_u64(1), &topology).unwrap();

        assert!(weight_gen
            .sample(&topology, WeightIndex { i: 3, j: 0, k: 0 })
            .is_none());
    }
}
