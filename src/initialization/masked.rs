use super::WeightGen;
use crate::arch::{Topology, WeightIndex};

/// A weight generator that delegates to another one only for the slots `keep` accepts, leaving
/// every other slot absent.
pub struct MaskedWeightGen<G, M> {
    inner: G,
    keep: M,
}

impl<G, M> MaskedWeightGen<G, M>
where
    G: WeightGen,
    M: FnMut(WeightIndex) -> bool,
{
    /// Creates a new `MaskedWeightGen` weight generator.
    ///
    /// # Arguments
    /// * `inner` - The generator for the kept slots.
    /// * `keep` - Decides whether a slot exists.
    pub fn new(inner: G, keep: M) -> Self {
        Self { inner, keep }
    }
}

impl<G, M> WeightGen for MaskedWeightGen<G, M>
where
    G: WeightGen,
    M: FnMut(WeightIndex) -> bool,
{
    fn sample(&mut self, topology: &Topology, at: WeightIndex) -> Option<f32> {
        if !(self.keep)(at) {
            return None;
        }

        self.inner.sample(topology, at)
    }
}
