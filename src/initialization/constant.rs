use super::WeightGen;
use crate::arch::{Topology, WeightIndex};

/// A weight generator that always generates the same value.
#[derive(Debug, Clone, Copy)]
pub struct ConstWeightGen {
    value: f32,
}

impl ConstWeightGen {
    /// Creates a new `ConstWeightGen` weight generator.
    ///
    /// # Arguments
    /// * `value` - The value to always generate.
    ///
    /// # Returns
    /// A new `ConstWeightGen` instance.
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl WeightGen for ConstWeightGen {
    fn sample(&mut self, _topology: &Topology, _at: WeightIndex) -> Option<f32> {
        Some(self.value)
    }
}
