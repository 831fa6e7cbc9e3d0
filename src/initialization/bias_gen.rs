use crate::arch::{BiasIndex, Topology};

/// A `BiasGen` generates the initial value of every bias of a network. Biases are never
/// absent.
pub trait BiasGen {
    fn sample(&mut self, topology: &Topology, at: BiasIndex) -> f32;
}

impl<F> BiasGen for F
where
    F: FnMut(&Topology, BiasIndex) -> f32,
{
    fn sample(&mut self, topology: &Topology, at: BiasIndex) -> f32 {
        self(topology, at)
    }
}

/// A bias generator that always generates the same value.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstBiasGen {
    value: f32,
}

impl ConstBiasGen {
    /// Creates a new `ConstBiasGen` bias generator.
    ///
    /// # Arguments
    /// * `value` - The value to always generate.
    pub fn new(value: f32) -> Self {
        Self { value }
    }

    /// The default bias generator, every bias starts at zero.
    pub fn zero() -> Self {
        Self::new(0.)
    }
}

impl BiasGen for ConstBiasGen {
    fn sample(&mut self, _topology: &Topology, _at: BiasIndex) -> f32 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        let topology = Topology::new([1, 1]).unwrap();
        let mut bias_gen = ConstBiasGen::zero();

        assert_eq!(bias_gen.sample(&topology, BiasIndex { i: 0, j: 0 }), 0.);
    }

    #[test]
    fn closure() {
        let topology = Topology::new([1, 3]).unwrap();
        let mut bias_gen = |_: &Topology, at: BiasIndex| at.j as f32;

        assert_eq!(bias_gen.sample(&topology, BiasIndex { i: 0, j: 2 }), 2.);
    }
}
