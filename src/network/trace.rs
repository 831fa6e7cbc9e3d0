use ndarray::{Array1, ArrayView1};

use crate::arch::{NodeView, Topology};

/// The per-layer vectors of one forward pass, input layer included (where the inputs and
/// outputs are both the raw input vector).
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardTrace {
    /// Pre-activation values, the weighted sums plus biases.
    pub inputs: Vec<Array1<f32>>,
    /// Post-activation values.
    pub outputs: Vec<Array1<f32>>,
}

impl ForwardTrace {
    /// Returns a view of node `j` of layer `layer`.
    pub fn node(&self, layer: usize, j: usize) -> NodeView<'_> {
        NodeView {
            inputs: self.inputs[layer].view(),
            outputs: self.outputs[layer].view(),
            j,
        }
    }

    /// The outputs of the last layer.
    pub fn prediction(&self) -> ArrayView1<'_, f32> {
        self.outputs[self.outputs.len() - 1].view()
    }

    pub fn into_prediction(mut self) -> Array1<f32> {
        self.outputs.pop().unwrap_or_default()
    }
}

/// Scratch space holding the activation derivative of every node, filled lazily during a
/// backward pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivativeCache {
    slopes: Vec<Vec<Option<f32>>>,
}

impl DerivativeCache {
    /// Creates an empty `DerivativeCache` with room for every node of `topology`.
    pub fn new(topology: &Topology) -> Self {
        Self {
            slopes: topology.sizes().iter().map(|&n| vec![None; n]).collect(),
        }
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        self.slopes.get(i)?.get(j).copied().flatten()
    }

    /// Stores the derivative of node `j` of layer `i`, out of range positions are ignored.
    pub fn insert(&mut self, i: usize, j: usize, slope: f32) {
        if let Some(slot) = self.slopes.get_mut(i).and_then(|layer| layer.get_mut(j)) {
            *slot = Some(slope);
        }
    }

    /// Returns the cached derivative of node `j` of layer `i`, computing and storing it first if
    /// it is missing.
    pub fn get_or_insert_with<F>(&mut self, i: usize, j: usize, f: F) -> f32
    where
        F: FnOnce() -> f32,
    {
        if let Some(slope) = self.get(i, j) {
            return slope;
        }

        let slope = f();
        self.insert(i, j, slope);
        slope
    }

    pub fn clear(&mut self) {
        self.slopes.iter_mut().for_each(|layer| layer.fill(None));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazy() {
        let topology = Topology::new([2, 1]).unwrap();
        let mut cache = DerivativeCache::new(&topology);
        let mut calls = 0;

        for _ in 0..3 {
            let slope = cache.get_or_insert_with(0, 1, || {
                calls += 1;
                0.5
            });
            assert_eq!(slope, 0.5);
        }

        assert_eq!(calls, 1);
        assert_eq!(cache.get(0, 1), Some(0.5));
        assert_eq!(cache.get(0, 0), None);
    }

    #[test]
    fn clear() {
        let topology = Topology::new([1, 1]).unwrap();
        let mut cache = DerivativeCache::new(&topology);
        cache.insert(1, 0, 2.);
        cache.clear();

        assert_eq!(cache.get(1, 0), None);
    }

    #[test]
    fn out_of_range() {
        let topology = Topology::new([1, 1]).unwrap();
        let mut cache = DerivativeCache::new(&topology);
        cache.insert(5, 5, 1.);

        assert_eq!(cache.get(5, 5), None);
        assert_eq!(cache.get_or_insert_with(5, 5, || 3.), 3.);
    }
}
