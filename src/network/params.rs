use ndarray::Array1;

use crate::{
    arch::{BiasIndex, SparseMatrix, Topology, WeightIndex},
    initialization::{BiasGen, WeightGen},
};

/// The parameter state of a network: weights and velocities per layer transition, biases per
/// non-input layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub(crate) weights: Vec<SparseMatrix>,
    pub(crate) biases: Vec<Array1<f32>>,
    pub(crate) velocities: Vec<SparseMatrix>,
}

impl Params {
    /// Creates the parameters of a network with the given topology.
    ///
    /// # Arguments
    /// * `topology` - The shape of the network.
    /// * `weight_gen` - Called once per weight slot, `None` leaves the slot absent.
    /// * `bias_gen` - Called once per bias.
    ///
    /// # Returns
    /// A new `Params` instance whose velocities are all zero.
    pub(crate) fn init(
        topology: &Topology,
        weight_gen: &mut dyn WeightGen,
        bias_gen: &mut dyn BiasGen,
    ) -> Self {
        let transitions = topology.layers() - 1;
        let mut weights = Vec::with_capacity(transitions);
        let mut biases = Vec::with_capacity(transitions);

        for (i, pair) in topology.sizes().windows(2).enumerate() {
            let (rows, cols) = (pair[0], pair[1]);
            let mut layer = SparseMatrix::absent(rows, cols);

            for j in 0..rows {
                for k in 0..cols {
                    if let Some(value) = weight_gen.sample(topology, WeightIndex { i, j, k }) {
                        layer.insert(j, k, value);
                    }
                }
            }

            weights.push(layer);
            biases.push(Array1::from_iter(
                (0..cols).map(|j| bias_gen.sample(topology, BiasIndex { i, j })),
            ));
        }

        let velocities = weights.iter().map(SparseMatrix::zeros_like).collect();

        Self {
            weights,
            biases,
            velocities,
        }
    }

    pub fn weights(&self) -> &[SparseMatrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Array1<f32>] {
        &self.biases
    }

    pub fn velocities(&self) -> &[SparseMatrix] {
        &self.velocities
    }

    /// The amount of present weights.
    pub fn weight_count(&self) -> usize {
        self.weights.iter().map(SparseMatrix::count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialization::{ConstBiasGen, ConstWeightGen};

    #[test]
    fn shapes() {
        let topology = Topology::new([2, 3, 1]).unwrap();
        let params = Params::init(
            &topology,
            &mut ConstWeightGen::new(0.1),
            &mut ConstBiasGen::zero(),
        );

        assert_eq!(params.weights().len(), 2);
        assert_eq!(params.weights()[0].dim(), (2, 3));
        assert_eq!(params.weights()[1].dim(), (3, 1));
        assert_eq!(params.biases()[0].len(), 3);
        assert_eq!(params.biases()[1].len(), 1);
        assert_eq!(params.weight_count(), topology.max_weight_count());

        for (w, v) in params.weights().iter().zip(params.velocities()) {
            assert_eq!(w.dim(), v.dim());
            assert_eq!(w.count(), v.count());
            assert!(v.iter().all(|(_, value)| value == 0.));
        }
    }

    #[test]
    fn sparse() {
        let topology = Topology::new([2, 2]).unwrap();
        let mut weight_gen = |_: &Topology, at: WeightIndex| (at.j == at.k).then_some(1.);
        let params = Params::init(&topology, &mut weight_gen, &mut ConstBiasGen::zero());

        assert_eq!(params.weight_count(), 2);
        assert_eq!(params.weights()[0].get(0, 1), None);
        assert_eq!(params.velocities()[0].get(0, 1), None);
        assert_eq!(params.velocities()[0].get(1, 1), Some(0.));
    }

    #[test]
    fn bias_positions() {
        let topology = Topology::new([1, 2, 3]).unwrap();
        let mut bias_gen = |_: &Topology, at: BiasIndex| (10 * at.i + at.j) as f32;
        let params = Params::init(&topology, &mut ConstWeightGen::new(0.), &mut bias_gen);

        assert_eq!(params.biases()[0].to_vec(), [0., 1.]);
        assert_eq!(params.biases()[1].to_vec(), [10., 11., 12.]);
    }
}
