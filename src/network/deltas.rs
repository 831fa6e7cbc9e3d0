use ndarray::{Array1, Zip};

use super::Params;
use crate::{NetErr, Result, arch::SparseMatrix};

/// The parameter changes computed by one backward pass, or the sum of several of them.
///
/// Weight deltas share the presence mask of the weights they were computed for, bias deltas are
/// dense.
#[derive(Debug, Clone, PartialEq)]
pub struct Deltas {
    pub weights: Vec<SparseMatrix>,
    pub biases: Vec<Array1<f32>>,
}

impl Deltas {
    /// Returns zeroed deltas shaped like `params`.
    pub fn zeros_like(params: &Params) -> Self {
        Self {
            weights: params.weights.iter().map(SparseMatrix::zeros_like).collect(),
            biases: params
                .biases
                .iter()
                .map(|biases| Array1::zeros(biases.len()))
                .collect(),
        }
    }

    /// Adds `other` into `self` element-wise.
    ///
    /// # Returns
    /// A `SizeMismatch` error if both deltas don't have the same shape, in which case `self` is
    /// left untouched.
    pub fn accumulate(&mut self, other: &Deltas) -> Result<()> {
        other.check_shape(&self.weights, &self.biases)?;

        for (acc, delta) in self.weights.iter_mut().zip(&other.weights) {
            acc.accumulate(delta, 1.);
        }

        for (acc, delta) in self.biases.iter_mut().zip(&other.biases) {
            *acc += delta;
        }

        Ok(())
    }

    /// Checks these deltas can be applied to the given weights and biases.
    pub(crate) fn check_shape(&self, weights: &[SparseMatrix], biases: &[Array1<f32>]) -> Result<()> {
        if self.weights.len() != weights.len() {
            return Err(NetErr::SizeMismatch {
                what: "weight delta layers",
                got: self.weights.len(),
                expected: weights.len(),
            });
        }

        if self.biases.len() != biases.len() {
            return Err(NetErr::SizeMismatch {
                what: "bias delta layers",
                got: self.biases.len(),
                expected: biases.len(),
            });
        }

        for (delta, weights) in self.weights.iter().zip(weights) {
            if delta.dim() != weights.dim() {
                let (rows, cols) = delta.dim();
                let (expected_rows, expected_cols) = weights.dim();

                return Err(NetErr::SizeMismatch {
                    what: "weight deltas",
                    got: rows * cols,
                    expected: expected_rows * expected_cols,
                });
            }
        }

        for (delta, biases) in self.biases.iter().zip(biases) {
            if delta.len() != biases.len() {
                return Err(NetErr::SizeMismatch {
                    what: "bias deltas",
                    got: delta.len(),
                    expected: biases.len(),
                });
            }
        }

        Ok(())
    }
}

/// Adds `deltas / divisor` to every bias.
pub(crate) fn apply_biases(biases: &mut [Array1<f32>], deltas: &[Array1<f32>], divisor: f32) {
    for (layer, delta) in biases.iter_mut().zip(deltas) {
        Zip::from(layer)
            .and(delta)
            .for_each(|bias, &delta| *bias += delta / divisor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        arch::Topology,
        initialization::{ConstBiasGen, ConstWeightGen},
    };

    fn params(sizes: &[usize]) -> Params {
        let topology = Topology::new(sizes).unwrap();
        Params::init(
            &topology,
            &mut ConstWeightGen::new(1.),
            &mut ConstBiasGen::zero(),
        )
    }

    #[test]
    fn zeroed() {
        let deltas = Deltas::zeros_like(&params(&[2, 3, 1]));

        assert_eq!(deltas.weights.len(), 2);
        assert_eq!(deltas.biases.len(), 2);
        assert!(deltas.weights[0].iter().all(|(_, d)| d == 0.));
        assert_eq!(deltas.biases[0].to_vec(), [0.; 3]);
    }

    #[test]
    fn accumulate() {
        let params = params(&[1, 2]);
        let mut acc = Deltas::zeros_like(&params);
        let mut delta = Deltas::zeros_like(&params);
        delta.weights[0].set(0, 1, 0.5);
        delta.biases[0][0] = -1.;

        acc.accumulate(&delta).unwrap();
        acc.accumulate(&delta).unwrap();

        assert_eq!(acc.weights[0].get(0, 1), Some(1.));
        assert_eq!(acc.weights[0].get(0, 0), Some(0.));
        assert_eq!(acc.biases[0].to_vec(), [-2., 0.]);
    }

    #[test]
    fn mismatch() {
        let mut acc = Deltas::zeros_like(&params(&[1, 2]));
        let other = Deltas::zeros_like(&params(&[1, 3]));

        assert!(matches!(
            acc.accumulate(&other),
            Err(NetErr::SizeMismatch {
                what: "weight deltas",
                got: 3,
                expected: 2,
            })
        ));
    }

    #[test]
    fn averaged_biases() {
        let mut biases = vec![Array1::from(vec![1., 1.])];
        let deltas = vec![Array1::from(vec![4., -2.])];

        apply_biases(&mut biases, &deltas, 2.);
        assert_eq!(biases[0].to_vec(), [3., 0.]);
    }
}
