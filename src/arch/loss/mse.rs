use ndarray::ArrayView1;

use super::LossFn;
use crate::arch::NodeView;

/// Mean squared error loss function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, targets: ArrayView1<f32>, outputs: ArrayView1<f32>) -> f32 {
        (&targets - &outputs)
            .mapv(|x| x.powi(2))
            .mean()
            .unwrap_or_default()
    }

    fn loss_prime(&self, targets: ArrayView1<f32>, node: NodeView<'_>) -> f32 {
        2. * (targets[node.j] - node.output())
    }
}
