use ndarray::ArrayView1;

use crate::arch::NodeView;

/// A loss function together with its derivative.
pub trait LossFn {
    /// The loss of a whole output vector.
    fn loss(&self, targets: ArrayView1<f32>, outputs: ArrayView1<f32>) -> f32;

    /// The derivative of the loss with respect to output node `node.j`, pointing in the
    /// direction that *reduces* the loss, since deltas are added to the parameters.
    fn loss_prime(&self, targets: ArrayView1<f32>, node: NodeView<'_>) -> f32;
}
