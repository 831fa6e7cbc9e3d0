use crate::{arch::NodeView, config::Hyperparams};

pub fn sigmoid(x: f32, _hyperparams: &Hyperparams) -> f32 {
    1. / (1. + (-x).exp())
}

/// Uses the node's output, `s * (1 - s)`.
pub fn sigmoid_prime(node: NodeView<'_>, _hyperparams: &Hyperparams) -> f32 {
    let s = node.output();
    s * (1. - s)
}
