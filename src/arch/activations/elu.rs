use super::clamp;
use crate::{arch::NodeView, config::Hyperparams};

/// Exponential linear unit with alpha fixed at 1.
pub fn elu(x: f32, hyperparams: &Hyperparams) -> f32 {
    let y = if x > 0. { x } else { x.exp() - 1. };
    clamp(y, hyperparams)
}

/// `1` on the positive side, `elu(x) + 1` (that is, `e^x`) on the negative one.
pub fn elu_prime(node: NodeView<'_>, hyperparams: &Hyperparams) -> f32 {
    let x = node.input();

    if x > 0. { 1. } else { elu(x, hyperparams) + 1. }
}
