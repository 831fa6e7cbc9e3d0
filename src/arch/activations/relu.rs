use super::clamp;
use crate::{arch::NodeView, config::Hyperparams};

pub fn relu(x: f32, hyperparams: &Hyperparams) -> f32 {
    clamp(if x < 0. { 0. } else { x }, hyperparams)
}

pub fn relu_prime(node: NodeView<'_>, _hyperparams: &Hyperparams) -> f32 {
    if node.input() > 0. { 1. } else { 0. }
}

/// A ReLU whose negative side has a slope of `activation_leak`.
pub fn leaky_relu(x: f32, hyperparams: &Hyperparams) -> f32 {
    let y = if x < 0. {
        x * hyperparams.activation_leak
    } else {
        x
    };

    clamp(y, hyperparams)
}

pub fn leaky_relu_prime(node: NodeView<'_>, hyperparams: &Hyperparams) -> f32 {
    if node.input() > 0. {
        1.
    } else {
        hyperparams.activation_leak
    }
}
