use std::f32::consts::PI;

use super::clamp;
use crate::{arch::NodeView, config::Hyperparams};

const CUBIC: f32 = 0.044_715;

fn inner(x: f32) -> f32 {
    (2. / PI).sqrt() * (x + CUBIC * x.powi(3))
}

/// GELU, tanh approximation.
pub fn gelu(x: f32, hyperparams: &Hyperparams) -> f32 {
    clamp(0.5 * x * (1. + inner(x).tanh()), hyperparams)
}

/// The exact derivative of the tanh approximation used by `gelu`.
///
/// This is not the `cdf + x (1 - cdf) pdf` shortcut, which mixes the tanh cdf with the normal
/// pdf and drifts away from the slope of `gelu` (about 0.81 against 0.98 at `x = 0.7`).
pub fn gelu_prime(node: NodeView<'_>, _hyperparams: &Hyperparams) -> f32 {
    let x = node.input();
    let t = inner(x).tanh();
    let d_inner = (2. / PI).sqrt() * (1. + 3. * CUBIC * x.powi(2));

    0.5 * (1. + t) + 0.5 * x * (1. - t * t) * d_inner
}
