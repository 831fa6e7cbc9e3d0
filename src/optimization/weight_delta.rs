use crate::{arch::WeightIndex, network::WeightDelta};

/// Gradient descent with momentum and weight decay.
///
/// The new velocity of the weight is `lr * (gradient - decay * weight) + momentum * velocity`,
/// it is stored back and returned as the delta.
pub fn momentum_weight_delta(ctx: WeightDelta<'_>) -> f32 {
    let WeightDelta {
        learning_rate,
        trace,
        next_errors,
        at: WeightIndex { i, j, k },
        hyperparams,
        weights,
        velocities,
    } = ctx;

    let weight = weights.get(j, k).unwrap_or_default();
    let previous = velocities.get(j, k).unwrap_or_default();
    let gradient = next_errors[k] * trace.outputs[i][j];

    let velocity = learning_rate * (gradient - hyperparams.weight_decay * weight)
        + hyperparams.momentum * previous;

    velocities.set(j, k, velocity);
    velocity
}

/// Gradient descent with weight decay, velocities are left untouched.
pub fn plain_weight_delta(ctx: WeightDelta<'_>) -> f32 {
    let WeightDelta {
        learning_rate,
        trace,
        next_errors,
        at: WeightIndex { i, j, k },
        hyperparams,
        weights,
        ..
    } = ctx;

    let weight = weights.get(j, k).unwrap_or_default();
    let gradient = next_errors[k] * trace.outputs[i][j];

    learning_rate * (gradient - hyperparams.weight_decay * weight)
}
