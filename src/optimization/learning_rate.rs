use crate::network::LearningRate;

/// Always the base learning rate.
pub fn constant_learning_rate(ctx: LearningRate) -> f32 {
    ctx.base
}

/// A schedule that shrinks the base learning rate as training goes on:
/// `base / (1 + decay * samples_seen)`.
pub fn decaying_learning_rate(decay: f32) -> impl Fn(LearningRate) -> f32 + Send + 'static {
    move |ctx: LearningRate| ctx.base / (1. + decay * ctx.samples_seen as f32)
}
