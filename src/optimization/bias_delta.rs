use crate::network::BiasDelta;

/// The node's error scaled by the learning rate.
pub fn simple_bias_delta(ctx: BiasDelta<'_>) -> f32 {
    ctx.learning_rate * ctx.node_error
}
