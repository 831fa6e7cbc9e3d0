mod bias_delta;
mod learning_rate;
mod weight_delta;

pub use bias_delta::simple_bias_delta;
pub use learning_rate::{constant_learning_rate, decaying_learning_rate};
pub use weight_delta::{momentum_weight_delta, plain_weight_delta};
