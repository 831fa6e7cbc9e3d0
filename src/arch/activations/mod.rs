mod act_fn;
mod elu;
mod gelu;
mod relu;
mod sigmoid;

pub use act_fn::ActFn;
pub use elu::{elu, elu_prime};
pub use gelu::{gelu, gelu_prime};
pub use relu::{leaky_relu, leaky_relu_prime, relu, relu_prime};
pub use sigmoid::{sigmoid, sigmoid_prime};

use crate::config::Hyperparams;

/// Caps an activation's output at the maximum safe output size. NaN goes through untouched.
fn clamp(y: f32, hyperparams: &Hyperparams) -> f32 {
    if y > hyperparams.max_safe_output {
        hyperparams.max_safe_output
    } else {
        y
    }
}
