use serde::{Deserialize, Serialize};

use super::{
    elu, elu_prime, gelu, gelu_prime, leaky_relu, leaky_relu_prime, relu, relu_prime, sigmoid,
    sigmoid_prime,
};
use crate::{
    arch::NodeView,
    config::Hyperparams,
    network::{ActivationFn, ActivationPrimeFn},
};

/// The built-in activation functions, each paired with its derivative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActFn {
    Sigmoid,
    Relu,
    LeakyRelu,
    #[default]
    Elu,
    Gelu,
}
use ActFn::*;

impl ActFn {
    pub fn f(&self, x: f32, hyperparams: &Hyperparams) -> f32 {
        match self {
            Sigmoid => sigmoid(x, hyperparams),
            Relu => relu(x, hyperparams),
            LeakyRelu => leaky_relu(x, hyperparams),
            Elu => elu(x, hyperparams),
            Gelu => gelu(x, hyperparams),
        }
    }

    pub fn df(&self, node: NodeView<'_>, hyperparams: &Hyperparams) -> f32 {
        match self {
            Sigmoid => sigmoid_prime(node, hyperparams),
            Relu => relu_prime(node, hyperparams),
            LeakyRelu => leaky_relu_prime(node, hyperparams),
            Elu => elu_prime(node, hyperparams),
            Gelu => gelu_prime(node, hyperparams),
        }
    }

    /// Boxes `f` so it can be plugged into a network.
    pub fn activation(self) -> ActivationFn {
        Box::new(move |x: f32, hyperparams: &Hyperparams| self.f(x, hyperparams))
    }

    /// Boxes `df` so it can be plugged into a network.
    pub fn activation_prime(self) -> ActivationPrimeFn {
        Box::new(move |node: NodeView<'_>, hyperparams: &Hyperparams| self.df(node, hyperparams))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_matches_direct() {
        let hp = Hyperparams::default();

        for act_fn in [Sigmoid, Relu, LeakyRelu, Elu, Gelu] {
            let boxed = act_fn.activation();
            assert_eq!(boxed(-0.3, &hp), act_fn.f(-0.3, &hp));
        }
    }

    #[test]
    fn spec_names() {
        let act_fn: ActFn = serde_json::from_str("\"leaky_relu\"").unwrap();
        assert_eq!(act_fn, LeakyRelu);
        assert_eq!(ActFn::default(), Elu);
    }
}
