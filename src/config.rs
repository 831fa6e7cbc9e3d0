use serde::{Deserialize, Serialize};

use crate::{NetErr, Result, arch::Topology, arch::activations::ActFn};

/// The largest value an activation may output, `2^35`.
pub const MAX_SAFE_OUTPUT: f32 = 34_359_738_368.;

/// The scalar hyperparameters of a network. Every field falls back to its default when missing
/// from a spec.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hyperparams {
    pub learning_rate: f32,
    pub weight_decay: f32,
    pub activation_leak: f32,
    pub momentum: f32,
    pub max_safe_output: f32,
}

impl Default for Hyperparams {
    fn default() -> Self {
        Self {
            learning_rate: 1e-4,
            weight_decay: 1e-6,
            activation_leak: 0.01,
            momentum: 0.9,
            max_safe_output: MAX_SAFE_OUTPUT,
        }
    }
}

impl Hyperparams {
    /// Checks every hyperparameter is a finite number and the maximum safe output is positive.
    pub fn validate(&self) -> Result<()> {
        let Self {
            learning_rate,
            weight_decay,
            activation_leak,
            momentum,
            max_safe_output,
        } = *self;

        let fields = [
            ("learning_rate", learning_rate),
            ("weight_decay", weight_decay),
            ("activation_leak", activation_leak),
            ("momentum", momentum),
            ("max_safe_output", max_safe_output),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(NetErr::InvalidHyperparameter { name, value });
            }
        }

        if max_safe_output <= 0. {
            return Err(NetErr::InvalidHyperparameter {
                name: "max_safe_output",
                value: max_safe_output,
            });
        }

        Ok(())
    }
}

/// The specification for the weight generator of a network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightInitSpec {
    #[default]
    He,
    Uniform {
        low: f32,
        high: f32,
    },
    Normal {
        mean: f32,
        std_dev: f32,
    },
    Const {
        value: f32,
    },
}

/// The serializable specification of a network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub topology: Topology,
    #[serde(default)]
    pub hyperparams: Hyperparams,
    #[serde(default)]
    pub act_fn: ActFn,
    #[serde(default)]
    pub weight_init: WeightInitSpec,
    #[serde(default)]
    pub bias: f32,
    pub seed: Option<u64>,
}

impl NetworkSpec {
    /// Parses a spec from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
