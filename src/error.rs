use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::{NormalError, uniform::Error as UniformError};

/// The result type used in the entire engine.
pub type Result<T> = std::result::Result<T, NetErr>;

/// The engine's error type.
///
/// Configuration errors are raised while building a network and leave no instance behind, the
/// remaining ones are raised per call before any parameter is touched.
#[derive(Debug)]
pub enum NetErr {
    TooFewLayers {
        got: usize,
    },
    EmptyLayer {
        layer: usize,
    },
    InvalidHyperparameter {
        name: &'static str,
        value: f32,
    },
    InvalidDistribution(String),
    InvalidSpec(serde_json::Error),
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyBatch,
}

impl NetErr {
    /// Whether this error comes from a malformed network configuration.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            NetErr::TooFewLayers { .. }
                | NetErr::EmptyLayer { .. }
                | NetErr::InvalidHyperparameter { .. }
                | NetErr::InvalidDistribution(_)
                | NetErr::InvalidSpec(_)
        )
    }
}

impl Display for NetErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetErr::TooFewLayers { got } => {
                write!(f, "a topology needs at least 2 layers, got {got}")
            }
            NetErr::EmptyLayer { layer } => {
                write!(f, "layer {layer} of the topology has no nodes")
            }
            NetErr::InvalidHyperparameter { name, value } => {
                write!(f, "invalid value for hyperparameter {name}: {value}")
            }
            NetErr::InvalidDistribution(detail) => {
                write!(f, "invalid initialization distribution: {detail}")
            }
            NetErr::InvalidSpec(e) => write!(f, "invalid network spec: {e}"),
            NetErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "size mismatch for {what}: got {got}, expected {expected}"
            ),
            NetErr::EmptyBatch => f.write_str("tried to train on an empty batch"),
        }
    }
}

impl Error for NetErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NetErr::InvalidSpec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for NetErr {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidSpec(value)
    }
}

impl From<NormalError> for NetErr {
    fn from(value: NormalError) -> Self {
        Self::InvalidDistribution(value.to_string())
    }
}

impl From<UniformError> for NetErr {
    fn from(value: UniformError) -> Self {
        Self::InvalidDistribution(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(NetErr::TooFewLayers { got: 1 }.is_config());
        assert!(NetErr::EmptyLayer { layer: 0 }.is_config());
        assert!(NetErr::InvalidDistribution(String::new()).is_config());

        let mismatch = NetErr::SizeMismatch {
            what: "target vector",
            got: 2,
            expected: 1,
        };
        assert!(!mismatch.is_config());
        assert!(!NetErr::EmptyBatch.is_config());
    }

    #[test]
    fn display() {
        let err = NetErr::SizeMismatch {
            what: "target vector",
            got: 2,
            expected: 1,
        };

        assert_eq!(
            err.to_string(),
            "size mismatch for target vector: got 2, expected 1"
        );
    }
}
