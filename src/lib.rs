pub mod arch;
pub mod config;
pub mod error;
pub mod initialization;
pub mod network;
pub mod optimization;
pub mod propagation;

pub use config::{Hyperparams, NetworkSpec, WeightInitSpec};
pub use error::{NetErr, Result};
pub use network::{Network, NetworkBuilder};
