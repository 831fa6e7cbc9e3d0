pub mod activations;
pub mod loss;
mod node;
mod sparse;
mod topology;

pub use node::NodeView;
pub use sparse::SparseMatrix;
pub use topology::{BiasIndex, Topology, WeightIndex};
