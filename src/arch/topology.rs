use serde::{Deserialize, Serialize};

use crate::{NetErr, Result};

/// The position of a weight: layer transition `i`, source node `j` in layer `i` and destination
/// node `k` in layer `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeightIndex {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

/// The position of a bias: bias layer `i` (which belongs to node layer `i + 1`) and node `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BiasIndex {
    pub i: usize,
    pub j: usize,
}

/// The node counts of every layer of a network, input layer first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Topology {
    sizes: Vec<usize>,
}

impl Topology {
    /// Creates a new `Topology`.
    ///
    /// # Arguments
    /// * `sizes` - The amount of nodes of each layer.
    ///
    /// # Returns
    /// An error if there are less than 2 layers or some layer has no nodes.
    pub fn new(sizes: impl Into<Vec<usize>>) -> Result<Self> {
        let sizes = sizes.into();

        if sizes.len() < 2 {
            return Err(NetErr::TooFewLayers { got: sizes.len() });
        }

        if let Some(layer) = sizes.iter().position(|&size| size == 0) {
            return Err(NetErr::EmptyLayer { layer });
        }

        Ok(Self { sizes })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// The amount of layers, input and output layers included.
    pub fn layers(&self) -> usize {
        self.sizes.len()
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// The amount of weights a fully connected network with this topology has.
    pub fn max_weight_count(&self) -> usize {
        self.sizes.windows(2).map(|pair| pair[0] * pair[1]).sum()
    }
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = NetErr;

    fn try_from(value: Vec<usize>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Topology> for Vec<usize> {
    fn from(value: Topology) -> Self {
        value.sizes
    }
}
