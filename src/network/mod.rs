mod backward;
mod builder;
mod deltas;
mod forward;
mod functions;
mod params;
mod report;
mod trace;
mod update;

pub use builder::NetworkBuilder;
pub use deltas::Deltas;
pub use functions::{
    ActivationFn, ActivationPrimeFn, BiasDelta, BiasDeltaFn, ErrorDelta, ErrorDeltaFn, ErrorInit,
    ErrorInitFn, Functions, LayerHook, LayerPass, LearningRate, LearningRateFn, LossPrimeFn,
    LossValueFn, TrainCleanupHook, TrainInit, TrainInitHook, WeightDelta, WeightDeltaFn,
};
pub use params::Params;
pub use report::{BatchReport, SampleReport, TrainReport};
pub use trace::{DerivativeCache, ForwardTrace};

use std::fmt;

use ndarray::{Array1, ArrayView1};

use crate::{
    NetErr, Result,
    arch::{SparseMatrix, Topology},
    config::Hyperparams,
};

/// A dense feedforward neural network trained by backpropagation.
///
/// Every step of training is delegated to the pluggable `Functions`, the network only owns the
/// parameter state and the amount of samples it has been trained on.
pub struct Network {
    topology: Topology,
    hyperparams: Hyperparams,
    params: Params,
    functions: Functions,
    cache: DerivativeCache,
    samples_seen: usize,
}

impl Network {
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn hyperparams(&self) -> &Hyperparams {
        &self.hyperparams
    }

    /// Read only access to the parameter state.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns a copy of the weights.
    pub fn weights(&self) -> Vec<SparseMatrix> {
        self.params.weights.clone()
    }

    /// Returns a copy of the biases.
    pub fn biases(&self) -> Vec<Array1<f32>> {
        self.params.biases.clone()
    }

    /// Returns a copy of the momentum velocities.
    pub fn velocities(&self) -> Vec<SparseMatrix> {
        self.params.velocities.clone()
    }

    /// The amount of present weights.
    pub fn weight_count(&self) -> usize {
        self.params.weight_count()
    }

    /// The amount of weights if the network was fully connected.
    pub fn max_weight_count(&self) -> usize {
        self.topology.max_weight_count()
    }

    /// The training cursor: how many samples have been applied so far.
    pub fn samples_seen(&self) -> usize {
        self.samples_seen
    }

    fn check_inputs(&self, inputs: ArrayView1<'_, f32>) -> Result<()> {
        check_len("inputs", inputs.len(), self.topology.input_size())
    }

    fn check_targets(&self, targets: ArrayView1<'_, f32>) -> Result<()> {
        check_len("targets", targets.len(), self.topology.output_size())
    }
}

fn check_len(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(NetErr::SizeMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("topology", &self.topology)
            .field("hyperparams", &self.hyperparams)
            .field("weight_count", &self.weight_count())
            .field("samples_seen", &self.samples_seen)
            .finish_non_exhaustive()
    }
}
