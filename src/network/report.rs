use ndarray::Array1;

use super::Deltas;

/// The result of a backward pass whose deltas were not applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReport {
    pub outputs: Array1<f32>,
    pub deltas: Deltas,
    /// The error of every node, `errors[i]` being the errors of layer `i`.
    pub errors: Vec<Array1<f32>>,
    pub loss: f32,
}

/// The result of training on a single sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub outputs: Array1<f32>,
    pub loss: f32,
}

/// The result of training on a batch: the outputs of each sample, in order, and their mean loss.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub outputs: Vec<Array1<f32>>,
    pub loss: f32,
}
