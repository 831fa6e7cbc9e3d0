use ndarray::ArrayView1;

use super::{DerivativeCache, ForwardTrace, SampleReport};
use crate::{
    arch::{
        BiasIndex, NodeView, SparseMatrix, WeightIndex,
        activations::ActFn,
        loss::{LossFn, Mse},
    },
    config::Hyperparams,
    optimization::{constant_learning_rate, momentum_weight_delta, simple_bias_delta},
    propagation::{simple_error_delta, simple_error_init},
};

pub type ActivationFn = Box<dyn Fn(f32, &Hyperparams) -> f32 + Send>;
pub type ActivationPrimeFn = Box<dyn Fn(NodeView<'_>, &Hyperparams) -> f32 + Send>;
pub type LossValueFn = Box<dyn Fn(ArrayView1<'_, f32>, ArrayView1<'_, f32>) -> f32 + Send>;
pub type LossPrimeFn = Box<dyn Fn(ArrayView1<'_, f32>, NodeView<'_>) -> f32 + Send>;
pub type ErrorInitFn = Box<dyn Fn(ErrorInit<'_>) -> f32 + Send>;
pub type ErrorDeltaFn = Box<dyn Fn(ErrorDelta<'_>) -> f32 + Send>;
pub type WeightDeltaFn = Box<dyn Fn(WeightDelta<'_>) -> f32 + Send>;
pub type BiasDeltaFn = Box<dyn Fn(BiasDelta<'_>) -> f32 + Send>;
pub type LearningRateFn = Box<dyn Fn(LearningRate) -> f32 + Send>;
pub type LayerHook = Box<dyn FnMut(LayerPass<'_>) + Send>;
pub type TrainInitHook = Box<dyn FnMut(TrainInit<'_>) + Send>;
pub type TrainCleanupHook = Box<dyn FnMut(&SampleReport) + Send>;

/// Everything `error_init` may use to compute the error of output node `node.j`.
pub struct ErrorInit<'a> {
    pub targets: ArrayView1<'a, f32>,
    pub node: NodeView<'a>,
    /// The index of the output layer.
    pub i: usize,
    pub hyperparams: &'a Hyperparams,
    pub loss_prime: &'a LossPrimeFn,
    pub activation_prime: &'a ActivationPrimeFn,
    pub cache: &'a mut DerivativeCache,
}

/// Everything `error_delta` may use to compute the error that flows from node `at.k` of layer
/// `at.i + 1` back into node `at.j` of layer `at.i`.
pub struct ErrorDelta<'a> {
    pub learning_rate: f32,
    pub trace: &'a ForwardTrace,
    pub next_errors: ArrayView1<'a, f32>,
    pub weight: f32,
    pub at: WeightIndex,
    pub hyperparams: &'a Hyperparams,
    pub activation_prime: &'a ActivationPrimeFn,
    pub cache: &'a mut DerivativeCache,
}

/// Everything `weight_delta` may use. `weights` and `velocities` are the layer `at.i` ones,
/// velocities being the only parameter state a delta function may write.
pub struct WeightDelta<'a> {
    pub learning_rate: f32,
    pub trace: &'a ForwardTrace,
    pub next_errors: ArrayView1<'a, f32>,
    pub at: WeightIndex,
    pub hyperparams: &'a Hyperparams,
    pub weights: &'a SparseMatrix,
    pub velocities: &'a mut SparseMatrix,
}

/// Everything `bias_delta` may use. `node_error` is the accumulated error of the node owning
/// the bias.
pub struct BiasDelta<'a> {
    pub learning_rate: f32,
    pub trace: &'a ForwardTrace,
    pub node_error: f32,
    pub at: BiasIndex,
    pub hyperparams: &'a Hyperparams,
}

/// The inputs of a learning rate schedule for source node `j` of layer `i`.
#[derive(Debug, Clone, Copy)]
pub struct LearningRate {
    pub base: f32,
    pub samples_seen: usize,
    pub i: usize,
    pub j: usize,
}

/// Handed to the layer hook before the deltas of layer `i` are computed.
pub struct LayerPass<'a> {
    pub learning_rate: f32,
    pub trace: &'a ForwardTrace,
    pub next_errors: ArrayView1<'a, f32>,
    pub weights: &'a SparseMatrix,
    pub i: usize,
}

/// Handed to the train init hook right before the forward pass of a training sample.
pub struct TrainInit<'a> {
    pub inputs: ArrayView1<'a, f32>,
    pub targets: ArrayView1<'a, f32>,
    pub cache: &'a mut DerivativeCache,
}

/// The pluggable functions of a network.
///
/// Each one can be replaced independently through the `NetworkBuilder`, the defaults being
/// the ELU activation, mean squared error, the simple error functions, the momentum weight
/// delta, the simple bias delta and a constant learning rate.
pub struct Functions {
    pub activation: ActivationFn,
    pub activation_prime: ActivationPrimeFn,
    pub loss: LossValueFn,
    pub loss_prime: LossPrimeFn,
    pub error_init: ErrorInitFn,
    pub error_delta: ErrorDeltaFn,
    pub weight_delta: WeightDeltaFn,
    pub bias_delta: BiasDeltaFn,
    pub learning_rate: LearningRateFn,
    pub layer_computation: Option<LayerHook>,
    pub train_init: Option<TrainInitHook>,
    pub train_cleanup: Option<TrainCleanupHook>,
}

impl Functions {
    /// Plugs both halves of a `LossFn`.
    pub fn set_loss_fn<L>(&mut self, loss_fn: L)
    where
        L: LossFn + Clone + Send + 'static,
    {
        let prime = loss_fn.clone();

        self.loss = Box::new(
            move |targets: ArrayView1<'_, f32>, outputs: ArrayView1<'_, f32>| {
                loss_fn.loss(targets, outputs)
            },
        );
        self.loss_prime = Box::new(move |targets: ArrayView1<'_, f32>, node: NodeView<'_>| {
            prime.loss_prime(targets, node)
        });
    }

    /// Plugs both halves of a built-in activation.
    pub fn set_act_fn(&mut self, act_fn: ActFn) {
        self.activation = act_fn.activation();
        self.activation_prime = act_fn.activation_prime();
    }
}

impl Default for Functions {
    fn default() -> Self {
        Self {
            activation: ActFn::default().activation(),
            activation_prime: ActFn::default().activation_prime(),
            loss: Box::new(
                |targets: ArrayView1<'_, f32>, outputs: ArrayView1<'_, f32>| {
                    Mse.loss(targets, outputs)
                },
            ),
            loss_prime: Box::new(|targets: ArrayView1<'_, f32>, node: NodeView<'_>| {
                Mse.loss_prime(targets, node)
            }),
            error_init: Box::new(simple_error_init),
            error_delta: Box::new(simple_error_delta),
            weight_delta: Box::new(momentum_weight_delta),
            bias_delta: Box::new(simple_bias_delta),
            learning_rate: Box::new(constant_learning_rate),
            layer_computation: None,
            train_init: None,
            train_cleanup: None,
        }
    }
}
