use log::debug;
use ndarray::ArrayView1;

use super::{
    BiasDelta, DerivativeCache, ErrorDelta, ErrorInit, Functions, LayerPass, LearningRate, Network,
    Params, SampleReport, TrainInit, WeightDelta,
};
use crate::{
    Result,
    arch::{NodeView, Topology, activations::ActFn, loss::LossFn},
    config::{Hyperparams, NetworkSpec, WeightInitSpec},
    initialization::{
        BiasGen, ConstBiasGen, ConstWeightGen, HeWeightGen, RandWeightGen, WeightGen,
        generate_rng,
    },
};

/// Builds a `Network`, every unset option falling back to its default.
pub struct NetworkBuilder {
    sizes: Vec<usize>,
    hyperparams: Hyperparams,
    seed: Option<u64>,
    weight_gen: Option<Box<dyn WeightGen>>,
    bias_gen: Box<dyn BiasGen>,
    functions: Functions,
}

impl NetworkBuilder {
    /// Creates a new `NetworkBuilder`.
    ///
    /// # Arguments
    /// * `sizes` - The amount of nodes of each layer, input layer first. It is validated on
    ///   `build`.
    pub fn new(sizes: impl Into<Vec<usize>>) -> Self {
        Self {
            sizes: sizes.into(),
            hyperparams: Hyperparams::default(),
            seed: None,
            weight_gen: None,
            bias_gen: Box::new(ConstBiasGen::zero()),
            functions: Functions::default(),
        }
    }

    /// Creates a builder out of a serializable network spec.
    ///
    /// # Returns
    /// An `InvalidDistribution` error if the spec's weight distribution can't be built.
    pub fn from_spec(spec: &NetworkSpec) -> Result<Self> {
        let mut builder = Self::new(spec.topology.sizes())
            .hyperparams(spec.hyperparams)
            .act_fn(spec.act_fn)
            .bias_gen(ConstBiasGen::new(spec.bias));

        if let Some(seed) = spec.seed {
            builder = builder.seed(seed);
        }

        builder = match spec.weight_init {
            WeightInitSpec::He => builder,
            WeightInitSpec::Uniform { low, high } => builder.weight_gen(RandWeightGen::uniform(
                generate_rng(spec.seed),
                low,
                high,
            )?),
            WeightInitSpec::Normal { mean, std_dev } => builder.weight_gen(
                RandWeightGen::normal(generate_rng(spec.seed), mean, std_dev)?,
            ),
            WeightInitSpec::Const { value } => builder.weight_gen(ConstWeightGen::new(value)),
        };

        Ok(builder)
    }

    pub fn hyperparams(mut self, hyperparams: Hyperparams) -> Self {
        self.hyperparams = hyperparams;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f32) -> Self {
        self.hyperparams.learning_rate = learning_rate;
        self
    }

    pub fn weight_decay(mut self, weight_decay: f32) -> Self {
        self.hyperparams.weight_decay = weight_decay;
        self
    }

    pub fn activation_leak(mut self, activation_leak: f32) -> Self {
        self.hyperparams.activation_leak = activation_leak;
        self
    }

    pub fn momentum(mut self, momentum: f32) -> Self {
        self.hyperparams.momentum = momentum;
        self
    }

    pub fn max_safe_output(mut self, max_safe_output: f32) -> Self {
        self.hyperparams.max_safe_output = max_safe_output;
        self
    }

    /// Seeds the default He weight generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn weight_gen<W>(mut self, weight_gen: W) -> Self
    where
        W: WeightGen + 'static,
    {
        self.weight_gen = Some(Box::new(weight_gen));
        self
    }

    pub fn bias_gen<B>(mut self, bias_gen: B) -> Self
    where
        B: BiasGen + 'static,
    {
        self.bias_gen = Box::new(bias_gen);
        self
    }

    /// Sets both the activation function and its derivative.
    pub fn act_fn(mut self, act_fn: ActFn) -> Self {
        self.functions.set_act_fn(act_fn);
        self
    }

    pub fn activation<F>(mut self, f: F) -> Self
    where
        F: Fn(f32, &Hyperparams) -> f32 + Send + 'static,
    {
        self.functions.activation = Box::new(f);
        self
    }

    pub fn activation_prime<F>(mut self, f: F) -> Self
    where
        F: Fn(NodeView<'_>, &Hyperparams) -> f32 + Send + 'static,
    {
        self.functions.activation_prime = Box::new(f);
        self
    }

    /// Sets both the loss function and its derivative.
    pub fn loss_fn<L>(mut self, loss_fn: L) -> Self
    where
        L: LossFn + Clone + Send + 'static,
    {
        self.functions.set_loss_fn(loss_fn);
        self
    }

    pub fn loss<F>(mut self, f: F) -> Self
    where
        F: Fn(ArrayView1<'_, f32>, ArrayView1<'_, f32>) -> f32 + Send + 'static,
    {
        self.functions.loss = Box::new(f);
        self
    }

    pub fn loss_prime<F>(mut self, f: F) -> Self
    where
        F: Fn(ArrayView1<'_, f32>, NodeView<'_>) -> f32 + Send + 'static,
    {
        self.functions.loss_prime = Box::new(f);
        self
    }

    pub fn error_init<F>(mut self, f: F) -> Self
    where
        F: Fn(ErrorInit<'_>) -> f32 + Send + 'static,
    {
        self.functions.error_init = Box::new(f);
        self
    }

    pub fn error_delta<F>(mut self, f: F) -> Self
    where
        F: Fn(ErrorDelta<'_>) -> f32 + Send + 'static,
    {
        self.functions.error_delta = Box::new(f);
        self
    }

    pub fn weight_delta<F>(mut self, f: F) -> Self
    where
        F: Fn(WeightDelta<'_>) -> f32 + Send + 'static,
    {
        self.functions.weight_delta = Box::new(f);
        self
    }

    pub fn bias_delta<F>(mut self, f: F) -> Self
    where
        F: Fn(BiasDelta<'_>) -> f32 + Send + 'static,
    {
        self.functions.bias_delta = Box::new(f);
        self
    }

    /// Sets the learning rate schedule, the default one always returns the base learning rate.
    pub fn learning_rate_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(LearningRate) -> f32 + Send + 'static,
    {
        self.functions.learning_rate = Box::new(f);
        self
    }

    /// Sets a hook called once per layer of every backward pass, before its deltas are
    /// computed.
    pub fn layer_computation<F>(mut self, f: F) -> Self
    where
        F: FnMut(LayerPass<'_>) + Send + 'static,
    {
        self.functions.layer_computation = Some(Box::new(f));
        self
    }

    /// Sets a hook called before the forward pass of every training sample.
    pub fn train_init<F>(mut self, f: F) -> Self
    where
        F: FnMut(TrainInit<'_>) + Send + 'static,
    {
        self.functions.train_init = Some(Box::new(f));
        self
    }

    /// Sets a hook called with the result of every backward pass.
    pub fn train_cleanup<F>(mut self, f: F) -> Self
    where
        F: FnMut(&SampleReport) + Send + 'static,
    {
        self.functions.train_cleanup = Some(Box::new(f));
        self
    }

    /// Consumes the builder and initializes the network.
    ///
    /// # Returns
    /// A configuration error if the topology or some hyperparameter is invalid, checked in
    /// that order and before any parameter is generated.
    pub fn build(self) -> Result<Network> {
        let Self {
            sizes,
            hyperparams,
            seed,
            weight_gen,
            mut bias_gen,
            functions,
        } = self;

        let topology = Topology::new(sizes)?;
        hyperparams.validate()?;

        let mut weight_gen: Box<dyn WeightGen> = match weight_gen {
            Some(weight_gen) => weight_gen,
            None => Box::new(HeWeightGen::new(generate_rng(seed), &topology)?),
        };

        let params = Params::init(&topology, &mut *weight_gen, &mut *bias_gen);

        debug!(
            layers = topology.layers(),
            weights = params.weight_count(),
            max_weights = topology.max_weight_count();
            "built network"
        );

        Ok(Network {
            cache: DerivativeCache::new(&topology),
            topology,
            hyperparams,
            params,
            functions,
            samples_seen: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NetErr, arch::loss::Mse};

    #[test]
    fn defaults() {
        let net = NetworkBuilder::new([2, 3, 1]).seed(0).build().unwrap();

        assert_eq!(*net.hyperparams(), Hyperparams::default());
        assert_eq!(net.weight_count(), 9);
        assert_eq!(net.max_weight_count(), 9);
        assert!(net.biases().iter().flatten().all(|&b| b == 0.));
    }

    #[test]
    fn seeded() {
        let a = NetworkBuilder::new([3, 2]).seed(5).build().unwrap();
        let b = NetworkBuilder::new([3, 2]).seed(5).build().unwrap();

        assert_eq!(a.weights(), b.weights());
    }

    #[test]
    fn invalid_topology() {
        let err = NetworkBuilder::new([3]).build().unwrap_err();
        assert!(matches!(err, NetErr::TooFewLayers { got: 1 }));

        let err = NetworkBuilder::new([3, 0, 1]).build().unwrap_err();
        assert!(matches!(err, NetErr::EmptyLayer { layer: 1 }));
    }

    #[test]
    fn invalid_hyperparameter() {
        let err = NetworkBuilder::new([2, 1])
            .learning_rate(f32::NAN)
            .build()
            .unwrap_err();

        assert!(err.is_config());
        assert!(matches!(
            err,
            NetErr::InvalidHyperparameter {
                name: "learning_rate",
                ..
            }
        ));
    }

    #[test]
    fn topology_checked_first() {
        let err = NetworkBuilder::new([2])
            .momentum(f32::INFINITY)
            .build()
            .unwrap_err();

        assert!(matches!(err, NetErr::TooFewLayers { .. }));
    }

    #[test]
    fn spec() {
        let spec = NetworkSpec::from_json(
            r#"{
                "topology": [2, 2],
                "act_fn": "relu",
                "weight_init": { "const": { "value": 0.25 } },
                "bias": 1.0
            }"#,
        )
        .unwrap();

        let net = NetworkBuilder::from_spec(&spec).unwrap().build().unwrap();

        assert!(net.weights()[0].iter().all(|(_, w)| w == 0.25));
        assert_eq!(net.biases()[0].to_vec(), [1., 1.]);
    }

    #[test]
    fn spec_bad_distribution() {
        let spec = NetworkSpec::from_json(
            r#"{ "topology": [2, 2], "weight_init": { "uniform": { "low": 1.0, "high": 0.0 } } }"#,
        )
        .unwrap();

        let err = NetworkBuilder::from_spec(&spec).err().unwrap();
        assert!(matches!(err, NetErr::InvalidDistribution(_)));
    }

    #[test]
    fn explicit_loss_fn() {
        let net = NetworkBuilder::new([1, 1]).loss_fn(Mse::new()).build();
        assert!(net.is_ok());
    }
}
