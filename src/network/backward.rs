use log::trace;
use ndarray::{Array1, ArrayView1};

use super::{
    BiasDelta, Deltas, ErrorDelta, ErrorInit, ForwardTrace, LayerPass, LearningRate, Network,
    SampleReport, TrainInit, WeightDelta,
};
use crate::{
    Result,
    arch::{BiasIndex, WeightIndex},
};

impl Network {
    /// Computes the deltas of a single sample without applying them.
    ///
    /// The velocities are the only state this writes to, through the weight delta function.
    ///
    /// # Arguments
    /// * `inputs` - One value per input node.
    /// * `targets` - The expected value of every output node.
    ///
    /// # Returns
    /// The outputs, deltas, node errors and loss of the sample, or a `SizeMismatch` error raised
    /// before anything is computed.
    pub fn train_sample(
        &mut self,
        inputs: ArrayView1<'_, f32>,
        targets: ArrayView1<'_, f32>,
    ) -> Result<SampleReport> {
        self.check_targets(targets)?;
        self.check_inputs(inputs)?;

        self.cache.clear();
        if let Some(hook) = self.functions.train_init.as_mut() {
            hook(TrainInit {
                inputs,
                targets,
                cache: &mut self.cache,
            });
        }

        let trace = self.forward(inputs)?;
        let report = self.backward(&trace, targets);

        trace!(cursor = self.samples_seen, loss = report.loss; "computed sample deltas");
        Ok(report)
    }

    fn backward(&mut self, trace: &ForwardTrace, targets: ArrayView1<'_, f32>) -> SampleReport {
        let Self {
            topology,
            hyperparams,
            params,
            functions,
            cache,
            samples_seen,
        } = self;
        let hyperparams = &*hyperparams;
        let samples_seen = *samples_seen;
        let base = hyperparams.learning_rate;
        let last = topology.layers() - 1;

        let mut deltas = Deltas::zeros_like(params);
        let mut errors = Vec::with_capacity(topology.layers());

        // Output biases get no delta.
        let mut output_errors = Array1::zeros(topology.output_size());
        for (j, error) in output_errors.iter_mut().enumerate() {
            *error = (functions.error_init)(ErrorInit {
                targets,
                node: trace.node(last, j),
                i: last,
                hyperparams,
                loss_prime: &functions.loss_prime,
                activation_prime: &functions.activation_prime,
                cache: &mut *cache,
            });
        }
        errors.push(output_errors);

        for i in (0..last).rev() {
            let next_errors = errors[errors.len() - 1].view();
            let weights = &params.weights[i];
            let velocities = &mut params.velocities[i];

            if let Some(hook) = functions.layer_computation.as_mut() {
                hook(LayerPass {
                    learning_rate: base,
                    trace,
                    next_errors,
                    weights,
                    i,
                });
            }

            let mut layer_errors = Array1::zeros(weights.rows());

            for j in 0..weights.rows() {
                let learning_rate = (functions.learning_rate)(LearningRate {
                    base,
                    samples_seen,
                    i,
                    j,
                });

                for k in 0..weights.cols() {
                    let Some(weight) = weights.get(j, k) else {
                        continue;
                    };
                    let at = WeightIndex { i, j, k };

                    if i > 0 {
                        layer_errors[j] += (functions.error_delta)(ErrorDelta {
                            learning_rate,
                            trace,
                            next_errors,
                            weight,
                            at,
                            hyperparams,
                            activation_prime: &functions.activation_prime,
                            cache: &mut *cache,
                        });
                    }

                    let delta = (functions.weight_delta)(WeightDelta {
                        learning_rate,
                        trace,
                        next_errors,
                        at,
                        hyperparams,
                        weights,
                        velocities: &mut *velocities,
                    });
                    deltas.weights[i].set(j, k, delta);
                }

                if i > 0 {
                    deltas.biases[i - 1][j] = (functions.bias_delta)(BiasDelta {
                        learning_rate,
                        trace,
                        node_error: layer_errors[j],
                        at: BiasIndex { i: i - 1, j },
                        hyperparams,
                    });
                }
            }

            errors.push(layer_errors);
        }

        errors.reverse();
        let loss = (functions.loss)(targets, trace.prediction());
        let report = SampleReport {
            outputs: trace.prediction().to_owned(),
            deltas,
            errors,
            loss,
        };

        if let Some(hook) = functions.train_cleanup.as_mut() {
            hook(&report);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use ndarray::array;

    use crate::{
        NetErr, NetworkBuilder,
        arch::{Topology, WeightIndex, activations::ActFn},
        initialization::ConstWeightGen,
    };

    #[test]
    fn deltas_shaped_like_params() {
        let mut net = NetworkBuilder::new([3, 4, 2]).seed(3).build().unwrap();

        let report = net
            .train_sample(array![0.1, 0.2, 0.3].view(), array![1., 0.].view())
            .unwrap();

        assert_eq!(report.outputs.len(), 2);
        assert_eq!(report.errors.len(), 3);
        assert_eq!(report.errors[0].len(), 3);
        assert_eq!(report.errors[2].len(), 2);
        assert_eq!(report.deltas.weights[0].dim(), (3, 4));
        assert_eq!(report.deltas.weights[1].dim(), (4, 2));
        assert_eq!(report.deltas.biases[0].len(), 4);
        assert_eq!(report.deltas.biases[1].len(), 2);
    }

    #[test]
    fn single_layer_by_hand() {
        // relu with a positive pre-activation has a slope of 1
        let mut net = NetworkBuilder::new([1, 1])
            .act_fn(ActFn::Relu)
            .weight_gen(ConstWeightGen::new(0.5))
            .learning_rate(0.1)
            .weight_decay(0.)
            .momentum(0.)
            .build()
            .unwrap();

        let report = net.train_sample(array![2.].view(), array![3.].view()).unwrap();

        // output 1, error 2 * (3 - 1) * 1 = 4
        assert_eq!(report.outputs, array![1.]);
        assert_eq!(report.errors[1], array![4.]);
        assert_eq!(report.deltas.weights[0].get(0, 0), Some(0.1 * 4. * 2.));
        assert_eq!(report.deltas.biases[0], array![0.]);
        assert_eq!(report.loss, 4.);
    }

    #[test]
    fn absent_weights_skipped() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);

        let mut net = NetworkBuilder::new([2, 2])
            .weight_gen(|_: &Topology, at: WeightIndex| (at.j == at.k).then_some(0.3))
            .weight_delta(move |ctx| {
                if let Ok(mut seen) = seen.lock() {
                    seen.push(ctx.at);
                }
                1.
            })
            .build()
            .unwrap();

        let report = net
            .train_sample(array![1., 1.].view(), array![0., 0.].view())
            .unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|at| at.j == at.k));
        assert_eq!(report.deltas.weights[0].get(0, 1), None);
        assert_eq!(report.deltas.weights[0].get(1, 1), Some(1.));
    }

    #[test]
    fn target_checked_before_hooks() {
        let called = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&called);

        let mut net = NetworkBuilder::new([2, 1])
            .train_init(move |_| {
                if let Ok(mut flag) = flag.lock() {
                    *flag = true;
                }
            })
            .build()
            .unwrap();

        let err = net
            .train_sample(array![1., 1.].view(), array![0., 0.].view())
            .unwrap_err();

        assert!(matches!(
            err,
            NetErr::SizeMismatch {
                what: "targets",
                got: 2,
                expected: 1,
            }
        ));
        assert!(!*called.lock().unwrap());
    }

    #[test]
    fn hooks() {
        let layers = Arc::new(Mutex::new(Vec::new()));
        let losses = Arc::new(Mutex::new(Vec::new()));
        let (layers_hook, losses_hook) = (Arc::clone(&layers), Arc::clone(&losses));

        let mut net = NetworkBuilder::new([2, 3, 1])
            .seed(11)
            .layer_computation(move |pass| {
                if let Ok(mut layers) = layers_hook.lock() {
                    layers.push((pass.i, pass.next_errors.len()));
                }
            })
            .train_cleanup(move |report| {
                if let Ok(mut losses) = losses_hook.lock() {
                    losses.push(report.loss);
                }
            })
            .build()
            .unwrap();

        let report = net
            .train_sample(array![1., 0.].view(), array![1.].view())
            .unwrap();

        assert_eq!(*layers.lock().unwrap(), [(1, 1), (0, 3)]);
        assert_eq!(*losses.lock().unwrap(), [report.loss]);
    }

    #[test]
    fn bias_positions() {
        let mut net = NetworkBuilder::new([1, 2, 1])
            .weight_gen(ConstWeightGen::new(1.))
            .bias_delta(|ctx| (10 * ctx.at.i + ctx.at.j) as f32)
            .build()
            .unwrap();

        let report = net.train_sample(array![1.].view(), array![1.].view()).unwrap();

        assert_eq!(report.deltas.biases[0], array![0., 1.]);
        assert_eq!(report.deltas.biases[1], array![0.]);
    }

    #[test]
    fn output_biases_untrained() {
        let mut net = NetworkBuilder::new([2, 1])
            .weight_gen(ConstWeightGen::new(0.1))
            .learning_rate(0.1)
            .build()
            .unwrap();

        for _ in 0..3 {
            net.train(array![1., 0.].view(), array![1.].view()).unwrap();
        }

        assert_eq!(net.biases(), [array![0.]]);
        assert_ne!(net.weights()[0].get(0, 0), Some(0.1));
    }

    #[test]
    fn learning_rate_per_transition() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = Arc::clone(&seen);

        let mut net = NetworkBuilder::new([2, 3, 1])
            .seed(5)
            .learning_rate_fn(move |ctx| {
                if let Ok(mut seen) = record.lock() {
                    seen.push((ctx.i, ctx.j));
                }
                ctx.base
            })
            .build()
            .unwrap();

        net.train_sample(array![1., 0.].view(), array![1.].view())
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3 + 2);
        assert!(seen.iter().all(|&(i, j)| i < 2 && j < [2, 3][i]));
    }

    #[test]
    fn hidden_layer_by_hand() {
        // every pre-activation is positive, so each relu slope is 1
        let mut net = NetworkBuilder::new([1, 2, 1])
            .act_fn(ActFn::Relu)
            .weight_gen(|_: &Topology, at: WeightIndex| {
                Some(match (at.i, at.j, at.k) {
                    (0, 0, 0) => 0.5,
                    (0, 0, 1) => 1.,
                    (1, 0, 0) => 1.,
                    _ => 0.25,
                })
            })
            .learning_rate(0.1)
            .weight_decay(0.)
            .momentum(0.)
            .build()
            .unwrap();

        let report = net.train_sample(array![2.].view(), array![3.].view()).unwrap();
        let close = |a: f32, b: f32| (a - b).abs() < 1e-6;

        // hidden outputs [1, 2], output 1 + 0.5 = 1.5, output error 2 * (3 - 1.5) = 3
        assert!(close(report.outputs[0], 1.5));
        assert!(close(report.errors[2][0], 3.));

        // hidden errors are the output error through each weight
        assert!(close(report.errors[1][0], 3.));
        assert!(close(report.errors[1][1], 0.75));
        assert_eq!(report.errors[0], array![0.]);

        let weights = &report.deltas.weights;
        assert!(close(weights[1].get(0, 0).unwrap(), 0.3));
        assert!(close(weights[1].get(1, 0).unwrap(), 0.6));
        assert!(close(weights[0].get(0, 0).unwrap(), 0.6));
        assert!(close(weights[0].get(0, 1).unwrap(), 0.15));

        let biases = &report.deltas.biases;
        assert!(close(biases[0][0], 0.3));
        assert!(close(biases[0][1], 0.075));
        assert_eq!(biases[1], array![0.]);
    }
}
