use log::trace;
use ndarray::ArrayView1;

use super::{BatchReport, Deltas, Network, SampleReport, TrainReport, deltas::apply_biases};
use crate::{NetErr, Result};

impl Network {
    /// Adds `deltas` to the weights and biases as they are.
    pub fn apply(&mut self, deltas: &Deltas) -> Result<()> {
        self.apply_averaged(deltas, 1)
    }

    /// Adds `deltas / n` to the weights and biases, `deltas` being the sum of `n` samples'
    /// deltas. Absent weights are never written.
    ///
    /// # Returns
    /// An `EmptyBatch` error if `n` is 0, or a `SizeMismatch` error if `deltas` doesn't fit the
    /// network. Nothing is applied in either case.
    pub fn apply_averaged(&mut self, deltas: &Deltas, n: usize) -> Result<()> {
        if n == 0 {
            return Err(NetErr::EmptyBatch);
        }

        deltas.check_shape(&self.params.weights, &self.params.biases)?;

        let divisor = n as f32;
        for (weights, delta) in self.params.weights.iter_mut().zip(&deltas.weights) {
            weights.accumulate(delta, divisor);
        }
        apply_biases(&mut self.params.biases, &deltas.biases, divisor);

        Ok(())
    }

    /// Trains the network on a single sample and moves the training cursor by one.
    pub fn train(
        &mut self,
        inputs: ArrayView1<'_, f32>,
        targets: ArrayView1<'_, f32>,
    ) -> Result<TrainReport> {
        let SampleReport {
            outputs,
            deltas,
            loss,
            ..
        } = self.train_sample(inputs, targets)?;

        self.apply(&deltas)?;
        self.samples_seen += 1;

        Ok(TrainReport { outputs, loss })
    }

    /// Trains the network on a batch of samples, applying the mean of their deltas once.
    ///
    /// Every sample is checked before any of them is processed.
    ///
    /// # Arguments
    /// * `samples` - Pairs of inputs and targets.
    ///
    /// # Returns
    /// The outputs of every sample and their mean loss, an `EmptyBatch` error if there are no
    /// samples or a `SizeMismatch` error if some sample doesn't fit the network.
    pub fn train_batch<'a, I>(&mut self, samples: I) -> Result<BatchReport>
    where
        I: IntoIterator<Item = (ArrayView1<'a, f32>, ArrayView1<'a, f32>)>,
    {
        let samples: Vec<_> = samples.into_iter().collect();
        if samples.is_empty() {
            return Err(NetErr::EmptyBatch);
        }

        for &(inputs, targets) in &samples {
            self.check_inputs(inputs)?;
            self.check_targets(targets)?;
        }

        let n = samples.len();
        let mut total = Deltas::zeros_like(&self.params);
        let mut outputs = Vec::with_capacity(n);
        let mut loss = 0.;

        for (inputs, targets) in samples {
            let report = self.train_sample(inputs, targets)?;
            total.accumulate(&report.deltas)?;
            outputs.push(report.outputs);
            loss += report.loss;
        }

        self.apply_averaged(&total, n)?;
        self.samples_seen += n;

        let loss = loss / n as f32;
        trace!(batch = n, cursor = self.samples_seen, loss = loss; "trained batch");

        Ok(BatchReport { outputs, loss })
    }
}
