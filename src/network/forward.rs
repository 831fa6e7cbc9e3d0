use ndarray::{Array1, ArrayView1};

use super::{ForwardTrace, Network};
use crate::Result;

impl Network {
    /// Makes a forward pass through the network.
    ///
    /// # Arguments
    /// * `inputs` - One value per input node.
    ///
    /// # Returns
    /// The inputs and outputs of every layer, or a `SizeMismatch` error if `inputs` doesn't fit
    /// the input layer.
    pub fn forward(&self, inputs: ArrayView1<'_, f32>) -> Result<ForwardTrace> {
        self.check_inputs(inputs)?;

        let layers = self.topology.layers();
        let mut trace = ForwardTrace {
            inputs: Vec::with_capacity(layers),
            outputs: Vec::with_capacity(layers),
        };

        trace.inputs.push(inputs.to_owned());
        trace.outputs.push(inputs.to_owned());

        let Self {
            params,
            functions,
            hyperparams,
            ..
        } = self;

        for (weights, biases) in params.weights.iter().zip(&params.biases) {
            let prev = &trace.outputs[trace.outputs.len() - 1];
            let z = prev.dot(&weights.dense()) + biases;
            let a = z.mapv(|x| (functions.activation)(x, hyperparams));

            trace.inputs.push(z);
            trace.outputs.push(a);
        }

        Ok(trace)
    }

    /// Runs the network on `inputs` without touching its parameters.
    pub fn run(&self, inputs: ArrayView1<'_, f32>) -> Result<Array1<f32>> {
        Ok(self.forward(inputs)?.into_prediction())
    }
}
