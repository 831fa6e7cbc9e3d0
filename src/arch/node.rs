use ndarray::ArrayView1;

/// A view over one layer of a forward trace, focused on node `j`.
///
/// Activation and loss derivatives receive this so they can use whichever of the node's
/// pre-activation input or post-activation output is cheaper for them.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    pub inputs: ArrayView1<'a, f32>,
    pub outputs: ArrayView1<'a, f32>,
    pub j: usize,
}

impl NodeView<'_> {
    pub fn input(&self) -> f32 {
        self.inputs[self.j]
    }

    pub fn output(&self) -> f32 {
        self.outputs[self.j]
    }
}
