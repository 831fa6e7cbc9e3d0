use crate::arch::{Topology, WeightIndex};

/// A `WeightGen` generates the initial value of every weight slot of a network.
///
/// It is called once per `(i, j, k)` triple, in order. Returning `None` leaves the slot absent,
/// which makes the network sparse.
pub trait WeightGen {
    /// Samples the initial value of the weight at `at`.
    ///
    /// # Arguments
    /// * `topology` - The topology of the network being built.
    /// * `at` - The position of the weight.
    ///
    /// # Returns
    /// The initial value, or `None` if the slot should not exist.
    fn sample(&mut self, topology: &Topology, at: WeightIndex) -> Option<f32>;
}

impl<F> WeightGen for F
where
    F: FnMut(&Topology, WeightIndex) -> Option<f32>,
{
    fn sample(&mut self, topology: &Topology, at: WeightIndex) -> Option<f32> {
        self(topology, at)
    }
}
