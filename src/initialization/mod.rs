mod bias_gen;
mod constant;
mod he;
mod masked;
mod random;
mod weight_gen;

pub use bias_gen::{BiasGen, ConstBiasGen};
pub use constant::ConstWeightGen;
pub use he::HeWeightGen;
pub use masked::MaskedWeightGen;
pub use random::RandWeightGen;
pub use weight_gen::WeightGen;

use rand::{SeedableRng, rngs::StdRng};

/// Seeds a generator when a seed is given, draws one from the OS otherwise.
pub(crate) fn generate_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
