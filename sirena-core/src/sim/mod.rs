//! Monte-Carlo failure simulation and synthetic demonstration hazards

mod demo;
mod scenario;

pub use demo::generate_demo_hazards;
pub use scenario::{sample_scenarios, Scenario};

/// Mixes a base seed with a stream index so parallel draws stay
/// reproducible regardless of thread scheduling.
pub(crate) fn mix_seed(seed: u64, index: u64) -> u64 {
    // splitmix64 finalizer
    let mut z = seed.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
