//! Seedable RNG construction.
//!
//! All randomness in the engine flows through an explicit generator so a
//! fixed seed reproduces an entire evolution run. Production code may seed
//! from entropy (`rand::random()`); tests pass a fixed seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
