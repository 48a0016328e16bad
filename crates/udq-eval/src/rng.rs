//! Generator handle threaded through RANDN / RANDU.
//!
//! Builtins never construct or seed a generator. These helpers exist for the
//! caller that owns one generator per serial evaluation context.

use rand::SeedableRng;
use rand::rngs::SmallRng;

/// The generator type `RANDN` and `RANDU` draw from.
pub type UdqRng = SmallRng;

/// Deterministic generator for `seed`.
pub fn seeded(seed: u64) -> UdqRng {
    SmallRng::seed_from_u64(seed)
}

/// Generator for one report step, independent of how many draws earlier
/// steps consumed.
pub fn seeded_for_step(seed: u64, step: usize) -> UdqRng {
    let mixed = seed ^ (step as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    SmallRng::seed_from_u64(mixed)
}
