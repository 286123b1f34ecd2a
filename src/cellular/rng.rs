//! Deterministic random sub-stream derivation.
//!
//! Every randomized task of a generation (repairing slot `i`, evolving cell
//! `i`) draws from its own sub-stream derived from the engine seed, the
//! generation number, a lane discriminant and the slot index. Two runs with
//! the same seed therefore produce identical draws regardless of worker
//! count or scheduling order.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Finalizing mix of splitmix64. Decorrelates structured inputs such as
/// consecutive generation and slot numbers.
fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    return z ^ (z >> 31);
}

/// Derives the random sub-stream of one task.
///
/// # Arguments
/// * `seed: u64` - engine seed
/// * `generation: usize` - current generation
/// * `lane: u64` - phase discriminant, keeps same-slot draws of different
/// phases independent
/// * `slot: usize` - cell or population index
///
/// # Returns
/// * `StdRng` - seeded generator private to the task
pub fn sub_stream(seed: u64, generation: usize, lane: u64, slot: usize) -> StdRng {
    let mut state = splitmix64(seed);
    state = splitmix64(state ^ generation as u64);
    state = splitmix64(state ^ lane);
    state = splitmix64(state ^ slot as u64);
    return StdRng::seed_from_u64(state);
}
