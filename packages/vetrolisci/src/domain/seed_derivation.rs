//! RNG seed derivation for reproducible games.
//!
//! When the server runs with a fixed base seed, every game derives its own
//! seed from it so that two games never share a deck order.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Derive the seed for one game session.
pub fn derive_session_seed(base_seed: u64, game_id: i64) -> u64 {
    base_seed
        .wrapping_add((game_id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .rotate_left(17)
}

/// Deterministic RNG for a session seed.
pub fn session_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
