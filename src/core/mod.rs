//! Core deterministic primitives.
//!
//! All types in this module are designed for perfect cross-platform
//! determinism. They underpin server-side recomputation of game results.

pub mod digits;
pub mod rng;
pub mod hash;

// Re-export core types
pub use digits::{DigitSequence, MAX_DIGIT_RANGE, MAX_TARGET_LENGTH};
pub use rng::{DeterministicRng, derive_game_seed};
pub use hash::{StateHash, StateHasher, compute_state_hash};
