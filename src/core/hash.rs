//! State Hashing for Verification
//!
//! Provides deterministic hashing of game state for:
//! - Integrity verification between client and server
//! - Transcript validation after a game ends
//! - Detecting divergence between a reported and a recomputed game
//!
//! Order of updates is critical for determinism: every caller must feed
//! fields in the same sequence the verifier does.

use sha2::{Sha256, Digest};

use super::digits::DigitSequence;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for game state.
///
/// Wraps SHA-256 with helpers for the types that appear in game state.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for game state.
    pub fn for_game_state() -> Self {
        Self::new(b"PICOFERMI_STATE_V1")
    }

    /// Feed a single byte.
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Feed a u32 (little-endian).
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Feed a u64 (little-endian).
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Feed a usize as u64 for cross-platform stability.
    pub fn update_usize(&mut self, value: usize) {
        self.update_u64(value as u64);
    }

    /// Feed a boolean as one byte.
    pub fn update_bool(&mut self, value: bool) {
        self.hasher.update([value as u8]);
    }

    /// Feed raw bytes.
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Feed a digit sequence, length-prefixed.
    pub fn update_digits(&mut self, digits: &DigitSequence) {
        self.update_usize(digits.len());
        self.hasher.update(digits.as_slice());
    }

    /// Finish and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute a game state hash with the standard domain separator.
///
/// The closure feeds the state fields; the caller and the verifier must
/// feed identical field sequences.
pub fn compute_state_hash<F>(fill: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_game_state();
    fill(&mut hasher);
    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
