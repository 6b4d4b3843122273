//! Synchronization Boundary
//!
//! Serializable payloads for the external multiplayer service, plus
//! whole-state snapshots for the owning application's persistence. The
//! transport (and the remote schema) live outside this crate; everything
//! here is plain data.

pub mod report;

pub use report::{ResultReport, ProgressPulse};

use crate::game::state::GameState;

/// Encode a full game state snapshot as compact bytes.
///
/// The owning application persists or replicates snapshots; pending
/// events are not part of a snapshot and drain empty after decoding.
pub fn encode_snapshot(state: &GameState) -> Result<Vec<u8>, bincode::Error> {
    bincode::serialize(state)
}

/// Decode a game state snapshot.
pub fn decode_snapshot(bytes: &[u8]) -> Result<GameState, bincode::Error> {
    bincode::deserialize(bytes)
}

// =============================================================================
// TESTS
// =============================================================================
