//! Verification
//!
//! Server-authoritative recomputation of finished games. A client ships a
//! [`transcript::GameTranscript`]; [`replay::verify_transcript`] replays
//! it through the same engine and rejects any divergence from the claimed
//! feedback, result, score, or state hash.

pub mod transcript;
pub mod replay;

// Re-export key types
pub use transcript::{GameTranscript, GameMetadata, GuessRecord, TranscriptResult};
pub use replay::{verify_transcript, VerificationResult, VerificationError};
