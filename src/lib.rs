//! # PicoFermi Deduction Core
//!
//! Deterministic engine for a number-deduction game ("picos / fermis /
//! bagels"), designed so a server can recompute any reported result.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     PICOFERMI CORE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── digits.rs   - Digit sequences (targets, guesses)        │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── settings.rs - Per-game configuration                    │
//! │  ├── feedback.rs - Pure guess-vs-target feedback             │
//! │  ├── state.rs    - Game state and lifecycle                  │
//! │  ├── hints.rs    - Hint economy and ledger                   │
//! │  ├── actions.rs  - Player actions and reducer                │
//! │  ├── events.rs   - Events for rendering/sync layers          │
//! │  └── stats.rs    - Aggregate play statistics                 │
//! │                                                              │
//! │  verify/         - Server-side recomputation                 │
//! │  ├── transcript.rs - Recorded game for verification          │
//! │  └── replay.rs     - Full replay and comparison              │
//! │                                                              │
//! │  sync/           - Boundary payloads (non-authoritative)     │
//! │  └── report.rs   - Result reports and progress pulses        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - No system time dependencies (callers pass timestamps in)
//! - No HashMap (uses BTreeMap/BTreeSet for sorted iteration)
//! - All randomness from seeded Xorshift128+
//!
//! Given the same seed and the same action sequence, a game produces
//! **identical feedback, score, and state hash** on any platform - which
//! is what lets `verify::verify_transcript` reject misreported results.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod verify;
pub mod sync;

// Re-export commonly used types
pub use crate::core::digits::DigitSequence;
pub use crate::core::rng::{DeterministicRng, derive_game_seed};
pub use crate::core::hash::StateHash;
pub use crate::game::feedback::{GuessResult, compute_feedback};
pub use crate::game::settings::GameSettings;
pub use crate::game::state::{GameState, GamePhase, Guess, GameId, GuessId};
pub use crate::game::hints::{HintRequest, HintReveal, HintState};
pub use crate::game::actions::{GameAction, apply_action};
pub use crate::game::error::GameError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
