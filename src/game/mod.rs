//! Game Logic Module
//!
//! All game rules. 100% deterministic given the state's seed and the
//! caller-supplied clock.
//!
//! ## Module Structure
//!
//! - `settings`: Per-game configuration
//! - `feedback`: Pure guess-vs-target feedback computation
//! - `state`: Game state, lifecycle, and the operations that mutate it
//! - `hints`: Hint economy and purchased-hint ledger
//! - `actions`: Player action type and the reducer
//! - `events`: Events for the rendering and sync layers
//! - `error`: Typed failures
//! - `stats`: Aggregate play statistics

pub mod settings;
pub mod feedback;
pub mod state;
pub mod hints;
pub mod actions;
pub mod events;
pub mod error;
pub mod stats;

// Re-export key types
pub use settings::{GameSettings, HintCosts, ScoringConfig};
pub use feedback::{GuessResult, compute_feedback};
pub use state::{GameState, GamePhase, Guess, GameId, GuessId, ScratchpadColor};
pub use hints::{HintState, HintRequest, HintReveal, HintOutcome};
pub use actions::{GameAction, apply_action};
pub use events::GameEvent;
pub use error::GameError;
pub use stats::{GameStats, StatsBook};
