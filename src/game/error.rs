//! Engine Errors
//!
//! Typed failures for every fallible engine operation. Validation errors
//! are reported to the caller, never swallowed; the only silent path is
//! the idempotent repeat-hint purchase, which succeeds at zero cost.

use crate::game::state::GamePhase;

/// Errors returned by game state operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Operation requires an active game.
    #[error("game is not active (phase: {phase:?})")]
    GameNotActive {
        /// Phase the game was actually in.
        phase: GamePhase,
    },

    /// Game was already started.
    #[error("game already started")]
    AlreadyStarted,

    /// Guess buffer has unfilled positions.
    #[error("guess is incomplete: {missing} position(s) unfilled")]
    IncompleteGuess {
        /// Number of unfilled positions.
        missing: usize,
    },

    /// Position index outside the target length.
    #[error("position {position} out of range (target length {len})")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Target length.
        len: usize,
    },

    /// Digit outside the configured range.
    #[error("digit {digit} out of range (digit range {range})")]
    DigitOutOfRange {
        /// Requested digit.
        digit: u8,
        /// Exclusive upper bound.
        range: u8,
    },

    /// Grid row index outside the configured grid.
    #[error("row {row} out of range (grid has {rows} rows)")]
    RowOutOfRange {
        /// Requested row.
        row: usize,
        /// Number of grid rows.
        rows: usize,
    },

    /// Position is locked against editing.
    #[error("position {position} is locked")]
    LockedPosition {
        /// The locked position.
        position: usize,
    },

    /// Locking requires the slot to hold a digit.
    #[error("cannot lock empty position {position}")]
    CannotLockEmpty {
        /// The empty position.
        position: usize,
    },

    /// Every target position has already been exposed.
    #[error("every target position is already exposed")]
    AllPositionsExposed,

    /// Target length does not match the settings.
    #[error("target length {got} does not match settings ({expected})")]
    TargetLengthMismatch {
        /// Length required by the settings.
        expected: usize,
        /// Length of the supplied target.
        got: usize,
    },

    /// Target contains a digit outside the configured range.
    #[error("target digit {digit} out of range (digit range {range})")]
    TargetDigitOutOfRange {
        /// The offending digit.
        digit: u8,
        /// Exclusive upper bound.
        range: u8,
    },

    /// Target repeats a digit although repeats are disallowed.
    #[error("target repeats a digit but repeats are disallowed")]
    TargetRepeatsDigit,

    /// Settings fail validation.
    #[error("invalid settings: {reason}")]
    InvalidSettings {
        /// What is wrong with the settings.
        reason: &'static str,
    },
}
