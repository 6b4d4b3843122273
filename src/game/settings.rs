//! Game Configuration
//!
//! Fixed, externally-supplied configuration for the lifetime of one game.
//! The engine never mutates settings after `GameState` creation.

use serde::{Serialize, Deserialize};

use crate::core::digits::{MAX_DIGIT_RANGE, MAX_TARGET_LENGTH};
use crate::game::error::GameError;

/// Fixed score cost per hint type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintCosts {
    /// Confirm a chosen digit is absent.
    pub bagel: u32,
    /// Confirm a chosen digit is present.
    pub not_bagel: u32,
    /// Reveal deltas between adjacent target digits in a row.
    pub row_delta: u32,
    /// Reveal one random target position.
    pub random_expose: u32,
    /// Reveal the digit sum of a row.
    pub row_sums: u32,
}

impl Default for HintCosts {
    fn default() -> Self {
        Self {
            bagel: 50,
            not_bagel: 75,
            row_delta: 100,
            random_expose: 150,
            row_sums: 75,
        }
    }
}

/// Scoring policy.
///
/// Score is recomputed after every submission as
/// `starting_score - guess_penalty * guesses - hint spend`, floored at
/// zero. Strictly worse play along any single axis never scores higher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score a flawless zero-guess game would hold.
    pub starting_score: u32,
    /// Cost of each committed guess.
    pub guess_penalty: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            starting_score: 1000,
            guess_penalty: 25,
        }
    }
}

/// Per-game settings.
///
/// The target length is always `grid_rows * grid_cols`; the grid shape
/// additionally scopes the row-based hints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Number of grid rows.
    pub grid_rows: usize,
    /// Number of grid columns.
    pub grid_cols: usize,
    /// Digits are drawn from `[0, digit_range)`.
    pub digit_range: u8,
    /// Whether the target may repeat digits.
    pub allow_repeats: bool,
    /// Clear the guess buffer after each submission (locked slots persist).
    pub clear_guess_after_submit: bool,
    /// Row-delta hints reveal signed deltas instead of magnitudes.
    pub show_actual_deltas: bool,
    /// Hint cost table.
    pub hint_costs: HintCosts,
    /// Scoring policy.
    pub scoring: ScoringConfig,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_rows: 1,
            grid_cols: 4,
            digit_range: 10,
            allow_repeats: false,
            clear_guess_after_submit: true,
            show_actual_deltas: false,
            hint_costs: HintCosts::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl GameSettings {
    /// Target length implied by the grid shape.
    pub fn target_length(&self) -> usize {
        self.grid_rows * self.grid_cols
    }

    /// Positions covered by a grid row, as a half-open range.
    ///
    /// Caller must ensure `row < grid_rows`.
    pub fn row_span(&self, row: usize) -> std::ops::Range<usize> {
        let start = row * self.grid_cols;
        start..start + self.grid_cols
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(GameError::InvalidSettings {
                reason: "grid must have at least one row and one column",
            });
        }
        if self.target_length() > MAX_TARGET_LENGTH {
            return Err(GameError::InvalidSettings {
                reason: "grid exceeds the maximum target length",
            });
        }
        if self.digit_range < 2 || self.digit_range > MAX_DIGIT_RANGE {
            return Err(GameError::InvalidSettings {
                reason: "digit range must be between 2 and 10",
            });
        }
        if !self.allow_repeats && self.target_length() > self.digit_range as usize {
            return Err(GameError::InvalidSettings {
                reason: "distinct digits impossible: target longer than digit range",
            });
        }
        Ok(())
    }

    /// Stable key identifying this settings profile for the stats ledger.
    ///
    /// Example: `"1x4-r10-distinct"`.
    pub fn profile_key(&self) -> String {
        format!(
            "{}x{}-r{}-{}",
            self.grid_rows,
            self.grid_cols,
            self.digit_range,
            if self.allow_repeats { "repeats" } else { "distinct" },
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
