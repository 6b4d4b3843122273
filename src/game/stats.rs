//! Play Statistics
//!
//! Aggregate statistics per settings profile. The engine only folds
//! terminal games into the ledger; persisting the ledger is owned by the
//! surrounding application.

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use crate::game::state::{GamePhase, GameState};

/// Aggregate statistics for one settings profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Finished games (won or abandoned).
    pub games_played: u32,
    /// Games that ended with a win.
    pub games_won: u32,
    /// Guesses committed across all games.
    pub total_guesses: u32,
    /// Hints charged across all games.
    pub hints_purchased: u32,
    /// Best score among won games.
    pub best_score: Option<u32>,
    /// Fewest guesses among won games.
    pub best_guess_count: Option<u32>,
    /// Consecutive wins, reset by an abandoned game.
    pub current_streak: u32,
    /// Longest win streak seen.
    pub best_streak: u32,
}

impl GameStats {
    fn record(&mut self, state: &GameState) {
        self.games_played += 1;
        self.total_guesses += state.guess_count();
        self.hints_purchased += state.hints.purchases() as u32;

        if state.phase == GamePhase::Won {
            self.games_won += 1;
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
            self.best_score = Some(match self.best_score {
                Some(best) => best.max(state.score),
                None => state.score,
            });
            self.best_guess_count = Some(match self.best_guess_count {
                Some(best) => best.min(state.guess_count()),
                None => state.guess_count(),
            });
        } else {
            self.current_streak = 0;
        }
    }

    /// Win rate in [0, 1].
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.games_won as f64 / self.games_played as f64
        }
    }
}

/// Statistics keyed by settings profile.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsBook {
    entries: BTreeMap<String, GameStats>,
}

impl StatsBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a terminal game into the ledger.
    ///
    /// Games still in progress are ignored - only `Won` and `Abandoned`
    /// games count.
    pub fn record_game(&mut self, state: &GameState) {
        if !matches!(state.phase, GamePhase::Won | GamePhase::Abandoned) {
            return;
        }
        self.entries
            .entry(state.settings.profile_key())
            .or_default()
            .record(state);
    }

    /// Stats for a profile key.
    pub fn get(&self, profile_key: &str) -> Option<&GameStats> {
        self.entries.get(profile_key)
    }

    /// Iterate over all profiles.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &GameStats)> {
        self.entries.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
