//! Game Events
//!
//! Events generated by state transitions, for the rendering layer and the
//! multiplayer sync layer. Accumulated on the state and drained with
//! `GameState::take_events`.

use serde::{Serialize, Deserialize};

use crate::game::feedback::GuessResult;
use crate::game::hints::HintReveal;
use crate::game::state::{GameId, GuessId};

/// An observable game event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// The game moved to the active phase.
    GameStarted {
        /// The game's identifier.
        game_id: GameId,
    },

    /// A guess was committed to history.
    GuessCommitted {
        /// Identifier of the committed guess.
        guess_id: GuessId,
        /// 1-based index of the guess in history.
        guess_number: u32,
        /// Computed feedback.
        result: GuessResult,
    },

    /// A hint purchase was charged.
    HintPurchased {
        /// The revealed fact.
        reveal: HintReveal,
        /// Score charged.
        cost: u32,
    },

    /// The winning guess ended the game.
    GameWon {
        /// Total committed guesses.
        guess_count: u32,
        /// Final score.
        score: u32,
    },

    /// The game was abandoned.
    GameAbandoned {
        /// Score at abandonment.
        score: u32,
    },
}
