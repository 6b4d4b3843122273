//! Game Transcript
//!
//! Everything a server needs to recompute a finished game: settings,
//! target (or the seed it was drawn from), the committed guesses with
//! their claimed feedback, and the claimed result.

use serde::{Serialize, Deserialize};

use crate::core::digits::DigitSequence;
use crate::core::hash::StateHash;
use crate::game::feedback::GuessResult;
use crate::game::settings::GameSettings;
use crate::game::state::{GameId, GameState};

/// Static facts about the game being verified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// Game identifier.
    pub game_id: GameId,
    /// Seed the target was drawn from, when the engine drew it.
    pub seed: Option<u64>,
    /// Settings the game was played under.
    pub settings: GameSettings,
}

/// One committed guess with the feedback the client claims.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// The guessed digits.
    pub digits: DigitSequence,
    /// Client-reported feedback, recomputed during verification.
    pub claimed: GuessResult,
}

/// Claimed outcome of the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptResult {
    /// Whether the game ended with a win.
    pub won: bool,
    /// Number of committed guesses.
    pub guess_count: u32,
    /// Total score spent on hints.
    pub hint_spend: u32,
    /// Final score.
    pub final_score: u32,
    /// Final state hash reported by the client.
    pub final_state_hash: StateHash,
}

/// Complete transcript of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTranscript {
    /// Static game facts.
    pub metadata: GameMetadata,
    /// The target the game was played against.
    pub target: DigitSequence,
    /// Committed guesses in submission order.
    pub guesses: Vec<GuessRecord>,
    /// Claimed result. `None` until the game is finished.
    pub result: Option<TranscriptResult>,
}

impl GameTranscript {
    /// Start an empty transcript.
    pub fn new(metadata: GameMetadata, target: DigitSequence) -> Self {
        Self {
            metadata,
            target,
            guesses: Vec::new(),
            result: None,
        }
    }

    /// Append a committed guess.
    pub fn push_guess(&mut self, digits: DigitSequence, claimed: GuessResult) {
        self.guesses.push(GuessRecord { digits, claimed });
    }

    /// Record the final result.
    pub fn finalize(&mut self, result: TranscriptResult) {
        self.result = Some(result);
    }

    /// Build a transcript from a game state.
    ///
    /// The result section is filled only for terminal games.
    pub fn from_state(state: &GameState) -> Self {
        let mut transcript = Self::new(
            GameMetadata {
                game_id: state.game_id,
                seed: state.seed,
                settings: state.settings,
            },
            state.target.clone(),
        );

        for guess in &state.history {
            transcript.push_guess(guess.digits.clone(), guess.result);
        }

        if !state.is_active() && state.started_at.is_some() {
            transcript.finalize(TranscriptResult {
                won: state.is_won(),
                guess_count: state.guess_count(),
                hint_spend: state.hint_spend,
                final_score: state.score,
                final_state_hash: state.compute_hash(),
            });
        }

        transcript
    }

    /// Encode to compact bytes for transport.
    pub fn encode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode from bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

// =============================================================================
// TESTS
// =============================================================================
