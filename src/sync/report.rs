//! Sync Payloads
//!
//! Messages the multiplayer sync layer forwards to the remote service.
//! Serialized as JSON for debugging ease; the remote schema beyond these
//! shapes is owned by the service, not by this crate.

use serde::{Serialize, Deserialize};

use crate::game::feedback::GuessResult;
use crate::game::state::GameState;

/// Final result of a finished game, ready to submit upstream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultReport {
    /// Game identifier (UUID string for JSON compatibility).
    pub game_id: String,
    /// Settings profile the game was played under.
    pub profile: String,
    /// Whether the game was won.
    pub won: bool,
    /// Number of committed guesses.
    pub guess_count: u32,
    /// Final score.
    pub score: u32,
    /// Score spent on hints.
    pub hint_spend: u32,
    /// Wall-clock play time in seconds, when both timestamps exist.
    pub duration_seconds: Option<i64>,
    /// Final state hash (hex) for server-side verification.
    pub state_hash: String,
}

impl ResultReport {
    /// Build a report from a game state.
    pub fn from_state(state: &GameState) -> Self {
        Self {
            game_id: state.game_id.to_uuid_string(),
            profile: state.settings.profile_key(),
            won: state.is_won(),
            guess_count: state.guess_count(),
            score: state.score,
            hint_spend: state.hint_spend,
            duration_seconds: state.duration().map(|d| d.num_seconds()),
            state_hash: hex::encode(state.compute_hash()),
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Periodic progress pulse for live opponents and spectators.
///
/// Carries only public information: feedback counts, never digits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPulse {
    /// Game identifier (UUID string).
    pub game_id: String,
    /// Number of committed guesses so far.
    pub guess_count: u32,
    /// Feedback of the latest guess, if any.
    pub latest_result: Option<GuessResult>,
    /// Current score.
    pub score: u32,
}

impl ProgressPulse {
    /// Build a pulse from a game state.
    pub fn from_state(state: &GameState) -> Self {
        Self {
            game_id: state.game_id.to_uuid_string(),
            guess_count: state.guess_count(),
            latest_result: state.latest_guess().map(|g| g.result),
            score: state.score,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use crate::core::digits::DigitSequence;
    use crate::game::settings::GameSettings;
    use crate::game::state::GameId;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn later() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_042, 0).unwrap()
    }

    fn won_game() -> GameState {
        let mut state = GameState::with_target(
            GameId::new([8; 16]),
            GameSettings::default(),
            DigitSequence::from_slice(&[5, 3, 8, 0]),
            11,
        )
        .unwrap();
        state.start(now()).unwrap();
        for (i, d) in [5u8, 3, 8, 0].into_iter().enumerate() {
            state.set_digit(i, d).unwrap();
        }
        state.submit_guess(later()).unwrap();
        state
    }

    #[test]
    fn test_result_report_fields() {
        let state = won_game();
        let report = ResultReport::from_state(&state);

        assert!(report.won);
        assert_eq!(report.guess_count, 1);
        assert_eq!(report.profile, "1x4-r10-distinct");
        assert_eq!(report.duration_seconds, Some(42));
        assert_eq!(report.state_hash, hex::encode(state.compute_hash()));
        assert_eq!(report.game_id, state.game_id.to_uuid_string());
    }

    #[test]
    fn test_result_report_json_round_trip() {
        let report = ResultReport::from_state(&won_game());

        let json = report.to_json().unwrap();
        let back: ResultReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_progress_pulse_hides_digits() {
        let state = won_game();
        let pulse = ProgressPulse::from_state(&state);

        assert_eq!(pulse.guess_count, 1);
        assert!(pulse.latest_result.unwrap().is_winner);

        // The pulse must never leak the guessed digits.
        let json = pulse.to_json().unwrap();
        assert!(!json.contains("digits"));
    }

    #[test]
    fn test_progress_pulse_before_first_guess() {
        let mut state = GameState::with_target(
            GameId::new([8; 16]),
            GameSettings::default(),
            DigitSequence::from_slice(&[5, 3, 8, 0]),
            11,
        )
        .unwrap();
        state.start(now()).unwrap();

        let pulse = ProgressPulse::from_state(&state);
        assert_eq!(pulse.guess_count, 0);
        assert!(pulse.latest_result.is_none());
    }
}
