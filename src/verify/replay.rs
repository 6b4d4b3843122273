//! Verification by Replay
//!
//! The authoritative check: rebuild the game from the transcript, replay
//! every guess through the real engine, and compare everything the client
//! claimed - feedback values, result, score, and final state hash. A
//! client cannot misreport a result without the replay diverging.

use chrono::DateTime;

use crate::core::digits::DigitSequence;
use crate::core::hash::StateHash;
use crate::core::rng::DeterministicRng;
use crate::game::feedback::GuessResult;
use crate::game::state::GameState;
use crate::verify::transcript::GameTranscript;

/// Verification outcome.
#[derive(Debug)]
pub struct VerificationResult {
    /// Did verification pass?
    pub valid: bool,
    /// Final state hash from the replay.
    pub computed_final_hash: StateHash,
    /// Final state hash the client reported.
    pub expected_final_hash: StateHash,
    /// Detailed error if verification failed.
    pub error: Option<VerificationError>,
}

/// Errors that can occur during verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    /// Transcript carries no result section.
    #[error("transcript is incomplete")]
    IncompleteTranscript,

    /// Settings fail validation.
    #[error("transcript settings are invalid")]
    InvalidSettings,

    /// Target does not fit the settings.
    #[error("target does not fit the transcript settings")]
    InvalidTarget,

    /// Re-drawing from the seed yields a different target.
    #[error("target does not match its seed")]
    SeedMismatch,

    /// A guess has the wrong shape.
    #[error("guess {index} has invalid shape")]
    InvalidGuess {
        /// Index of the offending guess.
        index: usize,
    },

    /// Recomputed feedback differs from the claim.
    #[error("feedback mismatch at guess {index}")]
    FeedbackMismatch {
        /// Index of the offending guess.
        index: usize,
        /// Feedback the replay computed.
        computed: GuessResult,
        /// Feedback the client claimed.
        claimed: GuessResult,
    },

    /// A guess follows the winning guess.
    #[error("guess {index} submitted after the game was won")]
    GuessAfterWin {
        /// Index of the offending guess.
        index: usize,
    },

    /// Won flag or guess count disagrees with the replay.
    #[error("claimed result does not match the replay")]
    ResultMismatch,

    /// Final score disagrees with the scoring policy.
    #[error("score mismatch: computed {computed}, claimed {claimed}")]
    ScoreMismatch {
        /// Score the replay computed.
        computed: u32,
        /// Score the client claimed.
        claimed: u32,
    },

    /// Final state hash disagrees with the replay.
    #[error("final state hash mismatch")]
    FinalHashMismatch,
}

/// Verify a transcript by full replay.
///
/// Replays every guess through the engine and compares the claimed
/// feedback, result, score, and final hash against the recomputation.
pub fn verify_transcript(transcript: &GameTranscript) -> VerificationResult {
    match run_verification(transcript) {
        Ok(computed_final_hash) => VerificationResult {
            valid: true,
            computed_final_hash,
            expected_final_hash: transcript
                .result
                .as_ref()
                .map(|r| r.final_state_hash)
                .unwrap_or([0; 32]),
            error: None,
        },
        Err((error, computed_final_hash)) => VerificationResult {
            valid: false,
            computed_final_hash,
            expected_final_hash: transcript
                .result
                .as_ref()
                .map(|r| r.final_state_hash)
                .unwrap_or([0; 32]),
            error: Some(error),
        },
    }
}

/// Inner verification. Returns the recomputed final hash on success, or
/// the failure plus whatever hash was computed so far.
fn run_verification(
    transcript: &GameTranscript,
) -> Result<StateHash, (VerificationError, StateHash)> {
    let no_hash = [0u8; 32];
    let fail = |e: VerificationError| (e, no_hash);

    // 1. Transcript must be complete.
    let result = transcript
        .result
        .as_ref()
        .ok_or_else(|| fail(VerificationError::IncompleteTranscript))?;

    let settings = transcript.metadata.settings;
    settings
        .validate()
        .map_err(|_| fail(VerificationError::InvalidSettings))?;

    // 2. Target must fit the settings.
    transcript
        .target
        .check_shape(
            settings.target_length(),
            settings.digit_range,
            !settings.allow_repeats,
        )
        .map_err(|_| fail(VerificationError::InvalidTarget))?;

    // 3. Seeded targets must re-draw identically.
    if let Some(seed) = transcript.metadata.seed {
        let mut rng = DeterministicRng::new(seed);
        let redrawn = DigitSequence::random(
            &mut rng,
            settings.target_length(),
            settings.digit_range,
            settings.allow_repeats,
        );
        if redrawn != transcript.target {
            return Err(fail(VerificationError::SeedMismatch));
        }
    }

    // 4. Rebuild the game and replay every guess through the engine.
    let mut state = GameState::with_target(
        transcript.metadata.game_id,
        settings,
        transcript.target.clone(),
        0, // hint RNG unused during replay
    )
    .map_err(|_| fail(VerificationError::InvalidTarget))?;

    let replay_clock = DateTime::from_timestamp(0, 0).expect("epoch is valid");
    state
        .start(replay_clock)
        .expect("fresh state must start");

    for (index, record) in transcript.guesses.iter().enumerate() {
        if !state.is_active() {
            return Err(fail(VerificationError::GuessAfterWin { index }));
        }
        if record.digits.len() != settings.target_length() {
            return Err(fail(VerificationError::InvalidGuess { index }));
        }
        for (position, digit) in record.digits.iter().enumerate() {
            state
                .set_digit(position, digit)
                .map_err(|_| fail(VerificationError::InvalidGuess { index }))?;
        }
        let committed = state
            .submit_guess(replay_clock)
            .map_err(|_| fail(VerificationError::InvalidGuess { index }))?;

        if committed.result != record.claimed {
            return Err(fail(VerificationError::FeedbackMismatch {
                index,
                computed: committed.result,
                claimed: record.claimed,
            }));
        }
    }

    // 5. Result section must agree with the replay.
    if state.is_won() != result.won || state.guess_count() != result.guess_count {
        return Err(fail(VerificationError::ResultMismatch));
    }

    // 6. Score must follow the scoring policy given the claimed hint spend.
    let computed_score = settings
        .scoring
        .starting_score
        .saturating_sub(
            settings
                .scoring
                .guess_penalty
                .saturating_mul(result.guess_count),
        )
        .saturating_sub(result.hint_spend);
    if computed_score != result.final_score {
        return Err(fail(VerificationError::ScoreMismatch {
            computed: computed_score,
            claimed: result.final_score,
        }));
    }

    // 7. Final hash over the replayed state, with the claimed hint spend
    // folded in (hints never change feedback, only spend and score).
    state.hint_spend = result.hint_spend;
    state.score = computed_score;
    let computed_hash = state.compute_hash();

    if computed_hash != result.final_state_hash {
        return Err((VerificationError::FinalHashMismatch, computed_hash));
    }

    Ok(computed_hash)
}

// =============================================================================
// TESTS
// =============================================================================
