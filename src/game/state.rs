//! Game State Definitions
//!
//! A single game's complete state and the operations that mutate it.
//! Every mutation goes through the methods here (or the action reducer on
//! top of them); the state is owned exclusively by the session that
//! created it and is never shared.
//!
//! Uses BTreeMap/BTreeSet for deterministic iteration order.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::core::digits::{DigitSequence, ShapeError};
use crate::core::hash::{StateHash, compute_state_hash};
use crate::core::rng::DeterministicRng;
use crate::game::error::GameError;
use crate::game::events::GameEvent;
use crate::game::feedback::{GuessResult, compute_feedback};
use crate::game::hints::{HintOutcome, HintRequest, HintState};
use crate::game::settings::GameSettings;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique game identifier (UUID as bytes).
///
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(pub [u8; 16]);

impl GameId {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().into_bytes())
    }

    /// Create from UUID string.
    pub fn from_uuid_str(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s).ok().map(|u| Self(*u.as_bytes()))
    }

    /// Convert to UUID string.
    pub fn to_uuid_string(&self) -> String {
        uuid::Uuid::from_bytes(self.0).to_string()
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

/// Unique identifier of a committed guess (UUID as bytes).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GuessId(pub [u8; 16]);

impl GuessId {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().into_bytes())
    }

    /// Convert to UUID string.
    pub fn to_uuid_string(&self) -> String {
        uuid::Uuid::from_bytes(self.0).to_string()
    }
}

// =============================================================================
// SCRATCHPAD
// =============================================================================

/// Color a player assigns to a digit on the scratchpad.
///
/// Pure note-taking: the engine stores the marks but attaches no meaning
/// to them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScratchpadColor {
    /// Ruled out.
    Gray,
    /// Suspected absent.
    Red,
    /// Undecided.
    Yellow,
    /// Suspected present.
    Green,
    /// Confirmed mentally.
    Blue,
}

// =============================================================================
// GAME PHASE
// =============================================================================

/// Lifecycle phase of a game.
///
/// `NotStarted -> Active -> Won | Abandoned`. Only `Active` permits
/// guess submission and hint purchase. `Won` is reached exactly by the
/// winning submission; `Abandoned` is triggered by the owner (new game,
/// player exit), never from within the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created, target drawn, not yet started.
    #[default]
    NotStarted,
    /// Accepting edits, submissions and hint purchases.
    Active,
    /// A winning guess was committed.
    Won,
    /// Terminated externally without a win.
    Abandoned,
}

// =============================================================================
// COMMITTED GUESS
// =============================================================================

/// A committed guess with its computed feedback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    /// Unique identifier.
    pub id: GuessId,
    /// The guessed digits.
    pub digits: DigitSequence,
    /// Feedback against the target.
    pub result: GuessResult,
    /// When the guess was committed.
    pub submitted_at: DateTime<Utc>,
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete state of one game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Game identifier.
    pub game_id: GameId,

    /// Fixed settings for this game.
    pub settings: GameSettings,

    /// Seed the target was drawn from, if the engine drew it.
    pub seed: Option<u64>,

    /// The secret target. Immutable for the game's lifetime.
    pub target: DigitSequence,

    /// In-progress guess buffer, one slot per target position.
    pub buffer: Vec<Option<u8>>,

    /// Currently focused input position.
    pub focused: usize,

    /// Positions pinned by the player. Locked slots reject edits and
    /// survive the post-submit buffer clear.
    pub locked: BTreeSet<usize>,

    /// Player's scratchpad marks, keyed by digit.
    pub scratchpad: BTreeMap<u8, ScratchpadColor>,

    /// Committed guesses, in submission order.
    pub history: Vec<Guess>,

    /// Purchased-hint ledger.
    pub hints: HintState,

    /// Current phase.
    pub phase: GamePhase,

    /// Running score.
    pub score: u32,

    /// Total score spent on hints.
    pub hint_spend: u32,

    /// When the game became active.
    pub started_at: Option<DateTime<Utc>>,

    /// When the game reached a terminal phase.
    pub ended_at: Option<DateTime<Utc>>,

    /// RNG for the random-expose hint. Seeded at creation so hint
    /// reveals replay identically.
    pub rng: DeterministicRng,

    /// Events generated since the last drain.
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game around an externally-drawn target.
    ///
    /// The target must match the settings; `hint_seed` seeds the RNG used
    /// by the random-expose hint.
    pub fn with_target(
        game_id: GameId,
        settings: GameSettings,
        target: DigitSequence,
        hint_seed: u64,
    ) -> Result<Self, GameError> {
        settings.validate()?;
        check_target(&settings, &target)?;
        Ok(Self::build(game_id, settings, None, target, DeterministicRng::new(hint_seed)))
    }

    /// Create a game, drawing the target from a seed.
    ///
    /// The same seed always yields the same target and the same hint
    /// reveals, which is what lets a server re-run the game.
    pub fn from_seed(
        game_id: GameId,
        settings: GameSettings,
        seed: u64,
    ) -> Result<Self, GameError> {
        settings.validate()?;
        let mut rng = DeterministicRng::new(seed);
        let target = DigitSequence::random(
            &mut rng,
            settings.target_length(),
            settings.digit_range,
            settings.allow_repeats,
        );
        // rng continues from here for hint reveals
        Ok(Self::build(game_id, settings, Some(seed), target, rng))
    }

    fn build(
        game_id: GameId,
        settings: GameSettings,
        seed: Option<u64>,
        target: DigitSequence,
        rng: DeterministicRng,
    ) -> Self {
        let len = settings.target_length();
        Self {
            game_id,
            settings,
            seed,
            target,
            buffer: vec![None; len],
            focused: 0,
            locked: BTreeSet::new(),
            scratchpad: BTreeMap::new(),
            history: Vec::new(),
            hints: HintState::new(settings.show_actual_deltas),
            phase: GamePhase::NotStarted,
            score: settings.scoring.starting_score,
            hint_spend: 0,
            started_at: None,
            ended_at: None,
            rng,
            pending_events: Vec::new(),
        }
    }

    // === Phase ===

    /// Whether the game accepts play operations.
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Whether the game ended with a win.
    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    fn require_active(&self) -> Result<(), GameError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(GameError::GameNotActive { phase: self.phase })
        }
    }

    /// Move from `NotStarted` to `Active`.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), GameError> {
        if self.phase != GamePhase::NotStarted {
            return Err(GameError::AlreadyStarted);
        }
        self.phase = GamePhase::Active;
        self.started_at = Some(now);
        self.push_event(GameEvent::GameStarted { game_id: self.game_id });
        Ok(())
    }

    /// Terminate the game externally (new game started, player exit).
    pub fn abandon(&mut self, now: DateTime<Utc>) -> Result<(), GameError> {
        self.require_active()?;
        self.phase = GamePhase::Abandoned;
        self.ended_at = Some(now);
        self.push_event(GameEvent::GameAbandoned { score: self.score });
        Ok(())
    }

    // === Input Editing ===

    /// Place a digit into a buffer slot and advance the focus.
    pub fn set_digit(&mut self, position: usize, digit: u8) -> Result<(), GameError> {
        self.require_active()?;
        self.check_position(position)?;
        if digit >= self.settings.digit_range {
            return Err(GameError::DigitOutOfRange {
                digit,
                range: self.settings.digit_range,
            });
        }
        if self.locked.contains(&position) {
            return Err(GameError::LockedPosition { position });
        }

        self.buffer[position] = Some(digit);
        self.advance_focus(position);
        Ok(())
    }

    /// Clear a buffer slot.
    pub fn clear_digit(&mut self, position: usize) -> Result<(), GameError> {
        self.require_active()?;
        self.check_position(position)?;
        if self.locked.contains(&position) {
            return Err(GameError::LockedPosition { position });
        }

        self.buffer[position] = None;
        Ok(())
    }

    /// Move the input focus.
    pub fn set_focus(&mut self, position: usize) -> Result<(), GameError> {
        self.require_active()?;
        self.check_position(position)?;
        self.focused = position;
        Ok(())
    }

    /// Lock or unlock a position.
    ///
    /// Locking pins the slot's current digit; only filled slots can be
    /// locked. Locking affects input editing only, never feedback.
    pub fn toggle_lock(&mut self, position: usize) -> Result<(), GameError> {
        self.require_active()?;
        self.check_position(position)?;

        if self.locked.contains(&position) {
            self.locked.remove(&position);
        } else {
            if self.buffer[position].is_none() {
                return Err(GameError::CannotLockEmpty { position });
            }
            self.locked.insert(position);
        }
        Ok(())
    }

    /// Set a scratchpad mark for a digit.
    pub fn set_scratchpad(&mut self, digit: u8, color: ScratchpadColor) -> Result<(), GameError> {
        self.require_active()?;
        if digit >= self.settings.digit_range {
            return Err(GameError::DigitOutOfRange {
                digit,
                range: self.settings.digit_range,
            });
        }
        self.scratchpad.insert(digit, color);
        Ok(())
    }

    /// Remove a scratchpad mark.
    pub fn clear_scratchpad(&mut self, digit: u8) -> Result<(), GameError> {
        self.require_active()?;
        if digit >= self.settings.digit_range {
            return Err(GameError::DigitOutOfRange {
                digit,
                range: self.settings.digit_range,
            });
        }
        self.scratchpad.remove(&digit);
        Ok(())
    }

    // === Submission ===

    /// Commit the buffered guess.
    ///
    /// Validates completeness, computes feedback, appends the record,
    /// recomputes the score, and on a win transitions to `Won`. The
    /// buffer is cleared afterwards when the settings ask for it, with
    /// locked slots preserved.
    pub fn submit_guess(&mut self, now: DateTime<Utc>) -> Result<&Guess, GameError> {
        self.require_active()?;

        let missing = self.buffer.iter().filter(|slot| slot.is_none()).count();
        if missing > 0 {
            return Err(GameError::IncompleteGuess { missing });
        }

        let digits = DigitSequence::new(self.buffer.iter().copied().flatten().collect());
        let result = compute_feedback(&self.target, &digits);

        let guess_id = GuessId::generate();
        self.history.push(Guess {
            id: guess_id,
            digits,
            result,
            submitted_at: now,
        });
        self.recompute_score();

        self.push_event(GameEvent::GuessCommitted {
            guess_id,
            guess_number: self.history.len() as u32,
            result,
        });

        if result.is_winner {
            self.phase = GamePhase::Won;
            self.ended_at = Some(now);
            self.push_event(GameEvent::GameWon {
                guess_count: self.history.len() as u32,
                score: self.score,
            });
        }

        if self.settings.clear_guess_after_submit {
            for (position, slot) in self.buffer.iter_mut().enumerate() {
                if !self.locked.contains(&position) {
                    *slot = None;
                }
            }
            self.focused = self.first_editable_position();
        }

        Ok(self.history.last().expect("guess was just appended"))
    }

    // === Hints ===

    /// Purchase a hint, charging its cost against the score.
    ///
    /// Repeat purchases of an already-revealed fact are free and leave
    /// the ledger unchanged.
    pub fn purchase_hint(&mut self, request: HintRequest) -> Result<HintOutcome, GameError> {
        self.require_active()?;

        let outcome = self
            .hints
            .apply(request, &self.target, &self.settings, &mut self.rng)?;

        if outcome.cost > 0 {
            self.hint_spend = self.hint_spend.saturating_add(outcome.cost);
            self.recompute_score();
            self.push_event(GameEvent::HintPurchased {
                reveal: outcome.reveal.clone(),
                cost: outcome.cost,
            });
        }
        Ok(outcome)
    }

    // === Score ===

    /// Recompute the score from guess count and hint spend.
    ///
    /// Monotonic: more guesses or more hint spend, all else equal, never
    /// raises the score.
    fn recompute_score(&mut self) {
        let scoring = self.settings.scoring;
        let guess_cost = scoring
            .guess_penalty
            .saturating_mul(self.history.len() as u32);
        self.score = scoring
            .starting_score
            .saturating_sub(guess_cost)
            .saturating_sub(self.hint_spend);
    }

    // === Queries ===

    /// Number of committed guesses.
    pub fn guess_count(&self) -> u32 {
        self.history.len() as u32
    }

    /// Most recently committed guess.
    pub fn latest_guess(&self) -> Option<&Guess> {
        self.history.last()
    }

    /// Wall-clock duration of the game, once started.
    pub fn duration(&self) -> Option<chrono::Duration> {
        let start = self.started_at?;
        let end = self.ended_at?;
        Some(end - start)
    }

    /// Compute the verification hash of this game.
    ///
    /// Covers exactly the fields a server can recompute from a
    /// transcript: settings, target, committed guesses with feedback,
    /// hint spend, score, and the won flag. Identifiers and timestamps
    /// are deliberately excluded.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(|h| {
            h.update_usize(self.settings.grid_rows);
            h.update_usize(self.settings.grid_cols);
            h.update_u8(self.settings.digit_range);
            h.update_bool(self.settings.allow_repeats);
            h.update_digits(&self.target);

            h.update_usize(self.history.len());
            for guess in &self.history {
                h.update_digits(&guess.digits);
                h.update_u32(guess.result.picos);
                h.update_u32(guess.result.fermis);
                h.update_u32(guess.result.bagels);
            }

            h.update_u32(self.hint_spend);
            h.update_u32(self.score);
            h.update_bool(self.phase == GamePhase::Won);
        })
    }

    // === Events ===

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    // === Helpers ===

    fn check_position(&self, position: usize) -> Result<(), GameError> {
        let len = self.settings.target_length();
        if position >= len {
            return Err(GameError::PositionOutOfRange { position, len });
        }
        Ok(())
    }

    /// Next unset, unlocked position after `from`, wrapping once.
    fn advance_focus(&mut self, from: usize) {
        let len = self.buffer.len();
        for step in 1..=len {
            let candidate = (from + step) % len;
            if self.buffer[candidate].is_none() && !self.locked.contains(&candidate) {
                self.focused = candidate;
                return;
            }
        }
        // Buffer full: leave focus where the player typed.
        self.focused = from;
    }

    fn first_editable_position(&self) -> usize {
        (0..self.buffer.len())
            .find(|p| !self.locked.contains(p))
            .unwrap_or(0)
    }
}

/// Validate an externally-supplied target against the settings.
fn check_target(settings: &GameSettings, target: &DigitSequence) -> Result<(), GameError> {
    target
        .check_shape(
            settings.target_length(),
            settings.digit_range,
            !settings.allow_repeats,
        )
        .map_err(|e| match e {
            ShapeError::Length { expected, got } => {
                GameError::TargetLengthMismatch { expected, got }
            }
            ShapeError::DigitOutOfRange { digit, range } => {
                GameError::TargetDigitOutOfRange { digit, range }
            }
            ShapeError::RepeatedDigit => GameError::TargetRepeatsDigit,
        })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::hints::HintReveal;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn later() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_090, 0).unwrap()
    }

    fn active_game(target: &[u8]) -> GameState {
        let mut state = GameState::with_target(
            GameId::new([1; 16]),
            GameSettings::default(),
            DigitSequence::from_slice(target),
            7,
        )
        .unwrap();
        state.start(now()).unwrap();
        state
    }

    fn fill_buffer(state: &mut GameState, digits: &[u8]) {
        for (i, &d) in digits.iter().enumerate() {
            state.set_digit(i, d).unwrap();
        }
    }

    #[test]
    fn test_lifecycle_not_started_rejects_play() {
        let state_result = GameState::with_target(
            GameId::new([1; 16]),
            GameSettings::default(),
            DigitSequence::from_slice(&[0, 1, 2, 3]),
            7,
        );
        let mut state = state_result.unwrap();
        assert_eq!(state.phase, GamePhase::NotStarted);

        let err = state.set_digit(0, 5).unwrap_err();
        assert_eq!(err, GameError::GameNotActive { phase: GamePhase::NotStarted });

        let err = state.submit_guess(now()).unwrap_err();
        assert_eq!(err, GameError::GameNotActive { phase: GamePhase::NotStarted });
    }

    #[test]
    fn test_double_start_rejected() {
        let mut state = active_game(&[0, 1, 2, 3]);
        assert_eq!(state.start(now()).unwrap_err(), GameError::AlreadyStarted);
    }

    #[test]
    fn test_target_validated_against_settings() {
        let settings = GameSettings::default(); // 1x4, distinct

        let err = GameState::with_target(
            GameId::generate(),
            settings,
            DigitSequence::from_slice(&[0, 1, 2]),
            7,
        )
        .unwrap_err();
        assert_eq!(err, GameError::TargetLengthMismatch { expected: 4, got: 3 });

        let err = GameState::with_target(
            GameId::generate(),
            settings,
            DigitSequence::from_slice(&[0, 1, 2, 2]),
            7,
        )
        .unwrap_err();
        assert_eq!(err, GameError::TargetRepeatsDigit);
    }

    #[test]
    fn test_submit_computes_feedback_and_clears_buffer() {
        let mut state = active_game(&[0, 1, 2, 3]);
        fill_buffer(&mut state, &[3, 2, 1, 0]);

        let guess = state.submit_guess(now()).unwrap();
        assert_eq!(
            guess.result,
            GuessResult { picos: 0, fermis: 4, bagels: 0, is_winner: false }
        );

        // clear_guess_after_submit defaults to true
        assert!(state.buffer.iter().all(|slot| slot.is_none()));
        assert_eq!(state.focused, 0);
        assert_eq!(state.guess_count(), 1);
        assert!(state.is_active());
    }

    #[test]
    fn test_incomplete_guess_rejected() {
        let mut state = active_game(&[0, 1, 2, 3]);
        state.set_digit(0, 5).unwrap();
        state.set_digit(1, 6).unwrap();

        let err = state.submit_guess(now()).unwrap_err();
        assert_eq!(err, GameError::IncompleteGuess { missing: 2 });
        assert_eq!(state.guess_count(), 0);
    }

    #[test]
    fn test_winning_submission_ends_game() {
        let mut state = active_game(&[0, 1, 2, 3]);
        fill_buffer(&mut state, &[0, 1, 2, 3]);

        let guess = state.submit_guess(later()).unwrap();
        assert!(guess.result.is_winner);
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.ended_at, Some(later()));
        assert_eq!(state.duration(), Some(chrono::Duration::seconds(90)));

        let events = state.take_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameWon { .. })));
    }

    #[test]
    fn test_submit_after_win_fails_without_append() {
        let mut state = active_game(&[0, 1, 2, 3]);
        fill_buffer(&mut state, &[0, 1, 2, 3]);
        state.submit_guess(now()).unwrap();
        assert_eq!(state.phase, GamePhase::Won);

        let err = state.submit_guess(later()).unwrap_err();
        assert_eq!(err, GameError::GameNotActive { phase: GamePhase::Won });
        assert_eq!(state.guess_count(), 1);
    }

    #[test]
    fn test_locked_position_rejects_edits_and_survives_clear() {
        let mut state = active_game(&[0, 1, 2, 3]);
        fill_buffer(&mut state, &[0, 9, 8, 7]);

        state.toggle_lock(0).unwrap();
        assert_eq!(
            state.set_digit(0, 5).unwrap_err(),
            GameError::LockedPosition { position: 0 }
        );
        assert_eq!(
            state.clear_digit(0).unwrap_err(),
            GameError::LockedPosition { position: 0 }
        );

        state.submit_guess(now()).unwrap();

        // Locked slot kept its digit through the clear; the rest emptied.
        assert_eq!(state.buffer[0], Some(0));
        assert!(state.buffer[1..].iter().all(|slot| slot.is_none()));
        // Focus skips the locked slot.
        assert_eq!(state.focused, 1);
    }

    #[test]
    fn test_lock_requires_digit() {
        let mut state = active_game(&[0, 1, 2, 3]);
        assert_eq!(
            state.toggle_lock(2).unwrap_err(),
            GameError::CannotLockEmpty { position: 2 }
        );

        state.set_digit(2, 4).unwrap();
        state.toggle_lock(2).unwrap();
        assert!(state.locked.contains(&2));

        // Unlock frees the slot again.
        state.toggle_lock(2).unwrap();
        state.set_digit(2, 5).unwrap();
    }

    #[test]
    fn test_focus_advances_past_filled_slots() {
        let mut state = active_game(&[0, 1, 2, 3]);

        state.set_digit(0, 4).unwrap();
        assert_eq!(state.focused, 1);

        state.set_digit(2, 5).unwrap();
        // Position 3 is the next unset slot after 2.
        assert_eq!(state.focused, 3);

        state.set_digit(3, 6).unwrap();
        // Wraps to position 1, the only remaining unset slot.
        assert_eq!(state.focused, 1);
    }

    #[test]
    fn test_out_of_range_edits_rejected() {
        let mut state = active_game(&[0, 1, 2, 3]);

        assert_eq!(
            state.set_digit(4, 0).unwrap_err(),
            GameError::PositionOutOfRange { position: 4, len: 4 }
        );
        assert_eq!(
            state.set_digit(0, 10).unwrap_err(),
            GameError::DigitOutOfRange { digit: 10, range: 10 }
        );
        assert_eq!(
            state.set_focus(9).unwrap_err(),
            GameError::PositionOutOfRange { position: 9, len: 4 }
        );
    }

    #[test]
    fn test_scratchpad_marks() {
        let mut state = active_game(&[0, 1, 2, 3]);

        state.set_scratchpad(7, ScratchpadColor::Red).unwrap();
        assert_eq!(state.scratchpad.get(&7), Some(&ScratchpadColor::Red));

        state.set_scratchpad(7, ScratchpadColor::Green).unwrap();
        assert_eq!(state.scratchpad.get(&7), Some(&ScratchpadColor::Green));

        state.clear_scratchpad(7).unwrap();
        assert!(state.scratchpad.is_empty());

        assert_eq!(
            state.set_scratchpad(10, ScratchpadColor::Gray).unwrap_err(),
            GameError::DigitOutOfRange { digit: 10, range: 10 }
        );
    }

    #[test]
    fn test_hint_purchase_charges_once() {
        let mut state = active_game(&[0, 1, 2, 3]);
        let score_before = state.score;

        let outcome = state.purchase_hint(HintRequest::Bagel { digit: 9 }).unwrap();
        assert_eq!(outcome.reveal, HintReveal::DigitAbsent { digit: 9 });
        let cost = state.settings.hint_costs.bagel;
        assert_eq!(state.score, score_before - cost);
        assert_eq!(state.hint_spend, cost);

        // Repeat purchase: same fact, no extra charge, ledger unchanged.
        let repeat = state.purchase_hint(HintRequest::Bagel { digit: 9 }).unwrap();
        assert!(repeat.repeat);
        assert_eq!(state.score, score_before - cost);
        assert_eq!(state.hints.confirmed_absent().len(), 1);
    }

    #[test]
    fn test_score_monotonic_in_hints() {
        // Two identical play-throughs; one buys an extra hint.
        let play = |extra_hint: bool| {
            let mut state = active_game(&[0, 1, 2, 3]);
            state.purchase_hint(HintRequest::RowSums { row: 0 }).unwrap();
            if extra_hint {
                state.purchase_hint(HintRequest::Bagel { digit: 8 }).unwrap();
            }
            fill_buffer(&mut state, &[0, 1, 2, 3]);
            state.submit_guess(now()).unwrap();
            state.score
        };

        assert!(play(true) <= play(false));
    }

    #[test]
    fn test_score_monotonic_in_guesses() {
        let play = |wrong_first: bool| {
            let mut state = active_game(&[0, 1, 2, 3]);
            if wrong_first {
                fill_buffer(&mut state, &[4, 5, 6, 7]);
                state.submit_guess(now()).unwrap();
            }
            fill_buffer(&mut state, &[0, 1, 2, 3]);
            state.submit_guess(now()).unwrap();
            state.score
        };

        assert!(play(true) <= play(false));
    }

    #[test]
    fn test_score_floors_at_zero() {
        let settings = GameSettings {
            scoring: crate::game::settings::ScoringConfig {
                starting_score: 10,
                guess_penalty: 25,
            },
            ..GameSettings::default()
        };
        let mut state = GameState::with_target(
            GameId::generate(),
            settings,
            DigitSequence::from_slice(&[0, 1, 2, 3]),
            7,
        )
        .unwrap();
        state.start(now()).unwrap();

        fill_buffer(&mut state, &[4, 5, 6, 7]);
        state.submit_guess(now()).unwrap();
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_abandon() {
        let mut state = active_game(&[0, 1, 2, 3]);
        state.abandon(later()).unwrap();

        assert_eq!(state.phase, GamePhase::Abandoned);
        assert_eq!(state.ended_at, Some(later()));

        // Terminal: no further abandon or play.
        assert_eq!(
            state.abandon(later()).unwrap_err(),
            GameError::GameNotActive { phase: GamePhase::Abandoned }
        );
    }

    #[test]
    fn test_seeded_games_are_identical() {
        let settings = GameSettings::default();
        let make = || {
            let mut state =
                GameState::from_seed(GameId::new([2; 16]), settings, 987654321).unwrap();
            state.start(now()).unwrap();
            state.purchase_hint(HintRequest::RandomExpose).unwrap();
            state
        };

        let a = make();
        let b = make();

        assert_eq!(a.target, b.target);
        assert_eq!(a.hints.exposed(), b.hints.exposed());
        assert_eq!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_hash_excludes_ids_and_timestamps() {
        let target = [0u8, 1, 2, 3];
        let mut a = active_game(&target);
        let mut b = GameState::with_target(
            GameId::new([9; 16]), // different id
            GameSettings::default(),
            DigitSequence::from_slice(&target),
            7,
        )
        .unwrap();
        b.start(later()).unwrap(); // different timestamp

        fill_buffer(&mut a, &[3, 2, 1, 0]);
        a.submit_guess(now()).unwrap();
        fill_buffer(&mut b, &[3, 2, 1, 0]);
        b.submit_guess(later()).unwrap();

        assert_eq!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_hash_tracks_history() {
        let mut state = active_game(&[0, 1, 2, 3]);
        let before = state.compute_hash();

        fill_buffer(&mut state, &[3, 2, 1, 0]);
        state.submit_guess(now()).unwrap();

        assert_ne!(state.compute_hash(), before);
    }

    #[test]
    fn test_events_drain() {
        let mut state = active_game(&[0, 1, 2, 3]);
        fill_buffer(&mut state, &[0, 1, 2, 3]);
        state.submit_guess(now()).unwrap();

        let events = state.take_events();
        assert!(!events.is_empty());
        assert!(state.take_events().is_empty());
    }
}
