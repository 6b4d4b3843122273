//! Deduction Feedback
//!
//! The pure core of the game: comparing a committed guess against the
//! target. Must be 100% deterministic - a server recomputes these values
//! from the transcript to validate reported results.

use serde::{Serialize, Deserialize};

use crate::core::digits::{DigitSequence, MAX_DIGIT_RANGE};

/// Feedback for one committed guess.
///
/// Invariant: `picos + fermis + bagels == target length`, always.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    /// Digits correct in both value and position.
    pub picos: u32,
    /// Digits present in the target but at a different position.
    pub fermis: u32,
    /// Digits absent from the target entirely.
    pub bagels: u32,
    /// True iff every position matched.
    pub is_winner: bool,
}

impl GuessResult {
    /// Sum of the three counts. Equals the target length for any valid
    /// feedback value.
    pub fn total(&self) -> u32 {
        self.picos + self.fermis + self.bagels
    }
}

/// Compute feedback for a guess against a target.
///
/// Two passes. First, exact-position matches consume the digit on both
/// sides. Second, each unconsumed guess digit matches one unconsumed
/// target digit of the same value, if any remain - so a digit repeated in
/// the guess earns at most as many fermis as the target holds unconsumed
/// instances of that value. Whatever is left is a bagel.
///
/// # Panics
///
/// Panics if `guess` and `target` differ in length. Submission validation
/// must reject incomplete guesses before reaching this function.
pub fn compute_feedback(target: &DigitSequence, guess: &DigitSequence) -> GuessResult {
    assert_eq!(
        guess.len(),
        target.len(),
        "guess length must match target length",
    );

    let len = target.len();
    let mut picos = 0u32;

    // Count unconsumed digits per value after the exact-position pass.
    let mut target_left = [0u16; MAX_DIGIT_RANGE as usize];
    let mut guess_left = [0u16; MAX_DIGIT_RANGE as usize];

    for (&t, &g) in target.as_slice().iter().zip(guess.as_slice()) {
        if t == g {
            picos += 1;
        } else {
            target_left[t as usize] += 1;
            guess_left[g as usize] += 1;
        }
    }

    // Each value contributes min(unconsumed-in-guess, unconsumed-in-target)
    // fermis; one instance is consumed on each side per match.
    let fermis: u32 = target_left
        .iter()
        .zip(guess_left.iter())
        .map(|(&t, &g)| t.min(g) as u32)
        .sum();

    let bagels = len as u32 - picos - fermis;

    GuessResult {
        picos,
        fermis,
        bagels,
        is_winner: picos == len as u32,
    }
}

// =============================================================================
// TESTS
// =============================================================================
