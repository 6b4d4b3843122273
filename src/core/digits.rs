//! Digit Sequences
//!
//! The core value type: an ordered sequence of digits, each drawn from
//! `[0, digit_range)`. Targets and committed guesses are both digit
//! sequences of the configured length.

use serde::{Serialize, Deserialize};

use super::rng::DeterministicRng;

/// Largest digit range the engine supports (digits 0-9).
pub const MAX_DIGIT_RANGE: u8 = 10;

/// Largest target length the engine supports.
pub const MAX_TARGET_LENGTH: usize = 32;

/// An ordered sequence of digits.
///
/// Immutable once constructed. A target sequence is drawn once per game;
/// a guess sequence is frozen at submission time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigitSequence(Vec<u8>);

impl DigitSequence {
    /// Create from raw digits.
    pub fn new(digits: Vec<u8>) -> Self {
        Self(digits)
    }

    /// Create from a slice.
    pub fn from_slice(digits: &[u8]) -> Self {
        Self(digits.to_vec())
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the sequence holds no digits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Digit at a position.
    pub fn get(&self, position: usize) -> Option<u8> {
        self.0.get(position).copied()
    }

    /// Raw digit slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Iterate over digits.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    /// Whether a digit value occurs anywhere in the sequence.
    pub fn contains(&self, digit: u8) -> bool {
        self.0.contains(&digit)
    }

    /// Whether every digit occurs at most once.
    pub fn all_distinct(&self) -> bool {
        let mut seen = [false; MAX_DIGIT_RANGE as usize];
        for &d in &self.0 {
            let idx = d as usize;
            if idx >= seen.len() || seen[idx] {
                return false;
            }
            seen[idx] = true;
        }
        true
    }

    /// Check the sequence against an expected shape.
    ///
    /// Returns the first violation: wrong length, a digit outside
    /// `[0, range)`, or a repeated digit when `distinct` is required.
    pub fn check_shape(
        &self,
        len: usize,
        range: u8,
        distinct: bool,
    ) -> Result<(), ShapeError> {
        if self.0.len() != len {
            return Err(ShapeError::Length { expected: len, got: self.0.len() });
        }
        for &d in &self.0 {
            if d >= range {
                return Err(ShapeError::DigitOutOfRange { digit: d, range });
            }
        }
        if distinct && !self.all_distinct() {
            return Err(ShapeError::RepeatedDigit);
        }
        Ok(())
    }

    /// Draw a random sequence of `len` digits in `[0, range)`.
    ///
    /// When `allow_repeats` is false the digits are a Fisher-Yates prefix
    /// of the full range, so every digit is distinct. Caller must ensure
    /// `len <= range` in that case.
    pub fn random(
        rng: &mut DeterministicRng,
        len: usize,
        range: u8,
        allow_repeats: bool,
    ) -> Self {
        if allow_repeats {
            let digits = (0..len).map(|_| rng.next_int(range as u32) as u8).collect();
            Self(digits)
        } else {
            let mut pool: Vec<u8> = (0..range).collect();
            rng.shuffle(&mut pool);
            pool.truncate(len);
            Self(pool)
        }
    }
}

impl std::fmt::Display for DigitSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

impl From<Vec<u8>> for DigitSequence {
    fn from(digits: Vec<u8>) -> Self {
        Self(digits)
    }
}

/// Shape violation found by [`DigitSequence::check_shape`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// Sequence has the wrong length.
    Length {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// A digit is outside the configured range.
    DigitOutOfRange {
        /// The offending digit.
        digit: u8,
        /// Exclusive upper bound.
        range: u8,
    },
    /// A digit repeats where distinct digits are required.
    RepeatedDigit,
}

// =============================================================================
// TESTS
// =============================================================================
