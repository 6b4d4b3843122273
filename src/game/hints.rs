//! Hint Economy
//!
//! Purchased hints reveal partial information about the target at a fixed
//! score cost. The ledger records every revealed fact so that repeat
//! purchases are idempotent: asking for an already-revealed fact returns
//! it again at zero cost.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Deserialize};

use crate::core::digits::DigitSequence;
use crate::core::rng::DeterministicRng;
use crate::game::error::GameError;
use crate::game::settings::GameSettings;

/// A hint the player asks to purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HintRequest {
    /// Is this digit absent from the target?
    Bagel {
        /// Digit to test.
        digit: u8,
    },
    /// Is this digit present in the target?
    NotBagel {
        /// Digit to test.
        digit: u8,
    },
    /// Deltas between adjacent target digits in a grid row.
    RowDelta {
        /// Grid row index.
        row: usize,
    },
    /// Expose one random, not-yet-exposed target position.
    RandomExpose,
    /// Sum of the target digits in a grid row.
    RowSums {
        /// Grid row index.
        row: usize,
    },
}

/// The fact a purchase revealed.
///
/// `Bagel` and `NotBagel` requests both resolve to whichever of
/// `DigitAbsent` / `DigitPresent` is actually true of the target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HintReveal {
    /// The digit does not occur in the target.
    DigitAbsent {
        /// Tested digit.
        digit: u8,
    },
    /// The digit occurs in the target.
    DigitPresent {
        /// Tested digit.
        digit: u8,
    },
    /// Deltas between adjacent digits of a row. Magnitudes unless the
    /// ledger was created with signed deltas enabled.
    RowDeltas {
        /// Grid row index.
        row: usize,
        /// One delta per adjacent pair in the row.
        deltas: Vec<i8>,
    },
    /// A target position and its digit.
    Exposed {
        /// Exposed position.
        position: usize,
        /// Digit at that position.
        digit: u8,
    },
    /// The digit sum of a row.
    RowSum {
        /// Grid row index.
        row: usize,
        /// Sum of the row's digits.
        sum: u32,
    },
}

/// Result of a purchase attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HintOutcome {
    /// What was revealed.
    pub reveal: HintReveal,
    /// Score charged. Zero for a repeat purchase.
    pub cost: u32,
    /// True if the fact was already in the ledger.
    pub repeat: bool,
}

/// Ledger of every purchased hint.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HintState {
    /// Digits confirmed to occur in the target.
    confirmed_present: BTreeSet<u8>,
    /// Digits confirmed absent from the target.
    confirmed_absent: BTreeSet<u8>,
    /// Revealed row deltas, keyed by row index.
    delta_rows: BTreeMap<usize, Vec<i8>>,
    /// Whether deltas carry their sign.
    show_signed_deltas: bool,
    /// Exposed positions and their digits.
    exposed: BTreeMap<usize, u8>,
    /// Revealed row sums, keyed by row index.
    row_sums: BTreeMap<usize, u32>,
}

impl HintState {
    /// Create an empty ledger.
    pub fn new(show_signed_deltas: bool) -> Self {
        Self {
            show_signed_deltas,
            ..Self::default()
        }
    }

    /// Digits confirmed present.
    pub fn confirmed_present(&self) -> &BTreeSet<u8> {
        &self.confirmed_present
    }

    /// Digits confirmed absent.
    pub fn confirmed_absent(&self) -> &BTreeSet<u8> {
        &self.confirmed_absent
    }

    /// Revealed row deltas.
    pub fn delta_rows(&self) -> &BTreeMap<usize, Vec<i8>> {
        &self.delta_rows
    }

    /// Number of row-delta hints bought.
    pub fn delta_count(&self) -> usize {
        self.delta_rows.len()
    }

    /// Whether deltas carry their sign.
    pub fn show_signed_deltas(&self) -> bool {
        self.show_signed_deltas
    }

    /// Exposed positions and digits.
    pub fn exposed(&self) -> &BTreeMap<usize, u8> {
        &self.exposed
    }

    /// Revealed row sums.
    pub fn row_sums(&self) -> &BTreeMap<usize, u32> {
        &self.row_sums
    }

    /// Total number of charged purchases recorded in the ledger.
    pub fn purchases(&self) -> usize {
        self.confirmed_present.len()
            + self.confirmed_absent.len()
            + self.delta_rows.len()
            + self.exposed.len()
            + self.row_sums.len()
    }

    /// Resolve a purchase against the target.
    ///
    /// Inserts the revealed fact into the ledger and returns it together
    /// with the cost to charge. Repeat purchases return the recorded fact
    /// at zero cost. Out-of-range digits/rows and exhausted exposure fail
    /// without touching the ledger.
    pub(crate) fn apply(
        &mut self,
        request: HintRequest,
        target: &DigitSequence,
        settings: &GameSettings,
        rng: &mut DeterministicRng,
    ) -> Result<HintOutcome, GameError> {
        match request {
            HintRequest::Bagel { digit } | HintRequest::NotBagel { digit } => {
                if digit >= settings.digit_range {
                    return Err(GameError::DigitOutOfRange {
                        digit,
                        range: settings.digit_range,
                    });
                }

                // Both request types resolve to the same fact; either set
                // already holding the digit makes this a repeat.
                if self.confirmed_present.contains(&digit) {
                    return Ok(HintOutcome {
                        reveal: HintReveal::DigitPresent { digit },
                        cost: 0,
                        repeat: true,
                    });
                }
                if self.confirmed_absent.contains(&digit) {
                    return Ok(HintOutcome {
                        reveal: HintReveal::DigitAbsent { digit },
                        cost: 0,
                        repeat: true,
                    });
                }

                let cost = match request {
                    HintRequest::Bagel { .. } => settings.hint_costs.bagel,
                    _ => settings.hint_costs.not_bagel,
                };
                let reveal = if target.contains(digit) {
                    self.confirmed_present.insert(digit);
                    HintReveal::DigitPresent { digit }
                } else {
                    self.confirmed_absent.insert(digit);
                    HintReveal::DigitAbsent { digit }
                };
                Ok(HintOutcome { reveal, cost, repeat: false })
            }

            HintRequest::RowDelta { row } => {
                if row >= settings.grid_rows {
                    return Err(GameError::RowOutOfRange {
                        row,
                        rows: settings.grid_rows,
                    });
                }
                if let Some(deltas) = self.delta_rows.get(&row) {
                    return Ok(HintOutcome {
                        reveal: HintReveal::RowDeltas { row, deltas: deltas.clone() },
                        cost: 0,
                        repeat: true,
                    });
                }

                let span = settings.row_span(row);
                let digits = &target.as_slice()[span];
                let deltas: Vec<i8> = digits
                    .windows(2)
                    .map(|pair| {
                        let delta = pair[1] as i8 - pair[0] as i8;
                        if self.show_signed_deltas { delta } else { delta.abs() }
                    })
                    .collect();

                self.delta_rows.insert(row, deltas.clone());
                Ok(HintOutcome {
                    reveal: HintReveal::RowDeltas { row, deltas },
                    cost: settings.hint_costs.row_delta,
                    repeat: false,
                })
            }

            HintRequest::RandomExpose => {
                let unexposed: Vec<usize> = (0..target.len())
                    .filter(|p| !self.exposed.contains_key(p))
                    .collect();
                let position = *rng
                    .choose(&unexposed)
                    .ok_or(GameError::AllPositionsExposed)?;
                let digit = target.get(position).unwrap();

                self.exposed.insert(position, digit);
                Ok(HintOutcome {
                    reveal: HintReveal::Exposed { position, digit },
                    cost: settings.hint_costs.random_expose,
                    repeat: false,
                })
            }

            HintRequest::RowSums { row } => {
                if row >= settings.grid_rows {
                    return Err(GameError::RowOutOfRange {
                        row,
                        rows: settings.grid_rows,
                    });
                }
                if let Some(&sum) = self.row_sums.get(&row) {
                    return Ok(HintOutcome {
                        reveal: HintReveal::RowSum { row, sum },
                        cost: 0,
                        repeat: true,
                    });
                }

                let span = settings.row_span(row);
                let sum: u32 = target.as_slice()[span].iter().map(|&d| d as u32).sum();

                self.row_sums.insert(row, sum);
                Ok(HintOutcome {
                    reveal: HintReveal::RowSum { row, sum },
                    cost: settings.hint_costs.row_sums,
                    repeat: false,
                })
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (DigitSequence, GameSettings, DeterministicRng) {
        let settings = GameSettings {
            grid_rows: 2,
            grid_cols: 3,
            digit_range: 10,
            allow_repeats: true,
            ..GameSettings::default()
        };
        let target = DigitSequence::from_slice(&[3, 1, 4, 1, 5, 9]);
        (target, settings, DeterministicRng::new(42))
    }

    #[test]
    fn test_bagel_resolves_to_truth() {
        let (target, settings, mut rng) = fixture();
        let mut hints = HintState::new(false);

        // 7 is absent
        let outcome = hints
            .apply(HintRequest::Bagel { digit: 7 }, &target, &settings, &mut rng)
            .unwrap();
        assert_eq!(outcome.reveal, HintReveal::DigitAbsent { digit: 7 });
        assert_eq!(outcome.cost, settings.hint_costs.bagel);

        // 4 is present, even though the player asked "is it a bagel?"
        let outcome = hints
            .apply(HintRequest::Bagel { digit: 4 }, &target, &settings, &mut rng)
            .unwrap();
        assert_eq!(outcome.reveal, HintReveal::DigitPresent { digit: 4 });
    }

    #[test]
    fn test_repeat_purchase_is_free() {
        let (target, settings, mut rng) = fixture();
        let mut hints = HintState::new(false);

        let first = hints
            .apply(HintRequest::Bagel { digit: 7 }, &target, &settings, &mut rng)
            .unwrap();
        assert!(!first.repeat);
        assert_eq!(hints.confirmed_absent().len(), 1);

        // Same digit again - and also via the other request type.
        for request in [HintRequest::Bagel { digit: 7 }, HintRequest::NotBagel { digit: 7 }] {
            let again = hints.apply(request, &target, &settings, &mut rng).unwrap();
            assert!(again.repeat);
            assert_eq!(again.cost, 0);
            assert_eq!(again.reveal, HintReveal::DigitAbsent { digit: 7 });
        }
        assert_eq!(hints.confirmed_absent().len(), 1);
    }

    #[test]
    fn test_digit_out_of_range() {
        let (target, settings, mut rng) = fixture();
        let mut hints = HintState::new(false);

        let err = hints
            .apply(HintRequest::NotBagel { digit: 10 }, &target, &settings, &mut rng)
            .unwrap_err();
        assert_eq!(err, GameError::DigitOutOfRange { digit: 10, range: 10 });
    }

    #[test]
    fn test_row_delta_magnitudes() {
        let (target, settings, mut rng) = fixture();
        let mut hints = HintState::new(false);

        // Row 1 holds [1, 5, 9]: deltas 4, 4
        let outcome = hints
            .apply(HintRequest::RowDelta { row: 1 }, &target, &settings, &mut rng)
            .unwrap();
        assert_eq!(
            outcome.reveal,
            HintReveal::RowDeltas { row: 1, deltas: vec![4, 4] }
        );
        assert_eq!(hints.delta_count(), 1);
    }

    #[test]
    fn test_row_delta_signed() {
        let (target, settings, mut rng) = fixture();
        let mut hints = HintState::new(true);

        // Row 0 holds [3, 1, 4]: signed deltas -2, +3
        let outcome = hints
            .apply(HintRequest::RowDelta { row: 0 }, &target, &settings, &mut rng)
            .unwrap();
        assert_eq!(
            outcome.reveal,
            HintReveal::RowDeltas { row: 0, deltas: vec![-2, 3] }
        );
    }

    #[test]
    fn test_row_out_of_range() {
        let (target, settings, mut rng) = fixture();
        let mut hints = HintState::new(false);

        let err = hints
            .apply(HintRequest::RowDelta { row: 2 }, &target, &settings, &mut rng)
            .unwrap_err();
        assert_eq!(err, GameError::RowOutOfRange { row: 2, rows: 2 });

        let err = hints
            .apply(HintRequest::RowSums { row: 5 }, &target, &settings, &mut rng)
            .unwrap_err();
        assert_eq!(err, GameError::RowOutOfRange { row: 5, rows: 2 });
    }

    #[test]
    fn test_row_sum() {
        let (target, settings, mut rng) = fixture();
        let mut hints = HintState::new(false);

        let outcome = hints
            .apply(HintRequest::RowSums { row: 0 }, &target, &settings, &mut rng)
            .unwrap();
        assert_eq!(outcome.reveal, HintReveal::RowSum { row: 0, sum: 8 });

        // Second purchase returns the recorded sum for free.
        let again = hints
            .apply(HintRequest::RowSums { row: 0 }, &target, &settings, &mut rng)
            .unwrap();
        assert!(again.repeat);
        assert_eq!(again.cost, 0);
    }

    #[test]
    fn test_random_expose_exhaustion() {
        let (target, settings, mut rng) = fixture();
        let mut hints = HintState::new(false);

        // Expose all six positions
        for _ in 0..target.len() {
            let outcome = hints
                .apply(HintRequest::RandomExpose, &target, &settings, &mut rng)
                .unwrap();
            match outcome.reveal {
                HintReveal::Exposed { position, digit } => {
                    assert_eq!(target.get(position), Some(digit));
                }
                other => panic!("unexpected reveal: {:?}", other),
            }
        }
        assert_eq!(hints.exposed().len(), target.len());

        // No position left to expose
        let err = hints
            .apply(HintRequest::RandomExpose, &target, &settings, &mut rng)
            .unwrap_err();
        assert_eq!(err, GameError::AllPositionsExposed);
    }

    #[test]
    fn test_random_expose_determinism() {
        let (target, settings, _) = fixture();

        let mut rng1 = DeterministicRng::new(9001);
        let mut rng2 = DeterministicRng::new(9001);
        let mut hints1 = HintState::new(false);
        let mut hints2 = HintState::new(false);

        for _ in 0..3 {
            let a = hints1
                .apply(HintRequest::RandomExpose, &target, &settings, &mut rng1)
                .unwrap();
            let b = hints2
                .apply(HintRequest::RandomExpose, &target, &settings, &mut rng2)
                .unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_purchase_count() {
        let (target, settings, mut rng) = fixture();
        let mut hints = HintState::new(false);

        hints.apply(HintRequest::Bagel { digit: 7 }, &target, &settings, &mut rng).unwrap();
        hints.apply(HintRequest::NotBagel { digit: 4 }, &target, &settings, &mut rng).unwrap();
        hints.apply(HintRequest::RowSums { row: 0 }, &target, &settings, &mut rng).unwrap();
        hints.apply(HintRequest::RandomExpose, &target, &settings, &mut rng).unwrap();
        // Repeat adds nothing
        hints.apply(HintRequest::Bagel { digit: 7 }, &target, &settings, &mut rng).unwrap();

        assert_eq!(hints.purchases(), 4);
    }
}
