//! Player Actions
//!
//! The closed set of actions a player can take, and the reducer that
//! applies them to a `GameState`. Every UI interaction and every action
//! replayed from a recording flows through `apply_action`.

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::game::error::GameError;
use crate::game::hints::HintRequest;
use crate::game::state::{GameState, ScratchpadColor};

/// A player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameAction {
    /// Begin play.
    Start,
    /// Place a digit into a buffer slot.
    SetDigit {
        /// Slot to fill.
        position: usize,
        /// Digit to place.
        digit: u8,
    },
    /// Clear a buffer slot.
    ClearDigit {
        /// Slot to clear.
        position: usize,
    },
    /// Move the input focus.
    SetFocus {
        /// New focus position.
        position: usize,
    },
    /// Lock or unlock a position.
    ToggleLock {
        /// Position to toggle.
        position: usize,
    },
    /// Mark a digit on the scratchpad.
    SetScratchpad {
        /// Digit to mark.
        digit: u8,
        /// Mark color.
        color: ScratchpadColor,
    },
    /// Remove a scratchpad mark.
    ClearScratchpad {
        /// Digit to unmark.
        digit: u8,
    },
    /// Commit the buffered guess.
    Submit,
    /// Purchase a hint.
    PurchaseHint {
        /// The hint to buy.
        request: HintRequest,
    },
    /// Abandon the game.
    Abandon,
}

/// Apply an action to the game state.
///
/// The single dispatch point for all state transitions. `now` stamps the
/// actions that record timestamps; passing a fixed clock makes a replay
/// byte-for-byte reproducible.
pub fn apply_action(
    state: &mut GameState,
    action: GameAction,
    now: DateTime<Utc>,
) -> Result<(), GameError> {
    match action {
        GameAction::Start => state.start(now),
        GameAction::SetDigit { position, digit } => state.set_digit(position, digit),
        GameAction::ClearDigit { position } => state.clear_digit(position),
        GameAction::SetFocus { position } => state.set_focus(position),
        GameAction::ToggleLock { position } => state.toggle_lock(position),
        GameAction::SetScratchpad { digit, color } => state.set_scratchpad(digit, color),
        GameAction::ClearScratchpad { digit } => state.clear_scratchpad(digit),
        GameAction::Submit => state.submit_guess(now).map(|_| ()),
        GameAction::PurchaseHint { request } => state.purchase_hint(request).map(|_| ()),
        GameAction::Abandon => state.abandon(now),
    }
}

// =============================================================================
// TESTS
// =============================================================================
