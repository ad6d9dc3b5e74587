//! Card presentation states
//!
//! ```text
//!            PRESS               TAP
//! Collapsed ───────▶ PressedDown ───────▶ Expanding ──SHOW_COMPLETE──▶ Expanded
//!     ▲  ◀─────────── (PRESS_CANCEL)         ▲                            │
//!     │  └──────────────── TAP ──────────────┘                            │
//!     │                                                               DISMISS
//!     └──────────────── HIDE_COMPLETE ──────── Collapsing ◀───────────────┘
//! ```
//!
//! `PressedDown` is a visual accent only; it never changes whether the detail
//! is presented. `Expanded` accepts no tap: dismissal comes from the scroll
//! drag policy alone.

use deck_core::fsm::{EventId, StateTransitions};
use serde::{Deserialize, Serialize};

/// Events understood by [`CardState`]
pub mod card_events {
    use deck_core::fsm::EventId;

    /// Touch went down on the card
    pub const PRESS: EventId = 100;
    /// Touch ended without a tap
    pub const PRESS_CANCEL: EventId = 101;
    /// Tap recognized
    pub const TAP: EventId = 102;
    /// Expand scale animation completed
    pub const SHOW_COMPLETE: EventId = 103;
    /// Drag release committed a dismissal
    pub const DISMISS: EventId = 104;
    /// Collapse scale animation completed
    pub const HIDE_COMPLETE: EventId = 105;
}

/// Presentation state of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    #[default]
    Collapsed,
    PressedDown,
    Expanding,
    Expanded,
    Collapsing,
}

impl CardState {
    /// True while an expand or collapse animation owns the card
    pub fn is_transitioning(&self) -> bool {
        matches!(self, CardState::Expanding | CardState::Collapsing)
    }

    /// True in the compact stable states
    pub fn is_compact(&self) -> bool {
        matches!(self, CardState::Collapsed | CardState::PressedDown)
    }

    /// Snake-case name, as used in scenario files and logs
    pub fn name(&self) -> &'static str {
        match self {
            CardState::Collapsed => "collapsed",
            CardState::PressedDown => "pressed_down",
            CardState::Expanding => "expanding",
            CardState::Expanded => "expanded",
            CardState::Collapsing => "collapsing",
        }
    }
}

impl StateTransitions for CardState {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use card_events::*;
        match (self, event) {
            (CardState::Collapsed, PRESS) => Some(CardState::PressedDown),
            (CardState::PressedDown, PRESS_CANCEL) => Some(CardState::Collapsed),
            (CardState::Collapsed | CardState::PressedDown, TAP) => Some(CardState::Expanding),
            (CardState::Expanding, SHOW_COMPLETE) => Some(CardState::Expanded),
            (CardState::Expanded, DISMISS) => Some(CardState::Collapsing),
            (CardState::Collapsing, HIDE_COMPLETE) => Some(CardState::Collapsed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::card_events::*;
    use super::*;
    use deck_core::StateMachine;

    #[test]
    fn test_full_cycle() {
        let mut fsm = StateMachine::new(CardState::Collapsed);
        assert_eq!(fsm.send(PRESS), Some(CardState::PressedDown));
        assert_eq!(fsm.send(TAP), Some(CardState::Expanding));
        assert_eq!(fsm.send(SHOW_COMPLETE), Some(CardState::Expanded));
        assert_eq!(fsm.send(DISMISS), Some(CardState::Collapsing));
        assert_eq!(fsm.send(HIDE_COMPLETE), Some(CardState::Collapsed));
        assert_eq!(fsm.history().len(), 5);
    }

    #[test]
    fn test_expanded_ignores_taps_and_presses() {
        let fsm = StateMachine::new(CardState::Expanded);
        assert!(!fsm.can_send(TAP));
        assert!(!fsm.can_send(PRESS));
        assert!(!fsm.can_send(PRESS_CANCEL));
    }

    #[test]
    fn test_transitions_ignore_new_triggers() {
        for state in [CardState::Expanding, CardState::Collapsing] {
            assert!(state.is_transitioning());
            assert_eq!(state.on_event(TAP), None);
            assert_eq!(state.on_event(DISMISS), None);
            assert_eq!(state.on_event(PRESS), None);
        }
        // Only the matching completion moves a transition forward
        assert_eq!(CardState::Expanding.on_event(HIDE_COMPLETE), None);
        assert_eq!(CardState::Collapsing.on_event(SHOW_COMPLETE), None);
    }

    #[test]
    fn test_press_cancel_returns_to_collapsed() {
        assert_eq!(
            CardState::PressedDown.on_event(PRESS_CANCEL),
            Some(CardState::Collapsed)
        );
        assert_eq!(CardState::Collapsed.on_event(PRESS_CANCEL), None);
        assert!(CardState::PressedDown.is_compact());
    }
}
