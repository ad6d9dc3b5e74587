//! State Machine Runtime
//!
//! Flat state machines over user-defined state enums. A state type maps
//! `(state, event)` pairs to successor states through [`StateTransitions`];
//! [`StateMachine`] owns the current state and keeps a bounded history of
//! the transitions it took.

use std::hash::Hash;

/// Identifier for an event type
pub type EventId = u32;

/// Number of transitions kept in [`StateMachine::history`]
const HISTORY_LIMIT: usize = 64;

/// Trait for state types that handle event transitions
///
/// # Example
///
/// ```rust
/// use deck_core::fsm::{EventId, StateTransitions};
///
/// const DOWN: EventId = 1;
/// const UP: EventId = 2;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Press {
///     Idle,
///     Down,
/// }
///
/// impl StateTransitions for Press {
///     fn on_event(&self, event: EventId) -> Option<Self> {
///         match (self, event) {
///             (Press::Idle, DOWN) => Some(Press::Down),
///             (Press::Down, UP) => Some(Press::Idle),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + std::fmt::Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine<S: StateTransitions> {
    current: S,
    /// Recent transitions as (from, event, to), oldest first
    history: Vec<(S, EventId, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    /// Create a state machine in its initial state
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event. Returns the new state if a transition happened.
    pub fn send(&mut self, event: EventId) -> Option<S> {
        let from = self.current;
        let to = from.on_event(event)?;

        self.current = to;
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((from, event, to));

        tracing::trace!(?from, ?to, event, "state transition");
        Some(to)
    }

    /// Recent transition history
    pub fn history(&self) -> &[(S, EventId, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
