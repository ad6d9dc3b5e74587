//! Deck Core
//!
//! Foundational primitives shared by the Deck crates:
//!
//! - **Geometry**: points, sizes, rects and 2D affine transforms
//! - **Input Events**: the raw pointer/scroll vocabulary a platform reports
//! - **State Machines**: enum-based transitions with history
//!
//! # Example
//!
//! ```rust
//! use deck_core::fsm::{EventId, StateMachine, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Door {
//!     Closed,
//!     Open,
//! }
//!
//! const PUSH: EventId = 1;
//!
//! impl StateTransitions for Door {
//!     fn on_event(&self, event: EventId) -> Option<Self> {
//!         match (self, event) {
//!             (Door::Closed, PUSH) => Some(Door::Open),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut door = StateMachine::new(Door::Closed);
//! assert_eq!(door.send(PUSH), Some(Door::Open));
//! assert_eq!(door.send(PUSH), None);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::InputEvent;
pub use fsm::{EventId, StateMachine, StateTransitions};
pub use geometry::{Affine2D, Color, Point, Rect, Size};
