//! Deck Card
//!
//! An expandable card: a compact surface that expands on tap into a
//! full-screen detail presentation over a translucent backdrop, with a bounce
//! accent and a scrollable content region that can be dragged down to
//! dismiss it.
//!
//! # Quick start
//!
//! ```rust
//! use deck_card::{Card, CardState};
//! use deck_core::Rect;
//!
//! let mut card = Card::with_defaults(Rect::new(10.0, 10.0, 100.0, 140.0));
//! card.tap();
//! assert_eq!(card.state(), CardState::Expanding);
//!
//! // Drive the animations until the expansion commits
//! card.run_until_idle(1.0 / 60.0, 600);
//! assert!(card.is_detail_presented());
//! assert_eq!(card.detail_frame(), Some(card.layout().detail_frame()));
//! ```
//!
//! # Modules
//!
//! - [`state`] presentation states and their transitions
//! - [`gesture`] tap recognition and scroll passthrough
//! - [`layout`] expanded geometry and bounce offsets
//! - [`observer`] notifications for the owning application
//! - [`config`] styling, timings and screen geometry

pub mod card;
pub mod config;
pub mod content;
pub mod drag;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod motion;
pub mod observer;
mod presentation;
pub mod regions;
pub mod state;

pub use card::Card;
pub use config::{CardConfig, HexColor, MotionConfig, ScreenConfig, StyleConfig};
pub use content::{DetailContent, PlaceholderContent, PLACEHOLDER_HEIGHT, PLACEHOLDER_TEXT};
pub use drag::ReleaseOutcome;
pub use error::{ConfigError, Result};
pub use gesture::{release_speed, settle_duration, Gesture, GestureInterpreter};
pub use layout::{insets_for, Direction, LayoutEngine};
pub use motion::{CardMotion, MotionRole, Sample, Track};
pub use observer::{CardNotification, CardObserver, NotificationLog};
pub use regions::{Backdrop, ScrollRegion, StackPosition};
pub use state::{card_events, CardState};
