//! Deck Animation System
//!
//! Time-boxed interpolations driven by an explicit frame clock.
//!
//! # Features
//!
//! - **Easing**: the standard ease-in/out curves
//! - **Tweens**: delay + duration + easing, advanced by `dt`
//! - **Scheduler**: runs many tweens at once, each carrying a payload, and
//!   reports per-frame progress and completions in the order they were started
//! - **Cancellable**: a running animation can be withdrawn, returning its payload

pub mod easing;
pub mod scheduler;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{AnimationFrame, AnimationId, AnimationScheduler, FrameStatus};
pub use tween::Tween;
