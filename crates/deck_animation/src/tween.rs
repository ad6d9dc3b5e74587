//! Time-boxed interpolation
//!
//! A [`Tween`] only tracks time. What is interpolated is up to the owner,
//! which receives eased progress in `0.0..=1.0` and applies it to its own
//! properties.

use crate::easing::Easing;

/// A delayed, eased progress clock (times in seconds)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    delay: f32,
    duration: f32,
    easing: Easing,
    elapsed: f32,
}

impl Tween {
    /// Create a tween of the given duration with no delay and linear easing.
    /// Negative durations are treated as zero.
    pub fn new(duration: f32) -> Self {
        Self {
            delay: 0.0,
            duration: duration.max(0.0),
            easing: Easing::Linear,
            elapsed: 0.0,
        }
    }

    /// Wait `delay` seconds before progress starts
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Total time from start to completion, delay included
    pub fn total(&self) -> f32 {
        self.delay + self.duration
    }

    /// Linear progress through the active (post-delay) part, `0.0..=1.0`
    pub fn raw_progress(&self) -> f32 {
        let active = self.elapsed - self.delay;
        if active < 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        (active / self.duration).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total()
    }

    /// Advance the clock by `dt` seconds.
    ///
    /// Returns `None` while the tween is still inside its delay, otherwise the
    /// eased progress. A zero-duration tween reports `1.0` on the first tick
    /// past its delay.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        self.elapsed += dt.max(0.0);
        if self.elapsed < self.delay {
            return None;
        }
        if self.is_finished() {
            return Some(1.0);
        }
        Some(self.easing.apply(self.raw_progress()))
    }
}
