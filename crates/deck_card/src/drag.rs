//! Drag-to-dismiss
//!
//! While expanded, pulling the content past its top drags the whole card down
//! at half speed. Releasing either settles the card back to its rest origin
//! or, past the dismiss threshold, collapses it at a pace derived from the
//! release velocity.

use deck_animation::{Easing, Tween};

use crate::card::Card;
use crate::gesture::{release_speed, settle_duration};
use crate::motion::{CardMotion, MotionRole, Track};
use crate::observer::CardNotification;
use crate::state::CardState;

/// What a drag release decided
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    /// The card was not expanded
    Ignored,
    /// Displacement below the threshold: back to the rest origin
    SettleBack { speed: f32, duration: f32 },
    /// Displacement at or past the threshold: collapse committed
    Dismiss { speed: f32, duration: f32 },
}

impl Card {
    fn accepts_drag(&self) -> bool {
        self.is_detail_presented && self.machine.is_in(CardState::Expanded)
    }

    /// Distance the card was dragged below its rest origin
    pub fn displacement(&self) -> Option<f32> {
        self.rest_origin_y().map(|rest| self.frame.y() - rest)
    }

    /// The content region reported a new scroll offset during a drag
    pub fn drag_changed(&mut self, offset_y: f32) {
        if !self.accepts_drag() {
            return;
        }
        if let Some(id) = self.settle.take() {
            self.animations.cancel(id);
        }

        let rest = self.detail_frame.y();
        let current = self.frame.y();
        if offset_y < 0.0 || current > rest {
            // Rubber band: the card follows the finger at half speed while the
            // content itself stays at its top
            self.set_frame(self.frame.with_origin_y(current - offset_y / 2.0));
            self.scroll.offset_y = 0.0;
        } else {
            self.scroll.offset_y = offset_y;
        }
        tracing::trace!(offset_y, origin_y = self.frame.y(), "detail scrolling");
        self.notify(CardNotification::DetailIsScrolling);
    }

    /// The finger lifted from the content region
    pub fn drag_released(&mut self, velocity_y: f32) -> ReleaseOutcome {
        if !self.accepts_drag() {
            return ReleaseOutcome::Ignored;
        }
        let motion = &self.config.motion;
        let (min, max, threshold) = (
            motion.min_release_speed,
            motion.max_release_speed,
            motion.dismiss_threshold,
        );

        let speed = release_speed(velocity_y, min, max);
        self.bounce_intensity = speed - 1.0;
        let duration = settle_duration(speed, min, max);

        let displacement = self.frame.y() - self.detail_frame.y();
        tracing::debug!(velocity_y, speed, duration, displacement, "drag released");

        if displacement < threshold {
            self.settle_to_rest(duration);
            ReleaseOutcome::SettleBack { speed, duration }
        } else {
            self.hide_detail(duration);
            ReleaseOutcome::Dismiss { speed, duration }
        }
    }

    /// Momentum scrolling finished: snap back to the rest origin
    pub fn deceleration_ended(&mut self) {
        if !self.accepts_drag() {
            return;
        }
        let duration = self.config.motion.snap_back_duration;
        self.settle_to_rest(duration);
    }

    fn settle_to_rest(&mut self, duration: f32) {
        if let Some(id) = self.settle.take() {
            self.animations.cancel(id);
        }
        let rest = self.detail_frame.y();
        if self.frame.y() == rest {
            return;
        }
        let motion = CardMotion::new(MotionRole::Settle, self.generation).track(Track::OriginY {
            from: self.frame.y(),
            to: rest,
        });
        let tween = Tween::new(duration).with_easing(Easing::EaseInOut);
        self.settle = Some(self.animations.schedule(tween, motion));
    }
}
