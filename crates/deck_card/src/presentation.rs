//! Presentation state machine
//!
//! Expansion and collapse each run two animations started together: a scale
//! animation (geometry, backdrop, shadow) and a cosmetic bounce. Only the
//! scale animation's completion commits the new state; the bounce relaxes
//! back to identity on its own and never gates anything.
//!
//! Every transition bumps the card's generation. Animations carry the
//! generation they were started in, and completions from an older generation
//! are dropped.

use deck_animation::{AnimationFrame, Easing, FrameStatus, Tween};
use deck_core::fsm::EventId;
use deck_core::Point;

use crate::card::Card;
use crate::layout::Direction;
use crate::motion::{CardMotion, MotionRole, Sample, Track};
use crate::observer::CardNotification;
use crate::state::{card_events, CardState};

impl Card {
    /// Touch went down: shrink slightly as press feedback
    pub fn press_down(&mut self) {
        if self.machine.send(card_events::PRESS).is_none() {
            return;
        }
        tracing::debug!("card pressed");
        let target = self.config.motion.press_scale;
        self.animate_press(target);
    }

    /// Touch ended without a tap: undo the press feedback
    pub fn press_cancel(&mut self) {
        if self.machine.send(card_events::PRESS_CANCEL).is_none() {
            return;
        }
        tracing::debug!("press cancelled");
        self.animate_press(1.0);
    }

    fn animate_press(&mut self, target: f32) {
        if let Some(id) = self.press.take() {
            self.animations.cancel(id);
        }
        let tween = Tween::new(self.config.motion.press_duration).with_easing(Easing::EaseInOut);
        let motion = CardMotion::new(MotionRole::Press, self.generation).track(Track::PressScale {
            from: self.press_scale,
            to: target,
        });
        self.press = Some(self.animations.schedule(tween, motion));
    }

    /// A tap was recognized. Expands a compact card; no-op otherwise.
    pub fn tap(&mut self) {
        self.notify(CardNotification::DidTapInside);
        if self.is_detail_presented || !self.machine.can_send(card_events::TAP) {
            tracing::trace!(state = self.state().name(), "tap ignored");
            return;
        }
        self.show_detail();
    }

    fn begin_transition(&mut self, event: EventId) -> Option<CardState> {
        let state = self.machine.send(event)?;
        self.generation += 1;
        if let Some(id) = self.settle.take() {
            self.animations.cancel(id);
        }
        if let Some(id) = self.press.take() {
            self.animations.cancel(id);
        }
        let cancelled = self.animations.cancel_where(CardMotion::is_transition);
        if cancelled > 0 {
            tracing::debug!(cancelled, "superseded transition animations");
        }
        Some(state)
    }

    fn show_detail(&mut self) {
        if self.begin_transition(card_events::TAP).is_none() {
            return;
        }
        tracing::debug!(generation = self.generation, "showing detail");

        self.notify(CardNotification::WillShowDetail);
        self.backdrop.attach();

        let motion = self.config.motion.clone();
        self.bounce_intensity = motion.tap_bounce_intensity;

        let scale = CardMotion::new(MotionRole::Scale(Direction::Show), self.generation)
            .track(Track::Frame {
                from: self.frame,
                to: self.layout.target_frame(self.original_frame, true),
            })
            .track(Track::BackdropAlpha {
                from: self.backdrop.alpha,
                to: 1.0,
            })
            .track(Track::PressScale {
                from: self.press_scale,
                to: 1.0,
            })
            .track(Track::ShadowOpacity {
                from: self.shadow_opacity,
                to: 0.0,
            });
        self.animations.schedule(
            Tween::new(motion.expand_duration)
                .with_delay(motion.expand_delay)
                .with_easing(Easing::EaseOut),
            scale,
        );

        let bounce = CardMotion::new(
            MotionRole::Bounce {
                direction: Direction::Show,
                relax: motion.bounce_duration,
            },
            self.generation,
        )
        .track(Track::BounceOffset {
            from: self.bounce_offset,
            to: self.bounce_target(Direction::Show),
        });
        self.animations.schedule(
            Tween::new(motion.bounce_duration)
                .with_delay(motion.expand_delay)
                .with_easing(Easing::EaseOut),
            bounce,
        );
    }

    /// Collapse an expanded card, running both animations over `pace` seconds
    pub(crate) fn hide_detail(&mut self, pace: f32) {
        if self.begin_transition(card_events::DISMISS).is_none() {
            return;
        }
        tracing::debug!(generation = self.generation, pace, "hiding detail");

        self.detach_detail_content();
        self.notify(CardNotification::WillCloseDetail);

        let scale = CardMotion::new(MotionRole::Scale(Direction::Hide), self.generation)
            .track(Track::Frame {
                from: self.frame,
                to: self.layout.target_frame(self.original_frame, false),
            })
            .track(Track::BackdropAlpha {
                from: self.backdrop.alpha,
                to: 0.0,
            })
            .track(Track::ShadowOpacity {
                from: self.shadow_opacity,
                to: self.config.style.shadow_opacity,
            });
        self.animations.schedule(Tween::new(pace).with_easing(Easing::EaseOut), scale);

        let bounce = CardMotion::new(
            MotionRole::Bounce {
                direction: Direction::Hide,
                relax: pace,
            },
            self.generation,
        )
        .track(Track::BounceOffset {
            from: self.bounce_offset,
            to: self.bounce_target(Direction::Hide),
        });
        self.animations.schedule(Tween::new(pace).with_easing(Easing::EaseOut), bounce);
    }

    /// Collapse an expanded card at the default pace
    pub fn dismiss(&mut self) {
        let pace = self.config.motion.hide_duration;
        self.hide_detail(pace);
    }

    fn bounce_target(&self, direction: Direction) -> Point {
        self.layout.bounce_offset(self.original_frame, self.bounce_intensity, direction)
    }

    /// Advance every running animation by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        for frame in self.animations.tick(dt) {
            self.apply_animation_frame(frame);
        }
    }

    /// Tick in fixed steps until no animation is left. Returns the number of
    /// frames ticked, at most `max_frames`.
    pub fn run_until_idle(&mut self, frame_dt: f32, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.is_animating() && frames < max_frames {
            self.tick(frame_dt);
            frames += 1;
        }
        frames
    }

    fn apply_animation_frame(&mut self, frame: AnimationFrame<CardMotion>) {
        let AnimationFrame {
            id,
            progress,
            status,
        } = frame;

        let (role, generation, samples, completed) = match status {
            FrameStatus::Running => match self.animations.get(id) {
                Some(motion) => (
                    motion.role,
                    motion.generation,
                    motion.samples(progress),
                    false,
                ),
                None => return,
            },
            FrameStatus::Completed(motion) => {
                (motion.role, motion.generation, motion.samples(progress), true)
            }
        };

        if role.is_transition() && generation != self.generation {
            tracing::warn!(
                generation,
                current = self.generation,
                ?role,
                "ignoring stale animation"
            );
            if !completed {
                self.animations.cancel(id);
            }
            return;
        }

        for sample in samples {
            self.apply_sample(sample);
        }

        match role {
            MotionRole::Scale(Direction::Show) => {
                tracing::trace!(progress, "showing detail");
                self.notify(CardNotification::IsShowingDetail);
            }
            MotionRole::Scale(Direction::Hide) => {
                tracing::trace!(progress, "hiding detail");
                self.notify(CardNotification::IsHidingDetail);
            }
            _ => {}
        }

        if !completed {
            return;
        }

        match role {
            MotionRole::Scale(Direction::Show) => self.finish_show(),
            MotionRole::Scale(Direction::Hide) => self.finish_hide(),
            MotionRole::Bounce { relax, .. } => self.relax_bounce(relax),
            MotionRole::BounceRelax => self.bounce_offset = Point::ZERO,
            MotionRole::Settle => {
                if self.settle == Some(id) {
                    self.settle = None;
                }
            }
            MotionRole::Press => {
                if self.press == Some(id) {
                    self.press = None;
                }
            }
        }
    }

    fn apply_sample(&mut self, sample: Sample) {
        match sample {
            Sample::Frame(frame) => self.set_frame(frame),
            Sample::OriginY(y) => self.set_frame(self.frame.with_origin_y(y)),
            Sample::PressScale(scale) => self.press_scale = scale,
            Sample::BounceOffset(offset) => self.bounce_offset = offset,
            Sample::BackdropAlpha(alpha) => self.backdrop.alpha = alpha,
            Sample::ShadowOpacity(opacity) => self.shadow_opacity = opacity,
        }
    }

    /// Expansion commit: exact detail geometry, content attached. The bounce
    /// only drives the offset transform, so nothing moves the frame after this.
    fn finish_show(&mut self) {
        self.set_frame(self.layout.detail_frame());
        self.press_scale = 1.0;
        self.shadow_opacity = 0.0;
        self.backdrop.alpha = 1.0;
        self.attach_detail_content();

        if self.machine.send(card_events::SHOW_COMPLETE).is_none() {
            tracing::warn!(state = self.state().name(), "show completed outside expansion");
            return;
        }
        self.is_detail_presented = true;
        self.detail_frame = self.frame;
        tracing::debug!(frame = ?self.detail_frame, "detail shown");
        self.notify(CardNotification::DidShowDetail);
    }

    /// Collapse commit: exact original geometry, backdrop removed
    fn finish_hide(&mut self) {
        self.set_frame(self.original_frame);
        self.backdrop.detach();
        self.clips_to_bounds = false;
        self.shadow_opacity = self.config.style.shadow_opacity;

        if self.machine.send(card_events::HIDE_COMPLETE).is_none() {
            tracing::warn!(state = self.state().name(), "hide completed outside collapse");
            return;
        }
        tracing::debug!("detail closed");
        self.notify(CardNotification::DidCloseDetail);
        self.is_detail_presented = false;
    }

    fn relax_bounce(&mut self, duration: f32) {
        let relax = CardMotion::new(MotionRole::BounceRelax, self.generation).track(
            Track::BounceOffset {
                from: self.bounce_offset,
                to: Point::ZERO,
            },
        );
        self.animations.schedule(Tween::new(duration).with_easing(Easing::EaseOut), relax);
    }
}

#[cfg(test)]
mod tests {
    use deck_core::{Rect, Size};

    use crate::config::{CardConfig, ScreenConfig};
    use crate::state::CardState;
    use crate::Card;

    const FRAME: f32 = 1.0 / 60.0;

    fn card() -> Card {
        let config = CardConfig {
            screen: ScreenConfig {
                width: 400.0,
                height: 800.0,
                ..ScreenConfig::default()
            },
            ..CardConfig::default()
        };
        Card::new(Rect::new(10.0, 10.0, 100.0, 140.0), config)
    }

    #[test]
    fn test_press_scales_down_and_back() {
        let mut card = card();
        card.press_down();
        assert_eq!(card.state(), CardState::PressedDown);
        card.run_until_idle(FRAME, 100);
        assert_eq!(card.press_scale(), 0.95);
        assert!(!card.is_detail_presented());

        card.press_cancel();
        assert_eq!(card.state(), CardState::Collapsed);
        card.run_until_idle(FRAME, 100);
        assert_eq!(card.press_scale(), 1.0);
    }

    #[test]
    fn test_expand_commits_only_on_scale_completion() {
        let mut card = card();
        card.tap();
        assert_eq!(card.state(), CardState::Expanding);
        assert!(card.backdrop().is_attached());
        assert_eq!(card.bounce_intensity(), 4.0);

        // Bounce ends at 0.3s, scale at 0.4s
        card.tick(0.35);
        assert_eq!(card.state(), CardState::Expanding);
        assert!(!card.is_detail_presented());
        assert_ne!(card.frame(), Rect::new(30.0, 50.0, 340.0, 780.0));
        assert!(card.frame().width() > 100.0);

        card.tick(0.06);
        assert_eq!(card.state(), CardState::Expanded);
        assert!(card.is_detail_presented());
        assert_eq!(card.frame(), Rect::new(30.0, 50.0, 340.0, 780.0));
        assert_eq!(card.detail_frame(), Some(card.frame()));
        assert_eq!(card.shadow_opacity(), 0.0);
        assert_eq!(card.backdrop().alpha, 1.0);
        assert!(card.scroll().interaction_enabled);
    }

    #[test]
    fn test_bounce_relaxes_to_identity() {
        let mut card = card();
        card.tap();
        card.tick(0.31);
        // Bounce just completed at its overshoot
        assert_eq!(card.bounce_offset().x, 16.0);
        assert_eq!(card.bounce_offset().y, 32.0);
        card.run_until_idle(FRAME, 200);
        assert!(card.transform().is_identity());
    }

    #[test]
    fn test_dismiss_restores_original_frame() {
        let mut card = card();
        card.tap();
        card.run_until_idle(FRAME, 200);
        let generation = card.generation();

        card.dismiss();
        assert_eq!(card.state(), CardState::Collapsing);
        assert_eq!(card.generation(), generation + 1);
        assert!(card.is_detail_presented());
        assert!(!card.scroll().interaction_enabled);

        card.run_until_idle(FRAME, 200);
        assert_eq!(card.state(), CardState::Collapsed);
        assert!(!card.is_detail_presented());
        assert_eq!(card.frame(), card.original_frame());
        assert_eq!(card.image_frame().size, Size::new(100.0, 140.0));
        assert!(!card.backdrop().is_attached());
        assert!(!card.clips_to_bounds());
        assert_eq!(card.shadow_opacity(), 0.6);
        assert!(card.transform().is_identity());
    }

    #[test]
    fn test_long_bounce_does_not_move_committed_frame() {
        let mut config = card().config().clone();
        config.motion.bounce_duration = 0.6;
        assert!(config.validate().is_ok());
        let mut card = Card::new(Rect::new(10.0, 10.0, 100.0, 140.0), config);
        let detail = card.layout().detail_frame();

        card.tap();
        while card.state() == CardState::Expanding {
            card.tick(FRAME);
        }
        assert_eq!(card.state(), CardState::Expanded);
        assert!(card.is_animating());
        assert_eq!(card.frame(), detail);

        // The bounce is still running; only its offset may change
        for _ in 0..6 {
            card.tick(FRAME);
            assert_eq!(card.frame(), detail);
        }

        card.drag_changed(-30.0);
        let dragged = card.frame();
        assert_eq!(dragged.y(), detail.y() + 15.0);
        card.run_until_idle(FRAME, 200);
        assert_eq!(card.frame(), dragged);
        assert!(card.transform().is_identity());
    }

    #[test]
    fn test_tap_during_bounce_relax_supersedes_it() {
        let mut card = card();
        card.tap();
        card.run_until_idle(FRAME, 200);
        card.dismiss();
        while card.state() == CardState::Collapsing {
            card.tick(FRAME);
        }
        // Collapse committed; the bounce is still relaxing back to identity
        assert_eq!(card.state(), CardState::Collapsed);
        assert!(card.is_animating());
        assert!(!card.transform().is_identity());
        let generation = card.generation();

        card.tap();
        assert_eq!(card.state(), CardState::Expanding);
        assert_eq!(card.generation(), generation + 1);

        card.run_until_idle(FRAME, 200);
        assert_eq!(card.state(), CardState::Expanded);
        assert!(card.is_detail_presented());
        assert_eq!(card.frame(), card.layout().detail_frame());
        assert!(card.transform().is_identity());
    }

    #[test]
    fn test_dismiss_ignored_unless_expanded() {
        let mut card = card();
        card.dismiss();
        assert_eq!(card.state(), CardState::Collapsed);

        card.tap();
        card.dismiss();
        assert_eq!(card.state(), CardState::Expanding);
        assert_eq!(card.generation(), 1);
    }
}
