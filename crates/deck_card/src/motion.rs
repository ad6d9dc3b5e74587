//! Card animation payloads
//!
//! Every animation the card schedules carries a [`CardMotion`]: what part of
//! the presentation it belongs to, the transition generation that started it,
//! and the property tracks it interpolates. Tracks capture their start value
//! when the animation is scheduled, so sampling is a pure function of progress.

use deck_core::geometry::lerp;
use deck_core::{Point, Rect};
use smallvec::SmallVec;

use crate::layout::Direction;

/// The part of the presentation an animation plays
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionRole {
    /// Press-down accent (or its release)
    Press,
    /// Main transition animation; its completion commits the state change
    Scale(Direction),
    /// Directional overshoot; relaxes back over `relax` seconds when done
    Bounce { direction: Direction, relax: f32 },
    /// Overshoot returning to identity
    BounceRelax,
    /// Frame origin returning to the expanded rest origin
    Settle,
}

impl MotionRole {
    /// Whether this role moves the card toward a new presentation state
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            MotionRole::Scale(_) | MotionRole::Bounce { .. } | MotionRole::BounceRelax
        )
    }
}

/// An animated property with its start and end values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Track {
    Frame { from: Rect, to: Rect },
    OriginY { from: f32, to: f32 },
    PressScale { from: f32, to: f32 },
    BounceOffset { from: Point, to: Point },
    BackdropAlpha { from: f32, to: f32 },
    ShadowOpacity { from: f32, to: f32 },
}

/// A property value at some progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Frame(Rect),
    OriginY(f32),
    PressScale(f32),
    BounceOffset(Point),
    BackdropAlpha(f32),
    ShadowOpacity(f32),
}

impl Track {
    /// Value of the track at eased progress `t`; exactly the end value at `t >= 1`
    pub fn sample(&self, t: f32) -> Sample {
        match *self {
            Track::Frame { from, to } => Sample::Frame(from.lerp(to, t)),
            Track::OriginY { from, to } => Sample::OriginY(lerp(from, to, t)),
            Track::PressScale { from, to } => Sample::PressScale(lerp(from, to, t)),
            Track::BounceOffset { from, to } => Sample::BounceOffset(from.lerp(to, t)),
            Track::BackdropAlpha { from, to } => Sample::BackdropAlpha(lerp(from, to, t)),
            Track::ShadowOpacity { from, to } => Sample::ShadowOpacity(lerp(from, to, t)),
        }
    }
}

/// Payload of every animation scheduled by a card
#[derive(Debug, Clone, PartialEq)]
pub struct CardMotion {
    pub role: MotionRole,
    /// Transition generation at scheduling time
    pub generation: u64,
    pub tracks: SmallVec<[Track; 4]>,
}

impl CardMotion {
    pub fn new(role: MotionRole, generation: u64) -> Self {
        Self {
            role,
            generation,
            tracks: SmallVec::new(),
        }
    }

    pub fn track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    /// Sample every track at `t`
    pub fn samples(&self, t: f32) -> SmallVec<[Sample; 4]> {
        self.tracks.iter().map(|track| track.sample(t)).collect()
    }

    /// Whether this motion moves the card toward a new presentation state
    pub fn is_transition(&self) -> bool {
        self.role.is_transition()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_hit_end_values_exactly() {
        let motion = CardMotion::new(MotionRole::Scale(Direction::Hide), 3)
            .track(Track::Frame {
                from: Rect::new(30.3, 77.7, 318.75, 647.0),
                to: Rect::new(10.0, 10.0, 100.0, 140.0),
            })
            .track(Track::BackdropAlpha { from: 1.0, to: 0.0 });

        let end = motion.samples(1.0);
        assert_eq!(end[0], Sample::Frame(Rect::new(10.0, 10.0, 100.0, 140.0)));
        assert_eq!(end[1], Sample::BackdropAlpha(0.0));

        let start = motion.samples(0.0);
        assert_eq!(start[1], Sample::BackdropAlpha(1.0));
        assert!(motion.is_transition());
    }

    #[test]
    fn test_settle_is_not_a_transition() {
        let motion = CardMotion::new(MotionRole::Settle, 1)
            .track(Track::OriginY { from: 90.0, to: 50.0 });
        assert!(!motion.is_transition());
        assert_eq!(motion.samples(0.5)[0], Sample::OriginY(70.0));
    }
}
