//! Animation scheduler
//!
//! Owns every running [`Tween`] together with a caller-defined payload and
//! advances them all on each frame. The scheduler never touches the animated
//! properties itself: each [`tick`](AnimationScheduler::tick) returns one
//! [`AnimationFrame`] per animation that made progress, and the owner applies
//! the progress to whatever the payload describes.
//!
//! Frames are reported in the order the animations were scheduled, so two
//! animations started together (e.g. a scale and a bounce) always report in a
//! stable order. A finished animation is removed during the tick and its
//! payload is handed back in the final frame.

use slotmap::{new_key_type, SlotMap};

use crate::tween::Tween;

new_key_type! {
    /// Unique identifier for a scheduled animation
    pub struct AnimationId;
}

struct Scheduled<T> {
    tween: Tween,
    payload: T,
    seq: u64,
}

/// Whether an animation is still running after a frame
#[derive(Debug)]
pub enum FrameStatus<T> {
    Running,
    /// Last frame; the animation was removed and its payload returned
    Completed(T),
}

/// Progress report for one animation in one tick
#[derive(Debug)]
pub struct AnimationFrame<T> {
    pub id: AnimationId,
    /// Eased progress, `1.0` on the completing frame
    pub progress: f32,
    pub status: FrameStatus<T>,
}

impl<T> AnimationFrame<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self.status, FrameStatus::Completed(_))
    }
}

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler<T> {
    animations: SlotMap<AnimationId, Scheduled<T>>,
    next_seq: u64,
    /// Seconds ticked since creation
    elapsed: f64,
}

impl<T> AnimationScheduler<T> {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
            next_seq: 0,
            elapsed: 0.0,
        }
    }

    /// Start an animation. It makes progress from the next tick on.
    pub fn schedule(&mut self, tween: Tween, payload: T) -> AnimationId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.animations.insert(Scheduled {
            tween,
            payload,
            seq,
        });
        tracing::trace!(
            ?id,
            delay = tween.delay(),
            duration = tween.duration(),
            "animation scheduled"
        );
        id
    }

    /// Withdraw a running animation without completing it
    pub fn cancel(&mut self, id: AnimationId) -> Option<T> {
        let removed = self.animations.remove(id)?;
        tracing::trace!(?id, "animation cancelled");
        Some(removed.payload)
    }

    /// Cancel every animation whose payload matches the predicate.
    /// Returns how many were removed.
    pub fn cancel_where<F: FnMut(&T) -> bool>(&mut self, mut predicate: F) -> usize {
        let before = self.animations.len();
        self.animations.retain(|_, anim| !predicate(&anim.payload));
        before - self.animations.len()
    }

    pub fn get(&self, id: AnimationId) -> Option<&T> {
        self.animations.get(id).map(|anim| &anim.payload)
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut T> {
        self.animations.get_mut(id).map(|anim| &mut anim.payload)
    }

    /// The tween driving an animation
    pub fn tween(&self, id: AnimationId) -> Option<&Tween> {
        self.animations.get(id).map(|anim| &anim.tween)
    }

    pub fn is_active(&self, id: AnimationId) -> bool {
        self.animations.contains_key(id)
    }

    /// Check if any animations are still running
    pub fn has_active_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Iterate over running payloads (unordered)
    pub fn payloads(&self) -> impl Iterator<Item = (AnimationId, &T)> {
        self.animations.iter().map(|(id, anim)| (id, &anim.payload))
    }

    /// Number of running animations
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Seconds ticked since the scheduler was created
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advance every animation by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Vec<AnimationFrame<T>> {
        self.elapsed += f64::from(dt.max(0.0));

        let mut progressed: Vec<(u64, AnimationId, f32, bool)> = Vec::new();
        for (id, anim) in self.animations.iter_mut() {
            if let Some(progress) = anim.tween.advance(dt) {
                progressed.push((anim.seq, id, progress, anim.tween.is_finished()));
            }
        }
        progressed.sort_unstable_by_key(|(seq, ..)| *seq);

        let mut frames = Vec::with_capacity(progressed.len());
        for (_, id, progress, finished) in progressed {
            let status = if finished {
                match self.animations.remove(id) {
                    Some(anim) => FrameStatus::Completed(anim.payload),
                    None => continue,
                }
            } else {
                FrameStatus::Running
            };
            frames.push(AnimationFrame {
                id,
                progress,
                status,
            });
        }
        frames
    }
}

impl<T> Default for AnimationScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_follow_schedule_order() {
        let mut scheduler = AnimationScheduler::new();
        let first = scheduler.schedule(Tween::new(0.3).with_delay(0.1), "scale");
        let second = scheduler.schedule(Tween::new(0.2).with_delay(0.1), "bounce");

        // Still inside the shared delay
        assert!(scheduler.tick(0.05).is_empty());

        let frames = scheduler.tick(0.1);
        let ids: Vec<_> = frames.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert!(frames.iter().all(|f| !f.is_completed()));
    }

    #[test]
    fn test_completion_returns_payload_and_removes() {
        let mut scheduler = AnimationScheduler::new();
        let short = scheduler.schedule(Tween::new(0.2), 1u32);
        let long = scheduler.schedule(Tween::new(0.4), 2u32);

        let frames = scheduler.tick(0.25);
        assert_eq!(frames.len(), 2);
        match &frames[0].status {
            FrameStatus::Completed(payload) => assert_eq!(*payload, 1),
            FrameStatus::Running => panic!("short animation should have completed"),
        }
        assert_eq!(frames[0].progress, 1.0);
        assert!(!scheduler.is_active(short));
        assert!(scheduler.is_active(long));
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.schedule(Tween::new(1.0), "settle");
        scheduler.schedule(Tween::new(1.0), "keep");

        assert_eq!(scheduler.cancel(id), Some("settle"));
        assert_eq!(scheduler.cancel(id), None);
        assert_eq!(scheduler.cancel_where(|p| *p == "keep"), 1);
        assert!(!scheduler.has_active_animations());
        assert!(scheduler.tick(2.0).is_empty());
    }

    #[test]
    fn test_elapsed_accumulates() {
        let mut scheduler: AnimationScheduler<()> = AnimationScheduler::default();
        scheduler.tick(0.5);
        scheduler.tick(0.25);
        assert!((scheduler.elapsed() - 0.75).abs() < 1e-9);
    }
}
