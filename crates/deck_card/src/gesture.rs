//! Gesture interpretation
//!
//! Turns raw [`InputEvent`]s into the signals the presentation state machine
//! understands. Touch events feed a small tap recognizer; scroll events from
//! the content region pass through as drag signals.

use deck_core::{InputEvent, Point, Rect};

/// A classified gesture signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Touch went down on the card
    PressDown,
    /// The touch will not become a tap
    PressCancel,
    /// Tap recognized
    Tap,
    /// Content region scroll offset changed during a drag
    DragChanged { offset_y: f32 },
    /// Finger lifted from the content region
    DragReleased { velocity_y: f32 },
    /// Momentum scrolling ended
    DecelerationEnded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchTrack {
    start: Point,
    exceeded_slop: bool,
}

/// Tap recognizer plus scroll passthrough
#[derive(Debug, Clone, PartialEq)]
pub struct GestureInterpreter {
    slop: f32,
    touch: Option<TouchTrack>,
}

impl GestureInterpreter {
    /// `slop` is the movement (in units) after which a touch can no longer tap
    pub fn new(slop: f32) -> Self {
        Self {
            slop: slop.max(0.0),
            touch: None,
        }
    }

    pub fn slop(&self) -> f32 {
        self.slop
    }

    /// Whether a touch sequence on the card is in progress
    pub fn is_tracking(&self) -> bool {
        self.touch.is_some()
    }

    /// Classify one input event against the card's current frame
    pub fn interpret(&mut self, event: InputEvent, card_frame: Rect) -> Option<Gesture> {
        match event {
            InputEvent::TouchDown { location } => {
                if !card_frame.contains(location) {
                    self.touch = None;
                    return None;
                }
                self.touch = Some(TouchTrack {
                    start: location,
                    exceeded_slop: false,
                });
                Some(Gesture::PressDown)
            }
            InputEvent::TouchMoved { location } => {
                let slop = self.slop;
                let touch = self.touch.as_mut()?;
                if !touch.exceeded_slop && touch.start.distance(location) > slop {
                    touch.exceeded_slop = true;
                    return Some(Gesture::PressCancel);
                }
                None
            }
            InputEvent::TouchUp { location } => {
                let touch = self.touch.take()?;
                if touch.exceeded_slop {
                    None
                } else if touch.start.distance(location) > self.slop {
                    Some(Gesture::PressCancel)
                } else {
                    Some(Gesture::Tap)
                }
            }
            InputEvent::TouchCancelled => {
                let touch = self.touch.take()?;
                (!touch.exceeded_slop).then_some(Gesture::PressCancel)
            }
            InputEvent::ScrollChanged { offset_y } => Some(Gesture::DragChanged { offset_y }),
            InputEvent::DragReleased { velocity } => Some(Gesture::DragReleased {
                velocity_y: velocity.y,
            }),
            InputEvent::DecelerationEnded => Some(Gesture::DecelerationEnded),
        }
    }

    /// Forget any touch in progress
    pub fn reset(&mut self) {
        self.touch = None;
    }
}

/// Release speed derived from the vertical release velocity.
///
/// Upward flicks report negative velocity, so the speed is the negated
/// velocity clamped to `min..=max`.
pub fn release_speed(velocity_y: f32, min: f32, max: f32) -> f32 {
    if velocity_y.is_nan() {
        return min;
    }
    (-velocity_y).clamp(min, max)
}

/// Settle duration (seconds) for a clamped release speed
pub fn settle_duration(speed: f32, min: f32, max: f32) -> f32 {
    (max / speed * min) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Rect {
        Rect::new(10.0, 10.0, 100.0, 140.0)
    }

    #[test]
    fn test_tap_within_slop() {
        let mut gestures = GestureInterpreter::new(8.0);
        let down = InputEvent::TouchDown {
            location: Point::new(50.0, 50.0),
        };
        assert_eq!(gestures.interpret(down, frame()), Some(Gesture::PressDown));
        assert!(gestures.is_tracking());

        let moved = InputEvent::TouchMoved {
            location: Point::new(53.0, 52.0),
        };
        assert_eq!(gestures.interpret(moved, frame()), None);

        let up = InputEvent::TouchUp {
            location: Point::new(53.0, 52.0),
        };
        assert_eq!(gestures.interpret(up, frame()), Some(Gesture::Tap));
        assert!(!gestures.is_tracking());
    }

    #[test]
    fn test_move_past_slop_cancels_once() {
        let mut gestures = GestureInterpreter::new(8.0);
        gestures.interpret(
            InputEvent::TouchDown {
                location: Point::new(50.0, 50.0),
            },
            frame(),
        );

        let far = InputEvent::TouchMoved {
            location: Point::new(50.0, 80.0),
        };
        assert_eq!(gestures.interpret(far, frame()), Some(Gesture::PressCancel));
        assert_eq!(gestures.interpret(far, frame()), None);

        // Coming back does not revive the tap
        let up = InputEvent::TouchUp {
            location: Point::new(50.0, 50.0),
        };
        assert_eq!(gestures.interpret(up, frame()), None);
    }

    #[test]
    fn test_touch_outside_card_is_ignored() {
        let mut gestures = GestureInterpreter::new(8.0);
        let down = InputEvent::TouchDown {
            location: Point::new(300.0, 300.0),
        };
        assert_eq!(gestures.interpret(down, frame()), None);
        let up = InputEvent::TouchUp {
            location: Point::new(300.0, 300.0),
        };
        assert_eq!(gestures.interpret(up, frame()), None);
    }

    #[test]
    fn test_cancelled_touch() {
        let mut gestures = GestureInterpreter::new(8.0);
        gestures.interpret(
            InputEvent::TouchDown {
                location: Point::new(20.0, 20.0),
            },
            frame(),
        );
        assert_eq!(
            gestures.interpret(InputEvent::TouchCancelled, frame()),
            Some(Gesture::PressCancel)
        );
        assert_eq!(gestures.interpret(InputEvent::TouchCancelled, frame()), None);
    }

    #[test]
    fn test_scroll_events_pass_through() {
        let mut gestures = GestureInterpreter::new(8.0);
        assert_eq!(
            gestures.interpret(InputEvent::ScrollChanged { offset_y: -30.0 }, frame()),
            Some(Gesture::DragChanged { offset_y: -30.0 })
        );
        assert_eq!(
            gestures.interpret(
                InputEvent::DragReleased {
                    velocity: Point::new(0.5, -3.0)
                },
                frame()
            ),
            Some(Gesture::DragReleased { velocity_y: -3.0 })
        );
        assert_eq!(
            gestures.interpret(InputEvent::DecelerationEnded, frame()),
            Some(Gesture::DecelerationEnded)
        );
    }

    #[test]
    fn test_release_speed_clamp() {
        for velocity in [-1000.0, -4.5, -3.0, -2.0, 0.0, 2.5, 1000.0, f32::NAN] {
            let speed = release_speed(velocity, 2.0, 4.0);
            assert!((2.0..=4.0).contains(&speed), "{velocity} -> {speed}");
        }
        assert_eq!(release_speed(-3.0, 2.0, 4.0), 3.0);
        assert_eq!(release_speed(5.0, 2.0, 4.0), 2.0);
        assert_eq!(release_speed(-9.0, 2.0, 4.0), 4.0);
    }

    #[test]
    fn test_settle_duration() {
        assert_eq!(settle_duration(2.0, 2.0, 4.0), 0.4);
        assert_eq!(settle_duration(4.0, 2.0, 4.0), 0.2);
        assert!((settle_duration(3.0, 2.0, 4.0) - 0.266_666_7).abs() < 1e-5);
    }
}
