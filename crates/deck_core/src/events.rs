//! Input events
//!
//! The raw pointer and scroll vocabulary a platform layer reports. Widgets
//! classify these into the higher level gestures they care about.

use crate::geometry::Point;

/// A raw input event as reported by the platform layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Touch or pointer pressed at a location (card coordinate space's parent)
    TouchDown { location: Point },
    /// Touch or pointer moved while pressed
    TouchMoved { location: Point },
    /// Touch or pointer released
    TouchUp { location: Point },
    /// The platform cancelled the touch sequence
    TouchCancelled,
    /// The scrollable region reports a new vertical content offset.
    /// Negative values mean the content was pulled below its top.
    ScrollChanged { offset_y: f32 },
    /// Finger lifted from a scroll drag, with release velocity (points/ms)
    DragReleased { velocity: Point },
    /// Momentum scrolling finished
    DecelerationEnded,
}
