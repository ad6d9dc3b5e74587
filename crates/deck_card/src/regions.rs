//! Inner regions of a card
//!
//! The card hosts a scrollable region (image on top, detail content below
//! once expanded) and, while presenting, a translucent backdrop stacked
//! directly behind it.

use deck_core::{Rect, Size};

/// The scrollable region hosting image and detail content
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRegion {
    /// Frame in card coordinates
    pub frame: Rect,
    pub content_size: Size,
    /// Vertical content offset; negative when pulled below the top
    pub offset_y: f32,
    /// Whether drags reach the region (only once expanded)
    pub interaction_enabled: bool,
}

impl ScrollRegion {
    pub(crate) fn new(frame: Rect) -> Self {
        Self {
            frame,
            content_size: frame.size,
            offset_y: 0.0,
            interaction_enabled: false,
        }
    }
}

/// Where the backdrop sits in the owner's view stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackPosition {
    /// Not in the view stack
    Detached,
    /// Directly below the card
    BelowCard,
}

/// Full-screen translucent surface shown behind an expanded card
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub frame: Rect,
    pub alpha: f32,
    pub position: StackPosition,
}

impl Backdrop {
    pub(crate) fn new(screen: Rect) -> Self {
        Self {
            frame: screen,
            alpha: 0.0,
            position: StackPosition::Detached,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.position == StackPosition::BelowCard
    }

    pub(crate) fn attach(&mut self) {
        self.position = StackPosition::BelowCard;
    }

    pub(crate) fn detach(&mut self) {
        self.position = StackPosition::Detached;
        self.alpha = 0.0;
    }
}
