//! Detail content shown below the card image once expanded

use deck_core::Rect;

/// Text of the placeholder used when no detail content was supplied
pub const PLACEHOLDER_TEXT: &str = " No content to show.";

/// Height of the placeholder content
pub const PLACEHOLDER_HEIGHT: f32 = 100.0;

/// Content hosted in the card's scrollable region while expanded.
///
/// The card owns the content while it is set, lays it out when the detail is
/// attached, and keeps it (detached) across collapse so the same content is
/// shown on the next expansion.
pub trait DetailContent {
    /// Height the content wants below the image
    fn preferred_height(&self) -> f32;

    /// Short label for logs
    fn label(&self) -> &str {
        "detail"
    }

    /// Called with the content frame (scroll region coordinates) on attach
    /// and whenever the card frame changes while attached
    fn layout(&mut self, _frame: Rect) {}
}

/// Fallback content: a single line of static text
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderContent {
    pub text: String,
    pub frame: Rect,
}

impl Default for PlaceholderContent {
    fn default() -> Self {
        Self {
            text: PLACEHOLDER_TEXT.to_string(),
            frame: Rect::ZERO,
        }
    }
}

impl DetailContent for PlaceholderContent {
    fn preferred_height(&self) -> f32 {
        PLACEHOLDER_HEIGHT
    }

    fn label(&self) -> &str {
        "placeholder"
    }

    fn layout(&mut self, frame: Rect) {
        self.frame = frame;
    }
}
