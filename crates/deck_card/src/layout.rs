//! Layout & motion geometry
//!
//! Pure functions of the screen configuration: the expanded (full-bleed)
//! frame, the compact/expanded target for a transition, screen-fraction units,
//! and the directional bounce offset used as a motion accent.

use deck_core::{Point, Rect, Size};

use crate::config::ScreenConfig;

/// Which way a transition travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Compact frame toward the expanded frame
    Show,
    /// Expanded frame back toward the compact frame
    Hide,
}

/// Geometry calculator for one screen
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEngine {
    screen: ScreenConfig,
}

impl LayoutEngine {
    pub fn new(screen: &ScreenConfig) -> Self {
        Self {
            screen: screen.clone(),
        }
    }

    pub fn screen_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.screen.width, self.screen.height)
    }

    pub fn screen_center(&self) -> Point {
        self.screen_bounds().center()
    }

    /// `percent` of the screen width
    pub fn x_screen(&self, percent: f32) -> f32 {
        self.screen.width * percent / 100.0
    }

    /// `percent` of the screen height
    pub fn y_screen(&self, percent: f32) -> f32 {
        self.screen.height * percent / 100.0
    }

    pub fn detail_size(&self) -> Size {
        Size::new(
            self.x_screen(self.screen.detail_width_percent),
            self.y_screen(100.0) - self.screen.detail_height_inset,
        )
    }

    pub fn detail_center(&self) -> Point {
        let center = self.screen_center();
        Point::new(center.x, center.y + self.screen.detail_center_offset_y)
    }

    /// The full-bleed frame of an expanded card
    pub fn detail_frame(&self) -> Rect {
        Rect::from_center_size(self.detail_center(), self.detail_size())
    }

    /// Target frame of a card: compact `original` or the expanded frame
    pub fn target_frame(&self, original: Rect, showing_detail: bool) -> Rect {
        if showing_detail {
            self.detail_frame()
        } else {
            original
        }
    }

    /// Directional overshoot for a transition.
    ///
    /// Each axis moves `intensity` percent of the screen toward the larger
    /// coordinate of the pair (from, to), where the pair is the original
    /// center and the screen center ordered by `direction`.
    pub fn bounce_offset(&self, original: Rect, intensity: f32, direction: Direction) -> Point {
        let (from, to) = match direction {
            Direction::Show => (original.center(), self.screen_center()),
            Direction::Hide => (self.screen_center(), original.center()),
        };
        let x = if from.x < to.x {
            self.x_screen(intensity)
        } else {
            -self.x_screen(intensity)
        };
        let y = if from.y < to.y {
            self.y_screen(intensity)
        } else {
            -self.y_screen(intensity)
        };
        Point::new(x, y)
    }
}

/// Content inset in units for an image of `image_width`
pub fn insets_for(image_width: f32, content_inset_percent: f32) -> f32 {
    image_width * content_inset_percent / 100.0
}
