//! The card control
//!
//! A [`Card`] owns its presentation state, its geometry and every animation it
//! runs. It is driven from the outside by three calls:
//!
//! - [`Card::handle_input`] with raw input events (or the typed operations
//!   such as [`Card::tap`] and [`Card::drag_changed`] directly),
//! - [`Card::tick`] once per frame with the elapsed time,
//! - [`Card::set_frame`] for non-animated geometry changes.
//!
//! The renderer reads the visual state back through the accessors.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use deck_animation::{AnimationId, AnimationScheduler};
use deck_core::fsm::EventId;
use deck_core::{Affine2D, Color, InputEvent, Point, Rect, Size, StateMachine};

use crate::config::{CardConfig, StyleConfig};
use crate::content::{DetailContent, PlaceholderContent};
use crate::gesture::{Gesture, GestureInterpreter};
use crate::layout::{insets_for, LayoutEngine};
use crate::motion::CardMotion;
use crate::observer::{CardNotification, CardObserver};
use crate::regions::{Backdrop, ScrollRegion};
use crate::state::CardState;

/// An expandable card
pub struct Card {
    pub(crate) config: CardConfig,
    pub(crate) layout: LayoutEngine,
    pub(crate) machine: StateMachine<CardState>,
    pub(crate) is_detail_presented: bool,
    pub(crate) original_frame: Rect,
    pub(crate) detail_frame: Rect,
    pub(crate) frame: Rect,
    pub(crate) bounce_intensity: f32,

    // Visual state
    pub(crate) press_scale: f32,
    pub(crate) bounce_offset: Point,
    pub(crate) shadow_opacity: f32,
    pub(crate) clips_to_bounds: bool,
    pub(crate) backdrop: Backdrop,

    // Inner regions
    pub(crate) image_frame: Rect,
    pub(crate) scroll: ScrollRegion,
    pub(crate) insets: f32,
    pub(crate) detail_content: Option<Box<dyn DetailContent>>,
    pub(crate) content_attached: bool,
    pub(crate) content_frame: Option<Rect>,

    pub(crate) observer: Option<Weak<RefCell<dyn CardObserver>>>,
    pub(crate) gestures: GestureInterpreter,
    pub(crate) animations: AnimationScheduler<CardMotion>,
    /// Bumped by every transition; stale completions are ignored
    pub(crate) generation: u64,
    pub(crate) settle: Option<AnimationId>,
    pub(crate) press: Option<AnimationId>,
}

impl Card {
    /// Create a collapsed card. `frame` becomes the card's original frame.
    pub fn new(frame: Rect, config: CardConfig) -> Self {
        let layout = LayoutEngine::new(&config.screen);
        let backdrop = Backdrop::new(layout.screen_bounds());
        let gestures = GestureInterpreter::new(config.motion.tap_slop);
        let shadow_opacity = config.style.shadow_opacity;

        let mut card = Self {
            config,
            layout,
            machine: StateMachine::new(CardState::Collapsed),
            is_detail_presented: false,
            original_frame: frame,
            detail_frame: frame,
            frame,
            bounce_intensity: 0.0,
            press_scale: 1.0,
            bounce_offset: Point::ZERO,
            shadow_opacity,
            clips_to_bounds: false,
            backdrop,
            image_frame: frame.bounds(),
            scroll: ScrollRegion::new(frame.bounds()),
            insets: 0.0,
            detail_content: None,
            content_attached: false,
            content_frame: None,
            observer: None,
            gestures,
            animations: AnimationScheduler::new(),
            generation: 0,
            settle: None,
            press: None,
        };
        card.set_frame(frame);
        card
    }

    /// Create a card with the default configuration
    pub fn with_defaults(frame: Rect) -> Self {
        Self::new(frame, CardConfig::default())
    }

    /// Assign the card frame without animating.
    ///
    /// Inner regions follow synchronously: the image keeps its height and
    /// takes the new width, the scroll region takes the card bounds, insets
    /// are recomputed and attached detail content is laid out again.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        self.image_frame = self
            .image_frame
            .with_size(Size::new(frame.width(), self.image_frame.height()));
        self.scroll.frame = frame.bounds();
        self.insets = insets_for(self.image_frame.width(), self.config.style.content_inset);
        self.layout_content();
    }

    /// Change the content inset (percent of the image width)
    pub fn set_content_inset(&mut self, percent: f32) {
        self.config.style.content_inset = percent;
        self.insets = insets_for(self.image_frame.width(), percent);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Observer
    // ─────────────────────────────────────────────────────────────────────

    /// Observe this card. Only a weak reference is kept.
    pub fn set_observer<O: CardObserver + 'static>(&mut self, observer: &Rc<RefCell<O>>) {
        let observer: Rc<RefCell<dyn CardObserver>> = observer.clone();
        self.observer = Some(Rc::downgrade(&observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn has_observer(&self) -> bool {
        self.observer
            .as_ref()
            .is_some_and(|observer| observer.strong_count() > 0)
    }

    pub(crate) fn notify(&self, notification: CardNotification) {
        let Some(observer) = self.observer.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        match observer.try_borrow_mut() {
            Ok(mut observer) => notification.dispatch(&mut *observer, self),
            Err(_) => tracing::warn!(
                notification = notification.name(),
                "observer already borrowed, notification dropped"
            ),
        };
    }

    // ─────────────────────────────────────────────────────────────────────
    // Detail content
    // ─────────────────────────────────────────────────────────────────────

    /// Supply the detail content, returning the previous one.
    ///
    /// If the detail is currently shown the new content is attached at once.
    pub fn set_detail_content(
        &mut self,
        content: Box<dyn DetailContent>,
    ) -> Option<Box<dyn DetailContent>> {
        let previous = self.detail_content.replace(content);
        self.layout_content();
        previous
    }

    /// Take the detail content back from the card
    pub fn take_detail_content(&mut self) -> Option<Box<dyn DetailContent>> {
        let content = self.detail_content.take();
        self.layout_content();
        content
    }

    pub fn detail_content(&self) -> Option<&dyn DetailContent> {
        self.detail_content.as_deref()
    }

    pub fn is_content_attached(&self) -> bool {
        self.content_attached
    }

    /// Attach the content below the image and make the region scrollable.
    /// A placeholder is substituted when no content was supplied.
    pub(crate) fn attach_detail_content(&mut self) {
        if self.detail_content.is_none() {
            tracing::debug!("no detail content supplied, using placeholder");
            self.detail_content = Some(Box::new(PlaceholderContent::default()));
        }
        self.clips_to_bounds = true;
        self.content_attached = true;
        self.scroll.interaction_enabled = true;
        self.scroll.frame = self.frame.bounds();
        self.layout_content();
    }

    /// Detach the content (it stays owned by the card) and shrink the scroll
    /// region back to the image
    pub(crate) fn detach_detail_content(&mut self) {
        self.content_attached = false;
        self.content_frame = None;
        self.scroll.content_size = self.image_frame.size;
        self.scroll.frame = self.image_frame.bounds();
        self.scroll.offset_y = 0.0;
        self.scroll.interaction_enabled = false;
    }

    fn layout_content(&mut self) {
        if !self.content_attached {
            return;
        }
        let width = self.frame.width();
        match self.detail_content.as_mut() {
            Some(content) => {
                let frame = Rect::new(
                    0.0,
                    self.image_frame.max_y(),
                    width,
                    content.preferred_height(),
                );
                content.layout(frame);
                self.content_frame = Some(frame);
                self.scroll.content_size =
                    Size::new(width, self.image_frame.height() + frame.height());
            }
            None => {
                self.content_frame = None;
                self.scroll.content_size = self.image_frame.size;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────

    /// Feed a raw input event. Returns the gesture it was classified as.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<Gesture> {
        let gesture = self.gestures.interpret(event, self.frame)?;
        self.handle_gesture(gesture);
        Some(gesture)
    }

    /// Apply an already classified gesture
    pub fn handle_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::PressDown => self.press_down(),
            Gesture::PressCancel => self.press_cancel(),
            Gesture::Tap => self.tap(),
            Gesture::DragChanged { offset_y } => self.drag_changed(offset_y),
            Gesture::DragReleased { velocity_y } => {
                self.drag_released(velocity_y);
            }
            Gesture::DecelerationEnded => self.deceleration_ended(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> CardState {
        self.machine.current()
    }

    /// State changes so far, oldest first
    pub fn state_history(&self) -> &[(CardState, EventId, CardState)] {
        self.machine.history()
    }

    /// True from the expansion commit until the collapse commit
    pub fn is_detail_presented(&self) -> bool {
        self.is_detail_presented
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The compact frame given at construction
    pub fn original_frame(&self) -> Rect {
        self.original_frame
    }

    /// The expanded frame captured at the last expansion, while presented
    pub fn detail_frame(&self) -> Option<Rect> {
        self.is_detail_presented.then_some(self.detail_frame)
    }

    /// Vertical origin the expanded card settles to
    pub fn rest_origin_y(&self) -> Option<f32> {
        self.detail_frame().map(|frame| frame.y())
    }

    /// Bounce intensity of the current (or last) transition
    pub fn bounce_intensity(&self) -> f32 {
        self.bounce_intensity
    }

    pub fn press_scale(&self) -> f32 {
        self.press_scale
    }

    pub fn bounce_offset(&self) -> Point {
        self.bounce_offset
    }

    /// Visual transform about the card center: press scale, then bounce
    pub fn transform(&self) -> Affine2D {
        Affine2D::translation(self.bounce_offset.x, self.bounce_offset.y)
            .then(&Affine2D::scale(self.press_scale, self.press_scale))
    }

    pub fn shadow_opacity(&self) -> f32 {
        self.shadow_opacity
    }

    pub fn shadow_color(&self) -> Color {
        self.config.style.shadow_color.into()
    }

    pub fn background_color(&self) -> Color {
        self.config.style.background_color.into()
    }

    pub fn text_color(&self) -> Color {
        self.config.style.text_color.into()
    }

    pub fn style(&self) -> &StyleConfig {
        &self.config.style
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn clips_to_bounds(&self) -> bool {
        self.clips_to_bounds
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    /// Image frame in card coordinates
    pub fn image_frame(&self) -> Rect {
        self.image_frame
    }

    pub fn scroll(&self) -> &ScrollRegion {
        &self.scroll
    }

    /// Frame of the attached detail content in scroll region coordinates
    pub fn content_frame(&self) -> Option<Rect> {
        self.content_frame
    }

    /// Content inset in units
    pub fn insets(&self) -> f32 {
        self.insets
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether any animation is still running
    pub fn is_animating(&self) -> bool {
        self.animations.has_active_animations()
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("state", &self.state())
            .field("is_detail_presented", &self.is_detail_presented)
            .field("frame", &self.frame)
            .field("original_frame", &self.original_frame)
            .field("generation", &self.generation)
            .field("animations", &self.animations.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PLACEHOLDER_HEIGHT;

    struct Notes {
        height: f32,
        laid_out: Option<Rect>,
    }

    impl DetailContent for Notes {
        fn preferred_height(&self) -> f32 {
            self.height
        }

        fn layout(&mut self, frame: Rect) {
            self.laid_out = Some(frame);
        }
    }

    #[test]
    fn test_new_card_is_collapsed() {
        let card = Card::with_defaults(Rect::new(10.0, 10.0, 100.0, 140.0));
        assert_eq!(card.state(), CardState::Collapsed);
        assert!(!card.is_detail_presented());
        assert_eq!(card.detail_frame(), None);
        assert_eq!(card.image_frame(), Rect::new(0.0, 0.0, 100.0, 140.0));
        assert_eq!(card.scroll().frame, Rect::new(0.0, 0.0, 100.0, 140.0));
        assert!(!card.scroll().interaction_enabled);
        assert_eq!(card.insets(), 6.0);
        assert!(card.transform().is_identity());
        assert_eq!(card.shadow_opacity(), 0.6);
        assert!(!card.backdrop().is_attached());
        assert!(!card.is_animating());
    }

    #[test]
    fn test_set_frame_resizes_inner_regions() {
        let mut card = Card::with_defaults(Rect::new(10.0, 10.0, 100.0, 140.0));
        card.set_frame(Rect::new(0.0, 0.0, 200.0, 300.0));

        // Image keeps its height, takes the width
        assert_eq!(card.image_frame(), Rect::new(0.0, 0.0, 200.0, 140.0));
        assert_eq!(card.scroll().frame, Rect::new(0.0, 0.0, 200.0, 300.0));
        assert_eq!(card.insets(), 12.0);
        assert_eq!(card.original_frame(), Rect::new(10.0, 10.0, 100.0, 140.0));
    }

    #[test]
    fn test_content_inset_recomputes_insets() {
        let mut card = Card::with_defaults(Rect::new(0.0, 0.0, 100.0, 100.0));
        card.set_content_inset(10.0);
        assert_eq!(card.insets(), 10.0);
        assert_eq!(card.style().content_inset, 10.0);
    }

    #[test]
    fn test_attach_lays_out_content_below_image() {
        let mut card = Card::with_defaults(Rect::new(0.0, 0.0, 100.0, 140.0));
        card.set_detail_content(Box::new(Notes {
            height: 250.0,
            laid_out: None,
        }));
        card.attach_detail_content();

        let expected = Rect::new(0.0, 140.0, 100.0, 250.0);
        assert_eq!(card.content_frame(), Some(expected));
        assert_eq!(card.scroll().content_size, Size::new(100.0, 390.0));
        assert!(card.scroll().interaction_enabled);
        assert!(card.clips_to_bounds());

        // Width follows later frame changes while attached
        card.set_frame(Rect::new(0.0, 0.0, 300.0, 500.0));
        assert_eq!(
            card.content_frame(),
            Some(Rect::new(0.0, 140.0, 300.0, 250.0))
        );

        card.detach_detail_content();
        assert_eq!(card.content_frame(), None);
        assert_eq!(card.scroll().content_size, Size::new(300.0, 140.0));
        assert_eq!(card.scroll().frame, Rect::new(0.0, 0.0, 300.0, 140.0));
        assert!(!card.scroll().interaction_enabled);
        assert!(card.detail_content().is_some());
    }

    #[test]
    fn test_placeholder_substituted_on_attach() {
        let mut card = Card::with_defaults(Rect::new(0.0, 0.0, 100.0, 140.0));
        assert!(card.detail_content().is_none());
        card.attach_detail_content();

        let content = card.detail_content().unwrap();
        assert_eq!(content.label(), "placeholder");
        assert_eq!(
            card.content_frame(),
            Some(Rect::new(0.0, 140.0, 100.0, PLACEHOLDER_HEIGHT))
        );
    }

    #[test]
    fn test_observer_is_weak() {
        let mut card = Card::with_defaults(Rect::new(0.0, 0.0, 100.0, 140.0));
        let log = Rc::new(RefCell::new(crate::NotificationLog::new()));
        card.set_observer(&log);
        assert!(card.has_observer());

        card.notify(CardNotification::DetailIsScrolling);
        assert_eq!(log.borrow().entries().len(), 1);

        drop(log);
        assert!(!card.has_observer());
        // Skipped silently
        card.notify(CardNotification::DetailIsScrolling);
    }
}
