//! Card observer interface
//!
//! Observers opt into the notifications they care about; every method has an
//! empty default. The card keeps only a weak reference to its observer and
//! silently skips notifications once the observer is gone.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use deck_card::{Card, CardObserver};
//! use deck_core::Rect;
//!
//! #[derive(Default)]
//! struct Dimmer {
//!     dimmed: bool,
//! }
//!
//! impl CardObserver for Dimmer {
//!     fn will_show_detail(&mut self, _card: &Card) {
//!         self.dimmed = true;
//!     }
//!
//!     fn did_close_detail(&mut self, _card: &Card) {
//!         self.dimmed = false;
//!     }
//! }
//!
//! let dimmer = Rc::new(RefCell::new(Dimmer::default()));
//! let mut card = Card::new(Rect::new(10.0, 10.0, 100.0, 140.0), Default::default());
//! card.set_observer(&dimmer);
//! card.tap();
//! assert!(dimmer.borrow().dimmed);
//! ```

use rustc_hash::FxHashMap;

use crate::card::Card;

/// Receives presentation notifications from a [`Card`]
pub trait CardObserver {
    /// A tap was recognized on the card, whether or not it changes state
    fn did_tap_inside(&mut self, _card: &Card) {}

    /// Expansion is starting
    fn will_show_detail(&mut self, _card: &Card) {}

    /// One animation tick of the expansion
    fn is_showing_detail(&mut self, _card: &Card) {}

    /// Expansion committed; the detail content is attached
    fn did_show_detail(&mut self, _card: &Card) {}

    /// Collapse is starting
    fn will_close_detail(&mut self, _card: &Card) {}

    /// One animation tick of the collapse
    fn is_hiding_detail(&mut self, _card: &Card) {}

    /// Collapse committed; the card is back to its original frame
    fn did_close_detail(&mut self, _card: &Card) {}

    /// The detail content was dragged while expanded
    fn detail_is_scrolling(&mut self, _card: &Card) {}
}

/// Notification kinds, one per [`CardObserver`] method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardNotification {
    DidTapInside,
    WillShowDetail,
    IsShowingDetail,
    DidShowDetail,
    WillCloseDetail,
    IsHidingDetail,
    DidCloseDetail,
    DetailIsScrolling,
}

impl CardNotification {
    /// Deliver this notification to an observer
    pub fn dispatch(self, observer: &mut dyn CardObserver, card: &Card) {
        match self {
            CardNotification::DidTapInside => observer.did_tap_inside(card),
            CardNotification::WillShowDetail => observer.will_show_detail(card),
            CardNotification::IsShowingDetail => observer.is_showing_detail(card),
            CardNotification::DidShowDetail => observer.did_show_detail(card),
            CardNotification::WillCloseDetail => observer.will_close_detail(card),
            CardNotification::IsHidingDetail => observer.is_hiding_detail(card),
            CardNotification::DidCloseDetail => observer.did_close_detail(card),
            CardNotification::DetailIsScrolling => observer.detail_is_scrolling(card),
        }
    }

    /// Whether this is a per-tick progress notification
    pub fn is_progress(&self) -> bool {
        matches!(
            self,
            CardNotification::IsShowingDetail | CardNotification::IsHidingDetail
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            CardNotification::DidTapInside => "did_tap_inside",
            CardNotification::WillShowDetail => "will_show_detail",
            CardNotification::IsShowingDetail => "is_showing_detail",
            CardNotification::DidShowDetail => "did_show_detail",
            CardNotification::WillCloseDetail => "will_close_detail",
            CardNotification::IsHidingDetail => "is_hiding_detail",
            CardNotification::DidCloseDetail => "did_close_detail",
            CardNotification::DetailIsScrolling => "detail_is_scrolling",
        }
    }
}

/// Observer that records every notification in order
#[derive(Debug, Default, Clone)]
pub struct NotificationLog {
    entries: Vec<CardNotification>,
    counts: FxHashMap<CardNotification, usize>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, notification: CardNotification) {
        self.entries.push(notification);
        *self.counts.entry(notification).or_default() += 1;
    }

    /// All notifications, oldest first
    pub fn entries(&self) -> &[CardNotification] {
        &self.entries
    }

    pub fn count(&self, notification: CardNotification) -> usize {
        self.counts.get(&notification).copied().unwrap_or(0)
    }

    /// Index of the first occurrence
    pub fn first(&self, notification: CardNotification) -> Option<usize> {
        self.entries.iter().position(|n| *n == notification)
    }

    /// Index of the last occurrence
    pub fn last(&self, notification: CardNotification) -> Option<usize> {
        self.entries.iter().rposition(|n| *n == notification)
    }

    /// Entries with consecutive repeats folded into `(notification, run length)`
    pub fn runs(&self) -> Vec<(CardNotification, usize)> {
        let mut runs: Vec<(CardNotification, usize)> = Vec::new();
        for &notification in &self.entries {
            match runs.last_mut() {
                Some((last, count)) if *last == notification => *count += 1,
                _ => runs.push((notification, 1)),
            }
        }
        runs
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.counts.clear();
    }
}

impl CardObserver for NotificationLog {
    fn did_tap_inside(&mut self, _card: &Card) {
        self.record(CardNotification::DidTapInside);
    }

    fn will_show_detail(&mut self, _card: &Card) {
        self.record(CardNotification::WillShowDetail);
    }

    fn is_showing_detail(&mut self, _card: &Card) {
        self.record(CardNotification::IsShowingDetail);
    }

    fn did_show_detail(&mut self, _card: &Card) {
        self.record(CardNotification::DidShowDetail);
    }

    fn will_close_detail(&mut self, _card: &Card) {
        self.record(CardNotification::WillCloseDetail);
    }

    fn is_hiding_detail(&mut self, _card: &Card) {
        self.record(CardNotification::IsHidingDetail);
    }

    fn did_close_detail(&mut self, _card: &Card) {
        self.record(CardNotification::DidCloseDetail);
    }

    fn detail_is_scrolling(&mut self, _card: &Card) {
        self.record(CardNotification::DetailIsScrolling);
    }
}
