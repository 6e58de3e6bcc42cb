//! Widgets composed from the carousel, overlay and hover controllers.

use super::carousel::{Carousel, Direction, SlideSet};
use super::host::Host;
use super::hover::{Emphasis, Hover};
use super::overlay::{BackdropAction, ClickOutcome, Overlay, OverlayClick};
use super::{InteractionState, Key};
use crate::blocks::{ComparisonPair, Quote, TimelineNode};
use std::time::Duration;

// ============================================================================
// Before/after comparison
// ============================================================================

/// Before/after carousel with a full-screen view and an optional demo video.
///
/// In full screen, clicking the backdrop moves to the next pair and the
/// arrow keys navigate. Escape closes whichever overlay is open.
#[derive(Debug)]
pub struct CompareCarousel {
    pairs: SlideSet<ComparisonPair>,
    carousel: Carousel,
    fullscreen: Overlay<usize>,
    video: Overlay<String>,
    host: Host,
}

impl CompareCarousel {
    pub fn new(pairs: SlideSet<ComparisonPair>, interval: Duration, host: &Host, now: Duration) -> Self {
        let carousel = Carousel::for_set(&pairs, interval, now);
        Self {
            pairs,
            carousel,
            fullscreen: Overlay::new(BackdropAction::Advance),
            video: Overlay::default(),
            host: host.clone(),
        }
    }

    pub fn current(&self) -> usize {
        self.carousel.current()
    }

    pub fn current_pair(&self) -> &ComparisonPair {
        self.pairs.get(self.carousel.current())
    }

    pub fn pairs(&self) -> &SlideSet<ComparisonPair> {
        &self.pairs
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn fullscreen_pair(&self) -> Option<usize> {
        self.fullscreen.payload().copied()
    }

    pub fn video_url(&self) -> Option<&str> {
        self.video.payload().map(String::as_str)
    }

    pub fn state(&self) -> InteractionState {
        InteractionState {
            current: self.carousel.current(),
            paused: self.carousel.is_paused(),
            overlay_open: self.carousel.is_overlay_open(),
            hovered: None,
        }
    }

    pub fn pointer_enter(&mut self, now: Duration) {
        self.carousel.set_paused(true, now);
    }

    pub fn pointer_leave(&mut self, now: Duration) {
        self.carousel.set_paused(false, now);
    }

    pub fn advance(&mut self, direction: Direction, now: Duration) {
        self.carousel.advance(direction, now);
        self.follow_current();
    }

    pub fn go_to(&mut self, index: usize, now: Duration) {
        self.carousel.go_to(index, now);
        self.follow_current();
    }

    pub fn tick(&mut self, now: Duration) -> bool {
        self.carousel.tick(now)
    }

    pub fn open_fullscreen(&mut self, now: Duration) {
        self.fullscreen.open(self.carousel.current(), &self.host);
        self.sync_gate(now);
    }

    /// Open the current pair's demo video. Returns `false` when the pair has
    /// none.
    pub fn open_video(&mut self, now: Duration) -> bool {
        let Some(url) = self.current_pair().video_url.clone() else {
            return false;
        };
        self.video.open(crate::video::VideoSource::direct(&url), &self.host);
        self.sync_gate(now);
        true
    }

    pub fn close_fullscreen(&mut self, now: Duration) {
        self.fullscreen.close();
        self.sync_gate(now);
    }

    pub fn close_video(&mut self, now: Duration) {
        self.video.close();
        self.sync_gate(now);
    }

    pub fn on_key(&mut self, key: Key, now: Duration) {
        match key {
            Key::Escape => {
                self.video.close();
                self.fullscreen.close();
            }
            Key::ArrowRight if self.fullscreen.is_open() => self.advance(Direction::Next, now),
            Key::ArrowLeft if self.fullscreen.is_open() => self.advance(Direction::Prev, now),
            _ => {}
        }
        self.sync_gate(now);
    }

    pub fn on_fullscreen_click(&mut self, target: OverlayClick, now: Duration) {
        if self.fullscreen.on_click(target) == ClickOutcome::Advance {
            self.advance(Direction::Next, now);
        }
        self.sync_gate(now);
    }

    pub fn on_video_click(&mut self, target: OverlayClick, now: Duration) {
        self.video.on_click(target);
        self.sync_gate(now);
    }

    fn follow_current(&mut self) {
        if self.fullscreen.is_open() {
            self.fullscreen.open(self.carousel.current(), &self.host);
        }
    }

    fn sync_gate(&mut self, now: Duration) {
        let open = self.fullscreen.is_open() || self.video.is_open();
        self.carousel.set_overlay_open(open, now);
    }
}

// ============================================================================
// Quotes
// ============================================================================

/// Fade hint for the quote rotator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotePhase {
    Visible,
    FadingOut,
}

/// Rotating testimonials with pause on hover.
#[derive(Debug, Clone)]
pub struct QuoteRotator {
    quotes: SlideSet<Quote>,
    carousel: Carousel,
}

impl QuoteRotator {
    /// Fade-out length before the quote changes.
    pub const FADE: Duration = Duration::from_millis(100);

    pub fn new(quotes: SlideSet<Quote>, interval: Duration, now: Duration) -> Self {
        let carousel = Carousel::for_set(&quotes, interval, now);
        Self { quotes, carousel }
    }

    pub fn current(&self) -> &Quote {
        self.quotes.get(self.carousel.current())
    }

    pub fn quotes(&self) -> &SlideSet<Quote> {
        &self.quotes
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn state(&self) -> InteractionState {
        InteractionState {
            current: self.carousel.current(),
            paused: self.carousel.is_paused(),
            overlay_open: false,
            hovered: None,
        }
    }

    pub fn pointer_enter(&mut self, now: Duration) {
        self.carousel.set_paused(true, now);
    }

    pub fn pointer_leave(&mut self, now: Duration) {
        self.carousel.set_paused(false, now);
    }

    pub fn go_to(&mut self, index: usize, now: Duration) {
        self.carousel.go_to(index, now);
    }

    pub fn tick(&mut self, now: Duration) -> bool {
        self.carousel.tick(now)
    }

    /// The current quote fades out during the last [`Self::FADE`] before an
    /// autoplay step.
    pub fn phase(&self, now: Duration) -> QuotePhase {
        match self.carousel.deadline() {
            Some(deadline) if deadline.saturating_sub(now) <= Self::FADE => QuotePhase::FadingOut,
            _ => QuotePhase::Visible,
        }
    }
}

// ============================================================================
// Timeline
// ============================================================================

/// Timeline with hover emphasis and a full-size image view.
#[derive(Debug)]
pub struct TimelineWidget {
    nodes: SlideSet<TimelineNode>,
    hover: Hover,
    viewer: Overlay<String>,
    host: Host,
}

impl TimelineWidget {
    pub fn new(nodes: SlideSet<TimelineNode>, host: &Host) -> Self {
        Self {
            nodes,
            hover: Hover::default(),
            viewer: Overlay::default(),
            host: host.clone(),
        }
    }

    pub fn nodes(&self) -> &SlideSet<TimelineNode> {
        &self.nodes
    }

    pub fn pointer_enter(&mut self, index: usize) {
        self.hover.set_hovered(Some(index));
    }

    pub fn pointer_leave(&mut self) {
        self.hover.set_hovered(None);
    }

    pub fn emphasis(&self, index: usize) -> Emphasis {
        self.hover.emphasis(index)
    }

    /// Open a node's image full size. Returns `false` for nodes without one.
    pub fn open_image(&mut self, index: usize) -> bool {
        match self.nodes.get(index).image.clone() {
            Some(image) => {
                self.viewer.open(image, &self.host);
                true
            }
            None => false,
        }
    }

    pub fn viewing(&self) -> Option<&str> {
        self.viewer.payload().map(String::as_str)
    }

    pub fn on_key(&mut self, key: Key) -> bool {
        self.viewer.on_key(key)
    }

    pub fn on_click(&mut self, target: OverlayClick) -> ClickOutcome {
        self.viewer.on_click(target)
    }

    pub fn state(&self) -> InteractionState {
        InteractionState {
            current: 0,
            paused: false,
            overlay_open: self.viewer.is_open(),
            hovered: self.hover.hovered(),
        }
    }
}

// ============================================================================
// Single media
// ============================================================================

/// A single item (mockup image, embedded or hero video) that opens full
/// screen on click.
#[derive(Debug)]
pub struct MediaViewer<P> {
    overlay: Overlay<P>,
    host: Host,
}

impl<P> MediaViewer<P> {
    pub fn new(host: &Host) -> Self {
        Self {
            overlay: Overlay::default(),
            host: host.clone(),
        }
    }

    pub fn open(&mut self, payload: P) {
        self.overlay.open(payload, &self.host);
    }

    pub fn close(&mut self) -> bool {
        self.overlay.close()
    }

    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    pub fn showing(&self) -> Option<&P> {
        self.overlay.payload()
    }

    pub fn on_key(&mut self, key: Key) -> bool {
        self.overlay.on_key(key)
    }

    pub fn on_click(&mut self, target: OverlayClick) -> ClickOutcome {
        self.overlay.on_click(target)
    }
}
