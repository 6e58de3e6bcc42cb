//! Interaction controllers for the page widgets.
//!
//! The generated pages are static HTML, but several widgets are stateful:
//! carousels rotate on a timer, images open full screen, timeline nodes react
//! to the pointer. Those behaviours are modelled here as small single-threaded
//! state machines:
//!
//! - [`carousel::Carousel`]: cyclic index over a [`carousel::SlideSet`] with
//!   autoplay gated by hover and by open overlays.
//! - [`overlay::Overlay`]: full-screen layer that holds the page scroll lock,
//!   an Escape listener and a surface layer while open.
//! - [`hover::Hover`]: one emphasised node at a time.
//! - [`host::Host`]: the page-wide resources the overlays borrow.
//! - [`widgets`]: the controllers composed into the concrete widgets.
//!
//! The renderer uses the controllers to produce each widget's initial markup,
//! and `static/widgets.js` follows the same transitions in the browser.

pub mod carousel;
pub mod host;
pub mod hover;
pub mod overlay;
pub mod widgets;

pub use carousel::{Carousel, Direction, SlideSet};
pub use host::Host;
pub use hover::{Emphasis, Hover};
pub use overlay::{BackdropAction, ClickOutcome, Overlay, OverlayClick};

/// Keys the widgets respond to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

/// Snapshot of one widget's interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub current: usize,
    pub paused: bool,
    pub overlay_open: bool,
    pub hovered: Option<usize>,
}
