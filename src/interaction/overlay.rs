//! Full-screen overlay lifecycle.

use super::Key;
use super::host::{Host, KeyListenerGuard, ScrollLockGuard, SurfaceGuard};

/// Where a click inside an open overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClick {
    /// The dimmed area around the content panel.
    Backdrop,
    /// The content panel itself.
    Panel,
    CloseButton,
}

/// What a backdrop click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackdropAction {
    #[default]
    Close,
    /// Leave the overlay open and move the associated carousel forward.
    Advance,
}

/// Result of routing a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Closed,
    Advance,
}

#[derive(Debug)]
struct Held {
    _scroll: ScrollLockGuard,
    _keys: KeyListenerGuard,
    surface: SurfaceGuard,
}

/// Overlay showing one payload at a time.
///
/// While open it holds a share of the scroll lock, a key listener and a
/// surface layer. All three are released together when the payload is
/// cleared, whichever way that happens.
#[derive(Debug)]
pub struct Overlay<P> {
    payload: Option<P>,
    held: Option<Held>,
    backdrop: BackdropAction,
}

impl<P> Default for Overlay<P> {
    fn default() -> Self {
        Self::new(BackdropAction::Close)
    }
}

impl<P> Overlay<P> {
    pub fn new(backdrop: BackdropAction) -> Self {
        Self {
            payload: None,
            held: None,
            backdrop,
        }
    }

    /// Show `payload`. Re-opening replaces the payload and keeps the
    /// resources already held.
    pub fn open(&mut self, payload: P, host: &Host) {
        if self.held.is_none() {
            self.held = Some(Held {
                _scroll: host.acquire_scroll_lock(),
                _keys: host.install_key_listener(),
                surface: host.attach_surface(),
            });
        }
        self.payload = Some(payload);
    }

    /// Close and release. Returns whether anything was open.
    pub fn close(&mut self) -> bool {
        self.payload = None;
        self.held.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.held.is_some()
    }

    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Surface z-order while open.
    pub fn layer(&self) -> Option<u32> {
        self.held.as_ref().map(|held| held.surface.z())
    }

    /// Document key event. Returns whether the overlay closed.
    pub fn on_key(&mut self, key: Key) -> bool {
        self.is_open() && key == Key::Escape && self.close()
    }

    pub fn on_click(&mut self, target: OverlayClick) -> ClickOutcome {
        if !self.is_open() {
            return ClickOutcome::Ignored;
        }
        match (target, self.backdrop) {
            (OverlayClick::Panel, _) => ClickOutcome::Ignored,
            (OverlayClick::Backdrop, BackdropAction::Advance) => ClickOutcome::Advance,
            (OverlayClick::Backdrop, BackdropAction::Close) | (OverlayClick::CloseButton, _) => {
                self.close();
                ClickOutcome::Closed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::host::ScrollTransition;

    fn assert_released(host: &Host) {
        assert!(!host.scroll_locked());
        assert_eq!(host.key_listener_count(), 0);
        assert!(host.surface_layers().is_empty());
        assert_eq!(
            host.scroll_transitions(),
            vec![ScrollTransition::Applied, ScrollTransition::Released]
        );
    }

    #[test]
    fn open_acquires_each_resource_once() {
        let host = Host::new();
        let mut overlay = Overlay::default();
        overlay.open("a", &host);
        overlay.open("b", &host);
        assert_eq!(overlay.payload(), Some(&"b"));
        assert_eq!(host.scroll_lock_holders(), 1);
        assert_eq!(host.key_listener_count(), 1);
        assert_eq!(host.surface_layers().len(), 1);
    }

    #[test]
    fn explicit_close_releases() {
        let host = Host::new();
        let mut overlay = Overlay::default();
        overlay.open(1, &host);
        assert!(overlay.close());
        assert_released(&host);
    }

    #[test]
    fn escape_releases() {
        let host = Host::new();
        let mut overlay = Overlay::default();
        overlay.open(1, &host);
        assert!(!overlay.on_key(Key::ArrowLeft));
        assert!(overlay.on_key(Key::Escape));
        assert_released(&host);
    }

    #[test]
    fn drop_releases() {
        let host = Host::new();
        let mut overlay = Overlay::default();
        overlay.open(1, &host);
        drop(overlay);
        assert_released(&host);
    }

    #[test]
    fn close_is_idempotent() {
        let host = Host::new();
        let mut overlay = Overlay::default();
        overlay.open(1, &host);
        assert!(overlay.close());
        assert!(!overlay.close());
        assert!(!overlay.on_key(Key::Escape));
        assert_eq!(overlay.on_click(OverlayClick::CloseButton), ClickOutcome::Ignored);
        assert_released(&host);
    }

    #[test]
    fn two_overlays_keep_lock_until_both_close() {
        let host = Host::new();
        let mut a = Overlay::default();
        let mut b = Overlay::default();
        a.open((), &host);
        b.open((), &host);
        assert!(b.layer() > a.layer());
        a.close();
        assert!(host.scroll_locked());
        b.close();
        assert_released(&host);
    }

    #[test]
    fn click_routing() {
        let host = Host::new();
        let mut overlay = Overlay::new(BackdropAction::Advance);
        overlay.open(0, &host);
        assert_eq!(overlay.on_click(OverlayClick::Panel), ClickOutcome::Ignored);
        assert_eq!(overlay.on_click(OverlayClick::Backdrop), ClickOutcome::Advance);
        assert!(overlay.is_open());
        assert_eq!(overlay.on_click(OverlayClick::CloseButton), ClickOutcome::Closed);
        assert!(!overlay.is_open());

        let mut plain = Overlay::default();
        plain.open(0, &host);
        assert_eq!(plain.on_click(OverlayClick::Backdrop), ClickOutcome::Closed);
    }
}
