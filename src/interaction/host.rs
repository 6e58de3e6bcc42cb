//! Page-wide resources shared by every widget on a page.
//!
//! A page has exactly one scroll lock, one set of document-level key
//! listeners, and one overlay surface (`#overlay-root`). Widgets never touch
//! these directly: they ask the [`Host`] for a guard and hold it for as long
//! as they need the resource. Dropping the guard gives the resource back, so
//! a widget that is torn down mid-interaction cannot leave the page locked.
//!
//! The scroll lock is reference counted. It is physically applied when the
//! first holder acquires it and released when the last holder lets go, which
//! keeps the page correct when two overlays are open at the same time.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// A physical change to the page's scroll lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTransition {
    Applied,
    Released,
}

#[derive(Debug, Default)]
struct HostState {
    scroll_holders: usize,
    transitions: Vec<ScrollTransition>,
    listeners: BTreeSet<u64>,
    next_listener: u64,
    layers: Vec<u32>,
    next_layer: u32,
}

/// Handle to the shared page resources. Cloning shares the same state.
#[derive(Debug, Clone, Default)]
pub struct Host {
    state: Rc<RefCell<HostState>>,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a share of the scroll lock.
    pub fn acquire_scroll_lock(&self) -> ScrollLockGuard {
        let mut state = self.state.borrow_mut();
        state.scroll_holders += 1;
        if state.scroll_holders == 1 {
            state.transitions.push(ScrollTransition::Applied);
        }
        ScrollLockGuard {
            state: Rc::clone(&self.state),
        }
    }

    pub fn scroll_locked(&self) -> bool {
        self.state.borrow().scroll_holders > 0
    }

    pub fn scroll_lock_holders(&self) -> usize {
        self.state.borrow().scroll_holders
    }

    /// Every apply/release of the physical lock, oldest first.
    pub fn scroll_transitions(&self) -> Vec<ScrollTransition> {
        self.state.borrow().transitions.clone()
    }

    /// Install a document-level key listener.
    pub fn install_key_listener(&self) -> KeyListenerGuard {
        let mut state = self.state.borrow_mut();
        let id = state.next_listener;
        state.next_listener += 1;
        state.listeners.insert(id);
        KeyListenerGuard {
            id,
            state: Rc::clone(&self.state),
        }
    }

    pub fn key_listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Attach a layer to the overlay surface. Later attachments stack above
    /// earlier ones.
    pub fn attach_surface(&self) -> SurfaceGuard {
        let mut state = self.state.borrow_mut();
        state.next_layer += 1;
        let z = state.next_layer;
        state.layers.push(z);
        SurfaceGuard {
            z,
            state: Rc::clone(&self.state),
        }
    }

    /// Z-order of every attached layer, bottom first.
    pub fn surface_layers(&self) -> Vec<u32> {
        self.state.borrow().layers.clone()
    }
}

/// A share of the page scroll lock. Released on drop.
#[derive(Debug)]
pub struct ScrollLockGuard {
    state: Rc<RefCell<HostState>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.scroll_holders -= 1;
        if state.scroll_holders == 0 {
            state.transitions.push(ScrollTransition::Released);
        }
    }
}

/// An installed key listener. Removed on drop.
#[derive(Debug)]
pub struct KeyListenerGuard {
    id: u64,
    state: Rc<RefCell<HostState>>,
}

impl Drop for KeyListenerGuard {
    fn drop(&mut self) {
        self.state.borrow_mut().listeners.remove(&self.id);
    }
}

/// A layer on the overlay surface. Detached on drop.
#[derive(Debug)]
pub struct SurfaceGuard {
    z: u32,
    state: Rc<RefCell<HostState>>,
}

impl SurfaceGuard {
    pub fn z(&self) -> u32 {
        self.z
    }
}

impl Drop for SurfaceGuard {
    fn drop(&mut self) {
        let z = self.z;
        self.state.borrow_mut().layers.retain(|&layer| layer != z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_lock_applies_once_for_nested_holders() {
        let host = Host::new();
        let first = host.acquire_scroll_lock();
        let second = host.acquire_scroll_lock();
        assert_eq!(host.scroll_lock_holders(), 2);
        assert_eq!(host.scroll_transitions(), vec![ScrollTransition::Applied]);

        drop(first);
        assert!(host.scroll_locked());
        drop(second);
        assert!(!host.scroll_locked());
        assert_eq!(
            host.scroll_transitions(),
            vec![ScrollTransition::Applied, ScrollTransition::Released]
        );
    }

    #[test]
    fn key_listeners_removed_on_drop() {
        let host = Host::new();
        let a = host.install_key_listener();
        let b = host.install_key_listener();
        assert_eq!(host.key_listener_count(), 2);
        drop(a);
        assert_eq!(host.key_listener_count(), 1);
        drop(b);
        assert_eq!(host.key_listener_count(), 0);
    }

    #[test]
    fn surface_layers_stack_in_attach_order() {
        let host = Host::new();
        let low = host.attach_surface();
        let high = host.attach_surface();
        assert!(high.z() > low.z());
        assert_eq!(host.surface_layers(), vec![low.z(), high.z()]);
        drop(low);
        assert_eq!(host.surface_layers(), vec![high.z()]);
    }

    #[test]
    fn clones_share_state() {
        let host = Host::new();
        let other = host.clone();
        let _guard = other.acquire_scroll_lock();
        assert!(host.scroll_locked());
    }
}
