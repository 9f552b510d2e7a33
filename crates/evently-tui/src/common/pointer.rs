//! Pointer-down listener registry.
//!
//! Views that react to clicks anywhere on screen (outside-click dismissal)
//! hold a `PointerSubscription`. The reducer only forwards pointer-down
//! events to a view whose subscription is still registered. Dropping the
//! subscription deregisters it, so unmounting a view on any path releases
//! its listener.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use ratatui::layout::{Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
struct Registry {
    next: u64,
    active: BTreeSet<ListenerId>,
}

/// Process-wide set of active pointer listeners.
#[derive(Debug, Default, Clone)]
pub struct PointerListeners {
    inner: Rc<RefCell<Registry>>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for the lifetime of the returned guard.
    pub fn subscribe(&self) -> PointerSubscription {
        let mut registry = self.inner.borrow_mut();
        let id = ListenerId(registry.next);
        registry.next = registry.next.wrapping_add(1);
        registry.active.insert(id);
        PointerSubscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    pub fn is_active(&self, id: ListenerId) -> bool {
        self.inner.borrow().active.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registration guard. Deregisters on drop.
#[derive(Debug)]
pub struct PointerSubscription {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl PointerSubscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().active.remove(&self.id);
        }
    }
}

/// Returns true if the cell at (`column`, `row`) lies inside `rect`.
pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    rect.contains(Position::new(column, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_deregisters() {
        let listeners = PointerListeners::new();
        let first = listeners.subscribe();
        let second = listeners.subscribe();
        assert_eq!(listeners.len(), 2);
        assert_ne!(first.id(), second.id());

        let first_id = first.id();
        drop(first);
        assert!(!listeners.is_active(first_id));
        assert!(listeners.is_active(second.id()));

        drop(second);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_subscription_outliving_registry_is_harmless() {
        let listeners = PointerListeners::new();
        let sub = listeners.subscribe();
        drop(listeners);
        drop(sub);
    }

    #[test]
    fn test_hit() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(hit(rect, 2, 3));
        assert!(hit(rect, 5, 4));
        assert!(!hit(rect, 6, 4));
        assert!(!hit(rect, 2, 5));
        assert!(!hit(Rect::default(), 0, 0));
    }
}
