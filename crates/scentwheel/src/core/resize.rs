//! Viewport resize notifications with scoped subscriptions
//!
//! The host owns a [`ResizeHub`] (one per window) and calls
//! [`ResizeHub::dispatch`] whenever the viewport changes size. Components
//! subscribe on mount and hold the returned [`ResizeSubscription`]; dropping
//! it removes the callback.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};
use tracing::trace;

type Callback = Box<dyn FnMut()>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: BTreeMap<u64, Callback>,
    dispatching: bool,
    cancelled: BTreeSet<u64>,
}

impl HubInner {
    fn remove(&mut self, id: u64) {
        if self.listeners.remove(&id).is_none() && self.dispatching {
            // taken out for the running dispatch; drop it when it comes back
            self.cancelled.insert(id);
        }
    }
}

/// Source of resize events
#[derive(Clone, Default)]
pub struct ResizeHub {
    inner: Rc<RefCell<HubInner>>,
}

impl ResizeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every future resize event
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl FnMut() + 'static) -> ResizeSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, Box::new(callback));
        trace!(subscription = id, "Resize listener added");
        ResizeSubscription {
            hub: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Notify every subscriber; returns how many callbacks ran
    ///
    /// Callbacks may drop their own or other subscriptions while running.
    pub fn dispatch(&self) -> usize {
        let mut running = {
            let mut inner = self.inner.borrow_mut();
            inner.dispatching = true;
            std::mem::take(&mut inner.listeners)
        };

        let mut invoked = 0;
        for (id, callback) in running.iter_mut() {
            if self.inner.borrow().cancelled.contains(id) {
                continue;
            }
            callback();
            invoked += 1;
        }

        let mut inner = self.inner.borrow_mut();
        for (id, callback) in running {
            if !inner.cancelled.remove(&id) {
                inner.listeners.insert(id, callback);
            }
        }
        inner.cancelled.clear();
        inner.dispatching = false;
        trace!(invoked, "Resize dispatched");
        invoked
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Handle that keeps a resize callback registered
///
/// Dropping the handle unsubscribes. Outliving the hub is fine.
#[derive(Debug)]
pub struct ResizeSubscription {
    hub: Weak<RefCell<HubInner>>,
    id: u64,
}

impl ResizeSubscription {
    /// Unsubscribe explicitly
    pub fn cancel(self) {}

    pub fn is_active(&self) -> bool {
        self.hub.upgrade().is_some()
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().remove(self.id);
            trace!(subscription = self.id, "Resize listener removed");
        }
    }
}
