//! Observable float cell.
//!
//! Writes that change the stored value notify every subscriber, in
//! subscription order, after the new value is visible to readers.

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(f32)>;

struct ListenerEntry {
    id: u64,
    callback: Listener,
}

struct FloatStateInner {
    value: Cell<f32>,
    listeners: RefCell<SmallVec<[ListenerEntry; 2]>>,
    next_listener_id: Cell<u64>,
}

/// Shared, observable `f32`. Clones refer to the same cell.
#[derive(Clone)]
pub struct MutableFloatState {
    inner: Rc<FloatStateInner>,
}

impl MutableFloatState {
    pub fn new(value: f32) -> Self {
        Self {
            inner: Rc::new(FloatStateInner {
                value: Cell::new(value),
                listeners: RefCell::new(SmallVec::new()),
                next_listener_id: Cell::new(1),
            }),
        }
    }

    pub fn get(&self) -> f32 {
        self.inner.value.get()
    }

    /// Stores `value`, returning whether it differed from the previous one.
    pub fn set(&self, value: f32) -> bool {
        let previous = self.inner.value.replace(value);
        if previous == value {
            return false;
        }
        self.notify(value);
        true
    }

    pub fn update(&self, f: impl FnOnce(f32) -> f32) -> bool {
        self.set(f(self.get()))
    }

    /// Registers `listener`; it stays registered while the returned
    /// [`Subscription`] is alive.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, listener: impl Fn(f32) + 'static) -> Subscription {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner.listeners.borrow_mut().push(ListenerEntry {
            id,
            callback: Rc::new(listener),
        });
        Subscription {
            state: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self, value: f32) {
        // Snapshot so listeners may subscribe, unsubscribe or write re-entrantly.
        let listeners: SmallVec<[Listener; 2]> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|entry| entry.callback.clone())
            .collect();
        for listener in listeners {
            listener(value);
        }
    }
}

impl fmt::Debug for MutableFloatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableFloatState")
            .field("value", &self.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

pub struct Subscription {
    state: Weak<FloatStateInner>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.listeners.borrow_mut().retain(|entry| entry.id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
