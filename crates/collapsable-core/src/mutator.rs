//! Exclusive-writer bookkeeping for values driven by animations.
//!
//! A [`MutatorSlot`] remembers the token of the animation currently allowed
//! to write a value. Acquiring a new token revokes the previous one; running
//! animations check their token between frames and stop once it is revoked.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

#[derive(Clone)]
pub struct MutatorToken {
    id: u64,
    active: Rc<Cell<bool>>,
}

impl MutatorToken {
    fn new(id: u64) -> Self {
        Self {
            id,
            active: Rc::new(Cell::new(true)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// True until the token is revoked by a newer mutator or finished.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    fn revoke(&self) {
        self.active.set(false);
    }
}

impl fmt::Debug for MutatorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutatorToken")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[derive(Default)]
pub struct MutatorSlot {
    current: RefCell<Option<MutatorToken>>,
    next_id: Cell<u64>,
}

impl MutatorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revokes the current mutator, if any, and installs a fresh token.
    pub fn acquire(&self) -> MutatorToken {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let token = MutatorToken::new(id);
        let previous = self.current.borrow_mut().replace(token.clone());
        if let Some(previous) = previous {
            if previous.is_active() {
                log::debug!("mutator {} preempted by {}", previous.id, id);
            }
            previous.revoke();
        }
        token
    }

    /// Marks `token` finished; clears the slot if it still holds that token.
    pub fn release(&self, token: &MutatorToken) {
        token.revoke();
        let mut current = self.current.borrow_mut();
        if current.as_ref().map(|held| held.id) == Some(token.id) {
            *current = None;
        }
    }

    /// Revokes whatever mutator currently holds the slot.
    pub fn cancel(&self) {
        if let Some(previous) = self.current.borrow_mut().take() {
            if previous.is_active() {
                log::debug!("mutator {} cancelled", previous.id);
            }
            previous.revoke();
        }
    }

    pub fn is_mutating(&self) -> bool {
        self.current
            .borrow()
            .as_ref()
            .map(MutatorToken::is_active)
            .unwrap_or(false)
    }
}

impl fmt::Debug for MutatorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutatorSlot")
            .field("current", &*self.current.borrow())
            .finish()
    }
}
