//! Nested scroll propagation.
//!
//! A scroll passes through two phases. In pre-scroll, ancestors see the
//! delta before the scrolling child and may consume part of it. In
//! post-scroll, they receive what the child consumed along with what is
//! still available. Flings follow the same pattern with velocities and may
//! suspend while they animate.
//!
//! Every hook returns the amount it consumed. Callers subtract it before
//! passing the remainder on, so no motion is applied twice.

use std::cell::RefCell;
use std::fmt;
use std::future::{ready, Future};
use std::pin::Pin;
use std::rc::Rc;

use crate::geometry::{Offset, Velocity};

/// Future returned by the fling hooks; resolves to the consumed velocity.
pub type FlingFuture<'a> = Pin<Box<dyn Future<Output = Velocity> + 'a>>;

/// What produced a scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedScrollSource {
    /// Pointer or touch drag.
    Drag,
    /// Momentum after a fling.
    Fling,
    /// Mouse wheel or trackpad.
    Wheel,
}

/// Participant in nested scrolling. Every hook defaults to consuming nothing.
pub trait NestedScrollConnection {
    fn on_pre_scroll(&self, _available: Offset, _source: NestedScrollSource) -> Offset {
        Offset::ZERO
    }

    fn on_post_scroll(
        &self,
        _consumed: Offset,
        _available: Offset,
        _source: NestedScrollSource,
    ) -> Offset {
        Offset::ZERO
    }

    fn on_pre_fling(&self, _available: Velocity) -> FlingFuture<'_> {
        Box::pin(ready(Velocity::ZERO))
    }

    fn on_post_fling(&self, _consumed: Velocity, _available: Velocity) -> FlingFuture<'_> {
        Box::pin(ready(Velocity::ZERO))
    }
}

impl<T: NestedScrollConnection + ?Sized> NestedScrollConnection for Rc<T> {
    fn on_pre_scroll(&self, available: Offset, source: NestedScrollSource) -> Offset {
        (**self).on_pre_scroll(available, source)
    }

    fn on_post_scroll(
        &self,
        consumed: Offset,
        available: Offset,
        source: NestedScrollSource,
    ) -> Offset {
        (**self).on_post_scroll(consumed, available, source)
    }

    fn on_pre_fling(&self, available: Velocity) -> FlingFuture<'_> {
        (**self).on_pre_fling(available)
    }

    fn on_post_fling(&self, consumed: Velocity, available: Velocity) -> FlingFuture<'_> {
        (**self).on_post_fling(consumed, available)
    }
}

/// Sends scroll events originating in a child up to its nested scroll parent.
///
/// Without a parent every dispatch consumes nothing.
#[derive(Default)]
pub struct NestedScrollDispatcher {
    parent: RefCell<Option<Rc<dyn NestedScrollConnection>>>,
}

impl NestedScrollDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: Rc<dyn NestedScrollConnection>) -> Self {
        Self {
            parent: RefCell::new(Some(parent)),
        }
    }

    pub fn attach_parent(&self, parent: Rc<dyn NestedScrollConnection>) {
        *self.parent.borrow_mut() = Some(parent);
    }

    pub fn detach_parent(&self) {
        self.parent.borrow_mut().take();
    }

    pub fn has_parent(&self) -> bool {
        self.parent.borrow().is_some()
    }

    // Hooks run outside the borrow so a parent may re-attach itself.
    fn parent(&self) -> Option<Rc<dyn NestedScrollConnection>> {
        self.parent.borrow().clone()
    }

    pub fn dispatch_pre_scroll(&self, available: Offset, source: NestedScrollSource) -> Offset {
        match self.parent() {
            Some(parent) => parent.on_pre_scroll(available, source),
            None => Offset::ZERO,
        }
    }

    pub fn dispatch_post_scroll(
        &self,
        consumed: Offset,
        available: Offset,
        source: NestedScrollSource,
    ) -> Offset {
        match self.parent() {
            Some(parent) => parent.on_post_scroll(consumed, available, source),
            None => Offset::ZERO,
        }
    }

    pub async fn dispatch_pre_fling(&self, available: Velocity) -> Velocity {
        match self.parent() {
            Some(parent) => parent.on_pre_fling(available).await,
            None => Velocity::ZERO,
        }
    }

    pub async fn dispatch_post_fling(&self, consumed: Velocity, available: Velocity) -> Velocity {
        match self.parent() {
            Some(parent) => parent.on_post_fling(consumed, available).await,
            None => Velocity::ZERO,
        }
    }
}

impl fmt::Debug for NestedScrollDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedScrollDispatcher")
            .field("has_parent", &self.has_parent())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/nested_scroll_tests.rs"]
mod tests;
