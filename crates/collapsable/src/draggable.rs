//! Direct dragging of a collapsable surface.
//!
//! A drag on the surface itself has no scrolling child to report to. The
//! adapter plays that child: every delta and the release velocity are run
//! through the same pre/post hooks a nested scroll would use, so dragging
//! and scrolling share one code path. Outer scroll parents still see the
//! motion through [`CollapsableDraggable::dispatcher`].

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use collapsable_core::{RuntimeHandle, TaskHandle};
use collapsable_foundation::{
    NestedScrollConnection, NestedScrollDispatcher, NestedScrollSource, Offset, Velocity,
    VelocityTracker1D, DRAG_THRESHOLD, MAX_FLING_VELOCITY,
};

#[derive(Default)]
struct DragTracking {
    tracker: VelocityTracker1D,
    down: bool,
    slop_passed: bool,
    accumulated: f32,
}

/// Turns raw vertical drag input into nested scroll calls on a connection.
pub struct CollapsableDraggable {
    connection: Rc<dyn NestedScrollConnection>,
    dispatcher: NestedScrollDispatcher,
    enabled: Cell<bool>,
    tracking: RefCell<DragTracking>,
}

impl CollapsableDraggable {
    pub fn new(connection: Rc<dyn NestedScrollConnection>) -> Self {
        Self {
            connection,
            dispatcher: NestedScrollDispatcher::new(),
            enabled: Cell::new(true),
            tracking: RefCell::new(DragTracking {
                tracker: VelocityTracker1D::differential(),
                ..DragTracking::default()
            }),
        }
    }

    /// Attach outer scroll parents here.
    pub fn dispatcher(&self) -> &NestedScrollDispatcher {
        &self.dispatcher
    }

    /// Disabling drops any drag in progress.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
        if !enabled {
            self.on_drag_cancel();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Routes one drag delta; returns what this surface and its parents
    /// consumed together.
    pub fn drag(&self, delta: f32) -> Offset {
        if !self.is_enabled() {
            return Offset::ZERO;
        }
        let source = NestedScrollSource::Drag;
        let delta = Offset::vertical(delta);

        let parent_pre = self.dispatcher.dispatch_pre_scroll(delta, source);
        let available = delta - parent_pre;
        let pre = self.connection.on_pre_scroll(available, source);
        let post = self
            .connection
            .on_post_scroll(Offset::ZERO, available - pre, source);
        let consumed = pre + post;
        let leftover = available - consumed;
        let parent_post = self
            .dispatcher
            .dispatch_post_scroll(consumed, leftover, source);
        parent_pre + consumed + parent_post
    }

    /// Routes a release velocity through the fling hooks; resolves to the
    /// velocity consumed along the way.
    pub async fn fling(&self, velocity: f32) -> Velocity {
        if !self.is_enabled() {
            return Velocity::ZERO;
        }
        let velocity = Velocity::vertical(velocity);

        let parent_pre = self.dispatcher.dispatch_pre_fling(velocity).await;
        let available = velocity - parent_pre;
        let pre = self.connection.on_pre_fling(available).await;
        let post = self
            .connection
            .on_post_fling(Velocity::ZERO, available - pre)
            .await;
        let consumed = pre + post;
        let parent_post = self
            .dispatcher
            .dispatch_post_fling(consumed, available - consumed)
            .await;
        parent_pre + consumed + parent_post
    }

    /// Spawns [`fling`](Self::fling) on `runtime`.
    pub fn launch_fling(
        self: &Rc<Self>,
        runtime: &RuntimeHandle,
        velocity: f32,
    ) -> Option<TaskHandle> {
        let this = Rc::clone(self);
        runtime.spawn_ui(async move {
            this.fling(velocity).await;
        })
    }

    pub fn on_drag_start(&self, time_ms: i64) {
        if !self.is_enabled() {
            return;
        }
        let mut tracking = self.tracking.borrow_mut();
        tracking.tracker.reset();
        tracking.tracker.add_data_point(time_ms, 0.0);
        tracking.down = true;
        tracking.slop_passed = false;
        tracking.accumulated = 0.0;
    }

    /// Feeds one pointer move. Nothing is dragged until the pointer has
    /// travelled past [`DRAG_THRESHOLD`].
    pub fn on_drag_delta(&self, time_ms: i64, delta: f32) {
        if !self.is_enabled() {
            return;
        }
        let apply = {
            let mut tracking = self.tracking.borrow_mut();
            if !tracking.down {
                return;
            }
            tracking.tracker.add_data_point(time_ms, delta);
            if !tracking.slop_passed {
                tracking.accumulated += delta.abs();
                if tracking.accumulated > DRAG_THRESHOLD {
                    log::trace!("drag slop passed after {}px", tracking.accumulated);
                    tracking.slop_passed = true;
                }
            }
            tracking.slop_passed
        };
        // Borrow released: connections may call back into this adapter.
        if apply {
            self.drag(delta);
        }
    }

    /// Ends the drag and returns its release velocity, capped at
    /// [`MAX_FLING_VELOCITY`]. `None` when no drag got past the slop; the
    /// caller passes the velocity to [`fling`](Self::fling).
    pub fn on_drag_stop(&self) -> Option<f32> {
        let mut tracking = self.tracking.borrow_mut();
        let dragged = tracking.down && tracking.slop_passed;
        let velocity = tracking
            .tracker
            .calculate_velocity_with_max(MAX_FLING_VELOCITY);
        tracking.down = false;
        tracking.slop_passed = false;
        tracking.accumulated = 0.0;
        tracking.tracker.reset();
        dragged.then_some(velocity)
    }

    pub fn on_drag_cancel(&self) {
        let mut tracking = self.tracking.borrow_mut();
        tracking.down = false;
        tracking.slop_passed = false;
        tracking.accumulated = 0.0;
        tracking.tracker.reset();
    }
}

impl fmt::Debug for CollapsableDraggable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollapsableDraggable")
            .field("enabled", &self.is_enabled())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/draggable_tests.rs"]
mod tests;
