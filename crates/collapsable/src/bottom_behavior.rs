use std::rc::Rc;

use collapsable_core::FrameClock;
use collapsable_foundation::{
    FlingFuture, NestedScrollConnection, NestedScrollSource, Offset, Velocity,
};

use crate::behavior::{settle, CollapsableBehavior};
use crate::config::CollapsableBehaviorConfig;
use crate::draggable::CollapsableDraggable;
use crate::state::CollapsableState;

/// Collapses a surface sitting below scrolling content.
///
/// The surface follows the content: whatever the content scrolled toward its
/// end collapses the bar, whatever it scrolled back expands it. The content
/// always scrolls first, so nothing is consumed on its behalf.
/// `enter_always` has no effect here.
#[derive(Clone, Debug)]
pub struct CollapsableBottomBehavior {
    state: CollapsableState,
    config: CollapsableBehaviorConfig,
    clock: FrameClock,
}

impl CollapsableBottomBehavior {
    pub fn new(state: CollapsableState, clock: FrameClock) -> Self {
        Self {
            state,
            config: CollapsableBehaviorConfig::default(),
            clock,
        }
    }

    pub fn with_config(mut self, config: CollapsableBehaviorConfig) -> Self {
        self.config = config;
        self
    }

    /// Adapter for dragging the bar itself. Dragging down collapses it.
    pub fn draggable(&self) -> Rc<CollapsableDraggable> {
        Rc::new(CollapsableDraggable::new(Rc::new(DirectDrag {
            behavior: self.clone(),
        })))
    }
}

impl CollapsableBehavior for CollapsableBottomBehavior {
    fn state(&self) -> &CollapsableState {
        &self.state
    }

    fn config(&self) -> &CollapsableBehaviorConfig {
        &self.config
    }

    fn frame_clock(&self) -> &FrameClock {
        &self.clock
    }
}

impl NestedScrollConnection for CollapsableBottomBehavior {
    fn on_post_scroll(
        &self,
        consumed: Offset,
        _available: Offset,
        _source: NestedScrollSource,
    ) -> Offset {
        self.state.drag(consumed.y);
        Offset::ZERO
    }

    fn on_post_fling(&self, _consumed: Velocity, available: Velocity) -> FlingFuture<'_> {
        let settle = settle(&self.state, &self.config, &self.clock, available.y);
        Box::pin(async move { Velocity::vertical(settle.await) })
    }
}

/// The bar dragged directly: the pointer moves the bar's top edge, so the
/// offset moves opposite to the drag.
struct DirectDrag {
    behavior: CollapsableBottomBehavior,
}

impl NestedScrollConnection for DirectDrag {
    fn on_pre_scroll(&self, available: Offset, _source: NestedScrollSource) -> Offset {
        let applied = self.behavior.state.drag(-available.y);
        Offset::vertical(-applied)
    }

    fn on_post_fling(&self, _consumed: Velocity, available: Velocity) -> FlingFuture<'_> {
        let settle = self.behavior.settle(-available.y);
        Box::pin(async move { Velocity::vertical(-settle.await) })
    }
}

#[cfg(test)]
#[path = "tests/bottom_behavior_tests.rs"]
mod tests;
