use std::rc::Rc;

use collapsable_core::FrameClock;
use collapsable_foundation::{
    FlingFuture, NestedScrollConnection, NestedScrollSource, Offset, Velocity,
};

use crate::behavior::{settle, CollapsableBehavior};
use crate::config::CollapsableBehaviorConfig;
use crate::draggable::CollapsableDraggable;
use crate::state::CollapsableState;

/// Collapses a surface sitting above scrolling content.
///
/// Install it as the nested scroll parent of the content. Scrolling the
/// content toward its end collapses the surface before the content moves.
/// Scrolling back expands it once the content reaches its start, or right
/// away with [`enter_always`](CollapsableBehaviorConfig::enter_always).
/// Releasing a fling settles the surface on one of its bounds.
#[derive(Clone, Debug)]
pub struct CollapsableTopBehavior {
    state: CollapsableState,
    config: CollapsableBehaviorConfig,
    clock: FrameClock,
}

impl CollapsableTopBehavior {
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

    /// Adapter for dragging the surface itself.
    pub fn draggable(&self) -> Rc<CollapsableDraggable> {
        Rc::new(CollapsableDraggable::new(Rc::new(self.clone())))
    }
}

impl CollapsableBehavior for CollapsableTopBehavior {
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

impl NestedScrollConnection for CollapsableTopBehavior {
    fn on_pre_scroll(&self, available: Offset, _source: NestedScrollSource) -> Offset {
        // Expanding waits for the content to reach its start.
        if !self.config.enter_always && available.y > 0.0 {
            return Offset::ZERO;
        }
        let applied = self.state.drag(available.y);
        if applied != 0.0 {
            Offset::vertical(applied)
        } else {
            Offset::ZERO
        }
    }

    fn on_post_scroll(
        &self,
        consumed: Offset,
        available: Offset,
        _source: NestedScrollSource,
    ) -> Offset {
        if self.config.enter_always {
            self.state.drag(consumed.y);
            return Offset::ZERO;
        }
        if available.y < 0.0 || consumed.y < 0.0 {
            return Offset::vertical(self.state.drag(consumed.y));
        }
        if available.y > 0.0 {
            return Offset::vertical(self.state.drag(available.y));
        }
        Offset::ZERO
    }

    fn on_post_fling(&self, _consumed: Velocity, available: Velocity) -> FlingFuture<'_> {
        let settle = settle(&self.state, &self.config, &self.clock, available.y);
        Box::pin(async move { Velocity::vertical(settle.await) })
    }
}

#[cfg(test)]
#[path = "tests/top_behavior_tests.rs"]
mod tests;
