//! Collapsing app bars and accordions.
//!
//! A [`CollapsableState`] tracks how far a surface has collapsed. Behaviors
//! feed it from nested scrolling ([`CollapsableTopBehavior`],
//! [`CollapsableBottomBehavior`]) or direct drags ([`CollapsableDraggable`])
//! and settle it with fling and snap animations once the gesture ends.
//! [`measure_collapsable_column`] lays out a column of children against the
//! state and keeps its offset limit in sync with the measured sizes.
//!
//! ```
//! use collapsable::prelude::*;
//! use collapsable_core::{DefaultScheduler, Runtime};
//! use std::sync::Arc;
//!
//! let runtime = Runtime::new(Arc::new(DefaultScheduler));
//! let state = CollapsableState::with_offset_limit(-100.0);
//! let behavior = CollapsableTopBehavior::new(state.clone(), runtime.frame_clock());
//!
//! let consumed = behavior.on_pre_scroll(Offset::vertical(-30.0), NestedScrollSource::Drag);
//! assert_eq!(consumed, Offset::vertical(-30.0));
//! assert_eq!(state.offset(), -30.0);
//! ```

mod behavior;
mod bottom_behavior;
mod column;
mod config;
mod draggable;
mod saver;
mod state;
mod top_behavior;

pub use behavior::{settle, CollapsableBehavior};
pub use bottom_behavior::CollapsableBottomBehavior;
pub use column::{
    measure_collapsable_column, ChildPlacement, ClipRect, CollapseChild, ColumnChild,
    ColumnLayout, MAX_ELEVATION_MARGIN,
};
pub use config::CollapsableBehaviorConfig;
pub use draggable::CollapsableDraggable;
pub use saver::{RestoreError, SavedCollapsableState};
pub use state::CollapsableState;
pub use top_behavior::CollapsableTopBehavior;

pub use collapsable_animation::{AnimationEndReason, AnimationResult, AnimationType};
pub use collapsable_foundation::{
    NestedScrollConnection, NestedScrollDispatcher, NestedScrollSource, Offset, Velocity,
};

pub mod prelude {
    pub use crate::behavior::CollapsableBehavior;
    pub use crate::bottom_behavior::CollapsableBottomBehavior;
    pub use crate::column::{measure_collapsable_column, CollapseChild, ColumnChild};
    pub use crate::config::CollapsableBehaviorConfig;
    pub use crate::draggable::CollapsableDraggable;
    pub use crate::state::CollapsableState;
    pub use crate::top_behavior::CollapsableTopBehavior;
    pub use collapsable_animation::prelude::*;
    pub use collapsable_foundation::prelude::*;
}
