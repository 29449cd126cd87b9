//! Foundation pieces shared by collapsable behaviors: 2D offsets and
//! velocities, the nested scroll protocol, and pointer velocity tracking.

pub mod gesture_constants;
pub mod geometry;
pub mod nested_scroll;
pub mod velocity_tracker;

pub use gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
pub use geometry::{Offset, Velocity};
pub use nested_scroll::{
    FlingFuture, NestedScrollConnection, NestedScrollDispatcher, NestedScrollSource,
};
pub use velocity_tracker::VelocityTracker1D;

pub mod prelude {
    pub use crate::geometry::{Offset, Velocity};
    pub use crate::nested_scroll::{
        NestedScrollConnection, NestedScrollDispatcher, NestedScrollSource,
    };
}
