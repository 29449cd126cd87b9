//! Testing utilities for collapsable surfaces.

pub mod assertions;
pub mod test_runtime;

pub use assertions::assert_approx_eq;
pub use test_runtime::{TestRuntime, FRAME_DURATION_NANOS};

pub mod prelude {
    pub use crate::assertions::assert_approx_eq;
    pub use crate::test_runtime::TestRuntime;
}
