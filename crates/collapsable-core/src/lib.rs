//! Core runtime for collapsable surfaces.
//!
//! Provides a single-threaded UI runtime that owns frame callbacks and spawned
//! futures, a [`FrameClock`] that animations await, an observable float cell,
//! and the [`MutatorSlot`] that keeps at most one animation writing a value.

mod frame_clock;
mod mutator;
mod platform;
mod runtime;
mod state;

pub use frame_clock::{FrameClock, NextFrame};
pub use mutator::{MutatorSlot, MutatorToken};
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle, TaskHandle};
pub use state::{MutableFloatState, Subscription};

pub mod prelude {
    pub use crate::frame_clock::{FrameClock, NextFrame};
    pub use crate::mutator::{MutatorSlot, MutatorToken};
    pub use crate::runtime::{Runtime, RuntimeHandle, TaskHandle};
    pub use crate::state::{MutableFloatState, Subscription};
}
