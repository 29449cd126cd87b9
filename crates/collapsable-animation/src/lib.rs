//! Animation system for collapsable surfaces.
//!
//! Tweens, springs and decays that run against a [`collapsable_core::FrameClock`]
//! and stop cooperatively when their [`collapsable_core::MutatorToken`] is revoked.

pub mod animation;
pub mod animation_state;
pub mod decay_spec;
mod spring;

pub use animation::*;
pub use animation_state::{AnimationEndReason, AnimationResult, AnimationScope, AnimationState};
pub use decay_spec::{
    ExponentialDecaySpec, FlingCalculator, FlingInfo, FloatDecayAnimationSpec,
    SplineBasedDecaySpec,
};

pub mod prelude {
    pub use crate::animation::{
        spring, tween, AnimationSpec, AnimationType, Easing, SpringSpec,
    };
    pub use crate::animation_state::{AnimationEndReason, AnimationResult, AnimationState};
    pub use crate::decay_spec::{
        ExponentialDecaySpec, FloatDecayAnimationSpec, SplineBasedDecaySpec,
    };
}
