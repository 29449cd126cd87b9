//! Settling shared by the top and bottom behaviors.

use std::future::Future;
use std::rc::Rc;

use collapsable_animation::{AnimationEndReason, AnimationState, AnimationType};
use collapsable_core::{FrameClock, TaskHandle};

use crate::config::CollapsableBehaviorConfig;
use crate::state::{CollapsableState, OFFSET_VISIBILITY_THRESHOLD};

/// Fling speeds at or below this are treated as a plain release.
const MIN_FLING_VELOCITY: f32 = 1.0;

/// Decay steps that leave more than this unconsumed hit a bound.
const SATURATION_TOLERANCE: f32 = 0.5;

/// A scroll behavior driving one [`CollapsableState`].
pub trait CollapsableBehavior {
    fn state(&self) -> &CollapsableState;

    fn config(&self) -> &CollapsableBehaviorConfig;

    fn frame_clock(&self) -> &FrameClock;

    /// Settles the offset after a gesture released with `velocity`.
    ///
    /// Resolves to the velocity consumed. See [`settle`].
    fn settle(&self, velocity: f32) -> impl Future<Output = f32> + 'static {
        settle(self.state(), self.config(), self.frame_clock(), velocity)
    }

    /// Runs [`settle`](Self::settle) on the clock's runtime.
    fn launch_settle(&self, velocity: f32) -> Option<TaskHandle> {
        let settle = self.settle(velocity);
        self.frame_clock().runtime_handle().spawn_ui(async move {
            settle.await;
        })
    }

    fn launch_animate_expand(&self, spec: AnimationType) -> Option<TaskHandle> {
        let animation = self.state().animate_expand(self.frame_clock(), spec);
        self.frame_clock().runtime_handle().spawn_ui(async move {
            animation.await;
        })
    }

    fn launch_animate_collapse(&self, spec: AnimationType) -> Option<TaskHandle> {
        let animation = self.state().animate_collapse(self.frame_clock(), spec);
        self.frame_clock().runtime_handle().spawn_ui(async move {
            animation.await;
        })
    }

    fn launch_animate_toggle(&self, spec: AnimationType) -> Option<TaskHandle> {
        let animation = self.state().animate_toggle(self.frame_clock(), spec);
        self.frame_clock().runtime_handle().spawn_ui(async move {
            animation.await;
        })
    }
}

/// Resolves leftover gesture velocity into a resting offset.
///
/// Nothing happens when the offset already sits on a bound. Otherwise the
/// previous animation of `state` is interrupted immediately and the returned
/// future:
///
/// 1. lets a velocity faster than 1 unit/s decay with the configured fling,
///    stopping as soon as a step runs into a bound;
/// 2. snaps to whichever bound is nearer, if the offset is still strictly
///    between them and a snap animation is configured.
///
/// The result is the velocity consumed by the decay. A snap consumes
/// whatever the decay left.
pub fn settle(
    state: &CollapsableState,
    config: &CollapsableBehaviorConfig,
    clock: &FrameClock,
    velocity: f32,
) -> impl Future<Output = f32> + 'static {
    let offset = state.offset();
    let guard = if offset == 0.0 || offset == state.offset_limit() {
        None
    } else {
        Some(state.begin_mutation())
    };
    let state = state.clone();
    let fling = config.fling.clone();
    let snap = config.snap;
    let clock = clock.clone();

    async move {
        let Some(guard) = guard else {
            return 0.0;
        };
        log::debug!(
            "settling collapsable offset {} with velocity {}",
            state.offset(),
            velocity
        );
        let mut remaining = velocity;

        if let Some(fling) = fling.filter(|_| velocity.abs() > MIN_FLING_VELOCITY) {
            let mut last_value = 0.0;
            let mut animation = AnimationState::new(0.0).with_velocity(velocity);
            let result = animation
                .animate_decay(&clock, guard.token(), Rc::as_ref(&fling), |scope| {
                    let delta = scope.value() - last_value;
                    let consumed = state.drag(delta);
                    last_value = scope.value();
                    remaining = scope.velocity();
                    if (delta - consumed).abs() > SATURATION_TOLERANCE {
                        scope.cancel_animation();
                    }
                })
                .await;
            if result.end_reason == AnimationEndReason::Interrupted {
                log::debug!("collapsable fling interrupted");
                return velocity - remaining;
            }
        }

        if let Some(snap) = snap {
            let offset = state.offset();
            let limit = state.offset_limit();
            if offset < 0.0 && offset > limit {
                let target = if state.collapsed_fraction() < 0.5 {
                    0.0
                } else {
                    limit
                };
                let mut animation = AnimationState::new(offset)
                    .with_visibility_threshold(OFFSET_VISIBILITY_THRESHOLD);
                animation
                    .animate_to(&clock, guard.token(), target, snap, |scope| {
                        state.set_offset(scope.value())
                    })
                    .await;
            }
        }

        drop(guard);
        velocity - remaining
    }
}

#[cfg(test)]
#[path = "tests/settle_tests.rs"]
mod tests;
