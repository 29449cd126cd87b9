//! Frame-driven float animation state.
//!
//! [`AnimationState`] holds the current value and velocity of one animated
//! float. Each `animate_*` call awaits frames from a [`FrameClock`], samples
//! its animation at the frame's play time and hands the result to a per-frame
//! block. The run stops when the animation finishes, when the block cancels
//! it, or when its [`MutatorToken`] is revoked.

use crate::animation::{AnimationType, TargetBasedAnimation};
use crate::decay_spec::FloatDecayAnimationSpec;
use collapsable_core::{FrameClock, MutatorToken};

/// Default visibility threshold for untyped float animations.
const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEndReason {
    /// The animation reached its end on its own.
    Finished,
    /// The per-frame block called [`AnimationScope::cancel_animation`].
    Cancelled,
    /// Another mutator took over before the animation finished.
    Interrupted,
}

/// Outcome of one animation run, with the last value and velocity applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationResult {
    pub end_reason: AnimationEndReason,
    pub value: f32,
    pub velocity: f32,
}

impl AnimationResult {
    pub fn is_finished(&self) -> bool {
        self.end_reason == AnimationEndReason::Finished
    }
}

/// What a per-frame block sees.
#[derive(Debug)]
pub struct AnimationScope {
    value: f32,
    velocity: f32,
    play_time_nanos: i64,
    target_value: f32,
    cancelled: bool,
}

impl AnimationScope {
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Velocity in units per second.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn play_time_nanos(&self) -> i64 {
        self.play_time_nanos
    }

    /// Target of a value animation, or the resting point of a decay.
    pub fn target_value(&self) -> f32 {
        self.target_value
    }

    /// Stops the animation after this frame.
    pub fn cancel_animation(&mut self) {
        self.cancelled = true;
    }
}

#[derive(Debug, Clone)]
pub struct AnimationState {
    value: f32,
    velocity: f32,
    visibility_threshold: f32,
    is_running: bool,
    last_frame_time_nanos: Option<u64>,
}

impl AnimationState {
    pub fn new(initial_value: f32) -> Self {
        Self {
            value: initial_value,
            velocity: 0.0,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            is_running: false,
            last_frame_time_nanos: None,
        }
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    /// Distance from the target at which springs may stop.
    pub fn with_visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold.abs();
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn visibility_threshold(&self) -> f32 {
        self.visibility_threshold
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn last_frame_time_nanos(&self) -> Option<u64> {
        self.last_frame_time_nanos
    }

    /// Animates towards `target`, starting from the current value and velocity.
    pub async fn animate_to(
        &mut self,
        clock: &FrameClock,
        token: &MutatorToken,
        target: f32,
        spec: AnimationType,
        block: impl FnMut(&mut AnimationScope),
    ) -> AnimationResult {
        let animation = TargetBasedAnimation::new(
            spec,
            self.value,
            target,
            self.velocity,
            self.visibility_threshold,
        );
        self.run(clock, token, target, block, |play_time| {
            (
                animation.value_at(play_time),
                animation.velocity_at(play_time),
                animation.is_finished_at(play_time),
            )
        })
        .await
    }

    /// Lets the current velocity decay according to `spec`.
    pub async fn animate_decay(
        &mut self,
        clock: &FrameClock,
        token: &MutatorToken,
        spec: &dyn FloatDecayAnimationSpec,
        block: impl FnMut(&mut AnimationScope),
    ) -> AnimationResult {
        let initial_value = self.value;
        let initial_velocity = self.velocity;
        let duration = spec.duration_nanos(initial_value, initial_velocity);
        let target = spec.target_value(initial_value, initial_velocity);
        self.run(clock, token, target, block, |play_time| {
            if play_time >= duration {
                (target, 0.0, true)
            } else {
                (
                    spec.value_from_nanos(play_time, initial_value, initial_velocity),
                    spec.velocity_from_nanos(play_time, initial_value, initial_velocity),
                    false,
                )
            }
        })
        .await
    }

    async fn run(
        &mut self,
        clock: &FrameClock,
        token: &MutatorToken,
        target: f32,
        mut block: impl FnMut(&mut AnimationScope),
        sample: impl Fn(i64) -> (f32, f32, bool),
    ) -> AnimationResult {
        if !token.is_active() {
            return self.end(AnimationEndReason::Interrupted);
        }
        self.is_running = true;
        let mut start_time = None;

        loop {
            let frame_time = clock.next_frame().await;
            if !token.is_active() {
                return self.end(AnimationEndReason::Interrupted);
            }
            self.last_frame_time_nanos = Some(frame_time);
            let start = *start_time.get_or_insert(frame_time);
            let play_time_nanos = frame_time.saturating_sub(start) as i64;

            let (value, velocity, finished) = sample(play_time_nanos);
            self.value = value;
            self.velocity = velocity;

            let mut scope = AnimationScope {
                value,
                velocity,
                play_time_nanos,
                target_value: target,
                cancelled: false,
            };
            block(&mut scope);

            if scope.cancelled {
                return self.end(AnimationEndReason::Cancelled);
            }
            if finished {
                return self.end(AnimationEndReason::Finished);
            }
        }
    }

    fn end(&mut self, end_reason: AnimationEndReason) -> AnimationResult {
        self.is_running = false;
        log::trace!(
            "animation ended: {:?} at {} ({}/s)",
            end_reason,
            self.value,
            self.velocity
        );
        AnimationResult {
            end_reason,
            value: self.value,
            velocity: self.velocity,
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_state_tests.rs"]
mod tests;
