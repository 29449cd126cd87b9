//! Collapsing state shared by behaviors, layout and rendering.

use std::fmt;
use std::future::Future;
use std::rc::Rc;

use collapsable_animation::{
    AnimationEndReason, AnimationResult, AnimationState, AnimationType, SpringSpec,
};
use collapsable_core::{FrameClock, MutableFloatState, MutatorSlot, MutatorToken, Subscription};

/// Offsets within this distance of the target count as arrived.
pub(crate) const OFFSET_VISIBILITY_THRESHOLD: f32 = 0.5;

struct StateInner {
    offset_limit: MutableFloatState,
    offset: MutableFloatState,
    // One animation writes the offset at a time.
    mutator: MutatorSlot,
}

/// How far a collapsable surface has collapsed.
///
/// `offset` is the adjustment applied to the expanded height. It always lies
/// in `[offset_limit, 0]`: `0` is fully expanded and `offset_limit`, a
/// non-positive number, is fully collapsed. The layout pass writes
/// `offset_limit` after measuring; behaviors and animations write `offset`.
///
/// Clones are handles to the same state.
#[derive(Clone)]
pub struct CollapsableState {
    inner: Rc<StateInner>,
}

impl CollapsableState {
    /// Fully expanded, with nothing to collapse yet.
    pub fn new() -> Self {
        Self::with_values(0.0, 0.0)
    }

    /// For surfaces whose collapse distance is known before layout.
    pub fn with_offset_limit(offset_limit: f32) -> Self {
        Self::with_values(offset_limit, 0.0)
    }

    /// Stores both values verbatim, then clamps the offset.
    pub fn with_values(offset_limit: f32, offset: f32) -> Self {
        let offset_limit = if offset_limit.is_nan() {
            log::warn!("ignoring NaN collapsable offset limit");
            0.0
        } else {
            offset_limit
        };
        warn_on_positive_limit(offset_limit);
        let state = Self {
            inner: Rc::new(StateInner {
                offset_limit: MutableFloatState::new(offset_limit),
                offset: MutableFloatState::new(0.0),
                mutator: MutatorSlot::new(),
            }),
        };
        state.set_offset(offset);
        state
    }

    pub fn offset(&self) -> f32 {
        self.inner.offset.get()
    }

    pub fn offset_limit(&self) -> f32 {
        self.inner.offset_limit.get()
    }

    /// `0` when expanded, `1` when collapsed.
    pub fn collapsed_fraction(&self) -> f32 {
        let limit = self.offset_limit();
        if limit != 0.0 {
            self.offset() / limit
        } else {
            0.0
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.offset() == 0.0
    }

    /// False whenever there is nothing to collapse.
    pub fn is_collapsed(&self) -> bool {
        let limit = self.offset_limit();
        limit < 0.0 && self.offset() == limit
    }

    /// Stores `offset` clamped into `[offset_limit, 0]`.
    pub fn set_offset(&self, offset: f32) {
        if offset.is_nan() {
            log::warn!("ignoring NaN collapsable offset");
            return;
        }
        self.inner
            .offset
            .set(clamp_offset(offset, self.offset_limit()));
    }

    /// Stores a new limit and re-clamps the offset into it.
    ///
    /// The offset is written first, so listeners of either value never see
    /// an offset outside the limit they can read.
    pub fn set_offset_limit(&self, offset_limit: f32) {
        if offset_limit.is_nan() {
            log::warn!("ignoring NaN collapsable offset limit");
            return;
        }
        if offset_limit == self.offset_limit() {
            return;
        }
        warn_on_positive_limit(offset_limit);
        log::debug!(
            "collapsable offset limit {} -> {}",
            self.offset_limit(),
            offset_limit
        );
        self.inner
            .offset
            .set(clamp_offset(self.offset(), offset_limit));
        self.inner.offset_limit.set(offset_limit);
    }

    /// Moves the offset by `delta`; returns how far it actually moved.
    pub fn drag(&self, delta: f32) -> f32 {
        let before = self.offset();
        self.set_offset(before + delta);
        self.offset() - before
    }

    pub fn expand(&self) {
        self.set_offset(0.0);
    }

    pub fn collapse(&self) {
        self.set_offset(self.offset_limit());
    }

    /// Expands when mostly collapsed, collapses otherwise.
    pub fn toggle(&self) {
        if self.toggle_target() == 0.0 {
            self.expand();
        } else {
            self.collapse();
        }
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe_offset(&self, listener: impl Fn(f32) + 'static) -> Subscription {
        self.inner.offset.subscribe(listener)
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe_offset_limit(&self, listener: impl Fn(f32) + 'static) -> Subscription {
        self.inner.offset_limit.subscribe(listener)
    }

    /// True while an animation owns the offset.
    pub fn is_animating(&self) -> bool {
        self.inner.mutator.is_mutating()
    }

    /// Stops the running animation, leaving the offset where it is.
    pub fn cancel_animation(&self) {
        self.inner.mutator.cancel();
    }

    /// Animates to fully expanded.
    ///
    /// The running animation, if any, is interrupted as soon as this is
    /// called, before the returned future is polled.
    pub fn animate_expand(
        &self,
        clock: &FrameClock,
        spec: AnimationType,
    ) -> impl Future<Output = AnimationResult> + 'static {
        self.animate_offset_to(clock, 0.0, spec)
    }

    pub fn animate_collapse(
        &self,
        clock: &FrameClock,
        spec: AnimationType,
    ) -> impl Future<Output = AnimationResult> + 'static {
        self.animate_offset_to(clock, self.offset_limit(), spec)
    }

    pub fn animate_toggle(
        &self,
        clock: &FrameClock,
        spec: AnimationType,
    ) -> impl Future<Output = AnimationResult> + 'static {
        self.animate_offset_to(clock, self.toggle_target(), spec)
    }

    /// [`animate_expand`](Self::animate_expand) with a non-bouncy spring.
    pub fn animate_expand_default(
        &self,
        clock: &FrameClock,
    ) -> impl Future<Output = AnimationResult> + 'static {
        self.animate_expand(clock, SpringSpec::default().into())
    }

    pub fn animate_collapse_default(
        &self,
        clock: &FrameClock,
    ) -> impl Future<Output = AnimationResult> + 'static {
        self.animate_collapse(clock, SpringSpec::default().into())
    }

    /// Claims the offset for a new animation, interrupting the previous one.
    ///
    /// The claim ends when the guard drops, including when the future that
    /// owns it is cancelled before finishing.
    pub(crate) fn begin_mutation(&self) -> MutationGuard {
        MutationGuard {
            token: self.inner.mutator.acquire(),
            state: self.clone(),
        }
    }

    fn toggle_target(&self) -> f32 {
        if self.collapsed_fraction() < 0.5 {
            self.offset_limit()
        } else {
            0.0
        }
    }

    fn animate_offset_to(
        &self,
        clock: &FrameClock,
        target: f32,
        spec: AnimationType,
    ) -> impl Future<Output = AnimationResult> + 'static {
        let guard = self.begin_mutation();
        let state = self.clone();
        let clock = clock.clone();
        async move {
            let start = state.offset();
            if start == target {
                return AnimationResult {
                    end_reason: AnimationEndReason::Finished,
                    value: start,
                    velocity: 0.0,
                };
            }
            log::debug!("animating collapsable offset {start} -> {target}");
            let mut animation =
                AnimationState::new(start).with_visibility_threshold(OFFSET_VISIBILITY_THRESHOLD);
            let result = animation
                .animate_to(&clock, guard.token(), target, spec, |scope| {
                    state.set_offset(scope.value())
                })
                .await;
            drop(guard);
            result
        }
    }
}

/// Ownership of the offset held by one running animation.
pub(crate) struct MutationGuard {
    token: MutatorToken,
    state: CollapsableState,
}

impl MutationGuard {
    pub(crate) fn token(&self) -> &MutatorToken {
        &self.token
    }
}

impl Drop for MutationGuard {
    fn drop(&mut self) {
        self.state.inner.mutator.release(&self.token);
    }
}

impl Default for CollapsableState {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for CollapsableState {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for CollapsableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollapsableState")
            .field("offset", &self.offset())
            .field("offset_limit", &self.offset_limit())
            .field("collapsed_fraction", &self.collapsed_fraction())
            .finish()
    }
}

/// `offset` clamped into `[limit, 0]`. A positive limit leaves nothing to
/// collapse, so every offset becomes `0`.
fn clamp_offset(offset: f32, limit: f32) -> f32 {
    let clamped = offset.max(limit).min(0.0);
    debug_assert!(clamped <= 0.0 && (limit > 0.0 || clamped >= limit));
    clamped
}

fn warn_on_positive_limit(offset_limit: f32) {
    if offset_limit > 0.0 {
        log::warn!("collapsable offset limit {offset_limit} is positive; nothing will collapse");
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
