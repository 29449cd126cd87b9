use std::fmt;
use std::rc::Rc;

use collapsable_animation::{
    AnimationType, FloatDecayAnimationSpec, SplineBasedDecaySpec, SpringSpec,
};

/// How a behavior settles after a gesture and how it intercepts scrolls.
#[derive(Clone)]
pub struct CollapsableBehaviorConfig {
    /// Animation to the nearer bound once motion stops. `None` leaves the
    /// surface partially collapsed.
    pub snap: Option<AnimationType>,
    /// Momentum after a fling. `None` ignores fling velocity.
    pub fling: Option<Rc<dyn FloatDecayAnimationSpec>>,
    /// Expand as soon as content scrolls back, rather than once it reaches
    /// its top.
    pub enter_always: bool,
}

impl CollapsableBehaviorConfig {
    pub fn with_snap(mut self, snap: impl Into<AnimationType>) -> Self {
        self.snap = Some(snap.into());
        self
    }

    pub fn without_snap(mut self) -> Self {
        self.snap = None;
        self
    }

    pub fn with_fling(mut self, fling: impl FloatDecayAnimationSpec + 'static) -> Self {
        self.fling = Some(Rc::new(fling));
        self
    }

    pub fn without_fling(mut self) -> Self {
        self.fling = None;
        self
    }

    pub fn with_enter_always(mut self, enter_always: bool) -> Self {
        self.enter_always = enter_always;
        self
    }
}

impl Default for CollapsableBehaviorConfig {
    fn default() -> Self {
        Self {
            snap: Some(
                SpringSpec::new(
                    SpringSpec::DAMPING_RATIO_NO_BOUNCY,
                    SpringSpec::STIFFNESS_MEDIUM_LOW,
                )
                .into(),
            ),
            fling: Some(Rc::new(SplineBasedDecaySpec::default())),
            enter_always: false,
        }
    }
}

impl fmt::Debug for CollapsableBehaviorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollapsableBehaviorConfig")
            .field("snap", &self.snap)
            .field("fling", &self.fling.is_some())
            .field("enter_always", &self.enter_always)
            .finish()
    }
}
