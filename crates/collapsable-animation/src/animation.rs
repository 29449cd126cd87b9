//! Animation specifications: easing curves, tweens and springs.
//!
//! A spec only describes motion. [`TargetBasedAnimation`] binds a spec to a
//! start value, a target and an initial velocity so it can be sampled at any
//! play time; [`crate::AnimationState`] samples it once per frame.

use crate::spring::SpringSimulation;

/// Easing curves, including the standard Material motion curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material standard curve.
    FastOutSlowInEasing,
    LinearOutSlowInEasing,
    FastOutLinearInEasing,
    /// Custom cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1).
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    /// Apply the easing function to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        match *self {
            Easing::LinearEasing => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowInEasing => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearInEasing => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
            Easing::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, fraction),
        }
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    // Polynomial coefficients of each axis: ((a * t + b) * t + c) * t.
    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let curve = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let error = curve(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            solved = true;
            break;
        }
        let derivative = slope(ax, bx, cx, t);
        if derivative.abs() < 1e-6 {
            break;
        }
        t = (t - error / derivative).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut low, mut high) = (0.0f32, 1.0f32);
        t = fraction;
        for _ in 0..20 {
            let error = curve(ax, bx, cx, t) - fraction;
            if error.abs() < 1e-6 {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = 0.5 * (low + high);
        }
    }

    curve(ay, by, cy, t)
}

/// Duration based animation: duration, easing and start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    fn total_nanos(&self) -> i64 {
        ((self.duration_millis + self.delay_millis) * 1_000_000) as i64
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Spring physics configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 = bouncy, > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Higher values settle faster.
    pub stiffness: f32,
    /// Distance from the target under which the spring may stop. When unset
    /// the animation's own visibility threshold is used.
    pub visibility_threshold: Option<f32>,
}

impl SpringSpec {
    pub const STIFFNESS_HIGH: f32 = 10_000.0;
    pub const STIFFNESS_MEDIUM: f32 = 1_500.0;
    pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;
    pub const STIFFNESS_LOW: f32 = 200.0;
    pub const STIFFNESS_VERY_LOW: f32 = 50.0;

    pub const DAMPING_RATIO_HIGH_BOUNCY: f32 = 0.2;
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;
    pub const DAMPING_RATIO_LOW_BOUNCY: f32 = 0.75;
    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;

    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            visibility_threshold: None,
        }
    }

    pub fn with_visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = Some(threshold);
        self
    }

    pub fn default_spring() -> Self {
        Self::new(Self::DAMPING_RATIO_NO_BOUNCY, Self::STIFFNESS_MEDIUM)
    }

    pub fn bouncy() -> Self {
        Self::new(Self::DAMPING_RATIO_MEDIUM_BOUNCY, Self::STIFFNESS_MEDIUM)
    }

    pub fn stiff() -> Self {
        Self::new(Self::DAMPING_RATIO_NO_BOUNCY, Self::STIFFNESS_HIGH)
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Finite animation specification used for value-targeted animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Spring(SpringSpec::default())
    }
}

impl From<AnimationSpec> for AnimationType {
    fn from(spec: AnimationSpec) -> Self {
        AnimationType::Tween(spec)
    }
}

impl From<SpringSpec> for AnimationType {
    fn from(spec: SpringSpec) -> Self {
        AnimationType::Spring(spec)
    }
}

/// Spring with the given damping ratio and stiffness.
pub fn spring(damping_ratio: f32, stiffness: f32) -> AnimationType {
    AnimationType::Spring(SpringSpec::new(damping_ratio, stiffness))
}

pub fn tween(duration_millis: u64, easing: Easing) -> AnimationType {
    AnimationType::Tween(AnimationSpec::tween(duration_millis, easing))
}

/// A spec bound to its start, target and initial velocity.
#[derive(Debug, Clone, Copy)]
pub struct TargetBasedAnimation {
    kind: TargetKind,
    initial_value: f32,
    target_value: f32,
}

#[derive(Debug, Clone, Copy)]
enum TargetKind {
    Tween(AnimationSpec),
    Spring(SpringSimulation),
}

impl TargetBasedAnimation {
    pub fn new(
        spec: AnimationType,
        initial_value: f32,
        target_value: f32,
        initial_velocity: f32,
        visibility_threshold: f32,
    ) -> Self {
        let kind = match spec {
            AnimationType::Tween(tween) => TargetKind::Tween(tween),
            AnimationType::Spring(spring) => TargetKind::Spring(SpringSimulation::new(
                spring,
                initial_value - target_value,
                initial_velocity,
                spring.visibility_threshold.unwrap_or(visibility_threshold),
            )),
        };
        Self {
            kind,
            initial_value,
            target_value,
        }
    }

    pub fn target_value(&self) -> f32 {
        self.target_value
    }

    pub fn value_at(&self, play_time_nanos: i64) -> f32 {
        if self.is_finished_at(play_time_nanos) {
            return self.target_value;
        }
        match self.kind {
            TargetKind::Tween(spec) => {
                let fraction = tween_fraction(&spec, play_time_nanos);
                self.initial_value + (self.target_value - self.initial_value) * fraction
            }
            TargetKind::Spring(simulation) => {
                self.target_value + simulation.displacement_at(play_time_nanos)
            }
        }
    }

    /// Velocity in units per second.
    pub fn velocity_at(&self, play_time_nanos: i64) -> f32 {
        if self.is_finished_at(play_time_nanos) {
            return 0.0;
        }
        match self.kind {
            TargetKind::Tween(_) => {
                let earlier = (play_time_nanos - 1_000_000).max(0);
                let elapsed = (play_time_nanos - earlier) as f32 / 1_000_000_000.0;
                if elapsed <= 0.0 {
                    return 0.0;
                }
                (self.value_at(play_time_nanos) - self.value_at(earlier)) / elapsed
            }
            TargetKind::Spring(simulation) => simulation.velocity_at(play_time_nanos),
        }
    }

    pub fn is_finished_at(&self, play_time_nanos: i64) -> bool {
        match self.kind {
            TargetKind::Tween(spec) => play_time_nanos >= spec.total_nanos(),
            TargetKind::Spring(simulation) => simulation.is_at_rest(play_time_nanos),
        }
    }
}

fn tween_fraction(spec: &AnimationSpec, play_time_nanos: i64) -> f32 {
    let delay = (spec.delay_millis * 1_000_000) as i64;
    let active = (play_time_nanos - delay).max(0);
    let duration = ((spec.duration_millis * 1_000_000) as i64).max(1);
    let linear = (active as f32 / duration as f32).clamp(0.0, 1.0);
    spec.easing.transform(linear)
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
