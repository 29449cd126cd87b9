//! Decay specifications for flings.
//!
//! A decay has no target: it starts with a velocity and slows to rest. The
//! spline flavour reproduces the platform scroller feel; the exponential one
//! is a plain friction curve.

use std::sync::LazyLock;

const INFLECTION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLECTION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLECTION);

const SAMPLE_COUNT: usize = 100;

/// Distance fraction covered at each of the evenly spaced time samples.
static SPLINE_POSITIONS: LazyLock<[f32; SAMPLE_COUNT + 1]> = LazyLock::new(|| {
    let mut positions = [0.0f32; SAMPLE_COUNT + 1];
    let mut x_min = 0.0f32;

    for (i, slot) in positions.iter_mut().enumerate().take(SAMPLE_COUNT) {
        let alpha = i as f32 / SAMPLE_COUNT as f32;
        let mut x_max = 1.0f32;
        let (x, coef) = loop {
            let x_mid = x_min + (x_max - x_min) / 2.0;
            let coef = 3.0 * x_mid * (1.0 - x_mid);
            let tx = coef * ((1.0 - x_mid) * P1 + x_mid * P2) + x_mid * x_mid * x_mid;
            if (tx - alpha).abs() < 1e-5 {
                break (x_mid, coef);
            }
            if tx > alpha {
                x_max = x_mid;
            } else {
                x_min = x_mid;
            }
        };
        *slot = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
    }

    positions[SAMPLE_COUNT] = 1.0;
    positions
});

/// Distance and velocity coefficients at a normalized fling time.
fn spline_sample(time: f32) -> (f32, f32) {
    let time = time.clamp(0.0, 1.0);
    let index = (SAMPLE_COUNT as f32 * time) as usize;
    if index >= SAMPLE_COUNT {
        return (1.0, 0.0);
    }
    let t_inf = index as f32 / SAMPLE_COUNT as f32;
    let t_sup = (index + 1) as f32 / SAMPLE_COUNT as f32;
    let d_inf = SPLINE_POSITIONS[index];
    let d_sup = SPLINE_POSITIONS[index + 1];
    let velocity = (d_sup - d_inf) / (t_sup - t_inf);
    (d_inf + (time - t_inf) * velocity, velocity)
}

const GRAVITY_EARTH: f32 = 9.80665;
const INCHES_PER_METER: f32 = 39.37;
/// `ln(0.78) / ln(0.9)`
const DECELERATION_RATE: f64 = 2.358_201_6;

/// Precomputed shape of a single fling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingInfo {
    pub initial_velocity: f32,
    /// Unsigned distance the fling travels.
    pub distance: f32,
    pub duration_millis: i64,
}

impl FlingInfo {
    fn progress(&self, time_millis: i64) -> f32 {
        if self.duration_millis > 0 {
            time_millis as f32 / self.duration_millis as f32
        } else {
            1.0
        }
    }

    /// Signed offset from the starting value.
    pub fn position(&self, time_millis: i64) -> f32 {
        let (distance_coef, _) = spline_sample(self.progress(time_millis));
        self.distance * self.initial_velocity.signum() * distance_coef
    }

    /// Velocity in units per second.
    pub fn velocity(&self, time_millis: i64) -> f32 {
        if self.duration_millis <= 0 {
            return 0.0;
        }
        let (_, velocity_coef) = spline_sample(self.progress(time_millis));
        velocity_coef * self.initial_velocity.signum() * self.distance
            / self.duration_millis as f32
            * 1000.0
    }

    pub fn is_finished(&self, time_millis: i64) -> bool {
        time_millis >= self.duration_millis
    }
}

/// Scroller physics for a given friction and screen density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingCalculator {
    friction: f32,
    physical_coefficient: f32,
}

impl FlingCalculator {
    pub const DEFAULT_FRICTION: f32 = 0.015;

    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coefficient: GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * 0.84,
        }
    }

    pub fn with_density(density: f32) -> Self {
        Self::new(Self::DEFAULT_FRICTION, density)
    }

    fn deceleration(&self, velocity: f32) -> Option<f64> {
        if velocity == 0.0 || !velocity.is_finite() {
            return None;
        }
        let friction = (self.friction * self.physical_coefficient) as f64;
        Some((INFLECTION as f64 * velocity.abs() as f64 / friction).ln())
    }

    pub fn fling_duration(&self, velocity: f32) -> i64 {
        match self.deceleration(velocity) {
            Some(l) => (1000.0 * (l / (DECELERATION_RATE - 1.0)).exp()) as i64,
            None => 0,
        }
    }

    pub fn fling_distance(&self, velocity: f32) -> f32 {
        match self.deceleration(velocity) {
            Some(l) => {
                let exponent = DECELERATION_RATE / (DECELERATION_RATE - 1.0) * l;
                self.friction * self.physical_coefficient * exponent.exp() as f32
            }
            None => 0.0,
        }
    }

    pub fn fling_info(&self, velocity: f32) -> FlingInfo {
        FlingInfo {
            initial_velocity: velocity,
            distance: self.fling_distance(velocity),
            duration_millis: self.fling_duration(velocity),
        }
    }
}

/// Velocity-driven animation that comes to rest on its own.
pub trait FloatDecayAnimationSpec {
    /// Speed below which the decay counts as finished.
    fn abs_velocity_threshold(&self) -> f32;

    fn value_from_nanos(&self, play_time_nanos: i64, initial_value: f32, initial_velocity: f32)
        -> f32;

    fn velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    fn duration_nanos(&self, initial_value: f32, initial_velocity: f32) -> i64;

    /// Where the decay will come to rest.
    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32;
}

/// Platform scroller fling curve. The default fling for collapsable surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineBasedDecaySpec {
    calculator: FlingCalculator,
}

impl SplineBasedDecaySpec {
    pub fn new(density: f32) -> Self {
        Self {
            calculator: FlingCalculator::with_density(density),
        }
    }
}

impl Default for SplineBasedDecaySpec {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl FloatDecayAnimationSpec for SplineBasedDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        0.0
    }

    fn value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let info = self.calculator.fling_info(initial_velocity);
        initial_value + info.position(play_time_nanos / 1_000_000)
    }

    fn velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let info = self.calculator.fling_info(initial_velocity);
        info.velocity(play_time_nanos / 1_000_000)
    }

    fn duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        self.calculator.fling_duration(initial_velocity) * 1_000_000
    }

    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        initial_value
            + self.calculator.fling_distance(initial_velocity) * initial_velocity.signum()
    }
}

/// Friction decay: velocity falls off as `e^(friction * t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecaySpec {
    friction: f32,
    abs_velocity_threshold: f32,
}

impl ExponentialDecaySpec {
    const EXPONENTIAL_DECAY_FRICTION: f32 = -4.2;

    /// `friction_multiplier` scales how quickly the motion stops.
    pub fn new(friction_multiplier: f32, abs_velocity_threshold: f32) -> Self {
        Self {
            friction: Self::EXPONENTIAL_DECAY_FRICTION * friction_multiplier.max(0.0001),
            abs_velocity_threshold: abs_velocity_threshold.abs().max(0.0001),
        }
    }
}

impl Default for ExponentialDecaySpec {
    fn default() -> Self {
        Self::new(1.0, 0.1)
    }
}

impl FloatDecayAnimationSpec for ExponentialDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        self.abs_velocity_threshold
    }

    fn value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let seconds = play_time_nanos.max(0) as f32 / 1_000_000_000.0;
        initial_value - initial_velocity / self.friction
            + initial_velocity / self.friction * (self.friction * seconds).exp()
    }

    fn velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let seconds = play_time_nanos.max(0) as f32 / 1_000_000_000.0;
        initial_velocity * (self.friction * seconds).exp()
    }

    fn duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        if initial_velocity.abs() <= self.abs_velocity_threshold {
            return 0;
        }
        let millis =
            (self.abs_velocity_threshold / initial_velocity.abs()).ln() / self.friction * 1000.0;
        (millis as i64) * 1_000_000
    }

    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        if initial_velocity.abs() <= self.abs_velocity_threshold {
            return initial_value;
        }
        let duration = self.duration_nanos(initial_value, initial_velocity);
        self.value_from_nanos(duration, initial_value, initial_velocity)
    }
}

#[cfg(test)]
#[path = "tests/decay_spec_tests.rs"]
mod tests;
