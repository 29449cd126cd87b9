use crate::animation::SpringSpec;

/// Multiplier turning a value threshold into a velocity threshold.
const VELOCITY_THRESHOLD_MULTIPLIER: f32 = 1000.0 / 16.0;

/// Closed-form damped harmonic oscillator.
///
/// Displacement is measured from the target; the spring rests at zero.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpringSimulation {
    natural_freq: f64,
    damping_ratio: f64,
    initial_displacement: f64,
    initial_velocity: f64,
    visibility_threshold: f32,
}

impl SpringSimulation {
    pub(crate) fn new(
        spec: SpringSpec,
        initial_displacement: f32,
        initial_velocity: f32,
        visibility_threshold: f32,
    ) -> Self {
        Self {
            natural_freq: (spec.stiffness.max(0.0001) as f64).sqrt(),
            damping_ratio: spec.damping_ratio.max(0.0) as f64,
            initial_displacement: initial_displacement as f64,
            initial_velocity: initial_velocity as f64,
            visibility_threshold: visibility_threshold.abs().max(f32::EPSILON),
        }
    }

    pub(crate) fn displacement_at(&self, play_time_nanos: i64) -> f32 {
        self.evaluate(play_time_nanos).0 as f32
    }

    pub(crate) fn velocity_at(&self, play_time_nanos: i64) -> f32 {
        self.evaluate(play_time_nanos).1 as f32
    }

    pub(crate) fn is_at_rest(&self, play_time_nanos: i64) -> bool {
        let (displacement, velocity) = self.evaluate(play_time_nanos);
        (displacement.abs() as f32) < self.visibility_threshold
            && (velocity.abs() as f32) < self.visibility_threshold * VELOCITY_THRESHOLD_MULTIPLIER
    }

    /// Displacement and velocity (units per second) at the given play time.
    fn evaluate(&self, play_time_nanos: i64) -> (f64, f64) {
        let t = play_time_nanos.max(0) as f64 / 1_000_000_000.0;
        let w = self.natural_freq;
        let zeta = self.damping_ratio;
        let x0 = self.initial_displacement;
        let v0 = self.initial_velocity;

        if zeta > 1.0 {
            let root = (zeta * zeta - 1.0).sqrt();
            let gamma_plus = -zeta * w + w * root;
            let gamma_minus = -zeta * w - w * root;
            let coeff_b = (gamma_minus * x0 - v0) / (gamma_minus - gamma_plus);
            let coeff_a = x0 - coeff_b;
            let displacement =
                coeff_a * (gamma_minus * t).exp() + coeff_b * (gamma_plus * t).exp();
            let velocity = coeff_a * gamma_minus * (gamma_minus * t).exp()
                + coeff_b * gamma_plus * (gamma_plus * t).exp();
            (displacement, velocity)
        } else if (zeta - 1.0).abs() < f64::EPSILON {
            let coeff_a = x0;
            let coeff_b = v0 + w * x0;
            let decay = (-w * t).exp();
            let displacement = (coeff_a + coeff_b * t) * decay;
            let velocity = (coeff_b - w * (coeff_a + coeff_b * t)) * decay;
            (displacement, velocity)
        } else {
            let damped_freq = w * (1.0 - zeta * zeta).sqrt();
            let cos_coeff = x0;
            let sin_coeff = (zeta * w * x0 + v0) / damped_freq;
            let decay = (-zeta * w * t).exp();
            let (sin, cos) = (damped_freq * t).sin_cos();
            let displacement = decay * (cos_coeff * cos + sin_coeff * sin);
            let velocity = decay
                * ((sin_coeff * damped_freq - zeta * w * cos_coeff) * cos
                    - (cos_coeff * damped_freq + zeta * w * sin_coeff) * sin);
            (displacement, velocity)
        }
    }
}
