//! Release velocity for drags.
//!
//! Impulse strategy: the velocity is derived from the kinetic energy the
//! pointer imparted over the most recent samples.

const HISTORY_SIZE: usize = 20;

/// Samples older than this, relative to the newest, are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: i64,
    value: f32,
}

/// One-axis velocity tracker over a ring buffer of recent samples.
///
/// In absolute mode samples are positions; in differential mode they are
/// the deltas since the previous sample, which is what drag callbacks
/// deliver.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
    is_differential: bool,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
            is_differential: false,
        }
    }

    pub fn differential() -> Self {
        Self {
            is_differential: true,
            ..Self::new()
        }
    }

    pub fn is_differential(&self) -> bool {
        self.is_differential
    }

    pub fn add_data_point(&mut self, time_ms: i64, value: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, value });
    }

    /// Velocity in units per second; zero with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let mut values = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        let mut current = self.index;
        let mut previous = newest;
        while let Some(sample) = self.samples[current] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            let gap = (sample.time_ms - previous.time_ms).abs() as f32;
            previous = if self.is_differential { sample } else { newest };
            if age > HORIZON_MS as f32 || gap > ASSUME_STOPPED_MS as f32 {
                break;
            }

            values[count] = sample.value;
            times[count] = -age;
            current = current.checked_sub(1).unwrap_or(HISTORY_SIZE - 1);

            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&values[..count], &times[..count], self.is_differential) * 1000.0
    }

    /// Like [`calculate_velocity`](Self::calculate_velocity), clamped to
    /// `±max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }
        if velocity.abs() > max_velocity {
            log::trace!("capping tracked velocity {velocity} to {max_velocity}");
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Samples are ordered newest first; `times` are non-positive ages.
fn impulse_velocity(values: &[f32], times: &[f32], is_differential: bool) -> f32 {
    let start = values.len() - 1;
    let mut work = 0.0f32;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }
        let delta = if is_differential {
            -values[i - 1]
        } else {
            values[i] - values[i - 1]
        };
        let v_curr = delta / (current_time - next_time);
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

/// `E = v^2 / 2` for unit mass.
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

#[cfg(test)]
#[path = "tests/velocity_tracker_tests.rs"]
mod tests;
