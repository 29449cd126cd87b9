//! Shared gesture thresholds, in logical pixels.

/// Pointer travel after which a press becomes a drag.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum fling velocity in logical pixels per second.
///
/// Release velocities are capped to this before they reach a fling.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
