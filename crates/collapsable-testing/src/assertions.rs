/// Assert that a value is within `tolerance` of `expected`.
///
/// Offsets coming out of springs and decays are only ever approximately
/// equal to hand-computed values.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}
