//! Peak normalization.

/// Smallest peak used as a divisor, so silent blocks never divide by zero.
pub const PEAK_EPSILON: f64 = 1e-12;

/// Absolute peak of a buffer.
pub fn peak(samples: &[f64]) -> f64 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f64, |a, b| a.max(b))
}

/// Scales a buffer so its peak does not exceed `target_peak`.
///
/// The gain is `min(1, target_peak / peak)`: loud blocks are pulled down to
/// the target, quiet blocks are left as they are.
///
/// # Returns
/// The gain that was applied.
pub fn limit_peak(samples: &mut [f64], target_peak: f64) -> f64 {
    let current_peak = peak(samples).max(PEAK_EPSILON);
    let gain = (target_peak / current_peak).min(1.0);

    if gain < 1.0 {
        for sample in samples.iter_mut() {
            *sample *= gain;
        }
    }

    gain
}
