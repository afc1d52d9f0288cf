//! Raised-cosine block envelope.
//!
//! Each block fades in over its first `ramp_seconds / 2` and out over its
//! last `ramp_seconds / 2`, so consecutive blocks join without clicks.

use std::f64::consts::PI;

/// Raised-cosine fade curve, `0.5 * (1 - cos(pi * x))` for `x` in `[0, 1]`.
#[inline]
pub fn raised_cosine(x: f64) -> f64 {
    0.5 * (1.0 - (PI * x.clamp(0.0, 1.0)).cos())
}

/// Number of samples in each ramp region of a block.
///
/// Clamped to half the block so fade-in and fade-out never cross.
pub fn ramp_len(num_samples: usize, sample_rate: f64, ramp_seconds: f64) -> usize {
    let half = (sample_rate * ramp_seconds * 0.5).round().max(0.0) as usize;
    half.min(num_samples / 2)
}

/// Envelope multiplier for sample `index` of a block.
pub fn envelope_gain(index: usize, num_samples: usize, ramp: usize) -> f64 {
    if ramp < 2 || index >= num_samples {
        return 1.0;
    }

    let span = (ramp - 1) as f64;
    if index < ramp {
        raised_cosine(index as f64 / span)
    } else if index >= num_samples - ramp {
        raised_cosine((num_samples - 1 - index) as f64 / span)
    } else {
        1.0
    }
}

/// Applies the fade-in/fade-out ramp in place. Interior samples are untouched.
pub fn apply_ramp(samples: &mut [f64], sample_rate: f64, ramp_seconds: f64) {
    let n = samples.len();
    let ramp = ramp_len(n, sample_rate, ramp_seconds);
    if ramp < 2 {
        return;
    }

    for i in (0..ramp).chain(n - ramp..n) {
        samples[i] *= envelope_gain(i, n, ramp);
    }
}
