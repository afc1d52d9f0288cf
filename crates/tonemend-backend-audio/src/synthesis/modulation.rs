//! Spectro-temporal modulation terms.
//!
//! Every block carries two slow signals shared by all in-band harmonics:
//!
//! - the SMR drive `S(t) = mu + r * sin(p + 2*pi*nu*t)`, which sets how
//!   strongly the frequency-dependent shift is applied
//! - the temporal ramp `W(t) = 2*pi*omega*t`
//!
//! A harmonic at `freq` in a band centred on `c` then sees
//! `sin(W(t) + 2*pi*log2(freq / c)*S(t) + q)`.

use std::f64::consts::PI;

use tonemend_spec::ModulationMode;

/// Mean of the SMR drive.
pub const SMR_MEAN: f64 = 4.5;

/// Excursion of the SMR drive around its mean.
pub const SMR_RANGE: f64 = 3.0;

/// Rate of the SMR drive in Hz.
pub const SMR_RATE_HZ: f64 = 0.125;

/// Temporal modulation rate in Hz.
pub const TEMPORAL_RATE_HZ: f64 = 1.0;

/// Modulation depth.
pub const MODULATION_DEPTH: f64 = 1.0;

/// Fills `out` with the SMR drive for `num_samples` samples.
pub fn fill_smr_drive(out: &mut Vec<f64>, num_samples: usize, sample_rate: f64, phase: f64) {
    out.clear();
    out.extend((0..num_samples).map(|i| {
        let t = i as f64 / sample_rate;
        SMR_MEAN + SMR_RANGE * (phase + 2.0 * PI * SMR_RATE_HZ * t).sin()
    }));
}

/// Fills `out` with the temporal phase ramp for `num_samples` samples.
pub fn fill_temporal_phase(out: &mut Vec<f64>, num_samples: usize, sample_rate: f64) {
    out.clear();
    out.extend((0..num_samples).map(|i| {
        let t = i as f64 / sample_rate;
        2.0 * PI * TEMPORAL_RATE_HZ * t
    }));
}

/// Frequency-dependent modulation index, `log2(freq / center)`.
#[inline]
pub fn modulation_index(freq_hz: f64, center_hz: f64) -> f64 {
    (freq_hz / center_hz).log2()
}

/// Fills `out` with `sin(W[i] + 2*pi*index*S[i] + q)` for one harmonic.
pub fn fill_modulator(out: &mut Vec<f64>, drive: &[f64], temporal: &[f64], index: f64, q: f64) {
    let scale = 2.0 * PI * index;
    out.clear();
    out.extend(
        drive
            .iter()
            .zip(temporal)
            .map(|(&s, &w)| (w + scale * s + q).sin()),
    );
}

/// Per-sample amplitude and phase offset for a modulated harmonic.
///
/// Amplitude mode returns `(1 + d*m, 0)`, in `[0, 2] x {0}`.
/// Phase mode returns `(1, pi*(1 + d*m))`, in `{1} x [0, 2*pi]`.
#[inline]
pub fn modulation_factors(mode: ModulationMode, modulator: f64) -> (f64, f64) {
    match mode {
        ModulationMode::Amplitude => (1.0 + MODULATION_DEPTH * modulator, 0.0),
        ModulationMode::Phase => (1.0, PI * (1.0 + MODULATION_DEPTH * modulator)),
    }
}
