//! Block synthesizer.
//!
//! A block is a fixed-length buffer built from the harmonic series of a
//! randomly drawn fundamental. Harmonics inside the target band are
//! modulated (in phase or amplitude), the rest pass as plain carriers. The
//! finished block is ramped at both ends and peak-limited.
//!
//! Draw order per block is fixed and part of the reproducibility contract:
//! fundamental, SMR phase `p`, temporal phase `q`, then one carrier phase per
//! harmonic from lowest to highest.

pub mod harmonics;
pub mod modulation;


use std::f64::consts::PI;

use tonemend_spec::{Band, ModulationMode};

use crate::envelope::apply_ramp;
use crate::error::{AudioError, AudioResult};
use crate::gain::limit_peak;
use crate::rng::XorShift32;

use self::harmonics::harmonic_plan;
use self::modulation::{
    fill_modulator, fill_smr_drive, fill_temporal_phase, modulation_factors, modulation_index,
};

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Lowest block fundamental in Hz.
pub const FUNDAMENTAL_LOW_HZ: f64 = 96.0;

/// Highest block fundamental in Hz (exclusive).
pub const FUNDAMENTAL_HIGH_HZ: f64 = 256.0;

/// Default block length in seconds.
pub const DEFAULT_BLOCK_SECONDS: f64 = 4.0;

/// Default total ramp per block in seconds (half in, half out).
pub const DEFAULT_RAMP_SECONDS: f64 = 1.0;

/// Default normalization ceiling.
pub const DEFAULT_TARGET_PEAK: f64 = 0.80;

/// Engine tunables shared by every block of a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisSettings {
    /// Length of a full block in seconds.
    pub block_seconds: f64,
    /// Total fade time per block (split between start and end).
    pub ramp_seconds: f64,
    /// Peak ceiling applied after the ramp.
    pub target_peak: f64,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            block_seconds: DEFAULT_BLOCK_SECONDS,
            ramp_seconds: DEFAULT_RAMP_SECONDS,
            target_peak: DEFAULT_TARGET_PEAK,
        }
    }
}

impl SynthesisSettings {
    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> AudioResult<()> {
        if !self.block_seconds.is_finite() || self.block_seconds <= 0.0 {
            return Err(AudioError::invalid_setting(
                "block_seconds",
                format!("must be a positive number, got {}", self.block_seconds),
            ));
        }
        if block_len(self.block_seconds) == 0 {
            return Err(AudioError::invalid_setting(
                "block_seconds",
                "shorter than one sample",
            ));
        }
        if !self.ramp_seconds.is_finite() || self.ramp_seconds < 0.0 {
            return Err(AudioError::invalid_setting(
                "ramp_seconds",
                format!("must be zero or positive, got {}", self.ramp_seconds),
            ));
        }
        if !(self.target_peak > 0.0 && self.target_peak <= 1.0) {
            return Err(AudioError::invalid_setting(
                "target_peak",
                format!("must be in (0, 1], got {}", self.target_peak),
            ));
        }
        Ok(())
    }
}

/// Number of samples in a block of `seconds`.
pub fn block_len(seconds: f64) -> usize {
    (f64::from(SAMPLE_RATE) * seconds).round().max(0.0) as usize
}

/// One finished block of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Normalized samples, peak at most the target peak.
    pub samples: Vec<f64>,
    /// Fundamental drawn for this block (informational).
    pub fundamental_hz: f64,
    /// Harmonics summed into the block.
    pub harmonic_count: usize,
    /// Harmonics that were modulated.
    pub in_band_count: usize,
}

impl Block {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the block holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Reusable per-block working buffers.
#[derive(Debug, Default)]
struct Scratch {
    drive: Vec<f64>,
    temporal: Vec<f64>,
    modulator: Vec<f64>,
}

/// Request-scoped synthesis state for one output file.
///
/// Owns the file's sequence generator and working buffers. Never shared
/// between files or threads.
#[derive(Debug)]
pub struct SynthesisContext {
    rng: XorShift32,
    settings: SynthesisSettings,
    scratch: Scratch,
}

impl SynthesisContext {
    /// Creates a context around a generator.
    pub fn new(rng: XorShift32, settings: SynthesisSettings) -> Self {
        Self {
            rng,
            settings,
            scratch: Scratch::default(),
        }
    }

    /// Settings in use.
    pub fn settings(&self) -> &SynthesisSettings {
        &self.settings
    }

    /// The generator, in its current state.
    pub fn rng(&self) -> &XorShift32 {
        &self.rng
    }

    /// Renders the next block of `num_samples` samples.
    pub fn render_block(
        &mut self,
        band: &Band,
        mode: ModulationMode,
        num_samples: usize,
    ) -> AudioResult<Block> {
        render_into(
            band,
            mode,
            &mut self.rng,
            num_samples,
            &self.settings,
            &mut self.scratch,
        )
    }
}

/// Renders one block of `block_seconds` from `rng`.
///
/// # Arguments
/// * `band` - Band whose harmonics are modulated
/// * `mode` - Phase or amplitude modulation
/// * `rng` - Generator the block's draws are taken from, advanced in place
/// * `block_seconds` - Block length; rounded to `SAMPLE_RATE * block_seconds` samples
/// * `settings` - Ramp length and peak ceiling
///
/// # Returns
/// The finished block, or a synthesis error if no harmonic fits the carrier limits
pub fn synthesize_block(
    band: &Band,
    mode: ModulationMode,
    rng: &mut XorShift32,
    block_seconds: f64,
    settings: &SynthesisSettings,
) -> AudioResult<Block> {
    let mut scratch = Scratch::default();
    render_into(
        band,
        mode,
        rng,
        block_len(block_seconds),
        settings,
        &mut scratch,
    )
}

fn render_into(
    band: &Band,
    mode: ModulationMode,
    rng: &mut XorShift32,
    num_samples: usize,
    settings: &SynthesisSettings,
    scratch: &mut Scratch,
) -> AudioResult<Block> {
    let sample_rate = f64::from(SAMPLE_RATE);
    let two_pi = 2.0 * PI;

    let fundamental_hz = rng.uniform(FUNDAMENTAL_LOW_HZ, FUNDAMENTAL_HIGH_HZ);
    let harmonics = harmonic_plan(fundamental_hz, band);
    if harmonics.is_empty() {
        return Err(AudioError::synthesis(format!(
            "no harmonic of {fundamental_hz} Hz falls inside the carrier limits"
        )));
    }

    let center_hz = band.center_hz();
    let smr_phase = rng.uniform(0.0, two_pi);
    let temporal_offset = rng.uniform(0.0, two_pi);

    fill_smr_drive(&mut scratch.drive, num_samples, sample_rate, smr_phase);
    fill_temporal_phase(&mut scratch.temporal, num_samples, sample_rate);

    let mut output = vec![0.0; num_samples];
    let harmonic_count = harmonics.len();
    let mut in_band_count = 0;

    for harmonic in &harmonics {
        let carrier_phase = rng.uniform(0.0, two_pi);
        let omega = two_pi * harmonic.freq_hz / sample_rate;

        if harmonic.in_band {
            in_band_count += 1;
            let index = modulation_index(harmonic.freq_hz, center_hz);
            fill_modulator(
                &mut scratch.modulator,
                &scratch.drive,
                &scratch.temporal,
                index,
                temporal_offset,
            );

            for (i, (sample, &m)) in output.iter_mut().zip(&scratch.modulator).enumerate() {
                let (amplitude, offset) = modulation_factors(mode, m);
                *sample += amplitude * (omega * i as f64 + carrier_phase + offset).sin();
            }
        } else {
            for (i, sample) in output.iter_mut().enumerate() {
                *sample += (omega * i as f64 + carrier_phase).sin();
            }
        }
    }

    apply_ramp(&mut output, sample_rate, settings.ramp_seconds);
    limit_peak(&mut output, settings.target_peak);

    tracing::trace!(
        fundamental_hz,
        harmonic_count,
        in_band_count,
        num_samples,
        "rendered block"
    );

    Ok(Block {
        samples: output,
        fundamental_hz,
        harmonic_count,
        in_band_count,
    })
}
