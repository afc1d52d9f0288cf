//! Tonemend Audio Backend
//!
//! Deterministic, block-based synthesis of band-modulated harmonic stimuli,
//! streamed to 16-bit mono WAV files.
//!
//! # Overview
//!
//! A request names a target frequency. The band table maps it to an active
//! band (and optionally a non-overlapping sham band). Each output file is
//! built from short blocks: every block draws a random fundamental, sums its
//! harmonics between 1 and 16 kHz, modulates the ones inside the band, then
//! fades and peak-limits the result. Blocks are encoded as soon as they are
//! rendered, so memory use does not grow with duration.
//!
//! # Determinism
//!
//! Given the same request and seed the output is byte-identical across runs.
//! Every file owns an xorshift32 generator seeded through BLAKE3 from the
//! request seed and the file's role.
//!
//! # Example
//!
//! ```ignore
//! use tonemend_backend_audio::{generate, NoProgress};
//! use tonemend_spec::SynthesisRequest;
//!
//! let request = SynthesisRequest::builder(4800.0).generate_sham_file(true).build()?;
//! let result = generate(&request, Path::new("out"), &mut NoProgress)?;
//! println!("active file: {}", result.active);
//! ```
//!
//! # Crate Structure
//!
//! - [`generate()`] - Main entry point, writes the request's files
//! - [`bands`] - Band definitions and the frequency lookup table
//! - [`envelope`] - Raised-cosine block ramps
//! - [`gain`] - Peak limiting
//! - [`rng`] - xorshift32 generator with seed derivation
//! - [`synthesis`] - Block synthesizer
//! - [`wav`] - Streaming WAV writer

pub mod bands;
pub mod envelope;
pub mod error;
pub mod gain;
pub mod generate;
pub mod rng;
pub mod synthesis;
pub mod wav;

// Re-export main types at crate root
pub use bands::{resolve_bands, resolve_match_key, ResolvedBands, BANDS, BAND_TABLE};
pub use error::{AudioError, AudioResult};
pub use generate::{
    generate, output_file_name, render_role_to_writer, BlockPlan, CancelFlag, ChannelSink,
    Generator, GeneratorState, NoProgress, ProgressSink, RoleJob,
};
pub use rng::XorShift32;
pub use synthesis::{SynthesisContext, SynthesisSettings, SAMPLE_RATE};
pub use wav::{WavHeader, WavStreamWriter, WavSummary};
