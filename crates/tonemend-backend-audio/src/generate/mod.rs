//! Generation orchestrator.
//!
//! Turns a validated request into one or two finished WAV files. Each file
//! gets its own sequence generator and synthesis context, blocks are rendered
//! and encoded strictly in order, and the progress sink runs after every
//! block.

mod output;
mod plan;
mod progress;

#[cfg(test)]
mod tests;

use std::io::{Seek, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use tonemend_spec::{
    Band, BandSummary, GenerationResult, ModulationMode, ProgressEvent, Role, SynthesisRequest,
};

use crate::bands::{resolve_bands, ResolvedBands};
use crate::error::{AudioError, AudioResult};
use crate::rng::create_role_rng;
use crate::synthesis::{SynthesisContext, SynthesisSettings, SAMPLE_RATE};
use crate::wav::{WavFormat, WavStreamWriter, WavSummary};

pub use output::{output_file_name, OutputFile};
pub use plan::BlockPlan;
pub use progress::{CancelFlag, ChannelSink, NoProgress, ProgressSink};

/// Where a [`Generator`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// Not started.
    Idle,
    /// Rendering the active file.
    GeneratingActive,
    /// Rendering the sham file.
    GeneratingSham,
    /// Every requested file was written.
    Complete,
    /// Stopped by an error or cancellation; nothing was left behind.
    Failed,
}

/// What rendering one role needs besides its output.
#[derive(Debug, Clone, Copy)]
pub struct RoleJob<'a> {
    /// File being rendered.
    pub role: Role,
    /// Band modulated in this file.
    pub band: &'a Band,
    /// Modulation applied inside the band.
    pub mode: ModulationMode,
    /// Request seed; the role seed is derived from it.
    pub base_seed: u32,
    /// Whether a sham file follows the active one (affects progress fractions).
    pub with_sham: bool,
}

/// Renders one role's blocks into `writer` and finalizes the WAV stream.
///
/// A `Break` from the sink stops after the current block with
/// [`AudioError::Cancelled`]; the writer is dropped unfinalized.
///
/// # Arguments
/// * `job` - Role, band, mode and seed for the file
/// * `plan` - Block lengths to render, in order
/// * `settings` - Ramp and peak ceiling applied to each block
/// * `writer` - Seekable sink positioned where the WAV should start
/// * `sink` - Receives one progress event per block
///
/// # Returns
/// The writer and a summary of the encoded stream
pub fn render_role_to_writer<W, S>(
    job: &RoleJob<'_>,
    plan: &BlockPlan,
    settings: &SynthesisSettings,
    writer: W,
    sink: &mut S,
) -> AudioResult<(W, WavSummary)>
where
    W: Write + Seek,
    S: ProgressSink + ?Sized,
{
    let mut context = SynthesisContext::new(create_role_rng(job.base_seed, job.role), *settings);
    let mut stream = WavStreamWriter::new(writer, WavFormat::mono(SAMPLE_RATE))?;
    let total_blocks = plan.total_blocks();

    for (index, num_samples) in plan.block_lengths().enumerate() {
        let block = context.render_block(job.band, job.mode, num_samples)?;
        stream.write_samples(&block.samples)?;

        tracing::debug!(
            role = %job.role,
            block = index,
            fundamental_hz = block.fundamental_hz,
            harmonics = block.harmonic_count,
            "block encoded"
        );

        let event = ProgressEvent::new(job.role, index + 1, total_blocks, job.with_sham);
        if let ControlFlow::Break(()) = sink.on_progress(&event) {
            tracing::warn!(
                role = %job.role,
                completed = index + 1,
                total_blocks,
                "generation cancelled"
            );
            return Err(AudioError::Cancelled);
        }
    }

    Ok(stream.finalize()?)
}

/// Runs one request to completion.
///
/// Request-scoped; owns no state that outlives [`Generator::run`]'s files.
#[derive(Debug)]
pub struct Generator<'a> {
    request: &'a SynthesisRequest,
    settings: SynthesisSettings,
    bands: ResolvedBands,
    plan: BlockPlan,
    state: GeneratorState,
}

impl<'a> Generator<'a> {
    /// Resolves bands and plans blocks for `request`.
    pub fn new(request: &'a SynthesisRequest, settings: SynthesisSettings) -> AudioResult<Self> {
        settings.validate()?;
        let bands = resolve_bands(request)?;
        let plan = BlockPlan::new(request.duration_seconds(), settings.block_seconds);

        Ok(Self {
            request,
            settings,
            bands,
            plan,
            state: GeneratorState::Idle,
        })
    }

    /// Renders `seconds` per file instead of the request's duration.
    ///
    /// File names and the result still carry the requested minutes.
    ///
    /// # Arguments
    /// * `seconds` - Length of each file; must be finite and cover at least one sample
    ///
    /// # Returns
    /// The generator with a new block plan, or [`AudioError::InvalidSettings`].
    pub fn with_duration_seconds(mut self, seconds: f64) -> AudioResult<Self> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(AudioError::invalid_setting(
                "duration_seconds",
                format!("must be a positive number, got {seconds}"),
            ));
        }

        let plan = BlockPlan::new(seconds, self.settings.block_seconds);
        if plan.total_samples == 0 {
            return Err(AudioError::invalid_setting(
                "duration_seconds",
                "shorter than one sample",
            ));
        }

        self.plan = plan;
        Ok(self)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Bands selected for the request.
    pub fn bands(&self) -> &ResolvedBands {
        &self.bands
    }

    /// Block schedule used for each file.
    pub fn plan(&self) -> &BlockPlan {
        &self.plan
    }

    /// Writes the requested files into `out_dir`.
    ///
    /// On any error both files are removed, including an active file that
    /// was already persisted before the sham file failed.
    pub fn run<S>(&mut self, out_dir: &Path, sink: &mut S) -> AudioResult<GenerationResult>
    where
        S: ProgressSink + ?Sized,
    {
        if self.state != GeneratorState::Idle {
            return Err(AudioError::synthesis(format!(
                "generator already ran (state {:?})",
                self.state
            )));
        }

        let mut written: Vec<PathBuf> = Vec::new();
        match self.run_roles(out_dir, sink, &mut written) {
            Ok(result) => {
                self.state = GeneratorState::Complete;
                Ok(result)
            }
            Err(err) => {
                self.state = GeneratorState::Failed;
                for path in &written {
                    if let Err(remove_err) = std::fs::remove_file(path) {
                        tracing::warn!(
                            path = %path.display(),
                            error = %remove_err,
                            "could not remove output"
                        );
                    }
                }
                Err(err)
            }
        }
    }

    fn run_roles<S>(
        &mut self,
        out_dir: &Path,
        sink: &mut S,
        written: &mut Vec<PathBuf>,
    ) -> AudioResult<GenerationResult>
    where
        S: ProgressSink + ?Sized,
    {
        let with_sham = self.bands.sham.is_some();

        self.state = GeneratorState::GeneratingActive;
        let (active_path, active_summary) =
            self.render_file(out_dir, Role::Active, self.bands.active, with_sham, sink)?;
        written.push(active_path.clone());

        let sham = match self.bands.sham {
            Some(band) => {
                self.state = GeneratorState::GeneratingSham;
                let (path, summary) = self.render_file(out_dir, Role::Sham, band, true, sink)?;
                written.push(path.clone());
                Some((path, summary, band))
            }
            None => None,
        };

        Ok(GenerationResult {
            active: active_path.display().to_string(),
            sham: sham.as_ref().map(|(path, _, _)| path.display().to_string()),
            target_frequency_hz: self.request.rounded_frequency_hz(),
            modulation_mode: self.request.modulation_mode(),
            duration_minutes: self.request.duration_minutes(),
            active_band: BandSummary::from(self.bands.active),
            sham_band: sham.as_ref().map(|(_, _, band)| BandSummary::from(*band)),
            seed: self.request.seed(),
            active_pcm_hash: active_summary.pcm_hash,
            sham_pcm_hash: sham.map(|(_, summary, _)| summary.pcm_hash),
            total_samples: active_summary.num_samples,
        })
    }

    fn render_file<S>(
        &self,
        out_dir: &Path,
        role: Role,
        band: &Band,
        with_sham: bool,
        sink: &mut S,
    ) -> AudioResult<(PathBuf, WavSummary)>
    where
        S: ProgressSink + ?Sized,
    {
        let job = RoleJob {
            role,
            band,
            mode: self.request.modulation_mode(),
            base_seed: self.request.seed(),
            with_sham,
        };

        tracing::info!(
            %role,
            band = band.name,
            seed = self.request.seed(),
            blocks = self.plan.total_blocks(),
            "rendering file"
        );

        let output = OutputFile::create(out_dir, &output_file_name(self.request, role))?;
        tracing::debug!(
            %role,
            temp = %output.temp_path().display(),
            destination = %output.destination().display(),
            "writing to temporary file"
        );

        let (output, summary) =
            render_role_to_writer(&job, &self.plan, &self.settings, output, sink)?;
        let path = output.persist()?;

        tracing::info!(
            %role,
            path = %path.display(),
            samples = summary.num_samples,
            bytes = summary.file_len(),
            seconds = summary.duration_seconds(),
            "file written"
        );
        Ok((path, summary))
    }
}

/// Generates the request's files into `out_dir` with default settings.
pub fn generate<S>(
    request: &SynthesisRequest,
    out_dir: &Path,
    sink: &mut S,
) -> AudioResult<GenerationResult>
where
    S: ProgressSink + ?Sized,
{
    Generator::new(request, SynthesisSettings::default())?.run(out_dir, sink)
}
