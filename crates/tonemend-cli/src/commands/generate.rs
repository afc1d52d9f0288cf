//! Generate command implementation
//!
//! Renders the active (and optionally sham) stimulus for one request.

use std::io::Write;
use std::ops::ControlFlow;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use tonemend_backend_audio::{Generator, SynthesisSettings};
use tonemend_spec::{GenerationResult, ProgressEvent, SynthesisRequest};

use crate::input::{load_request, RequestOverrides};

/// Options for one generate run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions<'a> {
    /// Optional JSON request file.
    pub request_file: Option<&'a Path>,
    /// Flags layered over the file.
    pub overrides: RequestOverrides,
    /// Directory the files are written to.
    pub out_dir: Option<&'a Path>,
    /// Render only this many seconds per file.
    pub preview_seconds: Option<f64>,
    /// Emit JSON lines instead of colored output.
    pub json: bool,
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 on success; errors map to 1 (bad input) or 2 (failure)
pub fn run(options: &GenerateOptions<'_>) -> Result<ExitCode> {
    let request = load_request(options.request_file, &options.overrides)?;
    let out_dir = options.out_dir.unwrap_or_else(|| Path::new("."));

    if !options.json {
        println!(
            "{} {} Hz, {}, {} min{}",
            "Generating:".cyan().bold(),
            request.rounded_frequency_hz(),
            request.modulation_mode(),
            request.duration_minutes(),
            if request.generate_sham_file() { " + sham" } else { "" }
        );
    }

    let start = Instant::now();
    let result = if options.json {
        render(&request, out_dir, options.preview_seconds, &mut json_progress)?
    } else {
        let mut last_percent = None;
        let mut sink = |event: &ProgressEvent| human_progress(event, &mut last_percent);
        let result = render(&request, out_dir, options.preview_seconds, &mut sink);
        eprintln!();
        result?
    };

    if options.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        print_result(&result, start.elapsed().as_secs_f64());
    }
    Ok(ExitCode::SUCCESS)
}

/// Renders `request` into `out_dir`, reporting to `sink`.
pub fn render<F>(
    request: &SynthesisRequest,
    out_dir: &Path,
    preview_seconds: Option<f64>,
    sink: &mut F,
) -> Result<GenerationResult>
where
    F: FnMut(&ProgressEvent) -> ControlFlow<()>,
{
    let mut generator = Generator::new(request, SynthesisSettings::default())?;
    if let Some(seconds) = preview_seconds {
        generator = generator.with_duration_seconds(seconds)?;
    }

    generator
        .run(out_dir, sink)
        .with_context(|| format!("failed to generate into {}", out_dir.display()))
}

fn json_progress(event: &ProgressEvent) -> ControlFlow<()> {
    match serde_json::to_string(event) {
        Ok(line) => {
            let mut stdout = std::io::stdout().lock();
            // A closed stdout stops the run.
            if writeln!(stdout, "{line}").is_err() {
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        }
        Err(_) => ControlFlow::Continue(()),
    }
}

fn human_progress(event: &ProgressEvent, last_percent: &mut Option<u32>) -> ControlFlow<()> {
    let percent = (event.fraction * 100.0).floor() as u32;
    if *last_percent != Some(percent) {
        *last_percent = Some(percent);
        eprint!(
            "\r  {} {:>3}% ({} {}/{})",
            "progress".dimmed(),
            percent,
            event.role,
            event.blocks_completed,
            event.total_blocks
        );
    }
    ControlFlow::Continue(())
}

fn print_result(result: &GenerationResult, elapsed: f64) {
    println!(
        "{} {} ({})",
        "Active:".green().bold(),
        result.active,
        result.active_band.name
    );
    if let (Some(sham), Some(band)) = (&result.sham, &result.sham_band) {
        println!("{} {} ({})", "Sham:".yellow().bold(), sham, band.name);
    }
    println!(
        "{} {} samples per file, seed {}",
        "Length:".dimmed(),
        result.total_samples,
        result.seed
    );
    println!("{} {}", "PCM hash:".dimmed(), result.active_pcm_hash);
    println!("{} {:.2}s", "Done in".dimmed(), elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_preview_files() {
        let dir = tempfile::tempdir().unwrap();
        let request = load_request(
            None,
            &RequestOverrides {
                frequency: Some(6000.0),
                minutes: Some(5),
                sham: true,
                ..Default::default()
            },
        )
        .unwrap();

        let mut events = 0;
        let mut sink = |_: &ProgressEvent| {
            events += 1;
            ControlFlow::Continue(())
        };
        let result = render(&request, dir.path(), Some(1.0), &mut sink).unwrap();

        // a single one-second block per file
        assert_eq!(events, 2);
        assert_eq!(result.total_samples, 44_100);
        assert_eq!(result.active_band.name, "4–8 kHz");
        assert_eq!(result.sham_band.map(|b| b.name), Some("1–2 kHz".to_string()));
        assert!(Path::new(&result.active).exists());
        assert!(result.active.ends_with("tonemend_6000hz_phase_5min_active.wav"));
    }

    #[test]
    fn test_render_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let request = load_request(
            None,
            &RequestOverrides {
                frequency: Some(2000.0),
                minutes: Some(5),
                ..Default::default()
            },
        )
        .unwrap();

        let mut sink = |_: &ProgressEvent| ControlFlow::Break(());
        let err = render(&request, dir.path(), Some(1.0), &mut sink).unwrap_err();

        assert_eq!(super::super::exit_code_for(&err), super::super::EXIT_FAILURE);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_bad_preview_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let request = load_request(
            None,
            &RequestOverrides {
                frequency: Some(2000.0),
                minutes: Some(5),
                ..Default::default()
            },
        )
        .unwrap();

        for seconds in [f64::NAN, 0.0, -3.0] {
            let mut sink = |_: &ProgressEvent| ControlFlow::Continue(());
            let err = render(&request, dir.path(), Some(seconds), &mut sink).unwrap_err();
            assert_eq!(
                super::super::exit_code_for(&err),
                super::super::EXIT_INVALID_INPUT,
                "{seconds}"
            );
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_human_progress_prints_on_change() {
        let mut last = None;
        let event = ProgressEvent::new(tonemend_spec::Role::Active, 1, 4, false);
        assert_eq!(human_progress(&event, &mut last), ControlFlow::Continue(()));
        assert_eq!(last, Some(25));
    }
}
