//! Inspect command implementation
//!
//! Checks a WAV file's header against its size and prints the PCM hash.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde_json::{json, Value};
use tonemend_backend_audio::wav::{compute_pcm_hash, WavHeader};

use super::{invalid_input, InputError};

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 if the header is consistent, 1 otherwise
pub fn run(path: &Path, json_output: bool) -> Result<ExitCode> {
    let report = inspect_file(path)?;
    let problems = report["problems"].as_array().map_or(0, Vec::len);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} {}", "Inspecting:".cyan().bold(), path.display());
        println!(
            "  {} {} ch, {} Hz, {} bit",
            "format:".dimmed(),
            report["channels"],
            report["sampleRate"],
            report["bitsPerSample"]
        );
        println!(
            "  {} {} samples ({:.3} s)",
            "length:".dimmed(),
            report["numSamples"],
            report["durationSeconds"].as_f64().unwrap_or_default()
        );
        println!(
            "  {} {}",
            "pcm hash:".dimmed(),
            report["pcmHash"].as_str().unwrap_or("-")
        );
        if let Some(list) = report["problems"].as_array() {
            for problem in list {
                println!(
                    "  {} {}",
                    "problem:".red().bold(),
                    problem.as_str().unwrap_or_default()
                );
            }
        }
        if problems == 0 {
            println!("{}", "Header OK".green().bold());
        }
    }

    if problems == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(invalid_input())
    }
}

/// Reads and checks a WAV file, returning the report as JSON.
pub fn inspect_file(path: &Path) -> Result<Value> {
    let bytes = std::fs::read(path)
        .map_err(|e| InputError::new(format!("cannot read {}: {}", path.display(), e)))?;
    let header = WavHeader::parse(&bytes).ok_or_else(|| {
        InputError::new(format!("{} is not a PCM WAV file", path.display()))
    })?;

    Ok(json!({
        "path": path.display().to_string(),
        "channels": header.format.channels,
        "sampleRate": header.format.sample_rate,
        "bitsPerSample": header.format.bits_per_sample,
        "byteRate": header.byte_rate,
        "blockAlign": header.block_align,
        "dataBytes": header.data_bytes,
        "numSamples": header.num_samples(),
        "durationSeconds": header.duration_seconds(),
        "pcmHash": compute_pcm_hash(&bytes),
        "problems": header.check(bytes.len() as u64),
    }))
}
