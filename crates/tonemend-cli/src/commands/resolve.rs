//! Resolve command implementation
//!
//! Shows which bands a target frequency maps to without rendering anything.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde_json::{json, Value};
use tonemend_backend_audio::resolve_bands;
use tonemend_spec::{Band, BandSummary, SynthesisRequest};

/// Run the resolve command
///
/// # Arguments
/// * `frequency` - Target frequency in Hz
/// * `active_alternate` - Use the active alternate band when the row has one
/// * `sham_alternate` - Use the sham alternate band when the row has one
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(
    frequency: f64,
    active_alternate: bool,
    sham_alternate: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let value = resolve_json(frequency, active_alternate, sham_alternate)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {} Hz", "Target:".cyan().bold(), frequency);
    println!("{} {} kHz", "Match key:".dimmed(), value["keyKhz"]);
    println!("{} {}", "Active band:".green().bold(), band_line(&value["active"]));
    println!("{} {}", "Sham band:".yellow().bold(), band_line(&value["sham"]));
    Ok(ExitCode::SUCCESS)
}

/// Resolution as JSON: `{targetFrequencyHz, keyKhz, active, sham}`.
pub fn resolve_json(frequency: f64, active_alternate: bool, sham_alternate: bool) -> Result<Value> {
    let request = SynthesisRequest::builder(frequency)
        .use_active_alternate(active_alternate)
        .use_sham_alternate(sham_alternate)
        .generate_sham_file(true)
        .build()?;
    let resolved = resolve_bands(&request)?;

    Ok(json!({
        "targetFrequencyHz": request.rounded_frequency_hz(),
        "keyKhz": resolved.key_khz,
        "active": summary(resolved.active),
        "sham": resolved.sham.map(summary),
    }))
}

fn summary(band: &Band) -> BandSummary {
    BandSummary::from(band)
}

fn band_line(value: &Value) -> String {
    format!(
        "{} ({} - {} Hz)",
        value["name"].as_str().unwrap_or("-"),
        value["lowHz"],
        value["highHz"]
    )
}
