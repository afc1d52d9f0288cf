//! Bands command implementation
//!
//! Prints the band list and the reference-key table.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde_json::{json, Value};
use tonemend_backend_audio::bands::{BandTableRow, BANDS, BAND_TABLE};
use tonemend_spec::BandSummary;

/// Run the bands command
pub fn run(json_output: bool) -> Result<ExitCode> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(&table_json())?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Bands".cyan().bold());
    for (index, band) in BANDS.iter().enumerate() {
        println!(
            "  {} {:<14} {:>6.0} - {:>6.0} Hz",
            format!("[{index}]").dimmed(),
            band.name,
            band.low_hz,
            band.high_hz
        );
    }

    println!();
    println!(
        "{}",
        format!(
            "{:>7}  {:<14} {:<14} {:<14} {:<14}",
            "key", "active", "active alt", "sham", "sham alt"
        )
        .cyan()
        .bold()
    );
    for row in &BAND_TABLE {
        println!(
            "{:>4} kHz  {:<14} {:<14} {:<14} {:<14}",
            row.key_khz,
            band_name(Some(row.active_preferred)),
            band_name(row.active_alternate),
            band_name(Some(row.sham_preferred)),
            band_name(row.sham_alternate),
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn band_name(index: Option<usize>) -> &'static str {
    index
        .and_then(|i| BANDS.get(i))
        .map(|band| band.name)
        .unwrap_or("-")
}

fn band_json(index: Option<usize>) -> Value {
    match index.and_then(|i| BANDS.get(i)) {
        Some(band) => json!(BandSummary::from(band)),
        None => Value::Null,
    }
}

fn row_json(row: &BandTableRow) -> Value {
    json!({
        "keyKhz": row.key_khz,
        "activePreferred": band_json(Some(row.active_preferred)),
        "activeAlternate": band_json(row.active_alternate),
        "shamPreferred": band_json(Some(row.sham_preferred)),
        "shamAlternate": band_json(row.sham_alternate),
    })
}

/// The whole table as JSON.
pub fn table_json() -> Value {
    json!({
        "bands": BANDS.iter().map(BandSummary::from).collect::<Vec<_>>(),
        "rows": BAND_TABLE.iter().map(row_json).collect::<Vec<_>>(),
    })
}
