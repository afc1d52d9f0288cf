//! CLI argument definitions for the tonemend command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tonemend_spec::ModulationMode;

/// Tonemend - Band-modulated stimulus generator
#[derive(Parser)]
#[command(name = "tonemend")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render the active (and optionally sham) stimulus for a target frequency
    Generate {
        /// Target frequency in Hz
        #[arg(short, long)]
        frequency: Option<f64>,

        /// Modulation applied inside the band (phase or amplitude)
        #[arg(short, long)]
        mode: Option<ModulationMode>,

        /// Duration in minutes (5-120)
        #[arg(long)]
        minutes: Option<u32>,

        /// Use the contingency band for the active file
        #[arg(long)]
        active_alternate: bool,

        /// Use the contingency band for the sham file
        #[arg(long)]
        sham_alternate: bool,

        /// Also render a sham file
        #[arg(long)]
        sham: bool,

        /// Base seed for the per-file generators
        #[arg(long)]
        seed: Option<u32>,

        /// JSON request file; flags override its values
        #[arg(short, long)]
        request: Option<PathBuf>,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Render only this many seconds per file, for auditioning
        #[arg(long)]
        preview_seconds: Option<f64>,

        /// Output machine-readable JSON lines (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the band list and reference-key table
    Bands {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which bands a target frequency maps to
    Resolve {
        /// Target frequency in Hz
        #[arg(short, long)]
        frequency: f64,

        /// Use the contingency band for the active file
        #[arg(long)]
        active_alternate: bool,

        /// Use the contingency band for the sham file
        #[arg(long)]
        sham_alternate: bool,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a WAV file's header and print its PCM hash
    Inspect {
        /// Path to the WAV file
        file: PathBuf,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}
