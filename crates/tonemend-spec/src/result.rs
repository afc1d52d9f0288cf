//! Result descriptor returned after a successful generation.

use serde::{Deserialize, Serialize};

use crate::band::BandSummary;
use crate::request::ModulationMode;

/// Describes the files produced for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Identifier (file name) of the active stimulus.
    pub active: String,
    /// Identifier of the sham stimulus, if one was requested.
    pub sham: Option<String>,
    /// Target frequency rounded to whole Hz.
    pub target_frequency_hz: u32,
    /// Modulation mode used for both files.
    pub modulation_mode: ModulationMode,
    /// Requested duration.
    pub duration_minutes: u32,
    /// Band modulated in the active file.
    pub active_band: BandSummary,
    /// Band modulated in the sham file.
    pub sham_band: Option<BandSummary>,
    /// Base seed the per-file seeds were derived from.
    pub seed: u32,
    /// BLAKE3 hash of the active file's PCM payload.
    pub active_pcm_hash: String,
    /// BLAKE3 hash of the sham file's PCM payload.
    pub sham_pcm_hash: Option<String>,
    /// Samples written per file.
    pub total_samples: u64,
}

impl GenerationResult {
    /// Serializes the result to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
