//! Error types for the audio backend.

use thiserror::Error;
use tonemend_spec::{BackendError, RequestError};

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur during stimulus generation.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Request rejected before synthesis started.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    /// Engine settings out of range.
    #[error("invalid setting '{name}': {message}")]
    InvalidSettings {
        /// Setting name.
        name: String,
        /// Error message.
        message: String,
    },

    /// The band table has no usable entry for a resolved match key.
    ///
    /// The table is static, so this is a data error and never recoverable
    /// at runtime.
    #[error("band table has no entry for match key {key_khz} kHz")]
    UnmappedBandKey {
        /// The match key in kHz.
        key_khz: f64,
    },

    /// Output could not be opened, written or finalized.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Caller abandoned the request between blocks.
    #[error("generation cancelled")]
    Cancelled,

    /// Internal synthesis invariant violated.
    #[error("synthesis error: {message}")]
    Synthesis {
        /// Error message.
        message: String,
    },
}

impl AudioError {
    /// Creates an invalid settings error.
    pub fn invalid_setting(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a synthesis error.
    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis {
            message: message.into(),
        }
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidRequest(_) => "AUDIO_001",
            AudioError::InvalidSettings { .. } => "AUDIO_002",
            AudioError::UnmappedBandKey { .. } => "AUDIO_003",
            AudioError::Io(_) => "AUDIO_004",
            AudioError::Cancelled => "AUDIO_005",
            AudioError::Synthesis { .. } => "AUDIO_006",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}
