//! Error types for request validation and backend reporting.

use thiserror::Error;

/// Error codes for request validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Target frequency is non-finite, not positive or too large
    InvalidTargetFrequency,
    /// E002: Duration outside the supported minute range
    DurationOutOfRange,
    /// E003: Unknown modulation mode name
    UnknownModulationMode,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidTargetFrequency => "E001",
            ErrorCode::DurationOutOfRange => "E002",
            ErrorCode::UnknownModulationMode => "E003",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A rejected synthesis request.
///
/// Requests are validated before any synthesis starts, so these errors never
/// leave partial output behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// Target frequency is NaN, not positive, or above the accepted maximum.
    #[error("{code}: target frequency must be positive and at most {max} Hz, got {value}", code = ErrorCode::InvalidTargetFrequency, max = crate::request::MAX_TARGET_FREQUENCY_HZ)]
    InvalidTargetFrequency {
        /// The rejected value in Hz.
        value: f64,
    },

    /// Duration outside `[min, max]` minutes.
    #[error("{code}: duration must be between {min} and {max} minutes, got {value}", code = ErrorCode::DurationOutOfRange)]
    DurationOutOfRange {
        /// The rejected duration in minutes.
        value: u32,
        /// Smallest accepted duration.
        min: u32,
        /// Largest accepted duration.
        max: u32,
    },

    /// Modulation mode name not recognised.
    #[error("{code}: unknown modulation mode '{value}' (expected phase or amplitude)", code = ErrorCode::UnknownModulationMode)]
    UnknownModulationMode {
        /// The rejected name.
        value: String,
    },
}

impl RequestError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RequestError::InvalidTargetFrequency { .. } => ErrorCode::InvalidTargetFrequency,
            RequestError::DurationOutOfRange { .. } => ErrorCode::DurationOutOfRange,
            RequestError::UnknownModulationMode { .. } => ErrorCode::UnknownModulationMode,
        }
    }
}

/// Common trait for backend errors.
///
/// Gives callers a stable code and category to report without depending on
/// the concrete backend error type.
///
/// # Example
///
/// ```ignore
/// use tonemend_spec::error::BackendError;
///
/// fn handle_error<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "AUDIO_001". Codes are stable and can
    /// be matched on programmatically.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}
