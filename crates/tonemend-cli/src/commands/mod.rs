//! CLI command implementations

pub mod bands;
pub mod generate;
pub mod inspect;
pub mod resolve;

use std::process::ExitCode;

use thiserror::Error;
use tonemend_backend_audio::AudioError;
use tonemend_spec::RequestError;

/// Exit code for success.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code for a rejected request or unusable input file.
pub const EXIT_INVALID_INPUT: u8 = 1;

/// Exit code for a failure while generating or writing output.
pub const EXIT_FAILURE: u8 = 2;

/// Input the user supplied could not be used.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct InputError {
    message: String,
}

impl InputError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Maps an error to the process exit code.
///
/// Anything traceable to bad input exits with 1, everything else with 2.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if cause.is::<InputError>()
            || cause.is::<RequestError>()
            || cause.is::<serde_json::Error>()
        {
            return EXIT_INVALID_INPUT;
        }
        if let Some(audio) = cause.downcast_ref::<AudioError>() {
            return match audio {
                AudioError::InvalidRequest(_) | AudioError::InvalidSettings { .. } => {
                    EXIT_INVALID_INPUT
                }
                _ => EXIT_FAILURE,
            };
        }
    }
    EXIT_FAILURE
}

/// Exit code for a check that found problems in user input.
pub(crate) fn invalid_input() -> ExitCode {
    ExitCode::from(EXIT_INVALID_INPUT)
}
