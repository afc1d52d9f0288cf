//! tonemend request and result types
//!
//! This crate holds the typed data model shared by the synthesis backend and
//! any front end that drives it:
//!
//! - [`request`]: validated [`SynthesisRequest`] with builder and JSON form
//! - [`band`]: [`Band`] intervals and the [`Role`] a file plays
//! - [`progress`]: [`ProgressEvent`] emitted between blocks
//! - [`result`]: [`GenerationResult`] descriptor
//! - [`error`]: request error codes and the [`BackendError`] trait
//!
//! # Example
//!
//! ```
//! use tonemend_spec::{ModulationMode, SynthesisRequest};
//!
//! let request = SynthesisRequest::builder(4800.0)
//!     .modulation_mode(ModulationMode::Amplitude)
//!     .duration_minutes(30)
//!     .generate_sham_file(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(request.duration_seconds(), 1800.0);
//! assert!(SynthesisRequest::builder(-1.0).build().is_err());
//! ```

pub mod band;
pub mod error;
pub mod progress;
pub mod request;
pub mod result;

pub use band::{Band, BandSummary, Role};
pub use error::{BackendError, ErrorCode, RequestError};
pub use progress::ProgressEvent;
pub use request::{
    ModulationMode, SynthesisRequest, SynthesisRequestBuilder, DEFAULT_DURATION_MINUTES,
    DEFAULT_SEED, MAX_DURATION_MINUTES, MAX_TARGET_FREQUENCY_HZ, MIN_DURATION_MINUTES,
};
pub use result::GenerationResult;
