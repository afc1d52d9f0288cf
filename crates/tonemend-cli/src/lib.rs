//! Tonemend CLI library.
//!
//! Command implementations and request loading for the `tonemend` binary.

pub mod commands;
pub mod input;
pub mod logging;
