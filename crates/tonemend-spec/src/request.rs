//! Synthesis request type, builder and validation.
//!
//! A [`SynthesisRequest`] can only exist in a validated state: the builder
//! checks every field in [`SynthesisRequestBuilder::build`], and JSON input
//! is routed through the same checks via `serde(try_from)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Shortest accepted stimulus, in minutes.
pub const MIN_DURATION_MINUTES: u32 = 5;

/// Longest accepted stimulus, in minutes.
pub const MAX_DURATION_MINUTES: u32 = 120;

/// Duration used when a request does not name one.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Seed used when a request does not name one.
pub const DEFAULT_SEED: u32 = 1;

/// Highest accepted target frequency in Hz; the rounded value must fit a `u32`.
pub const MAX_TARGET_FREQUENCY_HZ: f64 = u32::MAX as f64;

/// How in-band harmonics are modulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModulationMode {
    /// Constant amplitude, phase offset swept over `[0, 2π]`.
    #[default]
    Phase,
    /// Zero phase offset, amplitude swept over `[0, 2]`.
    Amplitude,
}

impl ModulationMode {
    /// Returns the mode as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModulationMode::Phase => "phase",
            ModulationMode::Amplitude => "amplitude",
        }
    }

    /// Returns all modes.
    pub fn all() -> &'static [ModulationMode] {
        &[ModulationMode::Phase, ModulationMode::Amplitude]
    }
}

impl fmt::Display for ModulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModulationMode {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phase" => Ok(ModulationMode::Phase),
            "amplitude" => Ok(ModulationMode::Amplitude),
            _ => Err(RequestError::UnknownModulationMode {
                value: s.to_string(),
            }),
        }
    }
}

/// A validated request to render one stimulus (and optionally its sham).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSynthesisRequest", rename_all = "camelCase")]
pub struct SynthesisRequest {
    target_frequency_hz: f64,
    modulation_mode: ModulationMode,
    duration_minutes: u32,
    use_active_alternate: bool,
    use_sham_alternate: bool,
    generate_sham_file: bool,
    seed: u32,
}

impl SynthesisRequest {
    /// Creates a new request builder for the given target frequency.
    pub fn builder(target_frequency_hz: f64) -> SynthesisRequestBuilder {
        SynthesisRequestBuilder::new(target_frequency_hz)
    }

    /// Parses and validates a request from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Target frequency in Hz (finite, positive).
    pub fn target_frequency_hz(&self) -> f64 {
        self.target_frequency_hz
    }

    /// Target frequency rounded to the nearest whole Hz.
    ///
    /// Exact for every accepted request, since validation caps the frequency
    /// at [`MAX_TARGET_FREQUENCY_HZ`].
    pub fn rounded_frequency_hz(&self) -> u32 {
        self.target_frequency_hz.round() as u32
    }

    /// Modulation mode.
    pub fn modulation_mode(&self) -> ModulationMode {
        self.modulation_mode
    }

    /// Duration in minutes, within `[MIN_DURATION_MINUTES, MAX_DURATION_MINUTES]`.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        f64::from(self.duration_minutes) * 60.0
    }

    /// Whether the active band should use the row's alternate, if any.
    pub fn use_active_alternate(&self) -> bool {
        self.use_active_alternate
    }

    /// Whether the sham band should use the row's alternate, if any.
    pub fn use_sham_alternate(&self) -> bool {
        self.use_sham_alternate
    }

    /// Whether a sham (control) file is rendered after the active file.
    pub fn generate_sham_file(&self) -> bool {
        self.generate_sham_file
    }

    /// Base seed for the per-file sequence generators.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

/// Unvalidated wire form of a request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSynthesisRequest {
    target_frequency_hz: f64,
    #[serde(default)]
    modulation_mode: ModulationMode,
    #[serde(default = "default_duration_minutes")]
    duration_minutes: u32,
    #[serde(default)]
    use_active_alternate: bool,
    #[serde(default)]
    use_sham_alternate: bool,
    #[serde(default)]
    generate_sham_file: bool,
    #[serde(default = "default_seed")]
    seed: u32,
}

fn default_duration_minutes() -> u32 {
    DEFAULT_DURATION_MINUTES
}

fn default_seed() -> u32 {
    DEFAULT_SEED
}

impl TryFrom<RawSynthesisRequest> for SynthesisRequest {
    type Error = RequestError;

    fn try_from(raw: RawSynthesisRequest) -> Result<Self, Self::Error> {
        SynthesisRequest::builder(raw.target_frequency_hz)
            .modulation_mode(raw.modulation_mode)
            .duration_minutes(raw.duration_minutes)
            .use_active_alternate(raw.use_active_alternate)
            .use_sham_alternate(raw.use_sham_alternate)
            .generate_sham_file(raw.generate_sham_file)
            .seed(raw.seed)
            .build()
    }
}

/// Builder for [`SynthesisRequest`].
#[derive(Debug, Clone)]
pub struct SynthesisRequestBuilder {
    target_frequency_hz: f64,
    modulation_mode: ModulationMode,
    duration_minutes: u32,
    use_active_alternate: bool,
    use_sham_alternate: bool,
    generate_sham_file: bool,
    seed: u32,
}

impl SynthesisRequestBuilder {
    /// Creates a builder with documented defaults.
    pub fn new(target_frequency_hz: f64) -> Self {
        Self {
            target_frequency_hz,
            modulation_mode: ModulationMode::default(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            use_active_alternate: false,
            use_sham_alternate: false,
            generate_sham_file: false,
            seed: DEFAULT_SEED,
        }
    }

    /// Sets the modulation mode.
    pub fn modulation_mode(mut self, mode: ModulationMode) -> Self {
        self.modulation_mode = mode;
        self
    }

    /// Sets the duration in minutes.
    pub fn duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Selects the active row's alternate band when one exists.
    pub fn use_active_alternate(mut self, yes: bool) -> Self {
        self.use_active_alternate = yes;
        self
    }

    /// Selects the sham row's alternate band when one exists.
    pub fn use_sham_alternate(mut self, yes: bool) -> Self {
        self.use_sham_alternate = yes;
        self
    }

    /// Requests a sham file in addition to the active file.
    pub fn generate_sham_file(mut self, yes: bool) -> Self {
        self.generate_sham_file = yes;
        self
    }

    /// Sets the base seed.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Validates and builds the request.
    pub fn build(self) -> Result<SynthesisRequest, RequestError> {
        let freq = self.target_frequency_hz;
        if !(freq > 0.0 && freq <= MAX_TARGET_FREQUENCY_HZ) {
            return Err(RequestError::InvalidTargetFrequency {
                value: self.target_frequency_hz,
            });
        }

        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.duration_minutes) {
            return Err(RequestError::DurationOutOfRange {
                value: self.duration_minutes,
                min: MIN_DURATION_MINUTES,
                max: MAX_DURATION_MINUTES,
            });
        }

        Ok(SynthesisRequest {
            target_frequency_hz: self.target_frequency_hz,
            modulation_mode: self.modulation_mode,
            duration_minutes: self.duration_minutes,
            use_active_alternate: self.use_active_alternate,
            use_sham_alternate: self.use_sham_alternate,
            generate_sham_file: self.generate_sham_file,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_defaults() {
        let request = SynthesisRequest::builder(4800.0).build().unwrap();
        assert_eq!(request.target_frequency_hz(), 4800.0);
        assert_eq!(request.modulation_mode(), ModulationMode::Phase);
        assert_eq!(request.duration_minutes(), DEFAULT_DURATION_MINUTES);
        assert!(!request.use_active_alternate());
        assert!(!request.use_sham_alternate());
        assert!(!request.generate_sham_file());
        assert_eq!(request.seed(), DEFAULT_SEED);
    }

    #[test]
    fn test_rejects_bad_frequencies() {
        for freq in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = SynthesisRequest::builder(freq).build().unwrap_err();
            assert!(
                matches!(err, RequestError::InvalidTargetFrequency { .. }),
                "{freq} should be rejected"
            );
        }
    }

    #[test]
    fn test_duration_bounds_are_inclusive() {
        for minutes in [MIN_DURATION_MINUTES, MAX_DURATION_MINUTES] {
            assert!(SynthesisRequest::builder(1000.0)
                .duration_minutes(minutes)
                .build()
                .is_ok());
        }
        for minutes in [0, 4, 121] {
            let err = SynthesisRequest::builder(1000.0)
                .duration_minutes(minutes)
                .build()
                .unwrap_err();
            assert_eq!(
                err,
                RequestError::DurationOutOfRange {
                    value: minutes,
                    min: 5,
                    max: 120
                }
            );
        }
    }

    #[test]
    fn test_rounded_frequency() {
        let request = SynthesisRequest::builder(4799.6).build().unwrap();
        assert_eq!(request.rounded_frequency_hz(), 4800);
    }

    #[test]
    fn test_frequency_upper_bound() {
        let top = SynthesisRequest::builder(MAX_TARGET_FREQUENCY_HZ).build().unwrap();
        assert_eq!(top.rounded_frequency_hz(), u32::MAX);

        for freq in [MAX_TARGET_FREQUENCY_HZ + 1.0, 5.0e9, 1.0e300] {
            let err = SynthesisRequest::builder(freq).build().unwrap_err();
            assert_eq!(err, RequestError::InvalidTargetFrequency { value: freq });
        }

        let err = SynthesisRequest::from_json(r#"{"targetFrequencyHz": 1e12}"#).unwrap_err();
        assert!(err.to_string().contains("E001"));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("phase".parse::<ModulationMode>().unwrap(), ModulationMode::Phase);
        assert_eq!(
            " Amplitude ".parse::<ModulationMode>().unwrap(),
            ModulationMode::Amplitude
        );
        assert!("fm".parse::<ModulationMode>().is_err());
    }

    #[test]
    fn test_json_round_trip_uses_camel_case() {
        let request = SynthesisRequest::builder(6000.0)
            .modulation_mode(ModulationMode::Amplitude)
            .duration_minutes(30)
            .generate_sham_file(true)
            .seed(7)
            .build()
            .unwrap();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["targetFrequencyHz"], 6000.0);
        assert_eq!(value["modulationMode"], "amplitude");
        assert_eq!(value["durationMinutes"], 30);
        assert_eq!(value["generateShamFile"], true);

        let parsed: SynthesisRequest = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn test_json_applies_defaults() {
        let request = SynthesisRequest::from_json(r#"{"targetFrequencyHz": 1050}"#).unwrap();
        assert_eq!(request.modulation_mode(), ModulationMode::Phase);
        assert_eq!(request.duration_minutes(), DEFAULT_DURATION_MINUTES);
        assert_eq!(request.seed(), DEFAULT_SEED);
    }

    #[test]
    fn test_json_validation_is_eager() {
        let err = SynthesisRequest::from_json(
            r#"{"targetFrequencyHz": 1050, "durationMinutes": 200}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("E002"));

        let err = SynthesisRequest::from_json(r#"{"targetFrequencyHz": -5}"#).unwrap_err();
        assert!(err.to_string().contains("E001"));
    }

    #[test]
    fn test_json_rejects_unknown_fields_and_modes() {
        assert!(SynthesisRequest::from_json(
            r#"{"targetFrequencyHz": 1050, "modulationMode": "fm"}"#
        )
        .is_err());
        assert!(
            SynthesisRequest::from_json(r#"{"targetFrequencyHz": 1050, "volume": 3}"#).is_err()
        );
    }
}
