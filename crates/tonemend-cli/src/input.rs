//! Request loading.
//!
//! A request comes from an optional JSON file with command-line flags
//! layered on top. Both go through the same validating deserializer, so a
//! request that loads is always valid.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tonemend_spec::{ModulationMode, SynthesisRequest};

use crate::commands::InputError;

/// Values given on the command line. `None`/`false` leave the file's value.
#[derive(Debug, Clone, Default)]
pub struct RequestOverrides {
    pub frequency: Option<f64>,
    pub mode: Option<ModulationMode>,
    pub minutes: Option<u32>,
    pub active_alternate: bool,
    pub sham_alternate: bool,
    pub sham: bool,
    pub seed: Option<u32>,
}

impl RequestOverrides {
    fn apply(&self, fields: &mut Map<String, Value>) {
        if let Some(freq) = self.frequency {
            fields.insert("targetFrequencyHz".into(), Value::from(freq));
        }
        if let Some(mode) = self.mode {
            fields.insert("modulationMode".into(), Value::from(mode.as_str()));
        }
        if let Some(minutes) = self.minutes {
            fields.insert("durationMinutes".into(), Value::from(minutes));
        }
        if self.active_alternate {
            fields.insert("useActiveAlternate".into(), Value::Bool(true));
        }
        if self.sham_alternate {
            fields.insert("useShamAlternate".into(), Value::Bool(true));
        }
        if self.sham {
            fields.insert("generateShamFile".into(), Value::Bool(true));
        }
        if let Some(seed) = self.seed {
            fields.insert("seed".into(), Value::from(seed));
        }
    }
}

/// Builds a validated request from an optional file plus overrides.
pub fn load_request(
    path: Option<&Path>,
    overrides: &RequestOverrides,
) -> Result<SynthesisRequest> {
    let mut fields = match path {
        Some(path) => read_request_object(path)?,
        None => Map::new(),
    };
    overrides.apply(&mut fields);

    if !fields.contains_key("targetFrequencyHz") {
        return Err(InputError::new(
            "a target frequency is required (--frequency or targetFrequencyHz)",
        )
        .into());
    }

    let request: SynthesisRequest =
        serde_json::from_value(Value::Object(fields)).context("invalid request")?;
    tracing::debug!(?request, "request loaded");
    Ok(request)
}

fn read_request_object(path: &Path) -> Result<Map<String, Value>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        InputError::new(format!("cannot read request file {}: {}", path.display(), e))
    })?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("request file {} is not valid JSON", path.display()))?;

    match value {
        Value::Object(fields) => Ok(fields),
        _ => Err(InputError::new(format!(
            "request file {} must contain a JSON object",
            path.display()
        ))
        .into()),
    }
}
