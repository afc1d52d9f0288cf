//! Frequency band types.

use serde::{Deserialize, Serialize};

/// A frequency interval targeted for in-band modulation.
///
/// Bands are static data; `low_hz < high_hz` always holds and neighbouring
/// bands overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    /// Display name, e.g. "1–2 kHz".
    pub name: &'static str,
    /// Lower edge in Hz (inclusive).
    pub low_hz: f64,
    /// Upper edge in Hz (inclusive).
    pub high_hz: f64,
}

impl Band {
    /// Creates a band.
    pub const fn new(name: &'static str, low_hz: f64, high_hz: f64) -> Self {
        Self {
            name,
            low_hz,
            high_hz,
        }
    }

    /// Geometric (log) centre, `sqrt(low * high)`.
    pub fn center_hz(&self) -> f64 {
        (self.low_hz * self.high_hz).sqrt()
    }

    /// Whether `freq_hz` lies in the band, both edges included.
    pub fn contains(&self, freq_hz: f64) -> bool {
        freq_hz >= self.low_hz && freq_hz <= self.high_hz
    }
}

/// Owned band description as it appears in results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandSummary {
    /// Display name.
    pub name: String,
    /// Lower edge in Hz.
    pub low_hz: f64,
    /// Upper edge in Hz.
    pub high_hz: f64,
}

impl From<&Band> for BandSummary {
    fn from(band: &Band) -> Self {
        Self {
            name: band.name.to_string(),
            low_hz: band.low_hz,
            high_hz: band.high_hz,
        }
    }
}

/// Which output stream a band or file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The stimulus matched to the target frequency.
    Active,
    /// The control stimulus.
    Sham,
}

impl Role {
    /// Returns the role as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Active => "active",
            Role::Sham => "sham",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAND: Band = Band::new("2–4 kHz", 2000.0, 4000.0);

    #[test]
    fn test_center_is_geometric() {
        assert!((BAND.center_hz() - 2828.427).abs() < 1e-3);
    }

    #[test]
    fn test_contains_is_inclusive() {
        assert!(BAND.contains(2000.0));
        assert!(BAND.contains(4000.0));
        assert!(BAND.contains(3000.0));
        assert!(!BAND.contains(1999.999));
        assert!(!BAND.contains(4000.001));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let value = serde_json::to_value(BandSummary::from(&BAND)).unwrap();
        assert_eq!(value["name"], "2–4 kHz");
        assert_eq!(value["lowHz"], 2000.0);
        assert_eq!(value["highHz"], 4000.0);
    }

    #[test]
    fn test_role_names() {
        assert_eq!(Role::Active.to_string(), "active");
        assert_eq!(serde_json::to_value(Role::Sham).unwrap(), "sham");
    }
}
