//! Harmonic series within the carrier limits.

use std::ops::RangeInclusive;

use tonemend_spec::Band;

/// Lowest carrier frequency in Hz.
pub const CARRIER_LOW_HZ: f64 = 1000.0;

/// Highest carrier frequency in Hz.
pub const CARRIER_HIGH_HZ: f64 = 16000.0;

/// Harmonic numbers `n` with `n * f0` inside the carrier limits.
///
/// Returns `None` when no multiple of `f0` fits.
pub fn harmonic_range(fundamental_hz: f64) -> Option<RangeInclusive<u32>> {
    let n_min = (CARRIER_LOW_HZ / fundamental_hz).ceil();
    let n_max = (CARRIER_HIGH_HZ / fundamental_hz).floor();

    if !n_min.is_finite() || !n_max.is_finite() || n_min < 1.0 || n_max < n_min {
        return None;
    }

    Some(n_min as u32..=n_max as u32)
}

/// One carrier component of a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    /// Harmonic number.
    pub number: u32,
    /// Frequency in Hz.
    pub freq_hz: f64,
    /// Whether the harmonic is modulated.
    pub in_band: bool,
}

/// Lists the harmonics of `f0` and marks which fall inside `band`.
pub fn harmonic_plan(fundamental_hz: f64, band: &Band) -> Vec<Harmonic> {
    harmonic_range(fundamental_hz)
        .map(|range| {
            range
                .map(|number| {
                    let freq_hz = f64::from(number) * fundamental_hz;
                    Harmonic {
                        number,
                        freq_hz,
                        in_band: band.contains(freq_hz),
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_at_fundamental_extremes() {
        assert_eq!(harmonic_range(96.0), Some(11..=166));
        assert_eq!(harmonic_range(256.0), Some(4..=62));
        assert_eq!(harmonic_range(100.0), Some(10..=160));
    }

    #[test]
    fn test_range_stays_within_limits() {
        let mut f0 = 96.0;
        while f0 < 256.0 {
            let range = harmonic_range(f0).expect("non-empty");
            assert!(f64::from(*range.start()) * f0 >= CARRIER_LOW_HZ);
            assert!(f64::from(*range.end()) * f0 <= CARRIER_HIGH_HZ);
            assert!(f64::from(*range.start() - 1) * f0 < CARRIER_LOW_HZ);
            assert!(f64::from(*range.end() + 1) * f0 > CARRIER_HIGH_HZ);
            f0 += 0.37;
        }
    }

    #[test]
    fn test_empty_range() {
        assert_eq!(harmonic_range(20_000.0), None);
        assert_eq!(harmonic_range(0.0), None);
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        let band = Band::new("2–4 kHz", 2000.0, 4000.0);
        let plan = harmonic_plan(250.0, &band);

        let find = |n: u32| plan.iter().find(|h| h.number == n).copied().unwrap();
        assert_eq!(find(8).freq_hz, 2000.0);
        assert!(find(8).in_band, "low edge");
        assert_eq!(find(16).freq_hz, 4000.0);
        assert!(find(16).in_band, "high edge");
        assert!(!find(7).in_band);
        assert!(!find(17).in_band);

        assert_eq!(plan.iter().filter(|h| h.in_band).count(), 9);
    }
}
