//! Band table and target-frequency mapping.
//!
//! Seven one-octave bands, spaced half an octave apart, cover 1–16 kHz. A
//! target frequency is snapped to the nearest of seventeen reference keys,
//! and that key's row names the preferred and alternate band for the active
//! and sham roles.

use tonemend_spec::{Band, Role, SynthesisRequest};

use crate::error::{AudioError, AudioResult};

/// Ordered band list, lowest first.
pub static BANDS: [Band; 7] = [
    Band::new("1–2 kHz", 1000.0, 2000.0),
    Band::new("1.4–2.8 kHz", 1414.0, 2828.0),
    Band::new("2–4 kHz", 2000.0, 4000.0),
    Band::new("2.8–5.7 kHz", 2828.0, 5657.0),
    Band::new("4–8 kHz", 4000.0, 8000.0),
    Band::new("5.7–11.3 kHz", 5657.0, 11314.0),
    Band::new("8–16 kHz", 8000.0, 16000.0),
];

/// One reference key and the band indices it maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandTableRow {
    /// Reference frequency in kHz.
    pub key_khz: f64,
    /// Band used for the active file by default.
    pub active_preferred: usize,
    /// Contingency band for the active file.
    pub active_alternate: Option<usize>,
    /// Band used for the sham file by default.
    pub sham_preferred: usize,
    /// Contingency band for the sham file.
    pub sham_alternate: Option<usize>,
}

const fn row(
    key_khz: f64,
    active_preferred: usize,
    active_alternate: Option<usize>,
    sham_preferred: usize,
    sham_alternate: Option<usize>,
) -> BandTableRow {
    BandTableRow {
        key_khz,
        active_preferred,
        active_alternate,
        sham_preferred,
        sham_alternate,
    }
}

/// Reference rows in lookup order. Earlier rows win distance ties.
pub static BAND_TABLE: [BandTableRow; 17] = [
    row(1.0, 0, None, 4, Some(5)),
    row(1.5, 0, Some(1), 4, Some(5)),
    row(2.0, 1, Some(2), 5, Some(6)),
    row(2.5, 2, Some(1), 5, Some(6)),
    row(3.0, 2, Some(3), 6, Some(5)),
    row(3.5, 3, Some(2), 6, None),
    row(4.0, 3, Some(4), 6, Some(0)),
    row(4.5, 3, Some(4), 0, Some(6)),
    row(5.0, 4, Some(3), 0, Some(1)),
    row(5.5, 4, Some(3), 0, Some(1)),
    row(6.0, 4, Some(5), 0, Some(1)),
    row(7.0, 5, Some(4), 1, Some(0)),
    row(8.0, 5, Some(6), 1, Some(2)),
    row(9.0, 5, Some(6), 2, Some(1)),
    row(10.0, 6, Some(5), 2, Some(1)),
    row(12.0, 6, None, 2, Some(3)),
    row(14.0, 6, None, 3, Some(2)),
];

/// Returns the reference key (kHz) nearest to `freq_hz`.
///
/// Ties go to the key that comes first in [`BAND_TABLE`].
pub fn resolve_match_key(freq_hz: f64) -> f64 {
    let target_khz = freq_hz / 1000.0;
    let mut best = BAND_TABLE[0].key_khz;
    let mut best_distance = (best - target_khz).abs();

    for entry in &BAND_TABLE[1..] {
        let distance = (entry.key_khz - target_khz).abs();
        if distance < best_distance {
            best = entry.key_khz;
            best_distance = distance;
        }
    }

    best
}

/// Looks up the row for an exact match key.
pub fn table_row(key_khz: f64) -> AudioResult<&'static BandTableRow> {
    BAND_TABLE
        .iter()
        .find(|entry| entry.key_khz == key_khz)
        .ok_or(AudioError::UnmappedBandKey { key_khz })
}

/// Picks the band index for `role`: the alternate only if requested and present.
pub fn select_band_index(row: &BandTableRow, role: Role, use_alternate: bool) -> usize {
    let (preferred, alternate) = match role {
        Role::Active => (row.active_preferred, row.active_alternate),
        Role::Sham => (row.sham_preferred, row.sham_alternate),
    };

    match alternate {
        Some(index) if use_alternate => index,
        _ => preferred,
    }
}

/// Picks the band for `role` from a row.
pub fn select_band(
    row: &BandTableRow,
    role: Role,
    use_alternate: bool,
) -> AudioResult<&'static Band> {
    let index = select_band_index(row, role, use_alternate);
    BANDS.get(index).ok_or(AudioError::UnmappedBandKey {
        key_khz: row.key_khz,
    })
}

/// Bands chosen for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBands {
    /// Match key the target frequency snapped to.
    pub key_khz: f64,
    /// Band modulated in the active file.
    pub active: &'static Band,
    /// Band modulated in the sham file, only when one was requested.
    pub sham: Option<&'static Band>,
}

/// Resolves the active band and, if requested, the sham band.
///
/// # Arguments
/// * `request` - Validated request; its frequency picks the table row and its
///   flags pick preferred or alternate bands
///
/// # Returns
/// The match key and selected bands, or [`AudioError::UnmappedBandKey`] if the
/// key has no row
pub fn resolve_bands(request: &SynthesisRequest) -> AudioResult<ResolvedBands> {
    let key_khz = resolve_match_key(request.target_frequency_hz());
    let row = table_row(key_khz)?;

    let active = select_band(row, Role::Active, request.use_active_alternate())?;
    let sham = if request.generate_sham_file() {
        Some(select_band(row, Role::Sham, request.use_sham_alternate())?)
    } else {
        None
    };

    Ok(ResolvedBands {
        key_khz,
        active,
        sham,
    })
}
