//! Canonical 44-byte RIFF/WAVE header.

use std::io::{self, Write};

use super::format::WavFormat;

/// Size of the canonical PCM header in bytes.
pub const HEADER_LEN: usize = 44;

/// Offset of the RIFF chunk size field.
pub(crate) const RIFF_SIZE_OFFSET: u64 = 4;

/// Offset of the data chunk size field.
pub(crate) const DATA_SIZE_OFFSET: u64 = 40;

/// Largest payload whose RIFF size still fits in 32 bits.
pub const MAX_DATA_BYTES: u64 = u32::MAX as u64 - 36;

/// RIFF chunk size for a given payload length.
pub fn riff_chunk_size(data_bytes: u32) -> u32 {
    36 + data_bytes
}

/// Writes the header for a payload of `data_bytes` bytes.
pub fn write_header<W: Write>(
    writer: &mut W,
    format: &WavFormat,
    data_bytes: u32,
) -> io::Result<()> {
    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_chunk_size(data_bytes).to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_bytes.to_le_bytes())?;

    Ok(())
}

/// Fields read back from a canonical header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Format parameters.
    pub format: WavFormat,
    /// Declared byte rate.
    pub byte_rate: u32,
    /// Declared block align.
    pub block_align: u16,
    /// Declared RIFF chunk size.
    pub riff_chunk_size: u32,
    /// Declared data chunk size.
    pub data_bytes: u32,
}

impl WavHeader {
    /// Parses a canonical 44-byte PCM header.
    ///
    /// Returns `None` for anything that is not RIFF/WAVE with a 16-byte PCM
    /// `fmt ` chunk followed directly by `data`.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_LEN {
            return None;
        }
        if &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return None;
        }
        if &bytes[12..16] != b"fmt " || &bytes[36..40] != b"data" {
            return None;
        }

        let u16_at = |pos: usize| u16::from_le_bytes([bytes[pos], bytes[pos + 1]]);
        let u32_at = |pos: usize| {
            u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
        };

        if u32_at(16) != 16 || u16_at(20) != 1 {
            return None;
        }

        Some(Self {
            format: WavFormat {
                channels: u16_at(22),
                sample_rate: u32_at(24),
                bits_per_sample: u16_at(34),
            },
            byte_rate: u32_at(28),
            block_align: u16_at(32),
            riff_chunk_size: u32_at(4),
            data_bytes: u32_at(40),
        })
    }

    /// Checks the header's arithmetic against the real file length.
    ///
    /// Returns a list of human-readable problems; empty means consistent.
    pub fn check(&self, file_len: u64) -> Vec<String> {
        let mut problems = Vec::new();

        if self.byte_rate != self.format.byte_rate() {
            problems.push(format!(
                "byte rate {} != sample rate x block align ({})",
                self.byte_rate,
                self.format.byte_rate()
            ));
        }
        if self.block_align != self.format.block_align() {
            problems.push(format!(
                "block align {} != channels x bytes per sample ({})",
                self.block_align,
                self.format.block_align()
            ));
        }
        let payload = file_len.saturating_sub(HEADER_LEN as u64);
        if u64::from(self.data_bytes) != payload {
            problems.push(format!(
                "data size {} != file size - 44 ({})",
                self.data_bytes, payload
            ));
        }
        if u64::from(self.riff_chunk_size) != 36 + u64::from(self.data_bytes) {
            problems.push(format!(
                "RIFF size {} != 36 + data size ({})",
                self.riff_chunk_size,
                36 + u64::from(self.data_bytes)
            ));
        }

        problems
    }

    /// Number of sample frames the header declares.
    pub fn num_samples(&self) -> u64 {
        match self.block_align {
            0 => 0,
            align => u64::from(self.data_bytes) / u64::from(align),
        }
    }

    /// Declared duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.num_samples() as f64 / f64::from(self.format.sample_rate)
    }
}
