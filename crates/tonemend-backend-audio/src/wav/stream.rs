//! Incremental WAV writer.

use std::io::{self, Seek, SeekFrom, Write};

use super::format::WavFormat;
use super::header::{
    riff_chunk_size, write_header, DATA_SIZE_OFFSET, HEADER_LEN, MAX_DATA_BYTES,
    RIFF_SIZE_OFFSET,
};
use super::pcm::extend_pcm16;

/// Totals reported once a stream is finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavSummary {
    /// Format written.
    pub format: WavFormat,
    /// Sample frames written.
    pub num_samples: u64,
    /// Payload length in bytes.
    pub data_bytes: u32,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
}

impl WavSummary {
    /// Total file length including the header.
    pub fn file_len(&self) -> u64 {
        HEADER_LEN as u64 + u64::from(self.data_bytes)
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / f64::from(self.format.sample_rate)
    }
}

/// Streams 16-bit PCM into a seekable sink.
///
/// A placeholder header with zero sizes is written on creation, so the
/// output is not valid audio until [`finalize`](Self::finalize) rewrites the
/// RIFF and data sizes. Dropping the writer without finalizing leaves the
/// placeholder in place.
#[derive(Debug)]
pub struct WavStreamWriter<W: Write + Seek> {
    inner: W,
    format: WavFormat,
    start: u64,
    data_bytes: u64,
    num_samples: u64,
    hasher: blake3::Hasher,
    buffer: Vec<u8>,
}

impl<W: Write + Seek> WavStreamWriter<W> {
    /// Writes the placeholder header at the sink's current position.
    pub fn new(mut inner: W, format: WavFormat) -> io::Result<Self> {
        let start = inner.stream_position()?;
        write_header(&mut inner, &format, 0)?;

        Ok(Self {
            inner,
            format,
            start,
            data_bytes: 0,
            num_samples: 0,
            hasher: blake3::Hasher::new(),
            buffer: Vec::new(),
        })
    }

    /// Format being written.
    pub fn format(&self) -> &WavFormat {
        &self.format
    }

    /// Sample frames written so far.
    pub fn num_samples(&self) -> u64 {
        self.num_samples
    }

    /// Payload bytes written so far.
    pub fn data_bytes(&self) -> u64 {
        self.data_bytes
    }

    /// Quantizes and appends mono samples.
    pub fn write_samples(&mut self, samples: &[f64]) -> io::Result<()> {
        self.buffer.clear();
        extend_pcm16(&mut self.buffer, samples);

        let len = self.buffer.len() as u64;
        if self.data_bytes + len > MAX_DATA_BYTES {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("WAV payload would exceed {} bytes", MAX_DATA_BYTES),
            ));
        }

        self.inner.write_all(&self.buffer)?;
        self.hasher.update(&self.buffer);
        self.data_bytes += len;
        self.num_samples += samples.len() as u64;
        Ok(())
    }

    /// Rewrites the header sizes and returns the sink with a summary.
    pub fn finalize(mut self) -> io::Result<(W, WavSummary)> {
        // Guarded by write_samples
        let data_bytes = self.data_bytes as u32;

        self.inner
            .seek(SeekFrom::Start(self.start + RIFF_SIZE_OFFSET))?;
        self.inner.write_all(&riff_chunk_size(data_bytes).to_le_bytes())?;
        self.inner
            .seek(SeekFrom::Start(self.start + DATA_SIZE_OFFSET))?;
        self.inner.write_all(&data_bytes.to_le_bytes())?;
        self.inner.seek(SeekFrom::End(0))?;
        self.inner.flush()?;

        let summary = WavSummary {
            format: self.format,
            num_samples: self.num_samples,
            data_bytes,
            pcm_hash: self.hasher.finalize().to_hex().to_string(),
        };

        Ok((self.inner, summary))
    }
}
