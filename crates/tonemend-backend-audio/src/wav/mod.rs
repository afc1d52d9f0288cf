//! Streaming WAV writer.
//!
//! Writes canonical 16-bit mono PCM WAV files with no timestamps or
//! variable metadata, block by block, so output of any length needs only
//! one block of memory. The BLAKE3 hash of the PCM payload is computed on
//! the fly and identifies the audio content independently of the header.

mod format;
mod header;
mod pcm;
mod stream;


// Re-export public API
pub use format::WavFormat;
pub use header::{riff_chunk_size, write_header, WavHeader, HEADER_LEN, MAX_DATA_BYTES};
pub use pcm::{compute_pcm_hash, extend_pcm16, extract_pcm_data, sample_to_pcm16};
pub use stream::{WavStreamWriter, WavSummary};
