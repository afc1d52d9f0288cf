//! PCM conversion, extraction and hashing utilities.

/// Converts one sample to signed 16-bit PCM.
///
/// Clamps to `[-1, 1]`, scales by 32767 and rounds to nearest.
#[inline]
pub fn sample_to_pcm16(sample: f64) -> i16 {
    let clipped = if sample.is_nan() {
        0.0
    } else {
        sample.clamp(-1.0, 1.0)
    };
    (clipped * 32767.0)
        .round()
        .clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

/// Appends samples to `out` as little-endian 16-bit PCM.
pub fn extend_pcm16(out: &mut Vec<u8>, samples: &[f64]) {
    out.reserve(samples.len() * 2);
    for &sample in samples {
        out.extend_from_slice(&sample_to_pcm16(sample).to_le_bytes());
    }
}

/// Returns the payload of the first `data` chunk.
///
/// Walks the RIFF chunk list (honouring odd-size padding), so files with
/// extra chunks before `data` are accepted. `None` if the buffer is not
/// RIFF/WAVE or the data chunk runs past the end.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.get(0..4)? != b"RIFF" || wav_data.get(8..12)? != b"WAVE" {
        return None;
    }

    let mut rest = wav_data.get(12..)?;
    while let Some(chunk_header) = rest.get(..8) {
        let (id, size) = chunk_header.split_at(4);
        let size = u32::from_le_bytes(size.try_into().ok()?) as usize;
        let body = rest.get(8..)?;

        if id == b"data" {
            return body.get(..size);
        }

        let padded = size + (size & 1);
        rest = body.get(padded..)?;
    }

    None
}

/// BLAKE3 hex digest of a WAV file's PCM payload.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
