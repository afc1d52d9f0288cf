//! Output files that only appear once complete.

use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tonemend_spec::{Role, SynthesisRequest};

/// Name of the file written for `role`.
///
/// `tonemend_{freq}hz_{mode}_{minutes}min_{role}.wav`, with the frequency
/// rounded to whole hertz.
pub fn output_file_name(request: &SynthesisRequest, role: Role) -> String {
    format!(
        "tonemend_{}hz_{}_{}min_{}.wav",
        request.rounded_frequency_hz(),
        request.modulation_mode(),
        request.duration_minutes(),
        role
    )
}

/// A WAV file under construction.
///
/// Bytes go to a hidden temporary file in the destination directory.
/// [`OutputFile::persist`] renames it to its final name; dropping it
/// instead deletes the temporary file.
#[derive(Debug)]
pub struct OutputFile {
    writer: BufWriter<NamedTempFile>,
    destination: PathBuf,
}

impl OutputFile {
    /// Opens a temporary file that will become `dir/file_name`.
    pub fn create(dir: &Path, file_name: &str) -> io::Result<Self> {
        let temp = tempfile::Builder::new()
            .prefix(".tonemend-")
            .suffix(".part")
            .tempfile_in(dir)?;

        Ok(Self {
            writer: BufWriter::new(temp),
            destination: dir.join(file_name),
        })
    }

    /// Where the file will live once persisted.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Path of the temporary file currently being written.
    pub fn temp_path(&self) -> &Path {
        self.writer.get_ref().path()
    }

    /// Flushes and renames the file into place, replacing any existing file.
    pub fn persist(self) -> io::Result<PathBuf> {
        let temp = self.writer.into_inner().map_err(|e| e.into_error())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.destination)?;
        Ok(self.destination)
    }
}

impl Write for OutputFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Seek for OutputFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.writer.seek(pos)
    }
}
