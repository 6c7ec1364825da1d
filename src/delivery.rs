/// File delivery sinks
///
/// This module handles the host boundary of an export:
/// - Saving the artifact into a directory (atomic temp-file + rename)
/// - Streaming the artifact to stdout
///
/// A sink either delivers the whole artifact or reports why it could not;
/// it never leaves a partially written file at the destination.
use crate::error::ExportError;
use crate::types::{CsvArtifact, Delivered};
use log::debug;
use std::io::{self, Write};
use std::path::PathBuf;

/// Host-specific mechanism that turns generated CSV into a saved file
pub trait FileDeliverySink {
    fn deliver(&self, artifact: &CsvArtifact) -> Result<Delivered, ExportError>;
}

/// Saves artifacts as `<dir>/<filename>`
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileDeliverySink for DirectorySink {
    fn deliver(&self, artifact: &CsvArtifact) -> Result<Delivered, ExportError> {
        validate_filename(&artifact.filename)?;

        if !self.dir.is_dir() {
            return Err(ExportError::host_unsupported(format!(
                "output directory {} does not exist",
                self.dir.display()
            )));
        }

        // Write next to the destination so the final rename stays on one filesystem.
        // The temp file is deleted on drop if anything below fails.
        let mut temp = tempfile::Builder::new()
            .prefix(".tabular-export-")
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(|e| ExportError::serialization(format!("Failed to create temporary file: {}", e)))?;
        debug!("Writing {} bytes of {} to {:?}", artifact.len(), artifact.mime_type, temp.path());

        temp.write_all(&artifact.bytes)?;
        temp.flush()?;

        let target = self.dir.join(&artifact.filename);
        temp.persist(&target)
            .map_err(|e| ExportError::serialization(format!("Failed to save {}: {}", target.display(), e.error)))?;
        debug!("Saved {:?}", target);

        Ok(Delivered::File(target))
    }
}

/// Streams artifacts to standard output
pub struct StdoutSink;

impl FileDeliverySink for StdoutSink {
    fn deliver(&self, artifact: &CsvArtifact) -> Result<Delivered, ExportError> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_all_or_unsupported(&mut handle, &artifact.bytes)?;
        debug!("Wrote {} bytes to stdout", artifact.len());
        Ok(Delivered::Stdout)
    }
}

fn write_all_or_unsupported<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<(), ExportError> {
    writer.write_all(bytes).and_then(|_| writer.flush()).map_err(|e| {
        if e.kind() == io::ErrorKind::BrokenPipe {
            ExportError::host_unsupported("stdout is closed")
        } else {
            ExportError::from(e)
        }
    })
}

/// Reject names that would escape the destination directory
pub fn validate_filename(filename: &str) -> Result<(), ExportError> {
    if filename.trim().is_empty() {
        return Err(ExportError::serialization("Filename is empty"));
    }
    if filename == "." || filename == ".." || filename.contains(['/', '\\']) {
        return Err(ExportError::serialization(format!("Invalid filename: {}", filename)));
    }
    Ok(())
}
