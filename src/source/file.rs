//! File-based log source.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::LogSource;
use crate::error::ProbeError;

/// Reads a transaction log (usually syslog) from disk.
///
/// Invalid UTF-8 is replaced rather than rejected, since system logs
/// routinely carry stray bytes from other programs.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for FileSource {
    fn read_lines(&mut self) -> Result<Vec<String>, ProbeError> {
        let bytes = fs::read(&self.path).map_err(|source| {
            warn!(path = %self.path.display(), error = %source, "cannot read transaction log");
            ProbeError::SourceUnavailable {
                path: self.path.clone(),
                source,
            }
        })?;

        let lines: Vec<String> = String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_owned)
            .collect();
        debug!(path = %self.path.display(), lines = lines.len(), "read transaction log");
        Ok(lines)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
