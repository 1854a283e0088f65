//! Error types for the probe.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code reported for anything that is not a classification result.
pub const UNKNOWN_EXIT_CODE: i32 = 3;

/// Errors that stop a probe run before it can classify anything.
///
/// Data-shape problems (malformed lines, missing completions) never show up
/// here; they are absorbed by the pipeline.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Missing or invalid arguments/settings.
    #[error("invalid usage: {0}")]
    Usage(String),

    /// The transaction log could not be opened or read.
    #[error("error loading transaction data")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration layer could not be loaded or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The JSON report could not be written.
    #[error("failed to export report to {path}: {reason}")]
    Export { path: PathBuf, reason: String },
}

impl ProbeError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        UNKNOWN_EXIT_CODE
    }

    /// True when the caller should print usage text.
    pub fn is_usage(&self) -> bool {
        matches!(self, ProbeError::Usage(_) | ProbeError::Config(_))
    }
}
