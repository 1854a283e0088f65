//! Probe results: the status line and the optional JSON export.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::data::{AggregateResult, Classification, Thresholds};
use crate::error::ProbeError;

/// Everything one probe run found out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub classification: Classification,
    pub result: AggregateResult,
    /// Transaction events recognized in the whole log.
    pub events_total: usize,
    /// Events that fell inside the trailing window.
    pub events_in_window: usize,
    pub window_secs: u64,
    pub thresholds: Thresholds,
    /// The instant the window was anchored at.
    pub evaluated_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Report {
    /// The single line handed to the supervisor on standard output.
    pub fn status_line(&self) -> &str {
        &self.classification.message
    }

    pub fn exit_code(&self) -> i32 {
        self.classification.exit_code
    }

    /// Write the report to `export_path` as pretty-printed JSON.
    pub fn export(&self, export_path: &Path) -> Result<(), ProbeError> {
        let export_error = |reason: String| ProbeError::Export {
            path: export_path.to_path_buf(),
            reason,
        };

        let json = serde_json::to_string_pretty(self).map_err(|e| export_error(e.to_string()))?;
        fs::write(export_path, json).map_err(|e| export_error(e.to_string()))?;
        Ok(())
    }
}
