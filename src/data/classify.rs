//! Threshold classification of the aggregate latency.
//!
//! Maps an [`AggregateResult`] to one of the four states a monitoring
//! supervisor understands, together with its conventional exit code.

use std::fmt;

use serde::Serialize;

use super::matcher::AggregateResult;
use super::window::TimeWindow;
use crate::error::ProbeError;

/// Warning and critical latency limits, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub warning: f64,
    pub critical: f64,
}

impl Thresholds {
    /// Build thresholds, rejecting negative, non-finite or inverted limits.
    pub fn new(warning: f64, critical: f64) -> Result<Self, ProbeError> {
        if !warning.is_finite() || !critical.is_finite() || warning < 0.0 || critical < 0.0 {
            return Err(ProbeError::Usage(
                "thresholds must be non-negative numbers".into(),
            ));
        }
        if warning > critical {
            return Err(ProbeError::Usage(format!(
                "warning threshold ({}) must not exceed critical threshold ({})",
                warning, critical
            )));
        }
        Ok(Self { warning, critical })
    }
}

/// Health state reported to the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbeState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ProbeState {
    /// Label printed at the start of the status line.
    pub fn label(&self) -> &'static str {
        match self {
            ProbeState::Ok => "OK",
            ProbeState::Warning => "WARNING",
            ProbeState::Critical => "CRITICAL",
            ProbeState::Unknown => "UNKNOWN",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ProbeState::Ok => 0,
            ProbeState::Warning => 1,
            ProbeState::Critical => 2,
            ProbeState::Unknown => 3,
        }
    }
}

impl fmt::Display for ProbeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one probe run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub state: ProbeState,
    pub exit_code: i32,
    pub message: String,
}

/// Classify `result` against `thresholds`.
///
/// Decision order: no data is Unknown; below warning is Ok; from warning up to
/// and including critical is Warning; above critical is Critical. A mean equal
/// to the warning threshold is Warning.
pub fn classify(result: AggregateResult, thresholds: &Thresholds, window: TimeWindow) -> Classification {
    let mean = match result {
        AggregateResult::NoData => {
            return Classification {
                state: ProbeState::Unknown,
                exit_code: ProbeState::Unknown.exit_code(),
                message: format!(
                    "{} - No transaction data in given time period",
                    ProbeState::Unknown
                ),
            };
        }
        AggregateResult::Mean { mean_secs, .. } => mean_secs,
    };

    let (state, threshold) = if mean < thresholds.warning {
        (ProbeState::Ok, thresholds.warning)
    } else if mean <= thresholds.critical {
        (ProbeState::Warning, thresholds.warning)
    } else {
        (ProbeState::Critical, thresholds.critical)
    };

    Classification {
        state,
        exit_code: state.exit_code(),
        message: format!(
            "{} - average transaction time {:.2} secs during last {} secs, threshhold {} secs",
            state,
            mean,
            window.as_secs(),
            threshold
        ),
    }
}
