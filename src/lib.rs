//! # txwatch
//!
//! A monitoring probe that reports the mean transaction latency of an
//! application from its transaction log, classified for a Nagios-style
//! supervisor.
//!
//! The application logs one line when a transaction starts and one when it
//! completes. The probe pairs them up inside a trailing time window, averages
//! the elapsed times and compares the mean against warning and critical
//! thresholds.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           probe                              │
//! │  ┌─────────┐    ┌──────────────────────────────┐   ┌───────┐ │
//! │  │ source  │───▶│             data             │──▶│report │ │
//! │  │ (lines) │    │ event → window → matcher →   │   │(line, │ │
//! │  └─────────┘    │            classify          │   │ JSON) │ │
//! │       ▲         └──────────────────────────────┘   └───────┘ │
//! │       │                                                      │
//! │  FileSource | MemorySource        settings (layered config)  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`data`]**: The pure analysis pipeline: line grammar, window selection,
//!   transaction pairing, threshold classification
//! - **[`source`]**: The [`LogSource`] trait with file and in-memory implementations
//! - **[`probe`]**: [`Probe`] wires the pipeline together for a fixed "now"
//! - **[`report`]**: [`Report`] with the status line and JSON export
//! - **[`settings`]**: Defaults, settings file, environment and flag layering
//!
//! ## Time handling
//!
//! Syslog timestamps carry no year. Every timestamp is placed in the year of
//! the instant the probe runs at; logs spanning New Year give undefined window
//! membership.
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! check-tx-time --warning 30 --critical 60 --time-period 300
//! check-tx-time --warning 30 --critical 60 --time-period 300 --log-file /var/log/messages
//! ```
//!
//! ### As a library
//!
//! ```
//! use chrono::NaiveDate;
//! use txwatch::{EventExtractor, MemorySource, Probe, ProbeState, Thresholds, TimeWindow};
//!
//! let probe = Probe::new(
//!     EventExtractor::new("europa").unwrap(),
//!     Thresholds::new(30.0, 60.0).unwrap(),
//!     TimeWindow::from_secs(300),
//! );
//! let mut source = MemorySource::new(
//!     "example",
//!     [
//!         "Oct 19 11:59:00 app01 europa[2231]: tx 7 started",
//!         "Oct 19 11:59:12 app01 europa[2231]: tx 7 completed",
//!     ],
//! );
//! let now = NaiveDate::from_ymd_opt(2026, 10, 19)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//!
//! let report = probe.run(&mut source, now).unwrap();
//! assert_eq!(report.classification.state, ProbeState::Ok);
//! assert_eq!(report.exit_code(), 0);
//! ```

pub mod data;
pub mod error;
pub mod logging;
pub mod probe;
pub mod report;
pub mod settings;
pub mod source;

// Re-export main types for convenience
pub use data::{
    AggregateResult, Classification, EventExtractor, LogEvent, LogTimestamp, ProbeState,
    Thresholds, TimeWindow, TxStatus,
};
pub use error::ProbeError;
pub use probe::Probe;
pub use report::Report;
pub use settings::{Overrides, ProbeSettings, Settings};
pub use source::{FileSource, LogSource, MemorySource};
