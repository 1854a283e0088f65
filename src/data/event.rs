//! Transaction event extraction from raw log lines.
//!
//! A recognized line looks like a syslog entry emitted by the monitored
//! application:
//!
//! ```text
//! Oct 19 14:03:22 app01 europa[2231]: tx 4711 started
//! Oct 19 14:03:31 app01 europa[2231]: tx 4711 completed
//! ```
//!
//! Everything else is skipped without complaint.

use std::fmt;

use chrono::{Month, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use tracing::trace;

use crate::error::ProbeError;

/// Application marker used when none is configured.
pub const DEFAULT_APPLICATION: &str = "europa";

/// Leap year used to validate month/day pairs before a real year is known.
const VALIDATION_YEAR: i32 = 2000;

/// A log timestamp with syslog precision: month, day and time of day.
///
/// The log format carries no year. Call [`LogTimestamp::resolve`] with the
/// year to assume before doing any arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogTimestamp {
    pub month: Month,
    pub day: u32,
    pub time: NaiveTime,
}

impl LogTimestamp {
    /// Parse the `Mon DD HH:MM:SS` tokens of a syslog prefix.
    pub fn parse(month: &str, day: &str, time: &str) -> Option<Self> {
        let month: Month = month.parse().ok()?;
        let day: u32 = day.parse().ok()?;
        NaiveDate::from_ymd_opt(VALIDATION_YEAR, month.number_from_month(), day)?;
        let time = NaiveTime::parse_from_str(time, "%H:%M:%S").ok()?;
        Some(Self { month, day, time })
    }

    /// Place the timestamp in `year`.
    ///
    /// Returns `None` when the date does not exist in that year (Feb 29 in a
    /// non-leap year).
    pub fn resolve(&self, year: i32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(year, self.month.number_from_month(), self.day)
            .map(|date| date.and_time(self.time))
    }
}

impl fmt::Display for LogTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:>2} {}",
            &self.month.name()[..3],
            self.day,
            self.time.format("%H:%M:%S")
        )
    }
}

/// Whether a line marks the start or the end of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxStatus {
    Started,
    Completed,
}

impl TxStatus {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "started" => Some(TxStatus::Started),
            "completed" => Some(TxStatus::Completed),
            _ => None,
        }
    }
}

/// One recognized transaction event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub timestamp: LogTimestamp,
    pub transaction_id: String,
    pub status: TxStatus,
}

/// Recognizes transaction events for one application.
#[derive(Debug, Clone)]
pub struct EventExtractor {
    pattern: Regex,
}

impl EventExtractor {
    /// Build an extractor for lines tagged with `application`.
    ///
    /// The marker is matched literally.
    pub fn new(application: &str) -> Result<Self, ProbeError> {
        let application = application.trim();
        if application.is_empty() {
            return Err(ProbeError::Usage("application marker must not be empty".into()));
        }

        let pattern = format!(
            r"{}.+: tx ([0-9]+) (started|completed)(?:\s|$)",
            regex::escape(application)
        );
        let pattern = Regex::new(&pattern)
            .map_err(|e| ProbeError::Usage(format!("invalid application marker: {}", e)))?;

        Ok(Self { pattern })
    }

    /// Parse a single line, returning `None` for anything unrecognized.
    pub fn parse_line(&self, line: &str) -> Option<LogEvent> {
        let captures = self.pattern.captures(line)?;
        let status = TxStatus::from_word(captures.get(2)?.as_str())?;
        let transaction_id = captures.get(1)?.as_str().to_string();

        let mut prefix = line.split_whitespace();
        let timestamp = LogTimestamp::parse(prefix.next()?, prefix.next()?, prefix.next()?);
        let Some(timestamp) = timestamp else {
            trace!(line, "skipping transaction line with unreadable timestamp");
            return None;
        };

        Some(LogEvent {
            timestamp,
            transaction_id,
            status,
        })
    }

    /// Extract all events from `lines`, preserving their order.
    pub fn extract<I, S>(&self, lines: I) -> Vec<LogEvent>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.parse_line(line.as_ref()))
            .collect()
    }
}
