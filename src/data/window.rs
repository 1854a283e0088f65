//! Trailing time window selection.

use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use super::event::LogEvent;

/// Length of the trailing window, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    secs: u64,
}

impl TimeWindow {
    pub fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    pub fn as_secs(&self) -> u64 {
        self.secs
    }

    /// True when an event `age_secs` old (in either direction) falls inside.
    ///
    /// The old-side boundary is exclusive.
    pub fn contains_age(&self, age_secs: i64) -> bool {
        age_secs.unsigned_abs() < self.secs
    }
}

/// Return the trailing events that are younger than `window` at `now`.
///
/// Timestamps carry no year, so each is resolved in the year of `now`. Logs
/// that straddle a year boundary get undefined membership. The scan walks
/// backward from the newest event and stops at the first one outside the
/// window, so everything older than that event is dropped too.
pub fn select_window(events: &[LogEvent], window: TimeWindow, now: NaiveDateTime) -> &[LogEvent] {
    let year = now.year();

    let inside = events
        .iter()
        .rev()
        .take_while(|event| match event.timestamp.resolve(year) {
            Some(at) => window.contains_age((now - at).num_seconds()),
            None => false,
        })
        .count();

    let selected = &events[events.len() - inside..];
    debug!(
        total = events.len(),
        selected = selected.len(),
        window_secs = window.as_secs(),
        "selected trailing window"
    );
    selected
}
