//! One probe run: lines in, classification out.

use chrono::{Datelike, NaiveDateTime};
use tracing::{debug, info};

use crate::data::{aggregate, classify, select_window, EventExtractor, Thresholds, TimeWindow};
use crate::error::ProbeError;
use crate::report::Report;
use crate::source::LogSource;

/// The analyzer configured for one application, window and threshold pair.
///
/// `now` is always supplied by the caller, so the same log and the same
/// instant give the same report.
#[derive(Debug, Clone)]
pub struct Probe {
    extractor: EventExtractor,
    thresholds: Thresholds,
    window: TimeWindow,
}

impl Probe {
    pub fn new(extractor: EventExtractor, thresholds: Thresholds, window: TimeWindow) -> Self {
        Self {
            extractor,
            thresholds,
            window,
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Analyze `lines` as of `now`.
    pub fn analyze<I, S>(&self, lines: I, now: NaiveDateTime) -> Report
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let events = self.extractor.extract(lines);
        let windowed = select_window(&events, self.window, now);
        let result = aggregate(windowed, now.year());
        let classification = classify(result, &self.thresholds, self.window);

        debug!(
            events = events.len(),
            in_window = windowed.len(),
            ?result,
            "analysis finished"
        );

        Report {
            classification,
            result,
            events_total: events.len(),
            events_in_window: windowed.len(),
            window_secs: self.window.as_secs(),
            thresholds: self.thresholds,
            evaluated_at: now,
            source: None,
        }
    }

    /// Read everything from `source` and analyze it as of `now`.
    pub fn run(&self, source: &mut dyn LogSource, now: NaiveDateTime) -> Result<Report, ProbeError> {
        info!(source = source.description(), "reading transaction log");
        let lines = source.read_lines()?;

        let mut report = self.analyze(&lines, now);
        report.source = Some(source.description().to_string());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AggregateResult, ProbeState, DEFAULT_APPLICATION};
    use crate::source::{FileSource, MemorySource};
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn line(secs_ago: i64, tx: u32, status: &str) -> String {
        let at = now() - Duration::seconds(secs_ago);
        format!(
            "{} app01 europa[2231]: tx {} {}",
            at.format("%b %e %H:%M:%S"),
            tx,
            status
        )
    }

    fn probe(period: u64) -> Probe {
        Probe::new(
            EventExtractor::new(DEFAULT_APPLICATION).unwrap(),
            Thresholds::new(30.0, 60.0).unwrap(),
            TimeWindow::from_secs(period),
        )
    }

    fn pair_with_gap(gap: i64) -> Vec<String> {
        vec![line(gap + 5, 1, "started"), line(5, 1, "completed")]
    }

    #[test]
    fn test_ten_second_pair_is_ok() {
        let report = probe(300).analyze(pair_with_gap(10), now());
        assert_eq!(report.classification.state, ProbeState::Ok);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(
            report.status_line(),
            "OK - average transaction time 10.00 secs during last 300 secs, threshhold 30 secs"
        );
    }

    #[test]
    fn test_forty_five_second_pair_is_warning() {
        let report = probe(300).analyze(pair_with_gap(45), now());
        assert_eq!(report.classification.state, ProbeState::Warning);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_ninety_second_pair_is_critical() {
        let report = probe(300).analyze(pair_with_gap(90), now());
        assert_eq!(report.classification.state, ProbeState::Critical);
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn test_only_started_is_unknown() {
        let lines = vec![line(20, 1, "started"), line(10, 2, "started")];
        let report = probe(300).analyze(lines, now());
        assert_eq!(report.result, AggregateResult::NoData);
        assert_eq!(report.exit_code(), 3);
        assert_eq!(
            report.status_line(),
            "UNKNOWN - No transaction data in given time period"
        );
    }

    #[test]
    fn test_pairs_outside_window_are_ignored() {
        let lines = vec![
            line(400, 1, "started"),
            line(310, 1, "completed"),
            line(50, 2, "started"),
            line(40, 2, "completed"),
        ];
        let report = probe(60).analyze(lines, now());
        assert_eq!(report.events_total, 4);
        assert_eq!(report.events_in_window, 2);
        assert_eq!(report.result.mean_secs(), Some(10.0));
    }

    #[test]
    fn test_completion_split_by_window_is_in_flight() {
        let lines = vec![line(90, 1, "started"), line(30, 1, "completed")];
        let report = probe(60).analyze(lines, now());
        assert_eq!(report.classification.state, ProbeState::Unknown);
    }

    #[test]
    fn test_interleaved_pairs() {
        let lines = vec![
            line(50, 10, "started"),
            line(40, 20, "started"),
            line(35, 20, "completed"),
            line(10, 10, "completed"),
        ];
        let report = probe(60).analyze(lines, now());
        assert_eq!(
            report.result,
            AggregateResult::Mean {
                mean_secs: 22.5,
                pairs: 2
            }
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let lines = vec![
            line(50, 1, "started"),
            line(45, 2, "started"),
            line(20, 1, "completed"),
            line(1, 2, "completed"),
        ];
        let probe = probe(60);
        let first = probe.analyze(&lines, now());
        let second = probe.analyze(&lines, now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_with_memory_source() {
        let mut source = MemorySource::new("test", pair_with_gap(10));
        let report = probe(300).run(&mut source, now()).unwrap();
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.source.as_deref(), Some("memory: test"));
    }

    #[test]
    fn test_run_with_missing_file() {
        let mut source = FileSource::new("/nonexistent/txwatch/syslog");
        let err = probe(300).run(&mut source, now()).unwrap_err();
        assert!(matches!(err, ProbeError::SourceUnavailable { .. }));
        assert_eq!(err.exit_code(), 3);
    }
}
