//! Transaction pairing and latency aggregation.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use tracing::debug;

use super::event::{LogEvent, TxStatus};

/// Elapsed time of one completed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDuration {
    pub transaction_id: String,
    pub secs: u64,
}

/// Mean latency over the window, or the absence of any completed pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregateResult {
    /// No Started event had a matching Completed event.
    NoData,
    Mean { mean_secs: f64, pairs: usize },
}

impl AggregateResult {
    pub fn mean_secs(&self) -> Option<f64> {
        match self {
            AggregateResult::NoData => None,
            AggregateResult::Mean { mean_secs, .. } => Some(*mean_secs),
        }
    }
}

/// Pair every Started event with the first later, unconsumed Completed event
/// carrying the same transaction id.
///
/// Pending Started events are queued per id in log order, so each Completed
/// goes to the oldest Started still waiting for it. Orphan completions and
/// transactions still in flight are left out. `year` is the year every
/// timestamp is resolved in; a pair whose date does not exist in it is
/// dropped.
pub fn pair_transactions(events: &[LogEvent], year: i32) -> Vec<TransactionDuration> {
    let mut pending: HashMap<&str, VecDeque<&LogEvent>> = HashMap::new();
    let mut durations = Vec::new();

    for event in events {
        let id = event.transaction_id.as_str();
        match event.status {
            TxStatus::Started => pending.entry(id).or_default().push_back(event),
            TxStatus::Completed => {
                let Some(started) = pending.get_mut(id).and_then(|queue| queue.pop_front()) else {
                    continue;
                };
                let (Some(begin), Some(end)) = (
                    started.timestamp.resolve(year),
                    event.timestamp.resolve(year),
                ) else {
                    continue;
                };
                durations.push(TransactionDuration {
                    transaction_id: id.to_string(),
                    secs: (end - begin).num_seconds().unsigned_abs(),
                });
            }
        }
    }

    debug!(
        pairs = durations.len(),
        in_flight = pending.values().map(VecDeque::len).sum::<usize>(),
        "paired transactions"
    );
    durations
}

/// Mean duration of all pairs found in `events`.
pub fn aggregate(events: &[LogEvent], year: i32) -> AggregateResult {
    let durations = pair_transactions(events, year);
    if durations.is_empty() {
        return AggregateResult::NoData;
    }

    let total: u64 = durations.iter().map(|d| d.secs).sum();
    AggregateResult::Mean {
        mean_secs: total as f64 / durations.len() as f64,
        pairs: durations.len(),
    }
}
