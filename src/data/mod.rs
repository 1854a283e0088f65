//! Transaction log analysis.
//!
//! Turns raw log lines into a health classification. Each stage is a pure
//! function over the previous stage's output.
//!
//! ## Submodules
//!
//! - [`event`]: Line grammar and [`LogEvent`] extraction
//! - [`window`]: Trailing time window selection
//! - [`matcher`]: Started/Completed pairing and the mean latency ([`AggregateResult`])
//! - [`classify`]: Threshold classification ([`ProbeState`], [`Classification`])
//!
//! ## Data Flow
//!
//! ```text
//! raw lines
//!      │
//!      ▼
//! EventExtractor::extract()
//!      │
//!      ▼
//! select_window()  ◀── now, TimeWindow
//!      │
//!      ▼
//! aggregate()      ──▶ AggregateResult (mean or NoData)
//!      │
//!      ▼
//! classify()       ◀── Thresholds
//!      │
//!      └──▶ Classification (state, exit code, message)
//! ```

pub mod classify;
pub mod event;
pub mod matcher;
pub mod window;

pub use classify::{classify, Classification, ProbeState, Thresholds};
pub use event::{EventExtractor, LogEvent, LogTimestamp, TxStatus, DEFAULT_APPLICATION};
pub use matcher::{aggregate, pair_transactions, AggregateResult, TransactionDuration};
pub use window::{select_window, TimeWindow};
