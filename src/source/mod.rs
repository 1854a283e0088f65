//! Log source abstraction.
//!
//! The analyzer never touches I/O itself. A [`LogSource`] hands it the full
//! set of lines for one probe run; opening and reading failures surface here
//! as [`ProbeError::SourceUnavailable`].

mod file;
mod memory;

pub use file::FileSource;
pub use memory::MemorySource;

use std::fmt::Debug;

use crate::error::ProbeError;

/// Trait for anything that can supply transaction log lines.
///
/// # Example
///
/// ```
/// use txwatch::{LogSource, MemorySource};
///
/// let mut source = MemorySource::new("inline", ["Oct 19 12:00:00 h europa[1]: tx 1 started"]);
/// assert_eq!(source.read_lines().unwrap().len(), 1);
/// ```
pub trait LogSource: Debug {
    /// Read every line of the source, oldest first.
    ///
    /// The whole source is consumed on each call; there is no tailing mode.
    fn read_lines(&mut self) -> Result<Vec<String>, ProbeError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}
