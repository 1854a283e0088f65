//! In-memory log source.
//!
//! Useful when lines are already at hand, e.g. piped in by another tool or
//! built up in tests.

use super::LogSource;
use crate::error::ProbeError;

/// A log source backed by a vector of lines.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    lines: Vec<String>,
    description: String,
}

impl MemorySource {
    /// Create a source from any collection of lines.
    pub fn new<I, S>(source_description: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            description: format!("memory: {}", source_description),
        }
    }

    /// Append a line, as a logger would.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl LogSource for MemorySource {
    fn read_lines(&mut self) -> Result<Vec<String>, ProbeError> {
        Ok(self.lines.clone())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_returns_lines_in_order() {
        let mut source = MemorySource::new("test", ["a", "b"]);
        source.push("c");
        assert_eq!(source.read_lines().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(source.description(), "memory: test");
    }
}
