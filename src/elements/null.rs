//! NullSink - discards records.

use crate::element::Sink;
use crate::error::Result;
use crate::record::Record;

/// A sink that discards all records.
///
/// This is useful for:
/// - Benchmarking filter throughput
/// - Draining a pipeline without side effects
///
/// # Example
///
/// ```rust
/// use tsdelta::elements::NullSink;
/// use tsdelta::element::Sink;
/// use tsdelta::record::Record;
///
/// let mut sink = NullSink::new();
/// sink.consume(Record::from_numbers(&[1.0])).unwrap();
/// assert_eq!(sink.count(), 1);
/// ```
#[derive(Debug)]
pub struct NullSink {
    name: String,
    count: u64,
}

impl NullSink {
    /// Create a new NullSink.
    pub fn new() -> Self {
        Self::with_name("nullsink")
    }

    /// Create a new NullSink with a custom name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 0,
        }
    }

    /// Get the number of records consumed.
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for NullSink {
    fn consume(&mut self, _record: Record) -> Result<()> {
        self.count += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
