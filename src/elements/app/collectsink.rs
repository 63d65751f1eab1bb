//! CollectSink element for extracting records to application code.

use crate::element::Sink;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::schema::Schema;

/// A sink that keeps every record it receives.
///
/// The schema passed to `start` is kept too, and every record is checked
/// against its arity.
#[derive(Debug)]
pub struct CollectSink {
    name: String,
    schema: Option<Schema>,
    records: Vec<Record>,
    finished: bool,
}

impl CollectSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self {
            name: "collectsink".to_string(),
            schema: None,
            records: Vec::new(),
            finished: false,
        }
    }

    /// Set a custom name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The schema received at start.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// Records received so far, in order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Take the collected records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Check if `finish` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Default for CollectSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for CollectSink {
    fn start(&mut self, schema: &Schema) -> Result<()> {
        if self.schema.is_some() {
            return Err(Error::invalid_state("start", "started"));
        }
        self.schema = Some(schema.clone());
        Ok(())
    }

    fn consume(&mut self, record: Record) -> Result<()> {
        let Some(schema) = &self.schema else {
            return Err(Error::invalid_state("consume", "not started"));
        };
        if record.len() != schema.len() {
            return Err(Error::SchemaMismatch {
                expected: schema.len(),
                actual: record.len(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
