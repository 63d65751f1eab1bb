//! IterSource element for injecting records from application code.

use crate::element::Source;
use crate::error::Result;
use crate::record::Record;
use crate::schema::Schema;

/// A source that yields records from an iterator.
///
/// # Example
///
/// ```rust
/// use tsdelta::element::Source;
/// use tsdelta::elements::IterSource;
/// use tsdelta::record::Record;
/// use tsdelta::schema::{Attribute, Schema};
///
/// let schema = Schema::new(vec![Attribute::numeric("x")]);
/// let mut source = IterSource::new(schema, vec![Record::from_numbers(&[1.0])]);
///
/// assert!(source.produce().unwrap().is_some());
/// assert!(source.produce().unwrap().is_none()); // EOS
/// assert_eq!(source.produced(), 1);
/// ```
pub struct IterSource<I> {
    name: String,
    schema: Schema,
    records: I,
    produced: u64,
}

impl<I: Iterator<Item = Record>> IterSource<I> {
    /// Create a source over `records`, all conforming to `schema`.
    pub fn new(schema: Schema, records: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            name: "itersrc".to_string(),
            schema,
            records: records.into_iter(),
            produced: 0,
        }
    }

    /// Set a custom name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of records produced so far.
    pub fn produced(&self) -> u64 {
        self.produced
    }
}

impl<I: Iterator<Item = Record> + Send> Source for IterSource<I> {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn produce(&mut self) -> Result<Option<Record>> {
        let next = self.records.next();
        if next.is_some() {
            self.produced += 1;
        }
        Ok(next)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
