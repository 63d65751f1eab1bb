//! Time-shifted filters over ordered record streams.
//!
//! A [`TimeSeriesFilter`] pairs every record with the record `k` positions
//! away (through an [`Aligner`]) and rewrites the selected attributes with a
//! [`MergePolicy`]. Non-selected attributes pass through untouched.
//!
//! # State machine
//!
//! ```text
//! Unopened --derive_schema--> SchemaFixed --push--> Streaming --close--> Closed
//!                                  ^                                       |
//!                                  +----------------reset------------------+
//! ```

use super::config::{BoundaryPolicy, FilterConfig};
use super::iter::FilterIter;
use super::merge::{Delta, MergePolicy, Translate};
use crate::element::{Output, Transform};
use crate::error::{Error, Result};
use crate::observability::{FilterMetrics, TracingConfig};
use crate::record::{Record, Value};
use crate::schema::Schema;
use crate::selection::Selection;
use crate::temporal::{Aligned, Aligner, Offset};

/// Lifecycle state of a [`TimeSeriesFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// No schema yet.
    Unopened,
    /// Output schema derived, no record seen.
    SchemaFixed,
    /// At least one record pushed.
    Streaming,
    /// End of stream reached.
    Closed,
}

impl FilterState {
    /// Lowercase state name, as used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unopened => "unopened",
            Self::SchemaFixed => "schema fixed",
            Self::Streaming => "streaming",
            Self::Closed => "closed",
        }
    }
}

/// Counters for one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Records pushed.
    pub received: u64,
    /// Records emitted.
    pub emitted: u64,
    /// Records dropped for lack of a partner.
    pub suppressed: u64,
    /// Records held by the aligner right now.
    pub buffered: usize,
    /// Most records the aligner held at once.
    pub peak_buffered: usize,
}

/// A shift-and-merge filter.
///
/// # Example
///
/// ```rust
/// use tsdelta::prelude::*;
///
/// let config = FilterConfig::default()
///     .with_selection(Selection::all())
///     .with_offset(-1);
/// let mut filter = DeltaFilter::delta(config)?;
///
/// let schema = Schema::new(vec![Attribute::numeric("x")]);
/// assert_eq!(filter.derive_schema(&schema)?.attribute(0).unwrap().name(), "x d-1");
///
/// let out: Vec<Record> = filter
///     .apply([10.0, 12.0, 15.0, 11.0].map(|x| Record::from_numbers(&[x])))
///     .collect::<Result<_>>()?;
/// assert_eq!(out, [2.0, 3.0, -4.0].map(|x| Record::from_numbers(&[x])));
/// # Ok::<(), tsdelta::Error>(())
/// ```
pub struct TimeSeriesFilter<M: MergePolicy> {
    name: String,
    merge: M,
    selection: Selection,
    boundary: BoundaryPolicy,
    state: FilterState,
    aligner: Aligner<Record>,
    /// Per-attribute selection mask, resolved once against the input schema.
    selected: Vec<bool>,
    output_schema: Option<Schema>,
    received: u64,
    emitted: u64,
    suppressed: u64,
    metrics: FilterMetrics,
    tracing: TracingConfig,
}

/// Replaces selected values with `current - partner`.
pub type DeltaFilter = TimeSeriesFilter<Delta>;

/// Replaces selected values with the partner's value.
pub type TranslateFilter = TimeSeriesFilter<Translate>;

impl TimeSeriesFilter<Delta> {
    /// Create a delta filter.
    pub fn delta(config: FilterConfig) -> Result<Self> {
        Self::new(Delta, config)
    }
}

impl TimeSeriesFilter<Translate> {
    /// Create a translate filter.
    pub fn translate(config: FilterConfig) -> Result<Self> {
        Self::new(Translate, config)
    }
}

impl<M: MergePolicy> TimeSeriesFilter<M> {
    /// Create a filter; fails with `InvalidConfiguration` for offset 0.
    pub fn new(merge: M, config: FilterConfig) -> Result<Self> {
        let offset = Offset::new(config.offset)?;
        let name = merge.name().to_string();

        Ok(Self {
            metrics: FilterMetrics::new(&name),
            name,
            merge,
            selection: config.selection,
            boundary: config.boundary,
            state: FilterState::Unopened,
            aligner: Aligner::with_offset(offset),
            selected: Vec::new(),
            output_schema: None,
            received: 0,
            emitted: 0,
            suppressed: 0,
            tracing: TracingConfig::default(),
        })
    }

    /// Set a custom name (used in logs and metric labels).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.metrics = FilterMetrics::new(&self.name);
        self
    }

    /// Set the tracing configuration used by [`apply`](Self::apply).
    pub fn with_tracing(mut self, tracing: TracingConfig) -> Self {
        self.tracing = tracing;
        self
    }

    /// Fix the output schema from the input schema.
    ///
    /// Selected attributes are renamed `"{name} {tag}{offset}"`, e.g.
    /// `"x d-1"` or `"x t+2"`; others keep their name and kind. Can only be
    /// called once.
    pub fn derive_schema(&mut self, input: &Schema) -> Result<&Schema> {
        if self.state != FilterState::Unopened {
            return Err(Error::invalid_state("derive schema", self.state.as_str()));
        }

        let selected = self.selection.resolve(input.len())?;
        let offset = self.offset();
        let mut attributes = Vec::with_capacity(input.len());
        for (index, (attr, &is_selected)) in input.iter().zip(&selected).enumerate() {
            if !is_selected {
                attributes.push(attr.clone());
                continue;
            }
            if self.merge.requires_numeric() && !attr.is_numeric() {
                return Err(Error::UnsupportedAttributeType {
                    name: attr.name().to_string(),
                    index,
                });
            }
            attributes.push(attr.renamed(format!(
                "{} {}{}",
                attr.name(),
                self.merge.tag(),
                offset
            )));
        }

        let schema = Schema::new(attributes);
        tracing::debug!(
            filter = %self.name,
            selection = %self.selection,
            offset = %offset,
            schema = %schema,
            "output schema derived"
        );

        self.selected = selected;
        self.state = FilterState::SchemaFixed;
        Ok(&*self.output_schema.insert(schema))
    }

    /// Merge one externally aligned pair into an output record.
    ///
    /// The pair bypasses the filter's own aligner. Returns `None` when the
    /// partner is absent and the boundary policy drops incomplete records.
    pub fn merge_aligned(&mut self, pair: Aligned<Record>) -> Result<Option<Record>> {
        match self.state {
            FilterState::SchemaFixed | FilterState::Streaming => {}
            state => return Err(Error::invalid_state("merge aligned", state.as_str())),
        }
        self.check_arity(&pair.current)?;
        if let Some(partner) = &pair.partner {
            self.check_arity(partner)?;
        }

        self.state = FilterState::Streaming;
        self.received += 1;
        self.metrics.record_received();
        Ok(self.merge_pair(pair))
    }

    /// Accept the next input record and return whatever became ready.
    ///
    /// Lag filters answer immediately; lead filters answer once the partner
    /// `k` records later has arrived.
    pub fn push(&mut self, record: Record) -> Result<Output<Record>> {
        match self.state {
            FilterState::SchemaFixed | FilterState::Streaming => {}
            state => return Err(Error::invalid_state("push", state.as_str())),
        }
        self.check_arity(&record)?;

        self.state = FilterState::Streaming;
        self.received += 1;
        self.metrics.record_received();

        let ready = self.aligner.push(record)?;
        self.metrics.record_depth(self.aligner.buffered());
        Ok(ready
            .into_iter()
            .filter_map(|pair| self.merge_pair(pair))
            .collect())
    }

    /// Signal end of input; returns the records held for their partner.
    pub fn close(&mut self) -> Result<Output<Record>> {
        match self.state {
            FilterState::SchemaFixed | FilterState::Streaming => {}
            state => return Err(Error::invalid_state("close", state.as_str())),
        }

        let tail = self.aligner.close()?;
        let out: Output<Record> = tail
            .into_iter()
            .filter_map(|pair| self.merge_pair(pair))
            .collect();

        self.state = FilterState::Closed;
        self.metrics.record_depth(0);
        tracing::info!(
            filter = %self.name,
            received = self.received,
            emitted = self.emitted,
            suppressed = self.suppressed,
            peak_buffered = self.aligner.peak_buffered(),
            "stream closed"
        );
        Ok(out)
    }

    /// Start a new stream with the same schema and configuration.
    pub fn reset(&mut self) -> Result<()> {
        if self.state != FilterState::Closed {
            return Err(Error::invalid_state("reset", self.state.as_str()));
        }
        self.aligner.reset();
        self.received = 0;
        self.emitted = 0;
        self.suppressed = 0;
        self.state = FilterState::SchemaFixed;
        Ok(())
    }

    /// Push every record of `records` and close at the end.
    ///
    /// The iterator yields output records in emission order. An error stops
    /// the iteration after it is yielded.
    pub fn apply<I>(&mut self, records: I) -> FilterIter<'_, M, I::IntoIter>
    where
        I: IntoIterator<Item = Record>,
    {
        let span = self
            .tracing
            .filter_span(&self.name, self.merge.name(), self.offset().get());
        FilterIter::new(self, records.into_iter(), span)
    }

    /// The output schema, once derived.
    pub fn output_schema(&self) -> Option<&Schema> {
        self.output_schema.as_ref()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FilterState {
        self.state
    }

    /// The configured offset.
    pub fn offset(&self) -> Offset {
        self.aligner.offset()
    }

    /// The boundary policy.
    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// The attribute selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The merge policy.
    pub fn merge(&self) -> &M {
        &self.merge
    }

    /// Counters for the current stream.
    pub fn stats(&self) -> FilterStats {
        FilterStats {
            received: self.received,
            emitted: self.emitted,
            suppressed: self.suppressed,
            buffered: self.aligner.buffered(),
            peak_buffered: self.aligner.peak_buffered(),
        }
    }

    fn check_arity(&self, record: &Record) -> Result<()> {
        if record.len() != self.selected.len() {
            return Err(Error::SchemaMismatch {
                expected: self.selected.len(),
                actual: record.len(),
            });
        }
        Ok(())
    }

    fn merge_pair(&mut self, pair: Aligned<Record>) -> Option<Record> {
        let Aligned {
            position,
            current,
            partner,
        } = pair;

        if partner.is_none() && self.boundary == BoundaryPolicy::DropIncomplete {
            self.suppressed += 1;
            self.metrics.record_suppressed();
            tracing::trace!(filter = %self.name, position, "partner absent, record dropped");
            return None;
        }

        let merge = &self.merge;
        let values = current
            .values()
            .iter()
            .zip(&self.selected)
            .enumerate()
            .map(|(index, (&value, &is_selected))| {
                if !is_selected {
                    return value;
                }
                match partner.as_ref().and_then(|p| p.value(index)) {
                    Some(other) => merge.merge(value, other),
                    None => Value::Missing,
                }
            });
        let record = Record::with_weight(values, current.weight());

        self.emitted += 1;
        self.metrics.record_emitted();
        Some(record)
    }
}

impl<M: MergePolicy> Transform for TimeSeriesFilter<M> {
    fn negotiate(&mut self, input: &Schema) -> Result<Schema> {
        self.derive_schema(input).cloned()
    }

    fn transform(&mut self, record: Record) -> Result<Output> {
        self.push(record)
    }

    fn flush(&mut self) -> Result<Output> {
        self.close()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<M: MergePolicy> std::fmt::Debug for TimeSeriesFilter<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeSeriesFilter")
            .field("name", &self.name)
            .field("merge", &self.merge.name())
            .field("offset", &self.offset())
            .field("boundary", &self.boundary)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
