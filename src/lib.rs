//! # tsdelta
//!
//! Streaming time-series filters over ordered tabular records.
//!
//! For a selected subset of attributes, each record's value is combined with
//! the value of the same attribute in the record `k` positions away: the
//! *delta* filter subtracts it, the *translate* filter copies it. Records at
//! the edges of the stream, where the partner does not exist, are dropped or
//! emitted with missing values depending on the boundary policy.
//!
//! ## Features
//!
//! - **Bounded memory**: at most `|k| + 1` records are held, whatever the
//!   stream length
//! - **Order preserving**: records come out in the order they went in
//! - **Lag and lead**: negative offsets look back, positive offsets look ahead
//! - **Pluggable merge**: any [`MergePolicy`](elements::MergePolicy) reuses the
//!   same alignment
//!
//! ## Quick Start
//!
//! ```rust
//! use tsdelta::prelude::*;
//!
//! let schema = Schema::new(vec![Attribute::numeric("price")]);
//! let config = FilterConfig::default()
//!     .with_selection(Selection::parse("1")?)
//!     .with_offset(-1)
//!     .emit_missing();
//!
//! let mut filter = DeltaFilter::delta(config)?;
//! filter.derive_schema(&schema)?;
//!
//! let deltas: Vec<Record> = filter
//!     .apply([10.0, 12.0, 15.0].map(|p| Record::from_numbers(&[p])))
//!     .collect::<Result<_>>()?;
//! assert_eq!(deltas[0].to_string(), "?");
//! assert_eq!(deltas[2].to_string(), "3");
//! # Ok::<(), tsdelta::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod element;
pub mod elements;
pub mod error;
pub mod observability;
pub mod pipeline;
pub mod record;
pub mod schema;
pub mod selection;
pub mod temporal;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::element::{Output, Sink, Source, Transform};
    pub use crate::elements::{
        BoundaryPolicy, CollectSink, Delta, DeltaFilter, FilterConfig, FilterState, FilterStats,
        IterSource, MergePolicy, NullSink, TimeSeriesFilter, Translate, TranslateFilter,
    };
    pub use crate::error::{Error, Result};
    pub use crate::pipeline::{Pipeline, PipelineStats};
    pub use crate::record::{Record, Value};
    pub use crate::schema::{Attribute, AttributeKind, Schema};
    pub use crate::selection::Selection;
    pub use crate::temporal::{Aligned, Aligner, Offset};
}

pub use error::{Error, Result};
