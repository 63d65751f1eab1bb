//! Built-in pipeline elements.
//!
//! ## Sources
//! - [`IterSource`]: Feeds records from any iterator
//!
//! ## Sinks
//! - [`CollectSink`]: Collects records and the schema for inspection
//! - [`NullSink`]: Discards all records (useful for benchmarking)
//!
//! ## Transforms
//! - [`DeltaFilter`]: Time-series delta
//! - [`TranslateFilter`]: Time-series shift

mod app;
mod null;
mod transform;

// Sources
pub use app::IterSource;

// Sinks
pub use app::CollectSink;
pub use null::NullSink;

// Transforms
pub use transform::{
    BoundaryPolicy, Delta, DeltaFilter, FilterConfig, FilterIter, FilterState, FilterStats,
    MergePolicy, TimeSeriesFilter, Translate, TranslateFilter,
};
