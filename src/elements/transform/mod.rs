//! Time-series transforms.
//!
//! - [`TimeSeriesFilter`]: shift-and-merge filter generic over a [`MergePolicy`]
//! - [`DeltaFilter`]: selected values become `current - partner`
//! - [`TranslateFilter`]: selected values become the partner's value

mod config;
mod iter;
mod merge;
mod timeseries;

pub use config::{BoundaryPolicy, FilterConfig};
pub use iter::FilterIter;
pub use merge::{Delta, MergePolicy, Translate};
pub use timeseries::{
    DeltaFilter, FilterState, FilterStats, TimeSeriesFilter, TranslateFilter,
};
