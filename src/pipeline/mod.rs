//! Pipeline construction and execution.
//!
//! - [`Pipeline`]: drives one source through one transform into one sink
//! - [`PipelineStats`]: what a run moved
//!
//! # Example
//!
//! ```rust
//! use tsdelta::prelude::*;
//!
//! let schema = Schema::new(vec![Attribute::numeric("x")]);
//! let records = [10.0, 12.0, 15.0, 11.0].map(|x| Record::from_numbers(&[x]));
//!
//! let filter = DeltaFilter::delta(FilterConfig::default().with_selection(Selection::all()))?;
//! let mut pipeline = Pipeline::new(IterSource::new(schema, records), filter, CollectSink::new());
//!
//! let stats = pipeline.run()?;
//! assert_eq!(stats.records_in, 4);
//! assert_eq!(stats.records_out, 3);
//! # Ok::<(), tsdelta::Error>(())
//! ```

mod runner;

pub use runner::{Pipeline, PipelineStats};
