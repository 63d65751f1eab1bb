//! Element system for tsdelta pipelines.
//!
//! This module defines the core traits and types for pipeline elements:
//!
//! - [`Source`]: Produces records and announces their schema
//! - [`Transform`]: Rewrites records, possibly buffering (e.g. a delta filter)
//! - [`Sink`]: Consumes records
//!
//! # Design
//!
//! Elements are synchronous and single-threaded. The schema is negotiated
//! once, before the first record flows: the source announces it, each
//! transform derives its output schema from its input schema, and the sink
//! is started with the final one.
//!
//! # Output Types
//!
//! The [`Output`] enum represents the result of processing:
//! - `Output::None`: Record was suppressed or is still buffered
//! - `Output::Single`: One output record
//! - `Output::Multiple`: Multiple output records (e.g. a flush at end of stream)

mod traits;

pub use traits::{Output, OutputIter, Sink, Source, Transform};
