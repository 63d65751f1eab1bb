//! Observability features: metrics and tracing.
//!
//! - **Metrics**: Counters and gauges via `metrics-rs`
//! - **Tracing**: Structured logging and spans via `tracing`
//!
//! ## Metrics
//!
//! | Metric | Type | Description |
//! |--------|------|-------------|
//! | `tsdelta_records_received` | Counter | Records pushed into a filter |
//! | `tsdelta_records_emitted` | Counter | Records a filter emitted |
//! | `tsdelta_records_suppressed` | Counter | Records dropped for lack of a partner |
//! | `tsdelta_buffer_depth` | Gauge | Records held by a filter's aligner |
//! | `tsdelta_pipeline_records_total` | Counter | Records delivered to sinks |
//! | `tsdelta_pipeline_errors_total` | Counter | Failed pipeline runs |
//! | `tsdelta_pipeline_run_time_ns` | Histogram | Wall time of a pipeline run |
//!
//! Without an installed recorder every metric is a no-op.
//!
//! ## Tracing
//!
//! tsdelta emits spans for pipeline runs and filter streams, `debug` events
//! when schemas are derived and aligners open or close, `trace` events for
//! suppressed records, and an `info` event with final counts when a stream
//! closes. The library never installs a subscriber.

mod metrics;
mod tracing_support;

pub use metrics::{FilterMetrics, PipelineMetrics, TimerGuard, init_metrics};
pub use tracing_support::{TracingConfig, trace_eos, trace_error};
