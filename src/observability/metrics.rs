//! Metrics collection using metrics-rs.

use metrics::{Counter, Gauge, Histogram, Unit, counter, gauge, histogram};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Whether metrics have been initialized.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

// Metric names as constants for consistency
const RECORDS_RECEIVED: &str = "tsdelta_records_received";
const RECORDS_EMITTED: &str = "tsdelta_records_emitted";
const RECORDS_SUPPRESSED: &str = "tsdelta_records_suppressed";
const BUFFER_DEPTH: &str = "tsdelta_buffer_depth";
const PIPELINE_RECORDS: &str = "tsdelta_pipeline_records_total";
const PIPELINE_ERRORS: &str = "tsdelta_pipeline_errors_total";
const PIPELINE_RUN_TIME_NS: &str = "tsdelta_pipeline_run_time_ns";

/// Initialize metrics descriptions.
///
/// Call this once at application startup, after installing a recorder.
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_metrics() {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    metrics::describe_counter!(
        RECORDS_RECEIVED,
        Unit::Count,
        "Total number of records received by filters"
    );
    metrics::describe_counter!(
        RECORDS_EMITTED,
        Unit::Count,
        "Total number of records emitted by filters"
    );
    metrics::describe_counter!(
        RECORDS_SUPPRESSED,
        Unit::Count,
        "Records dropped because their time-shifted partner does not exist"
    );
    metrics::describe_gauge!(
        BUFFER_DEPTH,
        Unit::Count,
        "Records held by a filter's alignment buffer"
    );
    metrics::describe_counter!(
        PIPELINE_RECORDS,
        Unit::Count,
        "Records delivered to pipeline sinks"
    );
    metrics::describe_counter!(PIPELINE_ERRORS, Unit::Count, "Pipeline runs that failed");
    metrics::describe_histogram!(
        PIPELINE_RUN_TIME_NS,
        Unit::Nanoseconds,
        "Wall time of a complete pipeline run"
    );
}

/// Metrics handles for one filter, labelled with its name.
#[derive(Clone)]
pub struct FilterMetrics {
    filter: String,
    received: Counter,
    emitted: Counter,
    suppressed: Counter,
    depth: Gauge,
}

impl FilterMetrics {
    /// Create handles labelled with `filter`.
    pub fn new(filter: &str) -> Self {
        Self {
            filter: filter.to_string(),
            received: counter!(RECORDS_RECEIVED, "filter" => filter.to_string()),
            emitted: counter!(RECORDS_EMITTED, "filter" => filter.to_string()),
            suppressed: counter!(RECORDS_SUPPRESSED, "filter" => filter.to_string()),
            depth: gauge!(BUFFER_DEPTH, "filter" => filter.to_string()),
        }
    }

    /// Record an incoming record.
    #[inline]
    pub fn record_received(&self) {
        self.received.increment(1);
    }

    /// Record an emitted record.
    #[inline]
    pub fn record_emitted(&self) {
        self.emitted.increment(1);
    }

    /// Record a suppressed record.
    #[inline]
    pub fn record_suppressed(&self) {
        self.suppressed.increment(1);
    }

    /// Record the current buffer depth.
    #[inline]
    pub fn record_depth(&self, depth: usize) {
        self.depth.set(depth as f64);
    }

    /// Get the filter name.
    pub fn filter(&self) -> &str {
        &self.filter
    }
}

impl std::fmt::Debug for FilterMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterMetrics")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

/// Metrics collector for an entire pipeline.
#[derive(Clone)]
pub struct PipelineMetrics {
    name: String,
    records_total: Counter,
    errors: Counter,
    run_time: Histogram,
}

impl PipelineMetrics {
    /// Create a new pipeline metrics collector.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            records_total: counter!(PIPELINE_RECORDS, "pipeline" => name.to_string()),
            errors: counter!(PIPELINE_ERRORS, "pipeline" => name.to_string()),
            run_time: histogram!(PIPELINE_RUN_TIME_NS, "pipeline" => name.to_string()),
        }
    }

    /// Record records delivered by this pipeline.
    #[inline]
    pub fn record_records(&self, count: u64) {
        self.records_total.increment(count);
    }

    /// Record a failed run.
    #[inline]
    pub fn record_error(&self) {
        self.errors.increment(1);
    }

    /// Record the duration of a run.
    #[inline]
    pub fn record_run_time(&self, duration: Duration) {
        self.run_time.record(duration.as_nanos() as f64);
    }

    /// Start a timer and return a guard that records on drop.
    pub fn start_timer(&self) -> TimerGuard<'_> {
        TimerGuard {
            start: Instant::now(),
            metrics: self,
        }
    }

    /// Get the pipeline name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Guard that records run time when dropped.
pub struct TimerGuard<'a> {
    start: Instant,
    metrics: &'a PipelineMetrics,
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        self.metrics.record_run_time(self.start.elapsed());
    }
}
