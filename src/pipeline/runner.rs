//! Synchronous pipeline driver.

use crate::element::{Output, Sink, Source, Transform};
use crate::error::{Error, Result};
use crate::observability::{PipelineMetrics, TracingConfig, trace_eos, trace_error};
use std::time::{Duration, Instant};

/// Counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Records produced by the source.
    pub records_in: u64,
    /// Records delivered to the sink.
    pub records_out: u64,
    /// Wall time of the run.
    pub elapsed: Duration,
}

/// A linear source → transform → sink pipeline.
///
/// The run is single-threaded: each source record is pushed through the
/// transform and whatever comes out is handed to the sink before the next
/// record is produced.
pub struct Pipeline<S, T, K> {
    name: String,
    source: S,
    transform: T,
    sink: K,
    tracing: TracingConfig,
    ran: bool,
}

impl<S: Source, T: Transform, K: Sink> Pipeline<S, T, K> {
    /// Create a pipeline.
    pub fn new(source: S, transform: T, sink: K) -> Self {
        Self {
            name: "pipeline".to_string(),
            source,
            transform,
            sink,
            tracing: TracingConfig::default(),
            ran: false,
        }
    }

    /// Set a custom name (used in logs and metric labels).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the tracing configuration.
    pub fn with_tracing(mut self, tracing: TracingConfig) -> Self {
        self.tracing = tracing;
        self
    }

    /// Run the pipeline to end of stream.
    ///
    /// Negotiates the schema once, starts the sink, pumps every record,
    /// flushes the transform at EOS and finishes the sink. A pipeline runs
    /// once; a second call is `InvalidState`.
    pub fn run(&mut self) -> Result<PipelineStats> {
        if self.ran {
            return Err(Error::invalid_state("run", "finished"));
        }
        self.ran = true;

        let metrics = PipelineMetrics::new(&self.name);
        let _span = self.tracing.pipeline_span(&self.name).entered();
        let _timer = metrics.start_timer();

        let result = self.pump();
        match &result {
            Ok(stats) => metrics.record_records(stats.records_out),
            Err(e) => {
                metrics.record_error();
                trace_error(&self.name, self.transform.name(), e);
            }
        }
        result
    }

    fn pump(&mut self) -> Result<PipelineStats> {
        let start = Instant::now();
        let mut stats = PipelineStats::default();

        let schema = self.transform.negotiate(self.source.schema())?;
        tracing::debug!(
            pipeline = %self.name,
            source = self.source.name(),
            transform = self.transform.name(),
            sink = self.sink.name(),
            schema = %schema,
            "schema negotiated"
        );
        self.sink.start(&schema)?;

        while let Some(record) = self.source.produce()? {
            stats.records_in += 1;
            let out = self.transform.transform(record)?;
            stats.records_out += deliver(&mut self.sink, out)?;
        }
        trace_eos(&self.name, self.source.name());

        let tail = self.transform.flush()?;
        stats.records_out += deliver(&mut self.sink, tail)?;
        self.sink.finish()?;

        stats.elapsed = start.elapsed();
        tracing::info!(
            pipeline = %self.name,
            records_in = stats.records_in,
            records_out = stats.records_out,
            elapsed_us = stats.elapsed.as_micros() as u64,
            "pipeline finished"
        );
        Ok(stats)
    }

    /// Get the pipeline name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The transform.
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// The sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Take the elements back.
    pub fn into_parts(self) -> (S, T, K) {
        (self.source, self.transform, self.sink)
    }
}

fn deliver<K: Sink>(sink: &mut K, out: Output) -> Result<u64> {
    let mut count = 0;
    for record in out {
        sink.consume(record)?;
        count += 1;
    }
    Ok(count)
}
