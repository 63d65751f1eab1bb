//! Tracing integration for structured logging and spans.

use tracing::{Level, Span, span};

/// Create a span at a level only known at runtime.
///
/// `span!` needs a constant level, so each level gets its own callsite.
macro_rules! span_at {
    ($level:expr, $($fields:tt)+) => {{
        let level = $level;
        if level == Level::ERROR {
            span!(Level::ERROR, $($fields)+)
        } else if level == Level::WARN {
            span!(Level::WARN, $($fields)+)
        } else if level == Level::INFO {
            span!(Level::INFO, $($fields)+)
        } else if level == Level::DEBUG {
            span!(Level::DEBUG, $($fields)+)
        } else {
            span!(Level::TRACE, $($fields)+)
        }
    }};
}

/// Configuration for tracing behavior.
///
/// # Example
///
/// ```rust
/// use tsdelta::observability::TracingConfig;
///
/// let span = TracingConfig::default().pipeline_span("prices");
/// let _guard = span.enter();
/// // Pipeline execution here...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Whether to create spans for pipeline runs.
    pub pipeline_spans: bool,
    /// Whether to create spans around filter streams.
    pub filter_spans: bool,
    /// Level of the spans created.
    pub level: Level,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            pipeline_spans: true,
            filter_spans: true,
            level: Level::INFO,
        }
    }
}

impl TracingConfig {
    /// Create a config with all spans enabled at debug level.
    pub fn all() -> Self {
        Self {
            pipeline_spans: true,
            filter_spans: true,
            level: Level::DEBUG,
        }
    }

    /// Disable all spans.
    pub fn none() -> Self {
        Self {
            pipeline_spans: false,
            filter_spans: false,
            level: Level::INFO,
        }
    }

    /// Set the span level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Span for a pipeline run, or a disabled span.
    pub fn pipeline_span(&self, name: &str) -> Span {
        if !self.pipeline_spans {
            return Span::none();
        }
        span_at!(self.level, "pipeline", name = %name)
    }

    /// Span for a filter stream, or a disabled span.
    pub fn filter_span(&self, filter: &str, policy: &str, offset: i64) -> Span {
        if !self.filter_spans {
            return Span::none();
        }
        span_at!(
            self.level,
            "filter",
            filter = %filter,
            policy = %policy,
            offset = offset
        )
    }
}

/// Log end-of-stream.
#[inline]
pub fn trace_eos(pipeline: &str, element: &str) {
    tracing::info!(
        pipeline = %pipeline,
        element = %element,
        "end of stream"
    );
}

/// Log an error.
#[inline]
pub fn trace_error(pipeline: &str, element: &str, error: &dyn std::error::Error) {
    tracing::error!(
        pipeline = %pipeline,
        element = %element,
        error = %error,
        "processing error"
    );
}
