//! Search worker message types.
//!
//! This module defines the request and response protocol between the
//! pipeline and the search worker, plus trace context propagation so spans
//! recorded on a search task link back to the span that submitted the query.

use crate::client::SearchResult;

/// Distributed tracing context carried across the task boundary.
///
/// Captures the current trace and span IDs from OpenTelemetry when a search
/// is requested, so the spawned search task can parent its span correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the current
    /// span context is invalid.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds a remote OpenTelemetry context from the captured IDs.
    ///
    /// Returns `None` if either ID is not valid hex.
    #[must_use]
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Requests sent from the pipeline to the search worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Run a search, superseding any search still in flight.
    Search {
        /// Trimmed, non-empty query text.
        query: String,

        /// Monotonic id of this search; responses echo it back.
        generation: u64,

        /// Trace context for linking spans across tasks.
        trace_context: Option<TraceContext>,
    },

    /// Abort the in-flight search, if any, without starting another.
    CancelInFlight,
}

impl WorkerMessage {
    /// Creates a `Search` message with the current trace context.
    #[must_use]
    pub fn search(query: String, generation: u64) -> Self {
        Self::Search {
            query,
            generation,
            trace_context: TraceContext::from_current(),
        }
    }
}

/// Responses sent from the search worker back to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    /// A search task ran to completion.
    SearchCompleted {
        /// Generation of the originating `Search` message.
        generation: u64,

        /// Query the search ran for.
        query: String,

        /// Payload or failure reported by the client.
        result: SearchResult,
    },
}
