// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trace and span ids.

use crate::context::{Context, HttpRequest};
use std::sync::Arc;

/// The load balancer's trace header: `TRACE_ID/SPAN_ID;o=OPTIONS`, span id in decimal.
pub const TRACE_CONTEXT_HEADER: &str = "X-Cloud-Trace-Context";

/// The ids that fill the `logging.googleapis.com/trace`, `spanId` and
/// `trace_sampled` fields.  Empty strings mean "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanContext {
    pub trace_id: String,
    pub span_id: String,
    pub sampled: bool,
}

/// Pulls trace ids for an entry out of whatever tracing system is in use.
pub type SpanExtractor = Arc<dyn Fn(&Context) -> SpanContext + Send + Sync>;

/// Reads [`Context::trace`] and [`Context::span`].
///
/// Either one being present marks the span as sampled.
pub fn context_span_extractor(ctx: &Context) -> SpanContext {
    let mut sc = SpanContext::default();
    if let Some(trace) = ctx.trace() {
        sc.trace_id = trace;
        sc.sampled = true;
    }
    if let Some(span) = ctx.span() {
        sc.span_id = span;
        sc.sampled = true;
    }
    sc
}

/// Reads the span of the current OpenTelemetry context.
///
/// The [`Context`] argument is ignored; OpenTelemetry keeps its own.
#[cfg(feature = "opentelemetry")]
pub fn opentelemetry_span_extractor(_ctx: &Context) -> SpanContext {
    use opentelemetry::trace::TraceContextExt;

    let otel = opentelemetry::Context::current();
    let span = otel.span();
    let sc = span.span_context();
    if !sc.is_valid() {
        return SpanContext::default();
    }
    SpanContext {
        trace_id: sc.trace_id().to_string(),
        span_id: sc.span_id().to_string(),
        sampled: sc.is_sampled(),
    }
}

/// Formats a 64-bit span id as 16 lowercase hex digits, zero padded.
///
/// ```
/// use tagwise::emitter::cloud::span_decimal_to_hex;
/// assert_eq!(span_decimal_to_hex(12690385211238481741), "b01d4e1cf2bd7f4d");
/// assert_eq!(span_decimal_to_hex(0), "0000000000000000");
/// ```
pub fn span_decimal_to_hex(span: u64) -> String {
    format!("{span:016x}")
}

/// Parses the request's [`TRACE_CONTEXT_HEADER`] into `(trace, span)`.
///
/// The span is returned in hex.  A span that is not a decimal `u64` is dropped;
/// the trace is kept.
pub fn trace_from_request(request: &HttpRequest) -> (Option<String>, Option<String>) {
    let Some(header) = request.first_header(TRACE_CONTEXT_HEADER) else {
        return (None, None);
    };
    let mut parts = header.split('/');
    let trace = parts
        .next()
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let span = parts
        .next()
        .and_then(|s| s.split(';').next())
        .and_then(|s| s.parse::<u64>().ok())
        .map(span_decimal_to_hex);
    (trace, span)
}
