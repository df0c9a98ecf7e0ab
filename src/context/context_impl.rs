// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core Context implementation.

use std::sync::Arc;

use super::request::HttpRequest;
use crate::level::Severity;
use crate::logger::Logger;
use crate::sys::Duration;
use crate::tag::{StructuredTag, Tag, pair_up};

/// The single attribute a context node binds.
#[derive(Debug)]
pub(crate) enum Attribute {
    Root,
    Tags(Vec<Tag>),
    StructuredTags(Vec<StructuredTag>),
    Severity(Severity),
    MinSeverity(Severity),
    Request(Arc<HttpRequest>),
    Status(u16),
    Latency(Duration),
    Trace(String),
    Span(String),
    Logger(Arc<Logger>),
}

/// Internal context data.
///
/// Each node binds one attribute and points at the node it was derived from,
/// so derived contexts share their parent's chain instead of copying it.
#[derive(Debug)]
pub(crate) struct ContextInner {
    pub(crate) parent: Option<Context>,
    pub(crate) attribute: Attribute,
}

impl Drop for ContextInner {
    // Unlinks the chain iteratively; the default drop recurses once per node.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(ctx) = next {
            next = match Arc::into_inner(ctx.inner) {
                Some(mut inner) => inner.parent.take(),
                // still shared, so the rest of the chain stays alive
                None => None,
            };
        }
    }
}

/// Immutable, request-scoped logging attributes.
///
/// Every `with_*`/`add_*` method returns a *new* context; the receiver is left
/// untouched.  Multi-valued attributes (tags, structured tags) accumulate along
/// the chain in the order they were added.  Single-valued attributes resolve
/// to the most recently bound value.
///
/// Contexts are cheap to clone (`Arc`-based), `Send` and `Sync`.
///
/// ```rust
/// use tagwise::context::Context;
///
/// let parent = Context::background().add_tags(["a", "1"]);
/// let child = parent.add_tags(["b", "2", "unpaired"]);
///
/// let keys: Vec<_> = child.tags().into_iter().map(|t| t.key).collect();
/// assert_eq!(keys, ["a", "b"]);
/// assert_eq!(parent.tags().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    pub(crate) inner: Arc<ContextInner>,
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Context {}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl Context {
    /// An empty root context.
    pub fn background() -> Context {
        Context {
            inner: Arc::new(ContextInner {
                parent: None,
                attribute: Attribute::Root,
            }),
        }
    }

    fn derive(&self, attribute: Attribute) -> Context {
        Context {
            inner: Arc::new(ContextInner {
                parent: Some(self.clone()),
                attribute,
            }),
        }
    }

    /// Iterates from this node up to the root.
    fn chain(&self) -> impl Iterator<Item = &Context> {
        std::iter::successors(Some(self), |c| c.inner.parent.as_ref())
    }

    /// Finds the most recently bound attribute that `f` accepts.
    fn nearest<T>(&self, f: impl FnMut(&Attribute) -> Option<T>) -> Option<T> {
        self.chain().map(|c| &c.inner.attribute).find_map(f)
    }

    /// Appends tags given as a flat list of alternating keys and values.
    ///
    /// A trailing unpaired element is ignored.
    pub fn add_tags<I, S>(&self, pairs: I) -> Context
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = pair_up(pairs);
        if tags.is_empty() {
            return self.clone();
        }
        self.derive(Attribute::Tags(tags))
    }

    /// Appends already-built tags.
    pub fn add_tag_values(&self, tags: impl IntoIterator<Item = Tag>) -> Context {
        let tags: Vec<Tag> = tags.into_iter().collect();
        if tags.is_empty() {
            return self.clone();
        }
        self.derive(Attribute::Tags(tags))
    }

    /// All tags, oldest first.  Empty when none were ever added.
    pub fn tags(&self) -> Vec<Tag> {
        let segments: Vec<&Vec<Tag>> = self
            .chain()
            .filter_map(|c| match &c.inner.attribute {
                Attribute::Tags(tags) => Some(tags),
                _ => None,
            })
            .collect();
        segments.into_iter().rev().flatten().cloned().collect()
    }

    pub fn add_structured_tags(&self, tags: impl IntoIterator<Item = StructuredTag>) -> Context {
        let tags: Vec<StructuredTag> = tags.into_iter().collect();
        if tags.is_empty() {
            return self.clone();
        }
        self.derive(Attribute::StructuredTags(tags))
    }

    /// All structured tags, oldest first.
    pub fn structured_tags(&self) -> Vec<StructuredTag> {
        let segments: Vec<&Vec<StructuredTag>> = self
            .chain()
            .filter_map(|c| match &c.inner.attribute {
                Attribute::StructuredTags(tags) => Some(tags),
                _ => None,
            })
            .collect();
        segments.into_iter().rev().flatten().cloned().collect()
    }

    pub fn with_severity(&self, severity: Severity) -> Context {
        self.derive(Attribute::Severity(severity))
    }

    pub fn severity(&self) -> Option<Severity> {
        self.nearest(|a| match a {
            Attribute::Severity(s) => Some(*s),
            _ => None,
        })
    }

    /// Entries logged through the severity helpers below this priority are dropped.
    ///
    /// See [`log_severity`](crate::emitter::cloud::log_severity).
    pub fn with_min_severity(&self, severity: Severity) -> Context {
        self.derive(Attribute::MinSeverity(severity))
    }

    pub fn min_severity(&self) -> Option<Severity> {
        self.nearest(|a| match a {
            Attribute::MinSeverity(s) => Some(*s),
            _ => None,
        })
    }

    /// Attaches an inbound HTTP request, and any trace/span ids found in its
    /// `X-Cloud-Trace-Context` header.
    pub fn with_request<B>(&self, request: &http::Request<B>) -> Context {
        self.with_http_request(HttpRequest::from(request))
    }

    /// Like [`with_request`](Self::with_request), for an already-extracted request.
    pub fn with_http_request(&self, request: HttpRequest) -> Context {
        let request = Arc::new(request);
        self.derive(Attribute::Request(request.clone()))
            .with_request_trace(&request)
    }

    /// Attaches only the trace/span ids found in the request's headers.
    pub fn with_request_trace(&self, request: &HttpRequest) -> Context {
        let (trace, span) = crate::emitter::cloud::trace_from_request(request);
        let mut ctx = self.clone();
        if let Some(trace) = trace {
            ctx = ctx.with_trace(trace);
        }
        if let Some(span) = span {
            ctx = ctx.with_span(span);
        }
        ctx
    }

    pub fn request(&self) -> Option<Arc<HttpRequest>> {
        self.nearest(|a| match a {
            Attribute::Request(r) => Some(r.clone()),
            _ => None,
        })
    }

    /// The HTTP status code returned for the request.
    pub fn with_request_status(&self, status: u16) -> Context {
        self.derive(Attribute::Status(status))
    }

    pub fn request_status(&self) -> Option<u16> {
        self.nearest(|a| match a {
            Attribute::Status(s) => Some(*s),
            _ => None,
        })
    }

    pub fn with_request_latency(&self, latency: Duration) -> Context {
        self.derive(Attribute::Latency(latency))
    }

    pub fn request_latency(&self) -> Option<Duration> {
        self.nearest(|a| match a {
            Attribute::Latency(l) => Some(*l),
            _ => None,
        })
    }

    pub fn with_trace(&self, trace: impl Into<String>) -> Context {
        self.derive(Attribute::Trace(trace.into()))
    }

    pub fn trace(&self) -> Option<String> {
        self.nearest(|a| match a {
            Attribute::Trace(t) => Some(t.clone()),
            _ => None,
        })
    }

    /// Binds a span id.
    ///
    /// This should be an 8-byte hex string (16 digits).  Some load balancers
    /// report a 64-bit decimal number instead; convert those with
    /// [`span_decimal_to_hex`](crate::emitter::cloud::span_decimal_to_hex).
    pub fn with_span(&self, span: impl Into<String>) -> Context {
        self.derive(Attribute::Span(span.into()))
    }

    pub fn span(&self) -> Option<String> {
        self.nearest(|a| match a {
            Attribute::Span(s) => Some(s.clone()),
            _ => None,
        })
    }

    /// Carries a logger down the call chain.
    pub fn with_logger(&self, logger: Arc<Logger>) -> Context {
        self.derive(Attribute::Logger(logger))
    }

    pub fn logger(&self) -> Option<Arc<Logger>> {
        self.nearest(|a| match a {
            Attribute::Logger(l) => Some(l.clone()),
            _ => None,
        })
    }
}

/// Free-function form of [`Context::add_tags`].
pub fn add_tags<I, S>(ctx: &Context, pairs: I) -> Context
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ctx.add_tags(pairs)
}

/// Free-function form of [`Context::tags`].
pub fn tags_from_context(ctx: &Context) -> Vec<Tag> {
    ctx.tags()
}

/// Free-function form of [`Context::add_structured_tags`].
pub fn add_structured_tags(ctx: &Context, tags: impl IntoIterator<Item = StructuredTag>) -> Context {
    ctx.add_structured_tags(tags)
}

/// Free-function form of [`Context::structured_tags`].
pub fn structured_tags_from_context(ctx: &Context) -> Vec<StructuredTag> {
    ctx.structured_tags()
}
