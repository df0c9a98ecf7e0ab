// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request-scoped attributes for logging.
//!
//! A [`Context`] is an immutable, cheaply clonable handle to a chain of
//! attributes: string tags, structured tags, a cloud severity, HTTP request
//! details, trace and span ids, and optionally a [`Logger`](crate::Logger) to
//! pass down a call chain.  Deriving a new context never changes the one it was
//! derived from, so a request handler can fan a context out to concurrent
//! branches and let each branch add its own tags.
//!
//! # Tags
//!
//! ```rust
//! use tagwise::context::Context;
//!
//! let request = Context::background().add_tags(["request_id", "42"]);
//! let db = request.add_tags(["component", "db"]);
//! let cache = request.add_tags(["component", "cache"]);
//!
//! assert_eq!(request.tags().len(), 1);
//! assert_eq!(db.tags()[1].value, "db");
//! assert_eq!(cache.tags()[1].value, "cache");
//! ```
//!
//! # Side-channel attributes
//!
//! Some values are not tags at all: they are read by particular emitters.  The
//! [`cloud`](crate::emitter::cloud) emitter reads severity, the HTTP request,
//! its status and latency, and the trace/span ids:
//!
//! ```rust
//! use tagwise::context::Context;
//! use tagwise::Severity;
//!
//! let request = http::Request::get("/search?q=rust")
//!     .header("X-Cloud-Trace-Context", "a2fbf27a2ed90077e0d4af0e40a241f9/12690385211238481741")
//!     .body(())
//!     .unwrap();
//! let ctx = Context::background()
//!     .with_request(&request)
//!     .with_severity(Severity::Warning)
//!     .with_request_status(404);
//!
//! assert_eq!(ctx.trace().as_deref(), Some("a2fbf27a2ed90077e0d4af0e40a241f9"));
//! assert_eq!(ctx.span().as_deref(), Some("b01d4e1cf2bd7f4d"));
//! assert_eq!(ctx.request_status(), Some(404));
//! ```

mod context_impl;
mod request;


pub use context_impl::{Context, add_structured_tags, add_tags, structured_tags_from_context, tags_from_context};
pub use request::HttpRequest;
