// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
JSON lines for cloud log ingestion.

On top of the entry's own fields, [`CloudEmitter`] reads side-channel
attributes from the [`Context`]: a [`Severity`](crate::Severity), the inbound
[`HttpRequest`](crate::context::HttpRequest), its response status and latency,
and trace/span ids.  Fields are written in this order:

| field | source |
|---|---|
| `time` | entry time, UTC, RFC 3339 with trailing fractional zeros trimmed |
| `severity` | [`Context::severity`] |
| `httpRequest` | request, status, latency |
| `httpHeaders` | request headers, minus `User-Agent`, `Referer`, `Referrer` and the trace header |
| `httpQuery` | URL query parameters |
| `logging.googleapis.com/trace`, `.../spanId`, `.../trace_sampled` | the [`SpanExtractor`] |
| *tags* | string tags, then structured tags; repeated keys keep the last value |
| `logging.googleapis.com/sourceLocation` | caller file and line |
| `message` | entry message |

Tags whose key collides with a field above are dropped.

```rust
use tagwise::context::Context;
use tagwise::emitter::cloud::{CloudEmitter, CloudOption};
use tagwise::sink::MemorySink;
use tagwise::{Logger, LoggerOption, Severity};
use std::sync::Arc;

let out = MemorySink::new();
let emitter = CloudEmitter::new([CloudOption::writer(out.clone())]);
let logger = Logger::new([LoggerOption::Emitter(Arc::new(emitter))]);

let ctx = Context::background()
    .with_severity(Severity::Error)
    .add_tags(["user", "42"]);
logger.print(&ctx, "failed");

let line: serde_json::Value = serde_json::from_str(&out.contents()).unwrap();
assert_eq!(line["severity"], "ERROR");
assert_eq!(line["user"], "42");
assert_eq!(line["message"], "failed");
```
*/

mod request;
mod severity;
mod trace;

pub use severity::{
    SeverityLogger, log_critical, log_debug, log_error, log_info, log_severity, log_warning,
};
#[cfg(feature = "opentelemetry")]
pub use trace::opentelemetry_span_extractor;
pub use trace::{
    SpanContext, SpanExtractor, TRACE_CONTEXT_HEADER, context_span_extractor, span_decimal_to_hex,
    trace_from_request,
};

use super::encode::{ObjectWriter, last_occurrences};
use super::{Emitter, rfc3339_nano_trimmed};
use crate::context::Context;
use crate::entry::{Entry, short_file};
use crate::pool;
use crate::sink::SerializedWriter;
use chrono::Utc;
use std::collections::HashSet;
use std::fmt::Debug;
use std::io::Write;
use std::sync::Arc;

pub const SOURCE_LOCATION_KEY: &str = "logging.googleapis.com/sourceLocation";
pub const TRACE_KEY: &str = "logging.googleapis.com/trace";
pub const SPAN_ID_KEY: &str = "logging.googleapis.com/spanId";
pub const TRACE_SAMPLED_KEY: &str = "logging.googleapis.com/trace_sampled";

/// Tag keys that would collide with the emitter's own fields.
pub const RESERVED_KEYS: [&str; 9] = [
    "httpHeaders",
    "httpQuery",
    "httpRequest",
    SOURCE_LOCATION_KEY,
    SPAN_ID_KEY,
    TRACE_KEY,
    "message",
    "severity",
    "time",
];

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Embeds a JSON tag value.  Multi-line values are re-serialized compactly so a
/// record always stays on one line.
fn write_json_tag(obj: &mut ObjectWriter<'_>, key: &str, value: &str) {
    if !value.contains(['\n', '\r']) {
        obj.raw(key, value);
        return;
    }
    match serde_json::from_str::<serde_json::Value>(value) {
        Ok(parsed) => obj.value(key, &parsed),
        Err(_) => obj.string(key, value),
    }
}

/// Configures a [`CloudEmitter`].  Options are applied in order.
pub enum CloudOption {
    /// One writer for every entry.
    Writer(Box<dyn Write + Send>),
    /// Entries whose context carries an HTTP request go to `request`, all
    /// others to `app`.
    ///
    /// The default is standard output for requests and standard error for the rest.
    Writers {
        request: Box<dyn Write + Send>,
        app: Box<dyn Write + Send>,
    },
    /// Reports only the file name in `sourceLocation`.
    ShortFile,
    /// Replaces [`context_span_extractor`].
    SpanExtractor(SpanExtractor),
}

impl CloudOption {
    pub fn writer(w: impl Write + Send + 'static) -> Self {
        CloudOption::Writer(Box::new(w))
    }

    pub fn writers(request: impl Write + Send + 'static, app: impl Write + Send + 'static) -> Self {
        CloudOption::Writers {
            request: Box::new(request),
            app: Box::new(app),
        }
    }

    pub fn span_extractor(f: impl Fn(&Context) -> SpanContext + Send + Sync + 'static) -> Self {
        CloudOption::SpanExtractor(Arc::new(f))
    }
}

impl Debug for CloudOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloudOption::Writer(_) => f.write_str("Writer(..)"),
            CloudOption::Writers { .. } => f.write_str("Writers { .. }"),
            CloudOption::ShortFile => f.write_str("ShortFile"),
            CloudOption::SpanExtractor(_) => f.write_str("SpanExtractor(..)"),
        }
    }
}

/// Writes entries as cloud-logging JSON.  See the [module docs](self).
pub struct CloudEmitter {
    request_out: Arc<SerializedWriter>,
    app_out: Arc<SerializedWriter>,
    short_file: bool,
    span_extractor: SpanExtractor,
}

impl Debug for CloudEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudEmitter")
            .field("request_out", &self.request_out)
            .field("app_out", &self.app_out)
            .field("short_file", &self.short_file)
            .finish_non_exhaustive()
    }
}

impl Default for CloudEmitter {
    fn default() -> Self {
        Self::new([])
    }
}

impl CloudEmitter {
    pub fn new(options: impl IntoIterator<Item = CloudOption>) -> Self {
        let mut request_out = None;
        let mut app_out = None;
        let mut short_file = false;
        let mut span_extractor: SpanExtractor = Arc::new(context_span_extractor);
        for option in options {
            match option {
                CloudOption::Writer(w) => {
                    let shared = Arc::new(SerializedWriter::from_boxed(w));
                    request_out = Some(shared.clone());
                    app_out = Some(shared);
                }
                CloudOption::Writers { request, app } => {
                    request_out = Some(Arc::new(SerializedWriter::from_boxed(request)));
                    app_out = Some(Arc::new(SerializedWriter::from_boxed(app)));
                }
                CloudOption::ShortFile => short_file = true,
                CloudOption::SpanExtractor(extractor) => span_extractor = extractor,
            }
        }
        CloudEmitter {
            request_out: request_out.unwrap_or_else(|| Arc::new(SerializedWriter::stdout())),
            app_out: app_out.unwrap_or_else(|| Arc::new(SerializedWriter::stderr())),
            short_file,
            span_extractor,
        }
    }

    pub(crate) fn render(&self, ctx: &Context, entry: &Entry, buf: &mut Vec<u8>) {
        let mut obj = ObjectWriter::open(buf);

        let time = entry.time.with_timezone(&Utc).fixed_offset();
        obj.string("time", &rfc3339_nano_trimmed(&time));

        if let Some(severity) = ctx.severity() {
            obj.string("severity", severity.as_str());
        }

        request::write_http_request(ctx, &mut obj);

        let sc = (self.span_extractor)(ctx);
        if !sc.trace_id.is_empty() {
            obj.string(TRACE_KEY, &sc.trace_id);
        }
        if !sc.span_id.is_empty() {
            obj.string(SPAN_ID_KEY, &sc.span_id);
        }
        if !sc.trace_id.is_empty() || !sc.span_id.is_empty() {
            obj.display(TRACE_SAMPLED_KEY, sc.sampled);
        }

        // a structured tag replaces a string tag with the same key
        let structured = last_occurrences(&entry.structured_tags, |t| t.key.as_str());
        let structured_keys: HashSet<&str> = structured.iter().map(|t| t.key.as_str()).collect();
        for tag in last_occurrences(&entry.tags, |t| t.key.as_str()) {
            if is_reserved(&tag.key) || structured_keys.contains(tag.key.as_str()) {
                continue;
            }
            if tag.is_json {
                write_json_tag(&mut obj, &tag.key, &tag.value);
            } else {
                obj.string(&tag.key, &tag.value);
            }
        }
        for tag in structured {
            if !is_reserved(&tag.key) {
                obj.value(&tag.key, &tag.value);
            }
        }

        if entry.has_caller() {
            let file = if self.short_file {
                short_file(&entry.file)
            } else {
                entry.file.as_str()
            };
            let mut location = obj.object(SOURCE_LOCATION_KEY);
            location.string("file", file);
            location.string("line", &entry.line.to_string());
            location.close();
        }

        obj.string("message", &entry.message);
        obj.close();
        buf.push(b'\n');
    }
}

impl Emitter for CloudEmitter {
    fn emit(&self, ctx: &Context, entry: &Entry) {
        let mut buf = pool::shared().get();
        self.render(ctx, entry, &mut buf);
        let out = if ctx.request().is_some() {
            &self.request_out
        } else {
            &self.app_out
        };
        let _ = out.write_record(&buf);
    }

    fn prepare_to_die(&self) {
        let _ = self.request_out.flush();
        let _ = self.app_out.flush();
    }
}
