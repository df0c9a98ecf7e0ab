// SPDX-License-Identifier: MIT OR Apache-2.0

//! Emitters turn an [`Entry`] into output.
//!
//! Three emitters ship with the crate:
//!
//! * [`text::TextEmitter`]: `[prefix][time ][file:line: ][[k=v ...] ]message`
//! * [`json::JsonEmitter`]: one JSON object per line
//! * [`cloud::CloudEmitter`]: one JSON object per line in the cloud logging
//!   dialect, enriched with severity, HTTP request and trace data read from the
//!   [`Context`]
//!
//! Each builds the whole record in a scratch buffer and hands it to a
//! [`SerializedWriter`](crate::sink::SerializedWriter) in a single write, so
//! records from concurrent callers never interleave.

pub mod cloud;
pub(crate) mod encode;
pub mod json;
pub mod text;

use crate::context::Context;
use crate::entry::Entry;
use chrono::{DateTime, FixedOffset, SecondsFormat, Timelike, Utc};
use std::fmt::{Debug, Write};

pub trait Emitter: Debug + Send + Sync {
    /**
    Writes the entry somewhere.

    `ctx` is the context the caller logged with, so emitters can read side-channel
    attributes that are not tags.  Callers do not synchronize calls to `emit`;
    an emitter that shares a sink must serialize access itself.  `emit` cannot
    fail: an emitter that can't write drops the entry.
    */
    fn emit(&self, ctx: &Context, entry: &Entry);

    /**
    The application may imminently exit.  Ensure all buffers are flushed and up to date.
    */
    fn prepare_to_die(&self) {}
}

/// Adapts any `Fn(&Context, &Entry)` into an [`Emitter`].
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use tagwise::context::Context;
/// use tagwise::{EmitterFn, Logger, LoggerOption};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// let logger = Logger::new([LoggerOption::Emitter(Arc::new(EmitterFn::new(
///     move |_ctx: &Context, entry: &tagwise::Entry| sink.lock().unwrap().push(entry.message.clone()),
/// )))]);
///
/// logger.print(&Context::background(), "hello");
/// assert_eq!(*seen.lock().unwrap(), ["hello"]);
/// ```
pub struct EmitterFn<F>(F);

impl<F> EmitterFn<F>
where
    F: Fn(&Context, &Entry) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        EmitterFn(f)
    }
}

impl<F> Debug for EmitterFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmitterFn").finish_non_exhaustive()
    }
}

impl<F> Emitter for EmitterFn<F>
where
    F: Fn(&Context, &Entry) + Send + Sync,
{
    fn emit(&self, ctx: &Context, entry: &Entry) {
        (self.0)(ctx, entry)
    }
}

/// How an emitter renders [`Entry::time`].
///
/// All RFC 3339 variants write `Z` for a zero UTC offset and `+hh:mm` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `2006-01-02T15:04:05Z`
    Rfc3339,
    /// Fractional seconds with trailing zeros removed: `2006-01-02T15:04:05.5Z`
    Rfc3339Nano,
    /// Always nine fractional digits: `2006-01-02T15:04:05.500000000Z`
    Rfc3339NanoPadded,
    /// A [`chrono::format::strftime`] pattern.  An empty pattern disables the timestamp.
    Strftime(String),
    /// No timestamp at all.
    Disabled,
}

impl TimestampFormat {
    /// Renders `time`, converted to UTC first when `utc` is set.
    ///
    /// Returns `None` when the timestamp is disabled.  An invalid strftime
    /// pattern falls back to [`Rfc3339`](Self::Rfc3339).
    pub fn render(&self, time: &DateTime<FixedOffset>, utc: bool) -> Option<String> {
        let time = if utc {
            time.with_timezone(&Utc).fixed_offset()
        } else {
            *time
        };
        match self {
            TimestampFormat::Disabled => None,
            TimestampFormat::Strftime(pattern) if pattern.is_empty() => None,
            TimestampFormat::Rfc3339 => Some(time.to_rfc3339_opts(SecondsFormat::Secs, true)),
            TimestampFormat::Rfc3339NanoPadded => {
                Some(time.to_rfc3339_opts(SecondsFormat::Nanos, true))
            }
            TimestampFormat::Rfc3339Nano => Some(rfc3339_nano_trimmed(&time)),
            TimestampFormat::Strftime(pattern) => {
                let mut out = String::new();
                match write!(out, "{}", time.format(pattern)) {
                    Ok(()) => Some(out),
                    Err(_) => Some(time.to_rfc3339_opts(SecondsFormat::Secs, true)),
                }
            }
        }
    }
}

pub(crate) fn rfc3339_nano_trimmed(time: &DateTime<FixedOffset>) -> String {
    let mut out = time.format("%Y-%m-%dT%H:%M:%S").to_string();
    // leap seconds are reported as nanos >= 1e9
    let nanos = time.nanosecond() % 1_000_000_000;
    if nanos != 0 {
        let digits = format!("{nanos:09}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    if time.offset().local_minus_utc() == 0 {
        out.push('Z');
    } else {
        out.push_str(&time.format("%:z").to_string());
    }
    out
}

/*
Boilerplate notes.

# Emitter

Clone is not required: loggers share emitters through Arc.
PartialEq/Hash would have to mean provenance rather than data, so they are left out.
Default is not sensible since most emitters need a sink.
Send/Sync are required because one logger is shared by every thread of a program.
*/
