// SPDX-License-Identifier: MIT OR Apache-2.0

//! The [`Logger`]: builds an [`Entry`] per call and hands it to an [`Emitter`].

use crate::context::Context;
use crate::emitter::Emitter;
use crate::emitter::text::TextEmitter;
use crate::entry::Entry;
use crate::sink::SerializedWriter;
use chrono::{DateTime, FixedOffset};
use std::fmt::{Arguments, Debug, Display};
use std::io::Write;
use std::panic::Location;
use std::sync::Arc;

/// Source of entry timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

/// A configuration knob for [`Logger::new`].
///
/// Options are applied in order, so when two options set the same thing the
/// later one wins (for instance [`To`](LoggerOption::To) followed by
/// [`Emitter`](LoggerOption::Emitter)).
pub enum LoggerOption {
    /// Sends entries to this emitter.  Calls to the emitter are not synchronized.
    Emitter(Arc<dyn Emitter>),
    /// Writes entries as plain text to the writer, one serialized write per entry.
    ///
    /// Shorthand for a default [`TextEmitter`].
    To(Box<dyn Write + Send>),
    /// Records the file and line of the logging call site in each entry.
    Caller,
    /// Overrides where timestamps come from, mostly for deterministic tests.
    Clock(Clock),
}

impl LoggerOption {
    /// Shorthand for [`LoggerOption::To`].
    pub fn to(w: impl Write + Send + 'static) -> Self {
        LoggerOption::To(Box::new(w))
    }

    /// Shorthand for [`LoggerOption::Clock`].
    pub fn clock(f: impl Fn() -> DateTime<FixedOffset> + Send + Sync + 'static) -> Self {
        LoggerOption::Clock(Arc::new(f))
    }

    /// A clock that always returns `time`.
    pub fn fixed_time(time: DateTime<FixedOffset>) -> Self {
        Self::clock(move || time)
    }
}

impl Debug for LoggerOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerOption::Emitter(e) => f.debug_tuple("Emitter").field(e).finish(),
            LoggerOption::To(_) => f.write_str("To(..)"),
            LoggerOption::Caller => f.write_str("Caller"),
            LoggerOption::Clock(_) => f.write_str("Clock(..)"),
        }
    }
}

/**
Extracts tags from a [`Context`] and emits [`Entry`] values.

A logger is built once with [`Logger::new`] and is immutable afterwards, so a
single instance can be shared across threads (typically in an `Arc`).  Any
synchronization of the output is the emitter's business.

A logger without an emitter ([`Logger::disabled`], or `Logger::new` with no
options) is valid: every method on it does nothing.

```rust
use tagwise::context::Context;
use tagwise::sink::MemorySink;
use tagwise::{Logger, LoggerOption};

let out = MemorySink::new();
let logger = Logger::new([LoggerOption::to(out.clone())]);

let ctx = Context::background();
logger.print(&ctx, "test");
let ctx = ctx.add_tags(["more", "context"]);
logger.print(&ctx, "test");

assert_eq!(out.contents(), "test\n[more=context] test\n");
```
*/
pub struct Logger {
    emitter: Option<Arc<dyn Emitter>>,
    capture_caller: bool,
    clock: Clock,
}

impl Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("emitter", &self.emitter)
            .field("capture_caller", &self.capture_caller)
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Logger {
    pub fn new(options: impl IntoIterator<Item = LoggerOption>) -> Self {
        let mut logger = Logger::disabled();
        for option in options {
            match option {
                LoggerOption::Emitter(e) => logger.emitter = Some(e),
                LoggerOption::To(w) => {
                    let out = Arc::new(SerializedWriter::from_boxed(w));
                    logger.emitter = Some(Arc::new(TextEmitter::with_writer(out, [])));
                }
                LoggerOption::Caller => logger.capture_caller = true,
                LoggerOption::Clock(clock) => logger.clock = clock,
            }
        }
        logger
    }

    /// A logger that drops everything.
    pub fn disabled() -> Self {
        Logger {
            emitter: None,
            capture_caller: false,
            clock: Arc::new(crate::sys::now),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.emitter.is_some()
    }

    pub fn emitter(&self) -> Option<&Arc<dyn Emitter>> {
        self.emitter.as_ref()
    }

    /// Emits `message`, reporting the caller of this method as its location.
    ///
    /// This is the bottom of the logger: every other logging method ends up
    /// here.  Wrappers that are themselves `#[track_caller]` pass their own
    /// caller through, so the reported location is always the first frame
    /// outside the logging API.
    #[track_caller]
    pub fn output(&self, ctx: &Context, message: impl Into<String>) {
        self.output_at(ctx, Location::caller(), message)
    }

    /// Emits `message` with an explicitly supplied call site.
    pub fn output_at(&self, ctx: &Context, location: &Location<'_>, message: impl Into<String>) {
        let Some(emitter) = &self.emitter else {
            return;
        };
        let mut entry = Entry::new((self.clock)(), message);
        entry.tags = ctx.tags();
        entry.structured_tags = ctx.structured_tags();
        if self.capture_caller {
            entry.file = location.file().to_string();
            entry.line = location.line();
        }
        emitter.emit(ctx, &entry);
    }

    /// Emits the `Display` rendering of `message`.
    #[track_caller]
    pub fn print(&self, ctx: &Context, message: impl Display) {
        if !self.is_enabled() {
            return;
        }
        self.output(ctx, message.to_string())
    }

    /// Emits pre-formatted arguments; see also the [`printf!`](crate::printf) macro.
    #[track_caller]
    pub fn print_fmt(&self, ctx: &Context, args: Arguments<'_>) {
        if !self.is_enabled() {
            return;
        }
        self.output(ctx, std::fmt::format(args))
    }

    /// Asks the emitter to flush whatever it has buffered.
    pub fn prepare_to_die(&self) {
        if let Some(emitter) = &self.emitter {
            emitter.prepare_to_die();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory_emitter::InMemoryEmitter;
    use crate::sink::MemorySink;
    use crate::tag::StructuredTag;
    use chrono::TimeZone;

    fn epoch() -> DateTime<FixedOffset> {
        chrono::Utc.timestamp_opt(0, 0).unwrap().fixed_offset()
    }

    #[test]
    fn disabled_logger_is_a_no_op() {
        let logger = Logger::disabled();
        let ctx = Context::background().add_tags(["a", "b"]);
        logger.print(&ctx, "this shouldn't explode");
        logger.output(&ctx, "nor this");
        logger.print_fmt(&ctx, format_args!("nor {}", "this"));
        logger.prepare_to_die();
        assert!(!logger.is_enabled());
        assert!(!Logger::new([]).is_enabled());
        assert!(!Logger::default().is_enabled());
    }

    #[test]
    fn ignored_trailing_tag() {
        let out = MemorySink::new();
        let logger = Logger::new([LoggerOption::to(out.clone())]);

        let ctx = Context::background().add_tags(["a", "b", "unpaired"]);
        logger.print(&ctx, "test");

        assert_eq!(out.contents(), "[a=b] test\n");
    }

    #[test]
    fn last_option_wins() {
        let out = MemorySink::new();
        let memory = Arc::new(InMemoryEmitter::new());
        let logger = Logger::new([
            LoggerOption::to(out.clone()),
            LoggerOption::Emitter(memory.clone()),
        ]);
        logger.print(&Context::background(), "test");
        assert_eq!(out.contents(), "");
        assert_eq!(memory.drain_entries().len(), 1);
    }

    #[test]
    fn entry_carries_clock_tags_and_structured_tags() {
        let memory = Arc::new(InMemoryEmitter::new());
        let logger = Logger::new([
            LoggerOption::Emitter(memory.clone()),
            LoggerOption::fixed_time(epoch()),
        ]);
        let ctx = Context::background()
            .add_tags(["k", "v"])
            .add_structured_tags([StructuredTag::new("n", &3)]);
        logger.print_fmt(&ctx, format_args!("{}-{}", 1, 2));

        let entries = memory.drain_entries();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.time, epoch());
        assert_eq!(entry.message, "1-2");
        assert_eq!(entry.tags[0].key, "k");
        assert_eq!(entry.structured_tags[0].value, serde_json::json!(3));
        assert!(!entry.has_caller());
    }

    #[test]
    fn caller_is_the_logging_call_site() {
        let memory = Arc::new(InMemoryEmitter::new());
        let logger = Logger::new([LoggerOption::Emitter(memory.clone()), LoggerOption::Caller]);
        let ctx = Context::background();

        let line = line!() + 1;
        logger.print(&ctx, "via print");
        logger.output(&ctx, "via output");
        logger.print_fmt(&ctx, format_args!("via print_fmt"));
        crate::printf!(logger, &ctx, "via {}", "macro");

        let entries = memory.drain_entries();
        assert_eq!(entries.len(), 4);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.short_file(), "logger.rs");
            assert_eq!(entry.line, line + i as u32, "{}", entry.message);
        }
    }

    #[test]
    fn output_at_uses_supplied_location() {
        let memory = Arc::new(InMemoryEmitter::new());
        let logger = Logger::new([LoggerOption::Emitter(memory.clone()), LoggerOption::Caller]);
        let here = Location::caller();
        logger.output_at(&Context::background(), here, "explicit");
        let entries = memory.drain_entries();
        assert_eq!(entries[0].line, here.line());
    }
}
