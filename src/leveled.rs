// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named-level logging on top of [`Logger`].
//!
//! [`Leveled`] is the interface: one method per level plus [`Leveled::log`].
//! Two implementations ship with the crate:
//!
//! * [`LevelTagger`] adds a `level` tag and suits any emitter.
//! * [`SeverityLogger`](crate::emitter::cloud::SeverityLogger) sets the
//!   cloud severity instead.

use crate::context::Context;
use crate::level::Severity;
use crate::logger::Logger;
use std::fmt::{Arguments, Display};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// The tag key [`LevelTagger`] writes.
pub const LEVEL_KEY: &str = "level";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    #[default]
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
        }
    }

    const fn from_u8(v: u8) -> Level {
        match v {
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warning,
            3 => Level::Error,
            _ => Level::Critical,
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Severity {
        match level {
            Level::Debug => Severity::Debug,
            Level::Info => Severity::Info,
            Level::Warning => Severity::Warning,
            Level::Error => Severity::Error,
            Level::Critical => Severity::Critical,
        }
    }
}

/**
Logging at named levels.

Every method is `#[track_caller]`, so the caller location recorded on the entry
is the line that called `info`/`error`/... no matter which level was used.
*/
pub trait Leveled {
    #[track_caller]
    fn log(&self, ctx: &Context, level: Level, args: Arguments<'_>);

    /// Debugging or trace information.
    #[track_caller]
    fn debug(&self, ctx: &Context, args: Arguments<'_>) {
        self.log(ctx, Level::Debug, args)
    }

    /// Normal information.
    #[track_caller]
    fn info(&self, ctx: &Context, args: Arguments<'_>) {
        self.log(ctx, Level::Info, args)
    }

    /// A potential problem.
    #[track_caller]
    fn warning(&self, ctx: &Context, args: Arguments<'_>) {
        self.log(ctx, Level::Warning, args)
    }

    /// A likely problem.
    #[track_caller]
    fn error(&self, ctx: &Context, args: Arguments<'_>) {
        self.log(ctx, Level::Error, args)
    }

    /// A definite problem.
    #[track_caller]
    fn critical(&self, ctx: &Context, args: Arguments<'_>) {
        self.log(ctx, Level::Critical, args)
    }
}

/**
Tags each entry with `level=<name>` and hands it to the wrapped logger.

Entries below the minimum level are dropped.  The minimum starts at
[`Level::Debug`] (everything is logged) and can be raised at any time, from any
thread.

```rust
use std::sync::Arc;
use tagwise::context::Context;
use tagwise::leveled::{Level, LevelTagger, Leveled};
use tagwise::sink::MemorySink;
use tagwise::{Logger, LoggerOption};

let out = MemorySink::new();
let leveled = LevelTagger::new(Arc::new(Logger::new([LoggerOption::to(out.clone())])));
let ctx = Context::background().add_tags(["key", "value"]);

leveled.info(&ctx, format_args!(""));
leveled.set_min_level(Level::Error);
leveled.warning(&ctx, format_args!("dropped"));

assert_eq!(out.contents(), "[key=value level=info] \n");
```
*/
#[derive(Debug)]
pub struct LevelTagger {
    logger: Arc<Logger>,
    min_level: AtomicU8,
}

impl LevelTagger {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self::filtered(logger, Level::Debug)
    }

    /// A tagger that starts out dropping entries below `min_level`.
    pub fn filtered(logger: Arc<Logger>, min_level: Level) -> Self {
        LevelTagger {
            logger,
            min_level: AtomicU8::new(min_level as u8),
        }
    }

    pub fn set_min_level(&self, level: Level) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    pub fn min_level(&self) -> Level {
        Level::from_u8(self.min_level.load(Ordering::Relaxed))
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }
}

impl Leveled for LevelTagger {
    #[track_caller]
    fn log(&self, ctx: &Context, level: Level, args: Arguments<'_>) {
        if level < self.min_level() || !self.logger.is_enabled() {
            return;
        }
        let ctx = ctx.add_tags([LEVEL_KEY, level.as_str()]);
        self.logger.output(&ctx, std::fmt::format(args));
    }
}
