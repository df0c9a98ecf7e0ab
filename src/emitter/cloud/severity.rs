// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging with a cloud severity.

use crate::context::Context;
use crate::leveled::{Level, Leveled};
use crate::level::Severity;
use crate::logger::Logger;
use std::fmt::{Arguments, Display};
use std::sync::Arc;

/// Logs `message` with `severity` bound on the context.
///
/// Dropped when `severity` ranks below the context's
/// [`min_severity`](Context::min_severity).
///
/// ```rust
/// use tagwise::context::Context;
/// use tagwise::emitter::cloud::{log_info, log_warning};
/// use tagwise::{InMemoryEmitter, Logger, LoggerOption, Severity};
/// use std::sync::Arc;
///
/// let memory = Arc::new(InMemoryEmitter::new());
/// let logger = Logger::new([LoggerOption::Emitter(memory.clone())]);
/// let ctx = Context::background().with_min_severity(Severity::Warning);
///
/// log_info(&ctx, &logger, "too quiet");
/// log_warning(&ctx, &logger, format_args!("disk {}% full", 93));
///
/// let entries = memory.drain_entries();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].message, "disk 93% full");
/// ```
#[track_caller]
pub fn log_severity(ctx: &Context, logger: &Logger, severity: Severity, message: impl Display) {
    if !logger.is_enabled() {
        return;
    }
    let min = ctx.min_severity().map_or(0, Severity::priority);
    if severity.priority() < min {
        return;
    }
    logger.output(&ctx.with_severity(severity), message.to_string());
}

#[track_caller]
pub fn log_debug(ctx: &Context, logger: &Logger, message: impl Display) {
    log_severity(ctx, logger, Severity::Debug, message)
}

#[track_caller]
pub fn log_info(ctx: &Context, logger: &Logger, message: impl Display) {
    log_severity(ctx, logger, Severity::Info, message)
}

#[track_caller]
pub fn log_warning(ctx: &Context, logger: &Logger, message: impl Display) {
    log_severity(ctx, logger, Severity::Warning, message)
}

#[track_caller]
pub fn log_error(ctx: &Context, logger: &Logger, message: impl Display) {
    log_severity(ctx, logger, Severity::Error, message)
}

#[track_caller]
pub fn log_critical(ctx: &Context, logger: &Logger, message: impl Display) {
    log_severity(ctx, logger, Severity::Critical, message)
}

/// A [`Leveled`] logger that sets the severity instead of adding a tag.
#[derive(Debug, Clone)]
pub struct SeverityLogger {
    logger: Arc<Logger>,
}

impl SeverityLogger {
    pub fn new(logger: Arc<Logger>) -> Self {
        SeverityLogger { logger }
    }
}

impl Leveled for SeverityLogger {
    #[track_caller]
    fn log(&self, ctx: &Context, level: Level, args: Arguments<'_>) {
        log_severity(ctx, &self.logger, level.into(), args)
    }
}
