// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide default [`Logger`].
//!
//! Library code should take a logger (or find one on the
//! [`Context`](crate::context::Context)).  For everything else, the package-level
//! [`print`] and [`print_fmt`] functions log through the global logger.
//!
//! # Default Behavior
//!
//! Until [`set_global_logger`] is called, the global logger writes plain text
//! to standard error with UTC RFC 3339 timestamps and short caller file names,
//! so logging works without any setup.
//!
//! ```
//! use std::sync::Arc;
//! use tagwise::context::Context;
//! use tagwise::global_logger::{global_logger, set_global_logger};
//! use tagwise::{InMemoryEmitter, Logger, LoggerOption};
//!
//! let memory = Arc::new(InMemoryEmitter::new());
//! let previous = set_global_logger(Logger::new([LoggerOption::Emitter(memory.clone())]));
//!
//! tagwise::global_logger::print(&Context::background(), "captured");
//! assert_eq!(memory.drain_entries()[0].message, "captured");
//!
//! set_global_logger(previous);
//! assert!(global_logger().is_enabled());
//! ```

use crate::context::Context;
use crate::emitter::text::TextEmitter;
use crate::logger::{Logger, LoggerOption};
use std::fmt::{Arguments, Display};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Lock hold times are limited to cloning or swapping one `Arc`.
static GLOBAL_LOGGER: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn default_logger() -> Logger {
    Logger::new([
        LoggerOption::Emitter(Arc::new(TextEmitter::stderr())),
        LoggerOption::Caller,
    ])
}

fn slot() -> &'static RwLock<Arc<Logger>> {
    GLOBAL_LOGGER.get_or_init(|| RwLock::new(Arc::new(default_logger())))
}

/// The current global logger.
///
/// The returned `Arc` stays usable even if the global logger is replaced meanwhile.
pub fn global_logger() -> Arc<Logger> {
    slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replaces the global logger and returns the previous one.
///
/// Accepts either a fresh [`Logger`] or an `Arc<Logger>`, so the returned
/// logger can be put back later.  Pass [`Logger::disabled`] to silence
/// package-level logging.
pub fn set_global_logger(logger: impl Into<Arc<Logger>>) -> Arc<Logger> {
    let mut slot = slot().write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, logger.into())
}

/// Logs through the global logger.
#[track_caller]
pub fn print(ctx: &Context, message: impl Display) {
    global_logger().print(ctx, message)
}

/// Logs pre-formatted arguments through the global logger.
#[track_caller]
pub fn print_fmt(ctx: &Context, args: Arguments<'_>) {
    global_logger().print_fmt(ctx, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory_emitter::InMemoryEmitter;
    use std::sync::Mutex;

    static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn replace_and_restore() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        let memory = Arc::new(InMemoryEmitter::new());
        let previous = set_global_logger(Logger::new([
            LoggerOption::Emitter(memory.clone()),
            LoggerOption::Caller,
        ]));

        let line = line!() + 1;
        print(&Context::background(), "one");
        print_fmt(&Context::background(), format_args!("{}", "two"));
        crate::printf!(global_logger(), &Context::background(), "{}", "three");

        let entries = memory.drain_entries();
        let messages: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["one", "two", "three"]);
        assert_eq!(entries[0].line, line);
        assert_eq!(entries[2].short_file(), "global_logger.rs");

        let replaced = set_global_logger(previous.clone());
        assert!(replaced.is_enabled());
        assert!(Arc::ptr_eq(&global_logger(), &previous));
    }

    #[test]
    fn shared_logger_can_be_installed() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        let memory = Arc::new(InMemoryEmitter::new());
        let shared = Arc::new(Logger::new([LoggerOption::Emitter(memory.clone())]));
        let previous = set_global_logger(shared.clone());

        print(&Context::background(), "shared");
        assert!(Arc::ptr_eq(&global_logger(), &shared));
        assert_eq!(memory.drain_entries()[0].message, "shared");

        let removed = set_global_logger(previous);
        assert!(Arc::ptr_eq(&removed, &shared));
    }

    #[test]
    fn disabled_global_logger() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        let previous = set_global_logger(Logger::disabled());
        print(&Context::background(), "nowhere");
        assert!(!global_logger().is_enabled());
        set_global_logger(previous);
    }
}
