// SPDX-License-Identifier: MIT OR Apache-2.0

//! Formatting macros.
//!
//! These are thin wrappers around `format_args!`, so arguments are only
//! formatted when the entry is actually emitted.  The caller location recorded
//! for an entry is the line of the macro invocation.

/// Formats and logs through a [`Logger`](crate::Logger).
///
/// ```
/// use tagwise::context::Context;
/// use tagwise::sink::MemorySink;
/// use tagwise::{Logger, LoggerOption};
///
/// let out = MemorySink::new();
/// let logger = Logger::new([LoggerOption::to(out.clone())]);
/// tagwise::printf!(logger, &Context::background(), "{} + {} = {}", 1, 1, 2);
/// assert_eq!(out.contents(), "1 + 1 = 2\n");
/// ```
#[macro_export]
macro_rules! printf {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.print_fmt($ctx, ::std::format_args!($($arg)+))
    };
}

/// Formats and logs at [`Level::Debug`](crate::leveled::Level::Debug) through a
/// [`Leveled`](crate::leveled::Leveled) logger.
#[macro_export]
macro_rules! debugf {
    ($leveled:expr, $ctx:expr, $($arg:tt)+) => {{
        use $crate::leveled::Leveled as _;
        $leveled.debug($ctx, ::std::format_args!($($arg)+));
    }};
}

/// Formats and logs at [`Level::Info`](crate::leveled::Level::Info) through a
/// [`Leveled`](crate::leveled::Leveled) logger.
///
/// ```
/// use std::sync::Arc;
/// use tagwise::context::Context;
/// use tagwise::emitter::cloud::SeverityLogger;
/// use tagwise::{InMemoryEmitter, Logger, LoggerOption};
///
/// let memory = Arc::new(InMemoryEmitter::new());
/// let leveled = SeverityLogger::new(Arc::new(Logger::new([LoggerOption::Emitter(memory.clone())])));
/// tagwise::infof!(leveled, &Context::background(), "user {} signed in", "ada");
/// assert_eq!(memory.drain_entries()[0].message, "user ada signed in");
/// ```
#[macro_export]
macro_rules! infof {
    ($leveled:expr, $ctx:expr, $($arg:tt)+) => {{
        use $crate::leveled::Leveled as _;
        $leveled.info($ctx, ::std::format_args!($($arg)+));
    }};
}

/// Formats and logs at [`Level::Warning`](crate::leveled::Level::Warning).
#[macro_export]
macro_rules! warningf {
    ($leveled:expr, $ctx:expr, $($arg:tt)+) => {{
        use $crate::leveled::Leveled as _;
        $leveled.warning($ctx, ::std::format_args!($($arg)+));
    }};
}

/// Formats and logs at [`Level::Error`](crate::leveled::Level::Error).
#[macro_export]
macro_rules! errorf {
    ($leveled:expr, $ctx:expr, $($arg:tt)+) => {{
        use $crate::leveled::Leveled as _;
        $leveled.error($ctx, ::std::format_args!($($arg)+));
    }};
}

/// Formats and logs at [`Level::Critical`](crate::leveled::Level::Critical).
#[macro_export]
macro_rules! criticalf {
    ($leveled:expr, $ctx:expr, $($arg:tt)+) => {{
        use $crate::leveled::Leveled as _;
        $leveled.critical($ctx, ::std::format_args!($($arg)+));
    }};
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::inmemory_emitter::InMemoryEmitter;
    use crate::leveled::LevelTagger;
    use crate::logger::{Logger, LoggerOption};
    use std::sync::Arc;

    #[test]
    fn leveled_macros() {
        let memory = Arc::new(InMemoryEmitter::new());
        let logger = Arc::new(Logger::new([
            LoggerOption::Emitter(memory.clone()),
            LoggerOption::Caller,
        ]));
        let leveled = LevelTagger::new(logger);
        let ctx = Context::background();

        let line = line!() + 1;
        crate::debugf!(leveled, &ctx, "{}", 1);
        crate::infof!(leveled, &ctx, "{}", 2);
        crate::warningf!(&leveled, &ctx, "{}", 3);
        crate::errorf!(leveled, &ctx, "{}", 4);
        crate::criticalf!(leveled, &ctx, "{x}", x = 5);

        let entries = memory.drain_entries();
        let got: Vec<(String, String, u32)> = entries
            .into_iter()
            .map(|e| (e.tags[0].value.clone(), e.message, e.line - line))
            .collect();
        assert_eq!(
            got,
            [
                ("debug".to_string(), "1".to_string(), 0),
                ("info".to_string(), "2".to_string(), 1),
                ("warning".to_string(), "3".to_string(), 2),
                ("error".to_string(), "4".to_string(), 3),
                ("critical".to_string(), "5".to_string(), 4),
            ]
        );
    }
}
