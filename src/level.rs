// SPDX-License-Identifier: MIT OR Apache-2.0
use std::fmt::Display;

/// Severity of a log entry, as understood by cloud log ingestion.
///
/// Variants are declared in priority order, so the derived `Ord` matches
/// [`Severity::priority`].  `Default` sorts last: an entry with no assigned
/// severity is never filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Debug or trace information.
    Debug,
    /// Routine information, such as ongoing status or performance.
    Info,
    /// Normal but significant events, such as start up, shut down, or a configuration change.
    Notice,
    /// Warning events might cause problems.
    Warning,
    /// Error events are likely to cause problems.
    Error,
    /// Critical events cause more severe problems or outages.
    Critical,
    /// A person must take an action immediately.
    Alert,
    /// One or more systems are unusable.
    Emergency,
    /// The log entry has no assigned severity level.
    Default,
}

impl Severity {
    pub const fn priority(self) -> u8 {
        self as u8
    }

    /// The wire name, e.g. `"WARNING"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Notice => "NOTICE",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
            Severity::Alert => "ALERT",
            Severity::Emergency => "EMERGENCY",
            Severity::Default => "DEFAULT",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
