// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Emitter
//!
//! An [`Emitter`] that keeps every entry it receives, for tests and for
//! examining log output programmatically.
//!
//! Entries are cloned into an `Arc`-shareable `Mutex<Vec<Entry>>`, so one
//! instance can be handed to a [`Logger`](crate::Logger) while a test holds
//! another reference and drains it afterwards.

use crate::context::Context;
use crate::emitter::Emitter;
use crate::entry::Entry;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Retains emitted entries in memory.
///
/// ```rust
/// use std::sync::Arc;
/// use tagwise::context::Context;
/// use tagwise::{InMemoryEmitter, Logger, LoggerOption};
///
/// let memory = Arc::new(InMemoryEmitter::new());
/// let logger = Logger::new([LoggerOption::Emitter(memory.clone())]);
///
/// let ctx = Context::background().add_tags(["job", "7"]);
/// logger.print(&ctx, "finished");
///
/// assert_eq!(memory.drain_logs(), " finished [job=7]");
/// assert_eq!(memory.drain_logs(), "");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEmitter {
    entries: Mutex<Vec<Entry>>,
    short_file: bool,
}

// - Debug: required by Emitter.
// - Default: empty buffer, full file paths.
// - Clone: not implemented; share through Arc so every clone sees the same entries.
// - PartialEq/Hash: equality of capture buffers has no use.

impl InMemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortens file names in [`drain_logs`](Self::drain_logs).
    pub fn with_short_file() -> Self {
        InMemoryEmitter {
            entries: Mutex::new(Vec::new()),
            short_file: true,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes and returns every captured entry, oldest first.
    pub fn drain_entries(&self) -> Vec<Entry> {
        std::mem::take(&mut *self.lock())
    }

    /// Removes every captured entry and renders each as
    /// `<file> <message> [k=v ...]`, one per line.
    ///
    /// The file is empty unless the logger captures callers.
    pub fn drain_logs(&self) -> String {
        self.drain_entries()
            .iter()
            .map(|e| self.render(e))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn render(&self, entry: &Entry) -> String {
        let file = if self.short_file {
            entry.short_file()
        } else {
            entry.file.as_str()
        };
        let tags: Vec<String> = entry
            .tags
            .iter()
            .map(|t| format!("{}={}", t.key, t.value))
            .chain(
                entry
                    .structured_tags
                    .iter()
                    .map(|t| format!("{}={}", t.key, t.value)),
            )
            .collect();
        format!("{} {} [{}]", file, entry.message, tags.join(" "))
    }
}

impl Emitter for InMemoryEmitter {
    fn emit(&self, _ctx: &Context, entry: &Entry) {
        self.lock().push(entry.clone());
    }
}
