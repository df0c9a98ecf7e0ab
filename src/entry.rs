// SPDX-License-Identifier: MIT OR Apache-2.0

//! The record handed to emitters.
//!
//! An [`Entry`] is built fresh by [`Logger::output`](crate::Logger::output) for
//! every call, lent to the configured [`Emitter`](crate::Emitter) by shared
//! reference, and dropped when the emitter returns.  Emitters that want to keep
//! it (such as [`InMemoryEmitter`](crate::InMemoryEmitter)) clone it.

use crate::tag::{StructuredTag, Tag};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/**
One log event.

`file` and `line` are only populated when the logger was built with
[`LoggerOption::Caller`](crate::LoggerOption::Caller); otherwise `file` is empty
and `line` is 0.
*/
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub time: DateTime<FixedOffset>,
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub structured_tags: Vec<StructuredTag>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub line: u32,
    pub message: String,
}

fn is_zero(line: &u32) -> bool {
    *line == 0
}

impl Entry {
    pub fn new(time: DateTime<FixedOffset>, message: impl Into<String>) -> Self {
        Entry {
            time,
            tags: Vec::new(),
            structured_tags: Vec::new(),
            file: String::new(),
            line: 0,
            message: message.into(),
        }
    }

    /// The file name without its directories.
    pub fn short_file(&self) -> &str {
        short_file(&self.file)
    }

    /// Whether caller information was captured for this entry.
    pub fn has_caller(&self) -> bool {
        !self.file.is_empty()
    }
}

/// Strips everything up to and including the last `/`.
///
/// A leading `/` alone is kept, so `"/x"` stays `"/x"`.
pub(crate) fn short_file(file: &str) -> &str {
    match file.rfind('/') {
        Some(idx) if idx > 0 => &file[idx + 1..],
        _ => file,
    }
}

/*
Boilerplate notes for Entry:

- Clone: emitters that buffer need an owned copy.
- PartialEq: tests compare captured entries.  Not Eq because structured tag values can hold floats.
- Serialize: custom emitters can dump an entry as-is.
- Default: no sensible timestamp, so not implemented.
- Hash/Ord: no meaningful ordering or identity for an event.
*/
