// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text lines.

use super::{Emitter, TimestampFormat};
use crate::context::Context;
use crate::entry::{Entry, short_file};
use crate::pool;
use crate::sink::SerializedWriter;
use std::io::Write;
use std::sync::Arc;

/// Configures a [`TextEmitter`].  Options are applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOption {
    /// Written at the start of every line.
    Prefix(String),
    /// Enables the timestamp, in this format.
    DateFormat(TimestampFormat),
    /// Writes `file:line: ` for entries that carry a caller.
    ///
    /// The logger must be built with [`LoggerOption::Caller`](crate::LoggerOption::Caller)
    /// for entries to carry one.
    File,
    /// Like [`File`](Self::File) with only the file name, not its directories.
    ShortFile,
    /// Converts timestamps to UTC.
    Utc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextOptions {
    pub prefix: String,
    pub date_format: Option<TimestampFormat>,
    pub file: bool,
    pub short_file: bool,
    pub utc: bool,
}

impl TextOptions {
    pub fn from_options(options: impl IntoIterator<Item = TextOption>) -> Self {
        let mut o = TextOptions::default();
        for option in options {
            o.apply(option);
        }
        o
    }

    pub fn apply(&mut self, option: TextOption) {
        match option {
            TextOption::Prefix(prefix) => self.prefix = prefix,
            TextOption::DateFormat(format) => self.date_format = Some(format),
            TextOption::File => self.file = true,
            TextOption::ShortFile => {
                self.file = true;
                self.short_file = true;
            }
            TextOption::Utc => self.utc = true,
        }
    }
}

/**
Writes `[prefix][time ][file:line: ][[k=v ...] ]message`, one line per entry.

Every tag is shown in the order it was added, repeated keys included.  A
newline is appended unless the message already ends with one.

```rust
use tagwise::context::Context;
use tagwise::emitter::text::{TextEmitter, TextOption};
use tagwise::sink::MemorySink;
use tagwise::{Logger, LoggerOption};
use std::sync::Arc;

let out = MemorySink::new();
let emitter = TextEmitter::new(out.clone(), [TextOption::Prefix("app: ".into())]);
let logger = Logger::new([LoggerOption::Emitter(Arc::new(emitter))]);

logger.print(&Context::background().add_tags(["a", "1", "a", "2"]), "done\n");
assert_eq!(out.contents(), "app: [a=1 a=2] done\n");
```
*/
#[derive(Debug)]
pub struct TextEmitter {
    options: TextOptions,
    out: Arc<SerializedWriter>,
}

impl TextEmitter {
    pub fn new(w: impl Write + Send + 'static, options: impl IntoIterator<Item = TextOption>) -> Self {
        Self::with_writer(Arc::new(SerializedWriter::new(w)), options)
    }

    /// Shares an existing serialized writer, for instance with another emitter.
    pub fn with_writer(
        out: Arc<SerializedWriter>,
        options: impl IntoIterator<Item = TextOption>,
    ) -> Self {
        TextEmitter {
            options: TextOptions::from_options(options),
            out,
        }
    }

    /// Standard error with short file names and UTC RFC 3339 timestamps.
    pub fn stderr() -> Self {
        Self::with_writer(
            Arc::new(SerializedWriter::stderr()),
            [
                TextOption::ShortFile,
                TextOption::DateFormat(TimestampFormat::Rfc3339),
                TextOption::Utc,
            ],
        )
    }

    pub fn options(&self) -> &TextOptions {
        &self.options
    }

    pub(crate) fn render(&self, entry: &Entry, buf: &mut Vec<u8>) {
        let o = &self.options;
        buf.extend_from_slice(o.prefix.as_bytes());

        if let Some(time) = o
            .date_format
            .as_ref()
            .and_then(|f| f.render(&entry.time, o.utc))
        {
            buf.extend_from_slice(time.as_bytes());
            buf.push(b' ');
        }

        if o.file && entry.has_caller() {
            let file = if o.short_file {
                short_file(&entry.file)
            } else {
                entry.file.as_str()
            };
            // writing into a Vec cannot fail
            let _ = write!(buf, "{}:{}: ", file, entry.line);
        }

        if !entry.tags.is_empty() {
            buf.push(b'[');
            for (i, tag) in entry.tags.iter().enumerate() {
                if i != 0 {
                    buf.push(b' ');
                }
                buf.extend_from_slice(tag.key.as_bytes());
                buf.push(b'=');
                buf.extend_from_slice(tag.value.as_bytes());
            }
            buf.extend_from_slice(b"] ");
        }

        buf.extend_from_slice(entry.message.as_bytes());
        if buf.last() != Some(&b'\n') {
            buf.push(b'\n');
        }
    }
}

impl Emitter for TextEmitter {
    fn emit(&self, _ctx: &Context, entry: &Entry) {
        let mut buf = pool::shared().get();
        self.render(entry, &mut buf);
        let _ = self.out.write_record(&buf);
    }

    fn prepare_to_die(&self) {
        let _ = self.out.flush();
    }
}
