// SPDX-License-Identifier: MIT OR Apache-2.0

//! One JSON object per line.

use super::encode::{ObjectWriter, last_occurrences};
use super::{Emitter, TimestampFormat};
use crate::context::Context;
use crate::entry::{Entry, short_file};
use crate::pool;
use crate::sink::SerializedWriter;
use std::io::Write;
use std::sync::Arc;

pub const DEFAULT_TIMESTAMP_FIELD: &str = "timestamp";
pub const DEFAULT_CALLER_FIELD: &str = "caller";
pub const DEFAULT_MESSAGE_FIELD: &str = "message";

/// Configures a [`JsonEmitter`].  Options are applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonOption {
    /// Timestamp format; [`TimestampFormat::Disabled`] omits the field.
    DateFormat(TimestampFormat),
    Utc,
    /// Names the timestamp field.  Empty means the default.
    TimestampField(String),
    /// Names the `file:line` field.  Empty means the default.
    CallerField(String),
    /// Names the message field.  Empty means the default.
    MessageField(String),
    File,
    ShortFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonOptions {
    pub date_format: TimestampFormat,
    pub utc: bool,
    pub timestamp_field: String,
    pub caller_field: String,
    pub message_field: String,
    pub file: bool,
    pub short_file: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        JsonOptions {
            date_format: TimestampFormat::Rfc3339NanoPadded,
            utc: false,
            timestamp_field: DEFAULT_TIMESTAMP_FIELD.to_string(),
            caller_field: DEFAULT_CALLER_FIELD.to_string(),
            message_field: DEFAULT_MESSAGE_FIELD.to_string(),
            file: false,
            short_file: false,
        }
    }
}

fn field_or(name: String, default: &str) -> String {
    if name.is_empty() {
        default.to_string()
    } else {
        name
    }
}

impl JsonOptions {
    pub fn from_options(options: impl IntoIterator<Item = JsonOption>) -> Self {
        let mut o = JsonOptions::default();
        for option in options {
            o.apply(option);
        }
        o
    }

    pub fn apply(&mut self, option: JsonOption) {
        match option {
            JsonOption::DateFormat(format) => self.date_format = format,
            JsonOption::Utc => self.utc = true,
            JsonOption::TimestampField(f) => {
                self.timestamp_field = field_or(f, DEFAULT_TIMESTAMP_FIELD)
            }
            JsonOption::CallerField(f) => self.caller_field = field_or(f, DEFAULT_CALLER_FIELD),
            JsonOption::MessageField(f) => self.message_field = field_or(f, DEFAULT_MESSAGE_FIELD),
            JsonOption::File => self.file = true,
            JsonOption::ShortFile => {
                self.file = true;
                self.short_file = true;
            }
        }
    }
}

/**
Writes each entry as a single line of JSON.

Fields appear in this order, separated by `", "`:

1. the timestamp (unless disabled),
2. `file:line` when caller output is enabled and the entry has a caller,
3. `"tags"`, an object of string values; a repeated key keeps only its last value,
4. `"sTags"`, the structured tags as native JSON,
5. the message.

Strings are escaped without HTML escaping, so URLs stay readable.

```rust
use tagwise::context::Context;
use tagwise::emitter::json::{JsonEmitter, JsonOption};
use tagwise::emitter::TimestampFormat;
use tagwise::sink::MemorySink;
use tagwise::{Logger, LoggerOption};
use std::sync::Arc;

let out = MemorySink::new();
let emitter = JsonEmitter::new(out.clone(), [JsonOption::DateFormat(TimestampFormat::Disabled)]);
let logger = Logger::new([LoggerOption::Emitter(Arc::new(emitter))]);

logger.print(&Context::background().add_tags(["a", "b"]), "test");
assert_eq!(out.contents(), "{\"tags\":{\"a\":\"b\"}, \"message\":\"test\"}\n");
```
*/
#[derive(Debug)]
pub struct JsonEmitter {
    options: JsonOptions,
    out: Arc<SerializedWriter>,
}

impl JsonEmitter {
    pub fn new(w: impl Write + Send + 'static, options: impl IntoIterator<Item = JsonOption>) -> Self {
        Self::with_writer(Arc::new(SerializedWriter::new(w)), options)
    }

    pub fn with_writer(
        out: Arc<SerializedWriter>,
        options: impl IntoIterator<Item = JsonOption>,
    ) -> Self {
        JsonEmitter {
            options: JsonOptions::from_options(options),
            out,
        }
    }

    /// Standard error with short file names and UTC timestamps.
    pub fn stderr() -> Self {
        Self::with_writer(
            Arc::new(SerializedWriter::stderr()),
            [JsonOption::ShortFile, JsonOption::Utc],
        )
    }

    pub fn options(&self) -> &JsonOptions {
        &self.options
    }

    pub(crate) fn render(&self, entry: &Entry, buf: &mut Vec<u8>) {
        let o = &self.options;
        let mut obj = ObjectWriter::open(buf);

        if let Some(time) = o.date_format.render(&entry.time, o.utc) {
            obj.string(&o.timestamp_field, &time);
        }

        if o.file && entry.has_caller() {
            let file = if o.short_file {
                short_file(&entry.file)
            } else {
                entry.file.as_str()
            };
            obj.string(&o.caller_field, &format!("{}:{}", file, entry.line));
        }

        if !entry.tags.is_empty() {
            let mut tags = obj.object("tags");
            for tag in last_occurrences(&entry.tags, |t| t.key.as_str()) {
                tags.string(&tag.key, &tag.value);
            }
            tags.close();
        }

        if !entry.structured_tags.is_empty() {
            let mut tags = obj.object("sTags");
            for tag in last_occurrences(&entry.structured_tags, |t| t.key.as_str()) {
                tags.value(&tag.key, &tag.value);
            }
            tags.close();
        }

        obj.string(&o.message_field, &entry.message);
        obj.close();
        buf.push(b'\n');
    }
}

impl Emitter for JsonEmitter {
    fn emit(&self, _ctx: &Context, entry: &Entry) {
        let mut buf = pool::shared().get();
        self.render(entry, &mut buf);
        let _ = self.out.write_record(&buf);
    }

    fn prepare_to_die(&self) {
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{StructuredTag, Tag};
    use chrono::TimeZone;

    fn entry(message: &str) -> Entry {
        let time = chrono::FixedOffset::east_opt(3600)
            .unwrap()
            .timestamp_opt(1_136_214_245, 120)
            .unwrap();
        Entry::new(time, message)
    }

    fn render(options: impl IntoIterator<Item = JsonOption>, entry: &Entry) -> String {
        let emitter = JsonEmitter::new(std::io::sink(), options);
        let mut buf = Vec::new();
        emitter.render(entry, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn default_timestamp_is_padded_nanos() {
        assert_eq!(
            render([], &entry("m")),
            "{\"timestamp\":\"2006-01-02T16:04:05.000000120+01:00\", \"message\":\"m\"}\n"
        );
        assert_eq!(
            render([JsonOption::Utc], &entry("m")),
            "{\"timestamp\":\"2006-01-02T15:04:05.000000120Z\", \"message\":\"m\"}\n"
        );
    }

    #[test]
    fn caller_and_field_names() {
        let mut e = entry("m");
        e.file = "/src/lib/x.rs".into();
        e.line = 7;
        let out = render(
            [
                JsonOption::DateFormat(TimestampFormat::Rfc3339),
                JsonOption::Utc,
                JsonOption::ShortFile,
                JsonOption::TimestampField("ts".into()),
                JsonOption::CallerField("at".into()),
                JsonOption::MessageField("msg".into()),
            ],
            &e,
        );
        assert_eq!(
            out,
            "{\"ts\":\"2006-01-02T15:04:05Z\", \"at\":\"x.rs:7\", \"msg\":\"m\"}\n"
        );
    }

    #[test]
    fn empty_field_name_means_default() {
        let o = JsonOptions::from_options([JsonOption::MessageField(String::new())]);
        assert_eq!(o.message_field, DEFAULT_MESSAGE_FIELD);
    }

    #[test]
    fn tags_and_structured_tags() {
        let mut e = entry("m");
        e.tags = vec![
            Tag::new("a", "1"),
            Tag::new("b", "2"),
            Tag::new("a", "3"),
            Tag::new("obj", "{\"raw\":true}"),
        ];
        e.structured_tags = vec![StructuredTag::new("n", &[1, 2])];
        let out = render([JsonOption::DateFormat(TimestampFormat::Disabled)], &e);
        assert_eq!(
            out,
            "{\"tags\":{\"b\":\"2\", \"a\":\"3\", \"obj\":\"{\\\"raw\\\":true}\"}, \"sTags\":{\"n\":[1,2]}, \"message\":\"m\"}\n"
        );
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["tags"]["a"], "3");
    }
}
