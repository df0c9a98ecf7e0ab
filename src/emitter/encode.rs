// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hand-laid JSON for the line emitters.
//!
//! Field order and the `", "` separator are part of the output format, so the
//! objects are written piecewise instead of through a serializer.  String and
//! value escaping is left to `serde_json`, which never HTML-escapes.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Display;
use std::io::Write;

pub(crate) const SEPARATOR: &[u8] = b", ";

/// Writes `s` as a quoted JSON string.
pub(crate) fn json_string(buf: &mut Vec<u8>, s: &str) {
    // writing into a Vec cannot fail
    let _ = serde_json::to_writer(&mut *buf, s);
}

pub(crate) fn json_value(buf: &mut Vec<u8>, value: &Value) {
    let _ = serde_json::to_writer(&mut *buf, value);
}

/// Writes `"key":`.
pub(crate) fn json_key(buf: &mut Vec<u8>, key: &str) {
    json_string(buf, key);
    buf.push(b':');
}

/// A JSON object being written field by field into a buffer.
pub(crate) struct ObjectWriter<'a> {
    buf: &'a mut Vec<u8>,
    first: bool,
}

impl<'a> ObjectWriter<'a> {
    pub(crate) fn open(buf: &'a mut Vec<u8>) -> Self {
        buf.push(b'{');
        ObjectWriter { buf, first: true }
    }

    /// Writes the separator (if needed) and the key, and returns the buffer for the value.
    pub(crate) fn key(&mut self, key: &str) -> &mut Vec<u8> {
        if !self.first {
            self.buf.extend_from_slice(SEPARATOR);
        }
        self.first = false;
        json_key(self.buf, key);
        &mut *self.buf
    }

    pub(crate) fn string(&mut self, key: &str, value: &str) {
        let buf = self.key(key);
        json_string(buf, value);
    }

    pub(crate) fn value(&mut self, key: &str, value: &Value) {
        let buf = self.key(key);
        json_value(buf, value);
    }

    /// Writes the `Display` form of `value` unquoted, for numbers and booleans.
    pub(crate) fn display(&mut self, key: &str, value: impl Display) {
        let buf = self.key(key);
        let _ = write!(buf, "{value}");
    }

    /// Writes `raw` verbatim.  The caller guarantees it is valid JSON.
    pub(crate) fn raw(&mut self, key: &str, raw: &str) {
        self.key(key).extend_from_slice(raw.as_bytes());
    }

    /// Opens a nested object under `key`.
    pub(crate) fn object(&mut self, key: &str) -> ObjectWriter<'_> {
        ObjectWriter::open(self.key(key))
    }

    /// Writes `key: ["v1", "v2", ...]`.
    pub(crate) fn string_list<'v>(&mut self, key: &str, values: impl IntoIterator<Item = &'v str>) {
        let buf = self.key(key);
        buf.push(b'[');
        for (i, v) in values.into_iter().enumerate() {
            if i > 0 {
                buf.extend_from_slice(SEPARATOR);
            }
            json_string(buf, v);
        }
        buf.push(b']');
    }

    pub(crate) fn close(self) {
        self.buf.push(b'}');
    }
}

/// Keeps only the last occurrence of each key, in the order those last
/// occurrences appear.
///
/// `a=1 b=2 a=3` becomes `b=2 a=3`.
pub(crate) fn last_occurrences<T>(items: &[T], key: impl Fn(&T) -> &str) -> Vec<&T> {
    let mut last: HashMap<&str, usize> = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        last.insert(key(item), i);
    }
    items
        .iter()
        .enumerate()
        .filter(|(i, item)| last.get(key(item)) == Some(i))
        .map(|(_, item)| item)
        .collect()
}
