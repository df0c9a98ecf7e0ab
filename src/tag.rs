// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key/value tags carried on a [`Context`](crate::context::Context).
//!
//! There are two flavors:
//!
//! * [`Tag`] is a string pair.  Emitters render it as a string, except that a
//!   value which is itself a JSON object or array may be embedded as-is by
//!   JSON emitters (see [`Tag::is_json`]).
//! * [`StructuredTag`] holds any [`Serialize`] value, converted to JSON when the
//!   tag is created so that emitting never has to fail.

use serde::Serialize;
use serde_json::Value;

/// A key/value string pair attached to log entries.
///
/// ```
/// use tagwise::Tag;
///
/// let plain = Tag::new("user", "alice");
/// assert!(!plain.is_json);
///
/// let object = Tag::new("payload", r#"{"id": 7}"#);
/// assert!(object.is_json);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
    /// True when `value` is a syntactically valid JSON object or array.
    #[serde(skip)]
    pub is_json: bool,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Tag {
            key: key.into(),
            is_json: is_json_fragment(&value),
            value,
        }
    }
}

/// Whether `value` can be embedded verbatim into a JSON document.
///
/// Only objects and arrays qualify; a bare `"true"` or `"12"` stays a string.
pub fn is_json_fragment(value: &str) -> bool {
    if !(value.starts_with('{') || value.starts_with('[')) {
        return false;
    }
    serde_json::from_str::<serde::de::IgnoredAny>(value).is_ok()
}

/// A key plus a value that emitters write as native JSON.
///
/// ```
/// use tagwise::StructuredTag;
///
/// let tag = StructuredTag::new("attempts", &[1, 2, 3]);
/// assert_eq!(tag.value, serde_json::json!([1, 2, 3]));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredTag {
    pub key: String,
    pub value: Value,
}

impl StructuredTag {
    /// Serializes `value` now.
    ///
    /// A value that cannot be represented as JSON (for instance a map with
    /// non-string keys) is stored as a JSON string carrying the serializer's
    /// error message.
    pub fn new<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| Value::String(e.to_string()));
        StructuredTag {
            key: key.into(),
            value,
        }
    }

    /// Wraps an already-built JSON value.
    pub fn from_value(key: impl Into<String>, value: Value) -> Self {
        StructuredTag {
            key: key.into(),
            value,
        }
    }
}

/// Pairs up a flat list of alternating keys and values.
///
/// A trailing unpaired element is dropped.
pub(crate) fn pair_up<I, S>(pairs: I) -> Vec<Tag>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out = Vec::new();
    let mut iter = pairs.into_iter();
    while let Some(key) = iter.next() {
        let Some(value) = iter.next() else {
            break;
        };
        out.push(Tag::new(key, value));
    }
    out
}
