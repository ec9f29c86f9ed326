//! Structured payload attached to a log record
//!
//! A payload is either a JSON-compatible value (null, bool, number, string,
//! ordered map, ordered sequence) or, when the caller's value refused to
//! serialize, a best-effort string taken from its `Debug` output.

use super::log_entry::sanitize_message;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// JSON-compatible structured value, object keys in insertion order
    Json(Value),
    /// String stand-in for a value that could not be serialized
    Fallback(String),
}

impl Payload {
    /// Create an empty JSON object payload to be filled with [`Payload::with_field`]
    pub fn object() -> Self {
        Payload::Json(Value::Object(serde_json::Map::new()))
    }

    /// Serialize any value, falling back to its `Debug` form on failure
    ///
    /// Never fails: a value whose `Serialize` impl errors (or that produces
    /// non-string map keys) is kept as a sanitized string instead.
    pub fn from_serialize<T>(value: &T) -> Self
    where
        T: Serialize + fmt::Debug + ?Sized,
    {
        match serde_json::to_value(value) {
            Ok(json) => Payload::Json(json),
            Err(_) => Payload::Fallback(sanitize_message(&format!("{:?}", value))),
        }
    }

    /// Add a field to an object payload
    ///
    /// Fields on a non-object payload turn it into an object holding the
    /// previous value under `"value"`.
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.add_field(key, value);
        self
    }

    /// Add a field to an object payload (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        if !matches!(self, Payload::Json(Value::Object(_))) {
            let previous = std::mem::replace(self, Payload::object());
            let previous = match previous {
                Payload::Json(v) => v,
                Payload::Fallback(s) => Value::String(s),
            };
            if let Payload::Json(Value::Object(map)) = self {
                map.insert("value".to_string(), previous);
            }
        }
        if let Payload::Json(Value::Object(map)) = self {
            map.insert(key.into(), value.into());
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Payload::Fallback(_))
    }

    /// Borrow the JSON value, if the payload serialized
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Fallback(_) => None,
        }
    }

    /// Single-line rendering: compact JSON or the fallback string
    pub fn render_compact(&self) -> String {
        match self {
            Payload::Json(v) => escape_controls(v.to_string()),
            Payload::Fallback(s) => sanitize_message(s),
        }
    }

    /// Multi-line rendering with four-space JSON indentation
    pub fn render_pretty(&self) -> String {
        match self {
            Payload::Json(v) => {
                let mut buf = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
                let text = match v.serialize(&mut ser) {
                    Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| v.to_string()),
                    Err(_) => v.to_string(),
                };
                escape_controls(text)
            }
            Payload::Fallback(s) => sanitize_message(s),
        }
    }
}

/// Rewrite control characters left raw by `serde_json` (DEL and the C1
/// range) as `\uXXXX` escapes
///
/// `serde_json` already escapes everything below U+0020 inside strings, so
/// those that remain are layout whitespace. The rest can only occur inside
/// strings: the output stays valid JSON and parses back to the same value.
fn escape_controls(json: String) -> String {
    use std::fmt::Write as _;

    let raw = |c: char| c.is_control() && c >= '\u{7f}';
    if !json.chars().any(raw) {
        return json;
    }
    let mut out = String::with_capacity(json.len() + 8);
    for c in json.chars() {
        if raw(c) {
            let _ = write!(out, "\\u{:04x}", c as u32);
        } else {
            out.push(c);
        }
    }
    out
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_compact())
    }
}

impl From<Value> for Payload {
    fn from(v: Value) -> Self {
        Payload::Json(v)
    }
}

impl From<serde_json::Map<String, Value>> for Payload {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Payload::Json(Value::Object(map))
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Json(Value::String(s.to_string()))
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Json(Value::String(s))
    }
}

impl From<i64> for Payload {
    fn from(i: i64) -> Self {
        Payload::Json(Value::from(i))
    }
}

impl From<f64> for Payload {
    fn from(f: f64) -> Self {
        Payload::Json(Value::from(f))
    }
}

impl From<bool> for Payload {
    fn from(b: bool) -> Self {
        Payload::Json(Value::Bool(b))
    }
}

impl From<Vec<Value>> for Payload {
    fn from(items: Vec<Value>) -> Self {
        Payload::Json(Value::Array(items))
    }
}
