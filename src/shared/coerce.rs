//! Loose JSON → scalar coercion used by the task request bodies.
//!
//! Clients send whatever their form widgets produce (numbers for times,
//! `"on"` for checkboxes, explicit nulls). Fields are accepted as raw
//! `serde_json::Value`s and folded into the stored string/bool here.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// String form of a JSON value.
///
/// `null` → `"null"`, arrays join their elements with `,` (null elements
/// become empty), objects collapse to `"[object Object]"`.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// `false`, `null`, `0` and `""` are falsy. Everything else, including
/// empty arrays/objects and the string `"false"`, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form, or `""` when the value is missing or falsy.
pub fn text_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(v) if is_truthy(v) => to_text(v),
        _ => String::new(),
    }
}

/// Keeps an explicit `null` as `Some(Value::Null)` so "present but null"
/// differs from "absent". Pair with `#[serde(default)]`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Stored text field: `null` reads as `""`, anything else by string form.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        other => to_text(&other),
    })
}

/// Stored flag: any JSON value, read by truthiness.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| is_truthy(&v))
}

// Shortest round-trip decimal. Magnitudes of 1e21 and up, or below 1e-6,
// switch to exponent form with an explicit sign (`1e+21`, `1.5e-7`).
// Negative zero prints as `0`.
fn number_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    if f == 0.0 {
        return "0".to_string();
    }
    if f.abs() >= 1e21 || f.abs() < 1e-6 {
        let sci = format!("{f:e}");
        return match sci.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => sci,
        };
    }
    f.to_string()
}
