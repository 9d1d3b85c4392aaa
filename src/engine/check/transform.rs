use serde_json::{Number, Value};

use crate::domain::expectation::Transform;
use crate::engine::check::operator::to_number;
use crate::util::time::{format_rfc3339, is_valid_pattern, normalize_rfc3339_utc};

const DATE_PREFIX: &str = "date:";

/// Built-in transforms addressable by name from expectation documents.
///
/// `date:<pattern>` formats RFC 3339 strings with a strftime pattern. Values a
/// transform cannot handle pass through unchanged.
pub fn named(name: &str) -> Option<Transform> {
    if let Some(pattern) = name.strip_prefix(DATE_PREFIX) {
        return date(pattern);
    }

    let transform = match name {
        "length" => Transform::new(name, length),
        "lowercase" => Transform::new(name, |value| map_string(value, str::to_lowercase)),
        "uppercase" => Transform::new(name, |value| map_string(value, str::to_uppercase)),
        "trim" => Transform::new(name, |value| map_string(value, |text| text.trim().to_string())),
        "string" => Transform::new(name, |value| Value::String(stringify(value))),
        "number" => Transform::new(name, number),
        "utc" => Transform::new(name, |value| {
            map_string(value, |text| {
                normalize_rfc3339_utc(text).unwrap_or_else(|| text.to_string())
            })
        }),
        _ => return None,
    };
    Some(transform)
}

/// Formats RFC 3339 strings with a strftime `pattern`; `None` for an invalid
/// pattern.
pub fn date(pattern: &str) -> Option<Transform> {
    if !is_valid_pattern(pattern) {
        return None;
    }
    let owned = pattern.to_string();
    Some(Transform::new(format!("{DATE_PREFIX}{pattern}"), move |value| {
        map_string(value, |text| {
            format_rfc3339(text, &owned).unwrap_or_else(|| text.to_string())
        })
    }))
}

fn length(value: &Value) -> Value {
    let len = match value {
        Value::String(text) => text.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        other => return other.clone(),
    };
    Value::from(len)
}

fn number(value: &Value) -> Value {
    match value {
        Value::Number(_) | Value::Array(_) | Value::Object(_) => value.clone(),
        other => Number::from_f64(to_number(other)).map_or_else(|| other.clone(), Value::Number),
    }
}

fn map_string(value: &Value, map: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(text) => Value::String(map(text)),
        other => other.clone(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
