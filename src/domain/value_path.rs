use std::fmt;

use serde_json::Value;

/// Field names accumulated while walking an expectation tree.
///
/// Only used for diagnostics; rendered as the segments joined with `.`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StackPath {
    segments: Vec<String>,
}

impl StackPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    /// Last segment, or an empty string at the root.
    pub fn last(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for StackPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                formatter.write_str(".")?;
            }
            formatter.write_str(segment)?;
        }
        Ok(())
    }
}

/// Resolves a field name against a value.
///
/// An exact key match wins; otherwise the name is split on `.` and walked
/// through nested objects, with numeric segments indexing into arrays.
pub fn resolve_field<'a>(root: &'a Value, field: &str) -> Option<&'a Value> {
    if let Value::Object(map) = root
        && let Some(value) = map.get(field)
    {
        return Some(value);
    }

    let mut current = root;
    for segment in field.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Parses an integer-like element key. Negative keys count from the end.
pub fn parse_index(key: &str) -> Option<i64> {
    key.trim().parse::<i64>().ok()
}

/// Resolves a signed index against a sequence; `None` when out of range.
pub fn resolve_index(items: &[Value], index: i64) -> Option<&Value> {
    let position = if index < 0 {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        items.len().checked_sub(back)?
    } else {
        usize::try_from(index).ok()?
    };
    items.get(position)
}
