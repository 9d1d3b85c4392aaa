use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};

pub fn normalize_rfc3339_utc(input: &str) -> Option<String> {
    let dt = DateTime::parse_from_rfc3339(input).ok()?;
    Some(
        dt.with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::AutoSi, true),
    )
}

/// `true` when `pattern` only contains valid strftime specifiers.
pub fn is_valid_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Formats an RFC 3339 timestamp with a strftime `pattern`, keeping the
/// timestamp's own offset.
pub fn format_rfc3339(input: &str, pattern: &str) -> Option<String> {
    let dt = DateTime::parse_from_rfc3339(input).ok()?;
    let mut out = String::new();
    write!(out, "{}", dt.format_with_items(StrftimeItems::new(pattern))).ok()?;
    Some(out)
}
