use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::CheckError;
use crate::engine::check::operator::loose_eq;

/// Level used to log each reported error before [`no_errors`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
    Warn,
    Error,
}

/// Fails when a response carries a non-empty error list.
///
/// An empty list passes: only a present, non-empty list counts as errors.
pub fn no_errors(errors: Option<&[Value]>, log_level: Option<LogLevel>) -> Result<(), CheckError> {
    let Some(errors) = errors.filter(|errors| !errors.is_empty()) else {
        return Ok(());
    };

    if let Some(level) = log_level {
        for error in errors {
            let rendered = render_error(error);
            match level {
                LogLevel::Debug => tracing::debug!("there should be no error: \"{rendered}\""),
                LogLevel::Warn => tracing::warn!("there should be no error: \"{rendered}\""),
                LogLevel::Error => tracing::error!("there should be no error: \"{rendered}\""),
            }
        }
    }

    let serialized = serde_json::to_string(errors).unwrap_or_else(|_| "<unserializable>".to_string());
    Err(CheckError::assertion(
        "",
        format!("there should be no errors: {serialized}"),
    ))
}

/// Expects the first reported error to carry `desired_message`.
///
/// `errors` is either an error list (the first entry is inspected) or a
/// single error object.
pub fn has_error(errors: Option<&Value>, desired_message: &str) -> Result<(), CheckError> {
    let Some(errors) = errors.filter(|errors| !errors.is_null()) else {
        return Err(CheckError::not_found("", "Not found errors"));
    };

    let reported = match errors {
        Value::Array(items) => items.first().and_then(|first| first.get("message")),
        other => other.get("message"),
    };
    let desired = Value::String(desired_message.to_string());
    if reported.is_some_and(|reported| loose_eq(reported, &desired)) {
        Ok(())
    } else {
        Err(CheckError::assertion(
            "",
            format!("there should be error: \"{desired_message}\""),
        ))
    }
}

fn render_error(error: &Value) -> String {
    match error.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => error.to_string(),
    }
}
