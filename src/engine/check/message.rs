use serde_json::Value;

use crate::domain::expectation::{Expectation, Operand, Record};
use crate::domain::value_path::StackPath;

static NULL: Value = Value::Null;

/// Failure message for a leaf: custom `$eMessage` if any, else the default
/// `Incorrect "<path>".`.
pub(crate) fn build_message(actual: &Value, expectation: &Expectation, path: &StackPath) -> String {
    match expectation {
        Expectation::Record(record) => build_record_message(actual, record, path),
        Expectation::Literal(_) => default_message(path),
    }
}

pub(crate) fn build_record_message(actual: &Value, record: &Record, path: &StackPath) -> String {
    let Some(message) = record.error_message() else {
        return default_message(path);
    };
    // Predicates have no value form; renderers see `null` as the expected side.
    let expected = match record.operand_ref() {
        Some(Operand::Value(expected)) => expected,
        Some(Operand::Predicate(_)) | None => &NULL,
    };
    message.render(actual, expected)
}

fn default_message(path: &StackPath) -> String {
    format!("Incorrect \"{path}\".")
}
