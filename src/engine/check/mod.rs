pub mod compare;
mod directive;
pub mod document;
mod message;
pub mod operator;
pub mod required;
pub mod response_errors;
pub mod transform;

use serde_json::Value;

use crate::domain::error::CheckError;
use crate::domain::expectation::{Expectation, Template};
use crate::domain::field_set::FieldSet;
use crate::domain::value_path::StackPath;

pub use compare::{compare, matches};
pub use document::parse_expectation;

/// Checks `actual` against `template`, failing at the first mismatch.
///
/// Array input is checked element by element; a factory template builds each
/// element's expectation from the element. Single input rejects factories.
/// When `required` is given, its presence checks run before each comparison.
pub fn data(
    actual: Option<&Value>,
    template: &Template,
    required: Option<&FieldSet>,
) -> Result<(), CheckError> {
    let actual = match actual {
        None | Some(Value::Null) => return Err(CheckError::not_found("", "Not found data")),
        Some(actual) => actual,
    };

    match actual {
        Value::Array(items) => {
            if items.is_empty() {
                return Err(CheckError::not_found("", "data is empty Array."));
            }
            tracing::debug!(elements = items.len(), "checking array input element by element");
            for item in items {
                match template {
                    Template::Static(expectation) => check_one(item, expectation, required)?,
                    Template::Factory(factory) => check_one(item, &factory(item)?, required)?,
                }
            }
            Ok(())
        }
        single => match template {
            Template::Static(expectation) => check_one(single, expectation, required),
            Template::Factory(_) => Err(CheckError::configuration(
                "",
                "\"data\" is not array. The expectation should be an object.",
            )),
        },
    }
}

/// Checks a single value against a static expectation.
pub fn check(actual: &Value, expectation: &Expectation) -> Result<(), CheckError> {
    check_one(actual, expectation, None)
}

fn check_one(
    actual: &Value,
    expectation: &Expectation,
    required: Option<&FieldSet>,
) -> Result<(), CheckError> {
    if let Some(field_set) = required {
        required::verify(field_set, actual, None)?;
    }
    compare(Some(actual), expectation, &mut StackPath::root())
}
