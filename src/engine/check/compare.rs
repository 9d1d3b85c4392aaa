use serde_json::Value;

use crate::domain::error::CheckError;
use crate::domain::expectation::Expectation;
use crate::domain::value_path::{StackPath, resolve_field, resolve_index};
use crate::engine::check::directive::{Directive, NodeKind, classify};
use crate::engine::check::message::{build_message, build_record_message};
use crate::engine::check::operator::{self, Operator};

/// Walks `actual` and `expectation` in lockstep, failing at the first
/// mismatch. `None` stands for a value missing from the actual data.
pub fn compare(
    actual: Option<&Value>,
    expectation: &Expectation,
    path: &mut StackPath,
) -> Result<(), CheckError> {
    let Some(actual) = actual else {
        return Err(CheckError::not_found(
            path.to_string(),
            format!("\"{path}\" Not Found. See the query schema."),
        ));
    };

    match classify(actual, expectation, path)? {
        NodeKind::Literal(expected) => operator::evaluate(
            Operator::Equal,
            actual,
            expected,
            &build_message(actual, expectation, path),
            path,
        ),
        NodeKind::Directive(directive) => evaluate_directive(actual, &directive, path),
        NodeKind::Nested(fields) => {
            for (field, child) in fields {
                path.push(field.as_str());
                compare(resolve_field(actual, field), child, path)?;
                path.pop();
            }
            Ok(())
        }
        NodeKind::Indexed { items, entries } => {
            for entry in entries {
                path.push(entry.key);
                compare(resolve_index(items, entry.index), entry.expectation, path)?;
                path.pop();
            }
            Ok(())
        }
        NodeKind::ForEach { items, body } => {
            for (position, item) in items.iter().enumerate() {
                path.push(position.to_string());
                compare(Some(item), &body, path)?;
                path.pop();
            }
            Ok(())
        }
        NodeKind::Quantified {
            items,
            quantifier,
            predicate,
            record,
        } => operator::evaluate_quantifier(
            quantifier,
            items,
            predicate,
            &build_record_message(actual, record, path),
            path,
        ),
    }
}

/// `true` when `actual` satisfies `expectation` at the document root.
pub fn matches(actual: &Value, expectation: &Expectation) -> bool {
    compare(Some(actual), expectation, &mut StackPath::root()).is_ok()
}

fn evaluate_directive(
    actual: &Value,
    directive: &Directive<'_>,
    path: &StackPath,
) -> Result<(), CheckError> {
    let message = build_record_message(actual, directive.record, path);

    if let Some(transform) = directive.transform {
        return operator::evaluate(
            directive.operator,
            &transform.apply(actual),
            &transform.apply(directive.expected),
            &message,
            path,
        );
    }

    if is_container(actual) || is_container(directive.expected) {
        return Err(CheckError::configuration(
            path.to_string(),
            format!(
                "in \"{path}\": \"{}\" and \"$value\" must be a primitive. \"{}\" is {}; \"$value\" is {}. Possibly incorrect value in \"$check\".",
                path.last(),
                path.last(),
                type_name(actual),
                type_name(directive.expected),
            ),
        ));
    }

    operator::evaluate(directive.operator, actual, directive.expected, &message, path)
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
