use serde_json::{Map, Value};

use crate::domain::error::{CheckError, ExpectationError};
use crate::domain::expectation::{Expectation, Operand, Predicate, Record};
use crate::domain::value_path::StackPath;
use crate::engine::check::compare::compare;
use crate::engine::check::operator::CheckKind;
use crate::engine::check::transform;

/// Converts a JSON/YAML expectation document into an expectation tree.
///
/// Objects become records with reserved keys routed to their slots; any other
/// value is a literal. Inside documents `$func` names a built-in transform,
/// `$eMessage` is a string, and the `$value` of `some`/`every` is itself an
/// expectation that each element is matched against.
pub fn parse_expectation(document: &Value) -> Result<Expectation, ExpectationError> {
    parse_node(document, &mut StackPath::root())
}

fn parse_node(node: &Value, path: &mut StackPath) -> Result<Expectation, ExpectationError> {
    match node {
        Value::Object(map) => parse_record(map, path).map(Expectation::Record),
        other => Ok(Expectation::Literal(other.clone())),
    }
}

fn parse_record(map: &Map<String, Value>, path: &mut StackPath) -> Result<Record, ExpectationError> {
    let mut record = Record::new();
    let mut quantified = false;

    if let Some(check) = map.get("$check") {
        let name = require_string(check, "$check", path)?;
        quantified = matches!(CheckKind::parse(name), Some(CheckKind::Quantify(_)));
        record = record.check(name);
    }

    for (key, value) in map {
        match key.as_str() {
            "$check" => {}
            "$value" => {
                let operand = if quantified {
                    let element = parse_node(value, path)?;
                    Operand::Predicate(Predicate::fallible(move |item| satisfies(item, &element)))
                } else {
                    Operand::Value(value.clone())
                };
                record = record.operand(operand);
            }
            "$func" => {
                let name = require_string(value, "$func", path)?;
                let transform =
                    transform::named(name).ok_or_else(|| ExpectationError::UnknownTransform {
                        path: path.to_string(),
                        name: name.to_string(),
                    })?;
                record = record.func(transform);
            }
            "$eMessage" => {
                record = record.message(require_string(value, "$eMessage", path)?);
            }
            field => {
                path.push(field);
                let child = parse_node(value, path)?;
                path.pop();
                record = record.field(field, child);
            }
        }
    }
    Ok(record)
}

/// Element test for document quantifiers: mismatches count as `false`,
/// configuration errors abort the check.
fn satisfies(item: &Value, element: &Expectation) -> Result<bool, CheckError> {
    match compare(Some(item), element, &mut StackPath::root()) {
        Ok(()) => Ok(true),
        Err(CheckError::Assertion { .. } | CheckError::NotFound { .. }) => Ok(false),
        Err(error) => Err(error),
    }
}

fn require_string<'v>(
    value: &'v Value,
    key: &'static str,
    path: &StackPath,
) -> Result<&'v str, ExpectationError> {
    value.as_str().ok_or_else(|| ExpectationError::NotAString {
        path: path.to_string(),
        key,
    })
}
