use serde_json::Value;

use crate::domain::error::CheckError;
use crate::domain::expectation::{Expectation, Operand, Predicate, Record, Transform};
use crate::domain::value_path::{StackPath, parse_index};
use crate::engine::check::operator::{CheckKind, Operator, Quantifier};

/// How one expectation node applies to the actual value at the same path.
#[derive(Debug)]
pub(crate) enum NodeKind<'a, 'e> {
    Literal(&'e Value),
    Directive(Directive<'e>),
    Nested(&'e [(String, Expectation)]),
    Indexed {
        items: &'a [Value],
        entries: Vec<IndexEntry<'e>>,
    },
    ForEach {
        items: &'a [Value],
        body: Expectation,
    },
    Quantified {
        items: &'a [Value],
        quantifier: Quantifier,
        predicate: &'e Predicate,
        record: &'e Record,
    },
}

#[derive(Debug)]
pub(crate) struct Directive<'e> {
    pub operator: Operator,
    pub expected: &'e Value,
    pub transform: Option<&'e Transform>,
    pub record: &'e Record,
}

#[derive(Debug)]
pub(crate) struct IndexEntry<'e> {
    pub key: &'e str,
    pub index: i64,
    pub expectation: &'e Expectation,
}

/// Classifies `expectation` against the actual value it is compared with.
pub(crate) fn classify<'a, 'e>(
    actual: &'a Value,
    expectation: &'e Expectation,
    path: &StackPath,
) -> Result<NodeKind<'a, 'e>, CheckError> {
    let record = match expectation {
        Expectation::Literal(expected) => return classify_literal(actual, expected, path),
        Expectation::Record(record) => record,
    };

    match actual {
        Value::Object(_) => {
            if !record.reserved_keys().is_empty() {
                return Err(configuration(
                    path,
                    format!(
                        "\"{}\" is object. You must use nesting for the object.",
                        path.last()
                    ),
                ));
            }
            Ok(NodeKind::Nested(record.fields()))
        }
        Value::Array(items) => match record.check_name() {
            Some(name) => match CheckKind::resolve(name, path)? {
                CheckKind::ForEach => Ok(NodeKind::ForEach {
                    items,
                    body: Expectation::Record(record.stripped()),
                }),
                CheckKind::Quantify(quantifier) => quantified(items, quantifier, record, path),
                CheckKind::Compare(operator) => directive(operator, record, path),
            },
            None => indexed(items, record, path),
        },
        _ => {
            let Some(name) = record.check_name() else {
                return Err(configuration(path, "\"$check\" required."));
            };
            match CheckKind::resolve(name, path)? {
                CheckKind::Compare(operator) => directive(operator, record, path),
                CheckKind::ForEach | CheckKind::Quantify(_) => Err(configuration(
                    path,
                    format!("{} is not array.", path.last()),
                )),
            }
        }
    }
}

fn classify_literal<'a, 'e>(
    actual: &'a Value,
    expected: &'e Value,
    path: &StackPath,
) -> Result<NodeKind<'a, 'e>, CheckError> {
    match actual {
        Value::Object(_) => Err(configuration(
            path,
            format!(
                "\"{}\" is object. Cannot use default 'equal' for object.",
                path.last()
            ),
        )),
        Value::Array(_) => Err(configuration(
            path,
            format!(
                "\"{}\" is array. Please use object for iteration or object to get element of array.",
                path.last()
            ),
        )),
        _ => Ok(NodeKind::Literal(expected)),
    }
}

fn directive<'a, 'e>(
    operator: Operator,
    record: &'e Record,
    path: &StackPath,
) -> Result<NodeKind<'a, 'e>, CheckError> {
    match record.operand_ref() {
        None => Err(configuration(path, "\"$value\" required.")),
        Some(Operand::Predicate(_)) => Err(configuration(
            path,
            "\"$value\" must be a value for comparison operators.",
        )),
        Some(Operand::Value(expected)) => Ok(NodeKind::Directive(Directive {
            operator,
            expected,
            transform: record.transform(),
            record,
        })),
    }
}

fn quantified<'a, 'e>(
    items: &'a [Value],
    quantifier: Quantifier,
    record: &'e Record,
    path: &StackPath,
) -> Result<NodeKind<'a, 'e>, CheckError> {
    match record.operand_ref() {
        None => Err(configuration(path, "\"$value\" required.")),
        Some(Operand::Value(_)) => Err(configuration(path, "\"$value\" must be a function.")),
        Some(Operand::Predicate(predicate)) => Ok(NodeKind::Quantified {
            items,
            quantifier,
            predicate,
            record,
        }),
    }
}

fn indexed<'a, 'e>(
    items: &'a [Value],
    record: &'e Record,
    path: &StackPath,
) -> Result<NodeKind<'a, 'e>, CheckError> {
    if !record.reserved_keys().is_empty() {
        return Err(configuration(path, "\"$check\" required."));
    }

    let mut entries = Vec::with_capacity(record.fields().len());
    for (key, expectation) in record.fields() {
        let Some(index) = parse_index(key) else {
            return Err(configuration(
                path,
                format!(
                    "\"{}\" is array. You must use numbers to get item in arrays.",
                    path.last()
                ),
            ));
        };
        entries.push(IndexEntry {
            key,
            index,
            expectation,
        });
    }
    Ok(NodeKind::Indexed { items, entries })
}

fn configuration(path: &StackPath, message: impl AsRef<str>) -> CheckError {
    CheckError::configuration(
        path.to_string(),
        format!("in \"{path}\": {}", message.as_ref()),
    )
}
