use std::cmp::Ordering;

use serde_json::{Number, Value};

use crate::domain::error::CheckError;
use crate::domain::expectation::Predicate;
use crate::domain::value_path::StackPath;

/// Binary comparison selected by `$check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    LooseEq,
    StrictEq,
    LooseNe,
    StrictNe,
    Ge,
    Le,
    Lt,
    Gt,
    Equal,
    NotEqual,
    StrictEqual,
}

/// Array-wide predicate check selected by `$check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Some,
    Every,
}

/// Every value `$check` may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Compare(Operator),
    Quantify(Quantifier),
    ForEach,
}

impl CheckKind {
    pub fn parse(name: &str) -> Option<Self> {
        let kind = match name {
            "==" => Self::Compare(Operator::LooseEq),
            "===" => Self::Compare(Operator::StrictEq),
            "!=" => Self::Compare(Operator::LooseNe),
            "!==" => Self::Compare(Operator::StrictNe),
            ">=" => Self::Compare(Operator::Ge),
            "<=" => Self::Compare(Operator::Le),
            "<" => Self::Compare(Operator::Lt),
            ">" => Self::Compare(Operator::Gt),
            "equal" => Self::Compare(Operator::Equal),
            "notEqual" => Self::Compare(Operator::NotEqual),
            "strictEqual" => Self::Compare(Operator::StrictEqual),
            "some" => Self::Quantify(Quantifier::Some),
            "every" => Self::Quantify(Quantifier::Every),
            "forEach" => Self::ForEach,
            _ => return None,
        };
        Some(kind)
    }

    /// Like [`CheckKind::parse`], failing with a configuration error.
    pub fn resolve(name: &str, path: &StackPath) -> Result<Self, CheckError> {
        Self::parse(name).ok_or_else(|| {
            CheckError::configuration(
                path.to_string(),
                format!("in \"{path}\": Undefined operator: \"{name}\"."),
            )
        })
    }
}

/// Applies `operator` and fails with `message` when the comparison is false.
pub fn evaluate(
    operator: Operator,
    actual: &Value,
    expected: &Value,
    message: &str,
    path: &StackPath,
) -> Result<(), CheckError> {
    let passed = match operator {
        Operator::LooseEq | Operator::Equal => loose_eq(actual, expected),
        Operator::LooseNe | Operator::NotEqual => !loose_eq(actual, expected),
        Operator::StrictEq | Operator::StrictEqual => strict_eq(actual, expected),
        Operator::StrictNe => !strict_eq(actual, expected),
        Operator::Ge => matches!(
            relate(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::Le => matches!(
            relate(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::Lt => relate(actual, expected) == Some(Ordering::Less),
        Operator::Gt => relate(actual, expected) == Some(Ordering::Greater),
    };
    ensure(passed, message, path)
}

/// Tests `predicate` against whole elements of `items`. Predicate errors
/// propagate unchanged.
pub fn evaluate_quantifier(
    quantifier: Quantifier,
    items: &[Value],
    predicate: &Predicate,
    message: &str,
    path: &StackPath,
) -> Result<(), CheckError> {
    // `some` stops at the first true element, `every` at the first false one.
    let stop_on = matches!(quantifier, Quantifier::Some);
    let mut passed = !stop_on;
    for item in items {
        if predicate.test(item)? == stop_on {
            passed = stop_on;
            break;
        }
    }
    ensure(passed, message, path)
}

fn ensure(passed: bool, message: &str, path: &StackPath) -> Result<(), CheckError> {
    if passed {
        Ok(())
    } else {
        Err(CheckError::assertion(path.to_string(), message))
    }
}

/// Abstract equality: mixed primitives compare as numbers, containers compare
/// structurally.
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right)
                    .all(|(left, right)| loose_eq(left, right))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .all(|(key, value)| right.get(key).is_some_and(|other| loose_eq(value, other)))
        }
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => false,
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::Number(left), Value::Number(right)) => {
            compare_numbers(left, right) == Some(Ordering::Equal)
        }
        _ => to_number(left) == to_number(right),
    }
}

/// Same type and same value. Numbers compare by value (`1` equals `1.0`).
pub fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Number(left), Value::Number(right)) => {
            compare_numbers(left, right) == Some(Ordering::Equal)
        }
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right)
                    .all(|(left, right)| strict_eq(left, right))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .all(|(key, value)| right.get(key).is_some_and(|other| strict_eq(value, other)))
        }
        _ => false,
    }
}

/// Relational ordering: two strings compare lexicographically, anything else
/// is coerced to a number. `None` when either side is not comparable.
pub fn relate(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        (Value::Number(left), Value::Number(right)) => compare_numbers(left, right),
        _ => to_number(left).partial_cmp(&to_number(right)),
    }
}

/// Numeric coercion of a primitive; containers and unparsable strings are NaN.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => parse_numeric_string(text),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

fn parse_numeric_string(input: &str) -> f64 {
    let trimmed = input.trim();
    match trimmed {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if trimmed
        .chars()
        .any(|ch| ch.is_ascii_alphabetic() && !matches!(ch, 'e' | 'E'))
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn compare_numbers(left: &Number, right: &Number) -> Option<Ordering> {
    if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
        return Some(left.cmp(&right));
    }

    if let (Some(left), Some(right)) = (left.as_u64(), right.as_u64()) {
        return Some(left.cmp(&right));
    }

    if let (Some(left), Some(right)) = (left.as_i64(), right.as_u64()) {
        return Some(u64::try_from(left).map_or(Ordering::Less, |left| left.cmp(&right)));
    }

    if let (Some(left), Some(right)) = (left.as_u64(), right.as_i64()) {
        return Some(u64::try_from(right).map_or(Ordering::Greater, |right| left.cmp(&right)));
    }

    left.as_f64()?.partial_cmp(&right.as_f64()?)
}
