use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::error::CheckError;

/// Keys that turn a record into a directive instead of a nested record.
pub const RESERVED_KEYS: [&str; 4] = ["$check", "$value", "$func", "$eMessage"];

pub type PredicateFn = dyn Fn(&Value) -> Result<bool, CheckError> + Send + Sync;
pub type TransformFn = dyn Fn(&Value) -> Value + Send + Sync;
pub type MessageFn = dyn Fn(&Value, &Value) -> String + Send + Sync;
pub type FactoryFn = dyn Fn(&Value) -> Result<Expectation, CheckError> + Send + Sync;

/// Expected shape of one node in the actual data tree.
#[derive(Debug, Clone)]
pub enum Expectation {
    /// Primitive compared with `equal` against the actual value.
    Literal(Value),
    /// Nested record, index record or directive, depending on its keys and
    /// on the actual value it meets.
    Record(Record),
}

impl Expectation {
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }
}

impl From<Record> for Expectation {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl From<Value> for Expectation {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for Expectation {
    fn from(value: &str) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<String> for Expectation {
    fn from(value: String) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<bool> for Expectation {
    fn from(value: bool) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<i64> for Expectation {
    fn from(value: i64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<f64> for Expectation {
    fn from(value: f64) -> Self {
        Self::Literal(Value::from(value))
    }
}

/// Ordered field expectations plus the reserved directive slots.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<(String, Expectation)>,
    check: Option<String>,
    value: Option<Operand>,
    func: Option<Transform>,
    message: Option<ErrorMessage>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a directive record `{$check: operator, $value: value}`.
    pub fn directive(operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().check(operator).value(value)
    }

    /// Appends a field expectation. Declaration order is traversal order.
    pub fn field(mut self, name: impl Into<String>, expectation: impl Into<Expectation>) -> Self {
        self.fields.push((name.into(), expectation.into()));
        self
    }

    pub fn check(mut self, operator: impl Into<String>) -> Self {
        self.check = Some(operator.into());
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(Operand::Value(value.into()));
        self
    }

    pub fn predicate(mut self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.value = Some(Operand::Predicate(Predicate::new(predicate)));
        self
    }

    pub fn operand(mut self, operand: Operand) -> Self {
        self.value = Some(operand);
        self
    }

    pub fn func(mut self, transform: Transform) -> Self {
        self.func = Some(transform);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(ErrorMessage::Literal(message.into()));
        self
    }

    pub fn message_with(
        mut self,
        render: impl Fn(&Value, &Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.message = Some(ErrorMessage::Render(Arc::new(render)));
        self
    }

    pub fn fields(&self) -> &[(String, Expectation)] {
        &self.fields
    }

    pub fn check_name(&self) -> Option<&str> {
        self.check.as_deref()
    }

    pub fn operand_ref(&self) -> Option<&Operand> {
        self.value.as_ref()
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.func.as_ref()
    }

    pub fn error_message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }

    /// Reserved keys present on this record, in `RESERVED_KEYS` order.
    pub fn reserved_keys(&self) -> Vec<&'static str> {
        let present = [
            self.check.is_some(),
            self.value.is_some(),
            self.func.is_some(),
            self.message.is_some(),
        ];
        RESERVED_KEYS
            .iter()
            .zip(present)
            .filter_map(|(key, present)| present.then_some(*key))
            .collect()
    }

    /// Copy of the record without any reserved slot.
    pub fn stripped(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            ..Self::default()
        }
    }
}

/// Expected operand carried by `$value`.
#[derive(Debug, Clone)]
pub enum Operand {
    Value(Value),
    /// Element predicate used by `some` and `every`.
    Predicate(Predicate),
}

#[derive(Clone)]
pub struct Predicate(Arc<PredicateFn>);

impl Predicate {
    pub fn new(predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(move |value| Ok(predicate(value))))
    }

    /// Predicate whose errors abort the quantifier instead of counting as
    /// `false`.
    pub fn fallible(
        predicate: impl Fn(&Value) -> Result<bool, CheckError> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(predicate))
    }

    pub fn test(&self, value: &Value) -> Result<bool, CheckError> {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Predicate(..)")
    }
}

/// Named `$func` applied to both actual and expected values.
#[derive(Clone)]
pub struct Transform {
    name: String,
    apply: Arc<TransformFn>,
}

impl Transform {
    pub fn new(
        name: impl Into<String>,
        apply: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            apply: Arc::new(apply),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, value: &Value) -> Value {
        (self.apply)(value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Transform")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Custom failure message carried by `$eMessage`.
#[derive(Clone)]
pub enum ErrorMessage {
    Literal(String),
    /// Called with `(actual, expected)`.
    Render(Arc<MessageFn>),
}

impl ErrorMessage {
    pub fn render(&self, actual: &Value, expected: &Value) -> String {
        match self {
            Self::Literal(message) => message.clone(),
            Self::Render(render) => render(actual, expected),
        }
    }
}

impl fmt::Debug for ErrorMessage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(message) => formatter.debug_tuple("Literal").field(message).finish(),
            Self::Render(_) => formatter.write_str("Render(..)"),
        }
    }
}

/// Expectation applied by the `data` entry point.
#[derive(Clone)]
pub enum Template {
    /// Same expectation for the object, or for every element of an array.
    Static(Expectation),
    /// Per-element expectation built from the element itself. Array input only.
    Factory(Arc<FactoryFn>),
}

impl Template {
    pub fn each(
        factory: impl Fn(&Value) -> Result<Expectation, CheckError> + Send + Sync + 'static,
    ) -> Self {
        Self::Factory(Arc::new(factory))
    }
}

impl From<Expectation> for Template {
    fn from(value: Expectation) -> Self {
        Self::Static(value)
    }
}

impl From<Record> for Template {
    fn from(value: Record) -> Self {
        Self::Static(Expectation::Record(value))
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(expectation) => formatter.debug_tuple("Static").field(expectation).finish(),
            Self::Factory(_) => formatter.write_str("Factory(..)"),
        }
    }
}
