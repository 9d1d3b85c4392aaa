use serde_json::Value;

use crate::domain::error::CheckError;
use crate::domain::field_set::FieldSet;
use crate::domain::value_path::resolve_field;

#[derive(Debug, Clone, Copy)]
enum Bucket {
    Scalar,
    Object,
    Array,
}

impl Bucket {
    fn holds(self, value: Option<&Value>) -> bool {
        match self {
            Self::Scalar => value.is_some_and(|value| !value.is_null()),
            Self::Object => value
                .and_then(Value::as_object)
                .is_some_and(|map| !map.is_empty()),
            Self::Array => value.is_some_and(Value::is_array),
        }
    }

    fn requirement(self) -> &'static str {
        match self {
            Self::Scalar => "it should return",
            Self::Object => "it should be not empty",
            Self::Array => "it should be array",
        }
    }
}

/// Verifies presence and shape of required fields before value comparison.
///
/// Buckets always run in `scalar`, `object`, `array` order, whatever order the
/// field-set document declares them in; the first violated field fails. With `base_path`, fields resolve under `data[base_path]`.
pub fn verify(field_set: &FieldSet, data: &Value, base_path: Option<&str>) -> Result<(), CheckError> {
    let buckets = [
        (Bucket::Scalar, &field_set.scalar),
        (Bucket::Object, &field_set.object),
        (Bucket::Array, &field_set.array),
    ];

    for (bucket, fields) in buckets {
        for field in fields {
            let value = match base_path {
                Some(base) => data.get(base).and_then(|nested| nested.get(field.as_str())),
                None => resolve_field(data, field),
            };
            if !bucket.holds(value) {
                return Err(CheckError::assertion(
                    field.clone(),
                    format!(
                        "Error in \"requiredFields\": {} \"{field}\"",
                        bucket.requirement()
                    ),
                ));
            }
        }
    }
    Ok(())
}
