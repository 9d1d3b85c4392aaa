use std::io::Read;

use serde_json::Value;

use crate::io::IoError;

pub fn read_yaml_document<R: Read>(reader: R) -> Result<Value, IoError> {
    let yaml_value: serde_yaml::Value = serde_yaml::from_reader(reader)?;
    Ok(serde_json::to_value(yaml_value)?)
}

pub fn read_yaml<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    Ok(match read_yaml_document(reader)? {
        Value::Array(items) => items,
        single => vec![single],
    })
}
