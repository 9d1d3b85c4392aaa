use std::io::Read;

use serde_json::Value;

use crate::io::format::{csv, json, jsonl, yaml};
use crate::io::{Format, IoError};

/// Reads input as a flat list of records. Top-level JSON/YAML arrays are
/// split into their elements.
pub fn read_values<R: Read>(reader: R, format: Format) -> Result<Vec<Value>, IoError> {
    match format {
        Format::Json => json::read_json(reader),
        Format::Yaml => yaml::read_yaml(reader),
        Format::Csv => csv::read_csv(reader),
        Format::Jsonl => jsonl::read_jsonl(reader),
    }
}

/// Reads input as one document. JSON/YAML keep their top-level shape; row
/// formats become an array of rows.
pub fn read_document<R: Read>(reader: R, format: Format) -> Result<Value, IoError> {
    match format {
        Format::Json => json::read_json_document(reader),
        Format::Yaml => yaml::read_yaml_document(reader),
        Format::Csv => csv::read_csv(reader).map(Value::Array),
        Format::Jsonl => jsonl::read_jsonl(reader).map(Value::Array),
    }
}
