use std::io::{BufRead, BufReader, Read};

use serde_json::Value;

use crate::io::IoError;

pub fn read_jsonl<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    let mut values = Vec::new();
    let reader = BufReader::new(reader);
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(trimmed).map_err(|source| IoError::JsonlLine {
            line: index + 1,
            source,
        })?;
        values.push(value);
    }
    Ok(values)
}
