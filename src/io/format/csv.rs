use std::io::Read;

use serde_json::{Map, Value};

use crate::io::IoError;

/// Reads CSV rows as objects keyed by header. Cells stay strings; the loose
/// comparison operators coerce them when compared with numbers or booleans.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut out = Vec::new();
    for row in csv_reader.records() {
        let record = row?;
        let mut map = Map::new();
        for (index, cell) in record.iter().enumerate() {
            let key = headers
                .get(index)
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| format!("col_{index}"));
            map.insert(key, Value::String(cell.to_string()));
        }
        out.push(Value::Object(map));
    }
    Ok(out)
}
