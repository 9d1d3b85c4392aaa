pub mod error;
pub mod format;
pub mod reader;

use std::path::Path;

pub use error::IoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Csv,
    Jsonl,
}

/// Resolves the format of a data input: explicit flag first, then extension.
pub fn resolve_input_format(
    explicit: Option<Format>,
    input: Option<&Path>,
) -> Result<Format, IoError> {
    resolve_format(explicit, input, "input")
}

/// Resolves the format of an expectation or field-set document by extension.
pub fn resolve_document_format(path: &Path) -> Result<Format, IoError> {
    resolve_format(None, Some(path), "document")
}

fn resolve_format(
    explicit: Option<Format>,
    path: Option<&Path>,
    kind: &'static str,
) -> Result<Format, IoError> {
    if let Some(format) = explicit {
        return Ok(format);
    }
    let Some(path) = path else {
        return Err(IoError::UnresolvedFormat { kind });
    };
    format_from_path(path).ok_or_else(|| IoError::UnsupportedPathExtension {
        kind,
        path: path.to_string_lossy().into_owned(),
    })
}

fn format_from_path(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(Format::Json),
        "yaml" | "yml" => Some(Format::Yaml),
        "csv" => Some(Format::Csv),
        "jsonl" | "ndjson" => Some(Format::Jsonl),
        _ => None,
    }
}
