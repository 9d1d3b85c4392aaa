use thiserror::Error;

/// Errors produced while checking actual data against an expectation.
///
/// Every variant carries the dotted path of the node being checked when the
/// failure happened (empty for the document root) and the final message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckError {
    /// Actual input, or a sub-path the expectation points at, is missing.
    #[error("{message}")]
    NotFound { path: String, message: String },

    /// The expectation tree is malformed for the data it was applied to.
    #[error("{message}")]
    Configuration { path: String, message: String },

    /// Data is present but does not satisfy the expectation.
    #[error("{message}")]
    Assertion { path: String, message: String },
}

impl CheckError {
    pub fn not_found(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn configuration(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn assertion(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Assertion {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path, .. }
            | Self::Configuration { path, .. }
            | Self::Assertion { path, .. } => path,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message, .. }
            | Self::Configuration { message, .. }
            | Self::Assertion { message, .. } => message,
        }
    }

    /// Stable machine-readable kind used in command payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found_error",
            Self::Configuration { .. } => "configuration_error",
            Self::Assertion { .. } => "assertion_error",
        }
    }
}

/// Errors produced while converting a JSON/YAML document into an expectation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExpectationError {
    #[error("in \"{path}\": \"{key}\" must be a string")]
    NotAString { path: String, key: &'static str },

    #[error("in \"{path}\": unknown or invalid transform \"{name}\"")]
    UnknownTransform { path: String, name: String },
}
