use serde::{Deserialize, Serialize};

use crate::domain::error::CheckError;

/// Outcome of one `check` command run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckReport {
    pub matched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckReport {
    pub fn matched() -> Self {
        Self {
            matched: true,
            error: None,
            path: None,
            message: None,
        }
    }
}

impl From<&CheckError> for CheckReport {
    fn from(error: &CheckError) -> Self {
        Self {
            matched: false,
            error: Some(error.kind().to_string()),
            path: Some(error.path().to_string()),
            message: Some(error.message().to_string()),
        }
    }
}
