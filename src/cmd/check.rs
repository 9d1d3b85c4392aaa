use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::error::CheckError;
use crate::domain::expectation::{Expectation, Template};
use crate::domain::field_set::FieldSet;
use crate::domain::report::CheckReport;
use crate::engine::check;
use crate::io::{self, Format, IoError};

/// Input arguments for check command execution API.
#[derive(Debug, Clone)]
pub struct CheckCommandArgs {
    pub input: Option<PathBuf>,
    pub from: Option<Format>,
    pub expect: PathBuf,
    pub required: Option<PathBuf>,
}

/// Structured command response that carries exit-code mapping and JSON payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckCommandResponse {
    pub exit_code: i32,
    pub payload: Value,
}

pub fn run_with_stdin<R: Read>(args: &CheckCommandArgs, stdin: R) -> CheckCommandResponse {
    match execute(args, stdin) {
        Ok(()) => report_response(0, &CheckReport::matched()),
        Err(CommandError::Check(error)) => {
            let exit_code = match error {
                CheckError::Configuration { .. } => 3,
                CheckError::NotFound { .. } | CheckError::Assertion { .. } => 2,
            };
            tracing::debug!(kind = error.kind(), path = error.path(), "check failed");
            report_response(exit_code, &CheckReport::from(&error))
        }
        Err(CommandError::InputUsage(message)) => CheckCommandResponse {
            exit_code: 3,
            payload: json!({
                "error": "input_usage_error",
                "message": message,
            }),
        },
    }
}

fn report_response(exit_code: i32, report: &CheckReport) -> CheckCommandResponse {
    match serde_json::to_value(report) {
        Ok(payload) => CheckCommandResponse { exit_code, payload },
        Err(_) => CheckCommandResponse {
            exit_code: 1,
            payload: json!({
                "error": "internal_error",
                "message": "failed to serialize check report"
            }),
        },
    }
}

fn execute<R: Read>(args: &CheckCommandArgs, stdin: R) -> Result<(), CommandError> {
    let expectation = load_expectation(&args.expect)?;
    let required = args
        .required
        .as_deref()
        .map(load_field_set)
        .transpose()?;
    let input_format = io::resolve_input_format(args.from, args.input.as_deref())
        .map_err(map_io_as_input_usage)?;
    let document = load_input_document(args, stdin, input_format)?;

    check::data(
        Some(&document),
        &Template::Static(expectation),
        required.as_ref(),
    )
    .map_err(CommandError::Check)
}

fn load_expectation(path: &Path) -> Result<Expectation, CommandError> {
    let document = load_single_document(path, "expectation")?;
    check::parse_expectation(&document)
        .map_err(|err| CommandError::InputUsage(format!("invalid expectation: {err}")))
}

fn load_field_set(path: &Path) -> Result<FieldSet, CommandError> {
    let document = load_single_document(path, "required fields")?;
    serde_json::from_value(document)
        .map_err(|err| CommandError::InputUsage(format!("invalid required fields: {err}")))
}

fn load_single_document(path: &Path, label: &str) -> Result<Value, CommandError> {
    let format = io::resolve_document_format(path).map_err(|err| {
        CommandError::InputUsage(format!(
            "unable to resolve {label} format from `{}`: {err}",
            path.display()
        ))
    })?;
    let file = File::open(path).map_err(|err| {
        CommandError::InputUsage(format!(
            "failed to open {label} file `{}`: {err}",
            path.display()
        ))
    })?;
    let document = io::reader::read_document(file, format).map_err(map_io_as_input_usage)?;
    if !document.is_object() {
        return Err(CommandError::InputUsage(format!(
            "{label} document must be an object"
        )));
    }
    Ok(document)
}

fn load_input_document<R: Read>(
    args: &CheckCommandArgs,
    stdin: R,
    format: Format,
) -> Result<Value, CommandError> {
    if let Some(path) = &args.input {
        let file = File::open(path).map_err(|err| {
            CommandError::InputUsage(format!(
                "failed to open input file `{}`: {err}",
                path.display()
            ))
        })?;
        io::reader::read_document(file, format).map_err(map_io_as_input_usage)
    } else {
        io::reader::read_document(stdin, format).map_err(map_io_as_input_usage)
    }
}

fn map_io_as_input_usage(error: IoError) -> CommandError {
    CommandError::InputUsage(error.to_string())
}

enum CommandError {
    InputUsage(String),
    Check(CheckError),
}
