use datacheck::domain::error::CheckError;
use datacheck::engine::check::response_errors::{LogLevel, has_error, no_errors};
use serde_json::{Value, json};

fn errors_of(response: &Value) -> Option<&[Value]> {
    response.get("errors").and_then(Value::as_array).map(Vec::as_slice)
}

#[test]
fn successful_response_has_no_errors() {
    let response = json!({"data": {"id": 1}});
    no_errors(errors_of(&response), Some(LogLevel::Error)).expect("no errors key");

    let response = json!({"data": {"id": 1}, "errors": []});
    no_errors(errors_of(&response), None).expect("empty errors list");
}

#[test]
fn failing_response_lists_every_error() {
    let response = json!({
        "errors": [
            {"message": "Forbidden", "path": ["campaign"]},
            {"message": "Rate limited"}
        ]
    });
    let err = no_errors(errors_of(&response), Some(LogLevel::Warn)).expect_err("must fail");
    assert!(matches!(err, CheckError::Assertion { .. }));
    assert!(err.message().starts_with("there should be no errors: "));
    assert!(err.message().contains("Forbidden"));
    assert!(err.message().contains("Rate limited"));
}

#[test]
fn expected_error_message_is_matched() {
    let response = json!({"errors": [{"message": "Campaign not found"}]});
    has_error(response.get("errors"), "Campaign not found").expect("matches first error");

    let err = has_error(response.get("errors"), "Forbidden").expect_err("must fail");
    assert_eq!(err.message(), "there should be error: \"Forbidden\"");
}

#[test]
fn response_without_errors_cannot_have_expected_error() {
    let response = json!({"data": {"id": 1}});
    let err = has_error(response.get("errors"), "Forbidden").expect_err("must fail");
    assert_eq!(err, CheckError::not_found("", "Not found errors"));
}
