use std::io::Cursor;

use datacheck::domain::error::{CheckError, ExpectationError};
use datacheck::domain::expectation::Template;
use datacheck::domain::field_set::FieldSet;
use datacheck::engine::check::{data, parse_expectation};
use datacheck::io::Format;
use datacheck::io::reader::{read_document, read_values};
use serde_json::{Value, json};

fn parse_yaml(text: &str) -> Value {
    read_document(Cursor::new(text), Format::Yaml).expect("yaml document")
}

fn template(document: &Value) -> Template {
    Template::Static(parse_expectation(document).expect("parse expectation"))
}

#[test]
fn yaml_document_drives_nested_checks() {
    let document = parse_yaml(
        r#"
id: c1
archived: false
owner:
  id: 3
period:
  "0":
    $check: equal
    $value: "2026-02-23T00:00:00+09:00"
    $func: "date:%Y.%m.%d"
  "-1":
    $check: equal
    $value: "2026-02-28T00:00:00+09:00"
    $func: "date:%Y.%m.%d"
hashtags:
  $check: some
  $value: rust
  $eMessage: No hashtag.
"#,
    );
    let actual = json!({
        "id": "c1",
        "archived": false,
        "owner": {"id": 3, "email": "x@y.z"},
        "period": ["2026-02-23T21:00:00+09:00", "2026-02-28T08:00:00+09:00"],
        "hashtags": ["go", "rust"]
    });
    data(Some(&actual), &template(&document), None).expect("document matches");

    let actual = json!({
        "id": "c1",
        "archived": false,
        "owner": {"id": 3},
        "period": ["2026-02-23T21:00:00+09:00", "2026-02-28T08:00:00+09:00"],
        "hashtags": ["go"]
    });
    let err = data(Some(&actual), &template(&document), None).expect_err("must fail");
    assert_eq!(err, CheckError::assertion("hashtags", "No hashtag."));
}

#[test]
fn for_each_document_checks_every_element() {
    let document = json!({
        "members": {
            "$check": "forEach",
            "role": {"$check": "!=", "$value": "guest"},
            "name": {"$check": "==", "$value": 5, "$func": "length"}
        }
    });
    let passing = json!({"members": [{"role": "admin", "name": "alice"}, {"role": "user", "name": "carol"}]});
    data(Some(&passing), &template(&document), None).expect("all members pass");

    let failing = json!({"members": [{"role": "admin", "name": "alice"}, {"role": "user", "name": "bob"}]});
    let err = data(Some(&failing), &template(&document), None).expect_err("must fail");
    assert_eq!(err.path(), "members.1.name");
}

#[test]
fn numeric_strings_compare_loosely() {
    let document = json!({"count": {"$check": "==", "$value": "3"}, "total": {"$check": ">", "$value": "10"}});
    data(Some(&json!({"count": 3, "total": 12})), &template(&document), None)
        .expect("loose numeric comparison");

    let strict = json!({"count": {"$check": "===", "$value": "3"}});
    let err = data(Some(&json!({"count": 3})), &template(&strict), None).expect_err("must fail");
    assert!(matches!(err, CheckError::Assertion { .. }));
}

#[test]
fn required_fields_document_deserializes_from_yaml() {
    let values = read_values(
        Cursor::new("scalar: [id]\nobject: [owner]\narray: [tags]\n"),
        Format::Yaml,
    )
    .expect("yaml");
    let field_set: FieldSet = serde_json::from_value(values[0].clone()).expect("field set");
    assert_eq!(field_set.object, vec!["owner".to_string()]);

    let document = json!({"id": 1});
    let err = data(
        Some(&json!({"id": 1, "owner": {}, "tags": []})),
        &template(&document),
        Some(&field_set),
    )
    .expect_err("empty owner must fail");
    assert_eq!(
        err.message(),
        "Error in \"requiredFields\": it should be not empty \"owner\""
    );
}

#[test]
fn malformed_documents_are_rejected() {
    let err = parse_expectation(&json!({"a": {"b": {"$check": "==", "$value": 1, "$eMessage": 5}}}))
        .expect_err("must fail");
    assert_eq!(
        err,
        ExpectationError::NotAString {
            path: "a.b".to_string(),
            key: "$eMessage"
        }
    );
}

#[test]
fn unknown_operator_surfaces_at_check_time() {
    let document = json!({"count": {"$check": "~=", "$value": 1}});
    let err = data(Some(&json!({"count": 1})), &template(&document), None).expect_err("must fail");
    assert!(matches!(err, CheckError::Configuration { .. }));
    assert_eq!(err.message(), "in \"count\": Undefined operator: \"~=\".");
}

#[test]
fn transforms_do_not_equate_unhandled_values() {
    let number = json!({"code": {"$check": "==", "$value": "abc", "$func": "number"}});
    let err = data(Some(&json!({"code": "xyz"})), &template(&number), None)
        .expect_err("different strings must not match");
    assert_eq!(err, CheckError::assertion("code", "Incorrect \"code\"."));

    let length = json!({"n": {"$check": "equal", "$value": 5, "$func": "length"}});
    let err = data(Some(&json!({"n": 7})), &template(&length), None)
        .expect_err("different numbers must not match");
    assert!(matches!(err, CheckError::Assertion { .. }));
}

#[test]
fn malformed_quantifier_element_is_configuration_error() {
    let document = json!({
        "members": {"$check": "some", "$value": {"id": {"$check": "~~", "$value": 1}}}
    });
    let err = data(Some(&json!({"members": [{"id": 1}]})), &template(&document), None)
        .expect_err("must fail");
    assert!(matches!(err, CheckError::Configuration { .. }));
    assert_eq!(err.message(), "in \"id\": Undefined operator: \"~~\".");
}
