use datacheck::domain::error::CheckError;
use datacheck::domain::expectation::{Expectation, Record, Template, Transform};
use datacheck::domain::field_set::FieldSet;
use datacheck::engine::check::{self, data};
use datacheck::engine::check::transform;
use serde_json::{Value, json};

fn run(actual: &Value, expectation: impl Into<Template>) -> Result<(), CheckError> {
    data(Some(actual), &expectation.into(), None)
}

#[test]
fn comparison_directive_passes() {
    let expectation = Record::new().field("count", Record::directive(">=", 0));
    run(&json!({"count": 5}), expectation).expect("5 >= 0");
}

#[test]
fn comparison_directive_reports_path() {
    let expectation = Record::new().field("count", Record::directive(">=", 0));
    let err = run(&json!({"count": -1}), expectation).expect_err("must fail");
    assert_eq!(
        err,
        CheckError::assertion("count", "Incorrect \"count\".")
    );
}

#[test]
fn index_record_with_negative_index() {
    let expectation = Record::new().field("tags", Record::new().field("0", "a").field("-1", "c"));
    run(&json!({"tags": ["a", "b", "c"]}), expectation).expect("first and last match");
}

#[test]
fn for_each_names_failing_element() {
    let expectation = Record::new().field("items", Record::new().check("forEach").field("ok", true));
    let err = run(&json!({"items": [{"ok": true}, {"ok": false}]}), expectation)
        .expect_err("must fail");
    assert!(matches!(err, CheckError::Assertion { .. }));
    assert_eq!(err.path(), "items.1.ok");
}

#[test]
fn factory_builds_per_element_expectation() {
    let template = Template::each(|item| {
        let expected = if item["name"] == "x" { 1 } else { 2 };
        Ok(Expectation::from(Record::new().field("v", expected as i64)))
    });
    let actual = json!([{"name": "x", "v": 1}, {"name": "y", "v": 2}]);
    data(Some(&actual), &template, None).expect("both elements match");
}

#[test]
fn missing_field_is_not_found() {
    let expectation = Record::new().field("missing", Record::directive("equal", 1));
    let err = run(&json!({}), expectation).expect_err("must fail");
    assert!(matches!(err, CheckError::NotFound { .. }));
    assert_eq!(err.path(), "missing");
}

#[test]
fn literal_tree_equal_to_actual_passes() {
    let actual = json!({
        "id": "c1",
        "archived": false,
        "budget": 12.5,
        "owner": {"id": 3, "name": "pro"},
        "tags": ["a", "b"]
    });
    let expectation = Record::new()
        .field("id", "c1")
        .field("archived", false)
        .field("budget", 12.5)
        .field("owner", Record::new().field("id", 3i64).field("name", "pro"))
        .field("tags", Record::new().field("0", "a").field("1", "b"));
    run(&actual, expectation).expect("reflexive");
}

#[test]
fn first_failure_in_declaration_order_wins() {
    let actual = json!({"a": 1, "b": 2});
    let expectation = Record::new().field("b", 3i64).field("a", 4i64);
    let err = run(&actual, expectation).expect_err("must fail");
    assert_eq!(err.path(), "b");
}

#[test]
fn some_and_every_receive_whole_elements() {
    let actual = json!({
        "members": [{"id": 1}, {"id": 2}],
        "task": {"assignees": [{"id": 4}, {"id": 5}]}
    });
    let expectation = Record::new()
        .field(
            "members",
            Record::new()
                .check("some")
                .predicate(|member| member["id"] == 2)
                .message("User is not a chat member."),
        )
        .field(
            "task",
            Record::new().field(
                "assignees",
                Record::new()
                    .check("every")
                    .predicate(|member| member["id"] != 2)
                    .message("Collaborator should not be assignee."),
            ),
        );
    run(&actual, expectation).expect("quantifiers pass");

    let failing = Record::new().field(
        "members",
        Record::new()
            .check("every")
            .predicate(|member| member["id"] == 1)
            .message("not every member"),
    );
    let err = run(&actual, failing).expect_err("every must fail");
    assert_eq!(err.message(), "not every member");
}

#[test]
fn date_transform_normalizes_both_sides() {
    let day = transform::named("date:%Y.%m.%d").expect("date transform");
    let actual = json!({
        "period": ["2026-03-01T08:00:00+00:00", "2026-03-09T19:30:00+00:00"]
    });
    let expectation = Record::new().field(
        "period",
        Record::new()
            .field(
                "0",
                Record::directive("equal", "2026-03-01T23:59:00+00:00").func(day.clone()),
            )
            .field(
                "-1",
                Record::directive("equal", "2026-03-09T00:00:00+00:00").func(day),
            ),
    );
    run(&actual, expectation).expect("same calendar days");
}

#[test]
fn custom_transform_and_rendered_message() {
    let upper = Transform::new("upper", |value| {
        json!(value.as_str().map(str::to_uppercase))
    });
    let expectation = Record::new().field(
        "code",
        Record::directive("===", "abc")
            .func(upper)
            .message_with(|actual, expected| format!("code {actual} differs from {expected}")),
    );
    run(&json!({"code": "ABC"}), expectation.clone()).expect("case-insensitive match");
    let err = run(&json!({"code": "abd"}), expectation).expect_err("must fail");
    assert_eq!(err.message(), "code \"abd\" differs from \"abc\"");
}

#[test]
fn nested_comparison_on_reserved_keys_requires_nesting() {
    let expectation = Record::new().field("meta", Record::directive("equal", 1));
    let err = run(&json!({"meta": {"$check": "equal"}}), expectation).expect_err("must fail");
    assert!(matches!(err, CheckError::Configuration { .. }));
    assert!(err.message().contains("You must use nesting"));
}

#[test]
fn null_scalar_fails_presence_before_value_check() {
    let required = FieldSet {
        scalar: vec!["payoutRequestedAt".to_string()],
        ..FieldSet::default()
    };
    let template = Template::from(
        Record::new().field("payoutRequestedAt", Record::directive("!==", Value::Null)),
    );
    let err = data(Some(&json!({"payoutRequestedAt": null})), &template, Some(&required))
        .expect_err("must fail");
    assert!(err.message().contains("it should return \"payoutRequestedAt\""));
}

#[test]
fn static_expectation_applies_to_every_array_element() {
    let expectation = Record::new().field("archived", false);
    let actual = json!([{"archived": false}, {"archived": true}]);
    let err = run(&actual, expectation).expect_err("second element fails");
    assert_eq!(err.path(), "archived");
}

#[test]
fn check_entry_accepts_single_value() {
    let expectation = Expectation::from(Record::new().field("owner.id", 7i64));
    check::check(&json!({"owner": {"id": 7}}), &expectation).expect("dotted path matches");
}
