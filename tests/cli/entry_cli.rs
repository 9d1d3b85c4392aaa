use predicates::prelude::predicate;

#[test]
fn help_is_available() {
    assert_cmd::cargo::cargo_bin_cmd!("datacheck")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"));
}

#[test]
fn check_help_lists_its_flags() {
    assert_cmd::cargo::cargo_bin_cmd!("datacheck")
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--expect"))
        .stdout(predicate::str::contains("--required"));
}

#[test]
fn version_is_available() {
    assert_cmd::cargo::cargo_bin_cmd!("datacheck")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn parser_errors_return_json_with_exit_code_three() {
    assert_cmd::cargo::cargo_bin_cmd!("datacheck")
        .args(["check", "--from", "json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"error\":\"input_usage_error\""));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    assert_cmd::cargo::cargo_bin_cmd!("datacheck")
        .arg("assert")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"error\":\"input_usage_error\""));
}
