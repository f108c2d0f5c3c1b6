use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the ace binary.
#[allow(deprecated)]
fn ace_cmd() -> Command {
    Command::cargo_bin("ace").unwrap()
}

#[test]
fn help_works() {
    ace_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("evaluate-policies"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    ace_cmd().assert().failure().code(2);
}

#[test]
fn evaluate_policies_requires_a_context() {
    ace_cmd()
        .args(["evaluate-policies", "only-one.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}
