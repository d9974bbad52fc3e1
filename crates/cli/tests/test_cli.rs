use assert_cmd::Command;
use rstest::{fixture, rstest};
use serde_json::Value;

#[fixture]
fn command() -> Command {
    Command::cargo_bin("stac-factory").unwrap()
}

#[rstest]
fn validate_valid(mut command: Command) {
    let output = command
        .arg("validate")
        .arg("tests/fixtures/minimal.json")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Success!"));
}

#[rstest]
fn validate_invalid(mut command: Command) {
    let output = command
        .arg("validate")
        .arg("tests/fixtures/invalid.json")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Failure:"));
    let report: Value = serde_json::from_str(
        stdout
            .split_once("Failure:")
            .map(|(_, report)| report)
            .unwrap(),
    )
    .unwrap();
    assert_eq!(report["error"], "validation");
    assert!(!report["violations"].as_array().unwrap().is_empty());
}

#[rstest]
fn validate_missing_file(mut command: Command) {
    command
        .arg("validate")
        .arg("tests/fixtures/no-such-file.json")
        .assert()
        .failure();
}

#[rstest]
fn json_schema(mut command: Command) {
    let output = command.arg("json-schema").output().unwrap();
    assert!(output.status.success());
    let schema: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["title"], "Item");
}
