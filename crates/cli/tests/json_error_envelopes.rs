//! Ensure CLI command failures honor `--output json`.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

fn labels_cmd() -> Command {
    Command::new(cargo::cargo_bin!("archive-labels"))
}

#[test]
fn missing_config_emits_json_error_envelope() {
    let output = labels_cmd()
        .args([
            "generate",
            "--config",
            "nope-does-not-exist.json",
            "--output",
            "json",
        ])
        .output()
        .expect("run generate command");

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json envelope");
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "command_failed");
    assert!(
        json["message"]
            .as_str()
            .is_some_and(|m| m.contains("failed to read config file")),
        "unexpected message: {}",
        json["message"]
    );
}

#[test]
fn rejected_count_emits_invalid_input_envelope() {
    let output = labels_cmd()
        .args(["print", "--stdout", "--count", "120", "--output", "json"])
        .output()
        .expect("run print command");

    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json envelope");
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "invalid_input");
    assert!(
        json["message"]
            .as_str()
            .is_some_and(|m| m.contains("exceeds the two-digit sequence limit of 99")),
        "unexpected message: {}",
        json["message"]
    );
}

#[test]
fn invalid_config_value_emits_json_error_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.json");
    fs::write(&config, r#"{"preview_symbol": {"width": -1}}"#).unwrap();

    let output = labels_cmd()
        .args(["preview", "--date", "2025-03-05", "--output", "json"])
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["error"], "command_failed");
    assert!(
        json["message"]
            .as_str()
            .is_some_and(|m| m.contains("preview_symbol.width")),
        "unexpected message: {}",
        json["message"]
    );
}

#[test]
fn unwritable_preview_path_emits_json_error_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("preview.html");

    let output = labels_cmd()
        .args(["preview", "--date", "2025-03-05", "--output", "json"])
        .arg("--html")
        .arg(&path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("failed to write preview"));
}
