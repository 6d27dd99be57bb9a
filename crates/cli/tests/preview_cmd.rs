//! CLI tests for the `archive-labels preview` subcommand.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

fn labels_cmd() -> Command {
    Command::new(cargo::cargo_bin!("archive-labels"))
}

#[test]
fn preview_draws_every_symbol() {
    let output = labels_cmd()
        .args(["preview", "--date", "2025-03-05", "-n", "3", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["report"]["drawn"], 3);
    assert_eq!(json["ready_to_print"], true);
    let labels = json["labels"].as_array().unwrap();
    assert_eq!(labels.len(), 3);
    for (i, label) in labels.iter().enumerate() {
        assert_eq!(label["surface"], format!("preview-barcode-{i}"));
        assert_eq!(label["symbol_drawn"], true);
    }
}

#[test]
fn preview_without_symbols_keeps_identifiers() {
    let output = labels_cmd()
        .args([
            "preview",
            "--date",
            "2025-03-05",
            "-n",
            "2",
            "--no-symbols",
            "--output",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["report"]["drawn"], 0);
    assert_eq!(json["report"]["skipped"], 2);
    assert_eq!(json["labels"][1]["identifier"], "25030502");
    assert_eq!(json["labels"][1]["symbol_drawn"], false);
}

#[test]
fn preview_writes_html_page_with_inline_symbols() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preview.html");
    let output = labels_cmd()
        .args(["preview", "--date", "2025-03-05", "-n", "2", "--output", "pretty"])
        .arg("--html")
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let html = fs::read_to_string(&path).unwrap();
    assert_eq!(html.matches("<svg id=\"preview-barcode-").count(), 2);
    assert!(html.contains("data-payload=\"25030501\""));
    assert!(html.contains("Exp: 10/03/2025"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("preview written"));
}
