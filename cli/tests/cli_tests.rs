//! CLI binary integration tests using assert_cmd + predicates.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("svf-enrich").expect("binary should exist")
}

const LEAK_C: &str = "\
#include <stdlib.h>

#define LEN 16

void leak(void)
{
    char *name = malloc(LEN);
    name[0] = 'x';
}
";

fn single_warning(file: &str) -> String {
    serde_json::json!([{
        "DefectType": "Never Free",
        "Location": { "ln": 7, "cl": 18, "fl": file },
        "Function": "leak",
        "Events": []
    }])
    .to_string()
}

/// Source tree with `leak.c` under `src/`, plus the report and output paths.
fn setup(report: &str) -> (TempDir, String, String, String) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("leak.c"), LEAK_C).unwrap();

    let input = dir.path().join("in.json");
    fs::write(&input, report).unwrap();
    let output = dir.path().join("out.json");

    let to_string = |p: &Path| p.to_str().unwrap().to_string();
    (dir, to_string(&input), to_string(&output), to_string(&root))
}

fn read_output(path: &str) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("output file should exist");
    serde_json::from_str(&content).expect("output should be valid JSON")
}

// ── Enrich to File ──────────────────────────────────────────────────────────

#[test]
fn test_other_checker_kinds_are_enriched() {
    let report = serde_json::json!([
        {
            "DefectType": "Never Free",
            "Location": { "ln": 7, "cl": 18, "fl": "leak.c" },
            "Function": "leak"
        },
        {
            "DefectType": "File Never Close",
            "Location": { "ln": 7, "cl": 5, "fl": "leak.c" },
            "Function": "leak"
        }
    ])
    .to_string();
    let (_dir, input, output, root) = setup(&report);

    cmd()
        .args(["--input-file", &input])
        .args(["--output-file", &output])
        .args(["--root-dir", &root])
        .assert()
        .success();

    let out = read_output(&output);
    assert_eq!(out.as_array().unwrap().len(), 2);
    assert_eq!(out[1]["DefectType"], "File Never Close");
    assert_eq!(out[1]["SuccessTransform"], "True");
    assert_eq!(out[1]["Var"], serde_json::json!(["name"]));
}

#[test]
fn test_enrich_to_file() {
    let (_dir, input, output, root) = setup(&single_warning("leak.c"));

    cmd()
        .args(["--input-file", &input])
        .args(["--output-file", &output])
        .args(["--root-dir", &root])
        .assert()
        .success();

    let out = read_output(&output);
    let record = &out[0];
    assert_eq!(record["SuccessTransform"], "True");
    assert_eq!(record["TransformMessage"], "");
    assert_eq!(record["Var"], serde_json::json!(["name"]));
    assert!(record["Location"]["fl"]
        .as_str()
        .unwrap()
        .ends_with("leak.c"));
    assert_eq!(record["Events"], serde_json::json!([]));
}

// ── Underscore Spellings ────────────────────────────────────────────────────

#[test]
fn test_underscore_aliases() {
    let (_dir, input, output, root) = setup(&single_warning("leak.c"));

    cmd()
        .args(["--input_file", &input])
        .args(["--output_file", &output])
        .args(["--root_dir", &root])
        .args(["--copy_range", "0"])
        .args(["--cap_not_name", "false"])
        .assert()
        .success();

    let record = &read_output(&output)[0];
    assert_eq!(record["CodeNear"], serde_json::json!(["char *name = malloc(LEN);"]));
    assert_eq!(record["Var"], serde_json::json!(["name", "LEN"]));
}

// ── Per-Warning Failures Do Not Fail the Run ────────────────────────────────

#[test]
fn test_missing_source_still_succeeds() {
    let (_dir, input, output, root) = setup(&single_warning("other.c"));

    cmd()
        .args(["--input-file", &input])
        .args(["--output-file", &output])
        .args(["--root-dir", &root])
        .assert()
        .success()
        .stderr(predicate::str::contains("warning not enriched"));

    let record = &read_output(&output)[0];
    assert_eq!(record["SuccessTransform"], "False");
    assert_eq!(record["TransformMessage"], "No Such File");
    assert_eq!(record["Location"]["fl"], "other.c");
}

// ── Summary ─────────────────────────────────────────────────────────────────

#[test]
fn test_reports_warning_count() {
    let (_dir, input, output, root) = setup(&single_warning("leak.c"));

    cmd()
        .args(["--input-file", &input])
        .args(["--output-file", &output])
        .args(["--root-dir", &root])
        .assert()
        .success()
        .stderr(predicate::str::contains("There are 1 warnings in this report"));
}

// ── Extra Keywords ──────────────────────────────────────────────────────────

#[test]
fn test_extra_keyword_flag() {
    let (_dir, input, output, root) = setup(&single_warning("leak.c"));

    cmd()
        .args(["--input-file", &input])
        .args(["--output-file", &output])
        .args(["--root-dir", &root])
        .args(["--extra-keyword", "name"])
        .assert()
        .success();

    assert_eq!(read_output(&output)[0]["Var"], serde_json::json!([]));
}

// ── Compact Format ──────────────────────────────────────────────────────────

#[test]
fn test_compact_format() {
    let (_dir, input, output, root) = setup(&single_warning("leak.c"));

    cmd()
        .args(["--input-file", &input])
        .args(["--output-file", &output])
        .args(["--root-dir", &root])
        .args(["--format", "compact"])
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 1);
}

// ── Fatal Errors ────────────────────────────────────────────────────────────

#[test]
fn test_missing_input_file() {
    cmd()
        .args(["--input-file", "/nonexistent/in.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}

#[test]
fn test_malformed_input() {
    let (_dir, input, output, root) = setup("{ not json");

    cmd()
        .args(["--input-file", &input])
        .args(["--output-file", &output])
        .args(["--root-dir", &root])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse SVF report"));

    assert!(!Path::new(&output).exists());
}

#[test]
fn test_missing_root_dir() {
    let (dir, input, output, _root) = setup(&single_warning("leak.c"));
    let missing = dir.path().join("nope");

    cmd()
        .args(["--input-file", &input])
        .args(["--output-file", &output])
        .args(["--root-dir", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enrichment failed"));
}

#[test]
fn test_unwritable_output() {
    let (dir, input, _output, root) = setup(&single_warning("leak.c"));
    let output = dir.path().join("no_such_dir").join("out.json");

    cmd()
        .args(["--input-file", &input])
        .args(["--output-file", output.to_str().unwrap()])
        .args(["--root-dir", &root])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create output file"));
}

#[test]
fn test_invalid_branch_column() {
    cmd()
        .args(["--branch-column", "sideways"])
        .assert()
        .failure();
}
