//! Integration tests for the `render` subcommand.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cmd() -> Command {
    Command::cargo_bin("pdfoverlay").unwrap()
}

const ANALYSIS: &str = r#"{
    "interactive_fields": [
        {"page_number": 1, "name": "name", "value": "Ada", "bbox": [72, 100, 300, 120], "type": "Tx"},
        {"page_number": 2, "name": "consent", "value": "/Yes", "bbox": [61.2, 79.2, 122.4, 158.4], "type": "Btn"}
    ],
    "text_content": {
        "page_count": 2,
        "pages": [
            {"page_number": 1, "width": 612, "height": 792},
            {"page_number": 2, "width": 612, "height": 792}
        ]
    }
}"#;

fn write_json(json: &str) -> tempfile::NamedTempFile {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(json.as_bytes()).unwrap();
    tmp.flush().unwrap();
    tmp
}

#[test]
fn viewport_equal_to_page_reproduces_page_coordinates() {
    let tmp = write_json(ANALYSIS);
    cmd()
        .args(["render", "--width", "612", "--height", "792"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("acro-1\ttext\tname\tAda\t72.0\t100.0\t228.0\t20.0\t"))
        .stdout(predicate::str::contains("acro-2").not());
}

#[test]
fn second_page_at_double_size() {
    let tmp = write_json(ANALYSIS);
    cmd()
        .args(["render", "--page", "2", "--width", "1224", "--height", "1584"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("acro-2\tcheckbox\tconsent\t/Yes\t122.4\t158.4\t122.4\t158.4\t"));
}

#[test]
fn selected_field_is_marked() {
    let tmp = write_json(ANALYSIS);
    cmd()
        .args(["render", "--width", "612", "--height", "792", "--select", "acro-1"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\t20.0\t*\n"));
}

#[test]
fn unknown_selection_warns() {
    let tmp = write_json(ANALYSIS);
    cmd()
        .args(["render", "--width", "612", "--height", "792", "--select", "box-99"])
        .arg(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning: no field with id 'box-99'"));
}

#[test]
fn json_report() {
    let tmp = write_json(ANALYSIS);
    let output = cmd()
        .args(["render", "--format", "json", "--width", "306", "--height", "396"])
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["page"], 1);
    assert_eq!(report["page_count"], 2);
    assert_eq!(report["viewport"]["width"], 306.0);
    let fields = report["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["id"], "acro-1");
    assert_eq!(fields[0]["selected"], false);
    let x = fields[0]["rect"]["x"].as_f64().unwrap();
    assert!((x - 36.0).abs() < 1e-9);
}

#[test]
fn page_without_fields_renders_header_only() {
    let tmp = write_json(ANALYSIS);
    cmd()
        .args(["render", "--page", "7", "--width", "612", "--height", "792"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("id\ttype\tname\tvalue\tleft\ttop\twidth\theight\tselected\n");
}

#[test]
fn zero_viewport_is_rejected() {
    let tmp = write_json(ANALYSIS);
    cmd()
        .args(["render", "--width", "0", "--height", "792"])
        .arg(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: invalid dimensions: 0x792"));
}
