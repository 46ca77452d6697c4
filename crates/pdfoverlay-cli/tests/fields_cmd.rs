//! Integration tests for the `fields` subcommand.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cmd() -> Command {
    Command::cargo_bin("pdfoverlay").unwrap()
}

const ANALYSIS: &str = r#"{
    "file_name": "application.pdf",
    "interactive_fields": [
        {"page_number": 1, "name": "applicant, full name", "value": "Ada", "bbox": [72, 100, 300, 120], "type": "Tx"},
        {"page_number": 2, "name": "consent", "value": null, "bbox": [72, 700, 84, 712], "type": "Btn"}
    ],
    "text_content": {
        "page_count": 2,
        "pages": [
            {"page_number": 1, "width": 612, "height": 792, "text_and_coords": []},
            {"page_number": 2, "width": 595, "height": 842, "text_and_coords": []}
        ]
    },
    "visual_elements": [
        {"page_number": 1, "lines": [[50, 300, 150, 300]], "boxes": [[400, 500, 500, 530]]}
    ]
}"#;

fn write_json(json: &str) -> tempfile::NamedTempFile {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(json.as_bytes()).unwrap();
    tmp.flush().unwrap();
    tmp
}

#[test]
fn text_output_lists_every_field() {
    let tmp = write_json(ANALYSIS);
    cmd()
        .arg("fields")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("id\tpage\ttype\tname"))
        .stdout(predicate::str::contains("acro-1\t1\ttext\tapplicant, full name\tAda"))
        .stdout(predicate::str::contains("acro-2\t2\tcheckbox\tconsent"))
        .stdout(predicate::str::contains("box-3\t1\ttext\tField 3"))
        .stdout(predicate::str::contains("line-4\t1\ttext\tField 4\t\t8.17\t36.36\t16.34\t1.77"));
}

#[test]
fn json_output_is_field_array() {
    let tmp = write_json(ANALYSIS);
    let output = cmd()
        .args(["fields", "--format", "json"])
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let fields: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let fields = fields.as_array().unwrap();
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0]["id"], "acro-1");
    assert_eq!(fields[0]["type"], "text");
    assert_eq!(fields[0]["value"], "Ada");
    assert_eq!(fields[1]["type"], "checkbox");
    assert_eq!(fields[1]["value"], "");
    assert_eq!(fields[3]["page"], 1);
}

#[test]
fn csv_output_escapes_names() {
    let tmp = write_json(ANALYSIS);
    cmd()
        .args(["fields", "--format", "csv"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("id,page,type,name,value,x,y,width,height"))
        .stdout(predicate::str::contains("acro-1,1,text,\"applicant, full name\",Ada,"));
}

#[test]
fn pages_filter_keeps_only_requested_pages() {
    let tmp = write_json(ANALYSIS);
    cmd()
        .args(["fields", "--pages", "2"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("acro-2"))
        .stdout(predicate::str::contains("acro-1").not())
        .stdout(predicate::str::contains("box-3").not());
}

#[test]
fn page_out_of_range_fails() {
    let tmp = write_json(ANALYSIS);
    cmd()
        .args(["fields", "--pages", "3"])
        .arg(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: page 3 exceeds document page count (2)"));
}

#[test]
fn missing_file_fails() {
    cmd()
        .args(["fields", "/nonexistent/analysis.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: file not found"));
}

#[test]
fn invalid_json_fails() {
    let tmp = write_json("{ not json");
    cmd()
        .arg("fields")
        .arg(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: invalid analysis JSON"));
}

#[test]
fn empty_analysis_prints_header_only() {
    let tmp = write_json("{}");
    cmd()
        .arg("fields")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("id\tpage\ttype\tname\tvalue\tx\ty\twidth\theight\n");
}

#[test]
fn malformed_geometry_warns_but_succeeds() {
    let tmp = write_json(r#"{"visual_elements": [{"page_number": 1, "boxes": [[1, 2]]}]}"#);
    cmd()
        .arg("fields")
        .arg(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning: [MALFORMED_GEOMETRY]"));
}

#[test]
fn strict_mode_fails_on_malformed_geometry() {
    let tmp = write_json(r#"{"visual_elements": [{"page_number": 1, "boxes": [[1, 2]]}]}"#);
    cmd()
        .args(["fields", "--strict"])
        .arg(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: malformed source geometry"));
}

#[test]
fn zero_size_page_is_skipped_with_warning() {
    let tmp = write_json(
        r#"{
            "text_content": {"pages": [{"page_number": 1, "width": 0, "height": 792}]},
            "visual_elements": [{"page_number": 1, "boxes": [[1, 2, 3, 4], [5, 6, 7, 8]]}]
        }"#,
    );
    cmd()
        .arg("fields")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("box-").not())
        .stderr(predicate::str::contains("[INVALID_METRICS]"))
        .stderr(predicate::str::contains("[2 items skipped]"));
}

#[test]
fn bottom_left_origin_flips_boxes() {
    let tmp = write_json(
        r#"{"interactive_fields": [
            {"page_number": 1, "name": "f", "value": null, "bbox": [72, 672, 300, 692], "type": "Tx"}
        ]}"#,
    );
    cmd()
        .args(["fields", "--origin", "bottom-left"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("acro-1\t1\ttext\tf\t\t11.76\t12.63\t37.25\t2.53"));
}

#[test]
fn each_warning_is_reported_once_without_color_codes() {
    let tmp = write_json(r#"{"visual_elements": [{"page_number": 4, "boxes": [[1, 2, 3, 4]]}]}"#);
    let output = cmd()
        .env_remove("RUST_LOG")
        .arg("fields")
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.matches("MISSING_PAGE_METRICS").count(), 1, "{stderr}");
    assert!(stderr.starts_with("Warning: [MISSING_PAGE_METRICS]"));
    assert!(!stderr.contains('\u{1b}'));
}

#[test]
fn verbose_logging_carries_no_color_codes() {
    let tmp = write_json(r#"{"visual_elements": [{"page_number": 1, "boxes": [[1, 2, 3, 4]]}]}"#);
    let output = cmd()
        .env_remove("RUST_LOG")
        .args(["fields", "-v"])
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("reconciled field"), "{stderr}");
    assert!(!stderr.contains('\u{1b}'));
}
