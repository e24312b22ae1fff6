//! End-to-end checks of the argument and open-path error handling. These
//! run without a pdfium library because every failure here is reported
//! before the PDF engine is touched.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn missing_file_is_reported() {
    let mut cmd = Command::cargo_bin("boleto").unwrap();
    cmd.args(["value", "definitely-not-here.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn non_pdf_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ticket.txt");
    std::fs::write(&path, "not a pdf").unwrap();

    let mut cmd = Command::cargo_bin("boleto").unwrap();
    cmd.arg("value")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported extension"));
}

#[test]
fn unknown_region_flag_is_rejected() {
    let mut cmd = Command::cargo_bin("boleto").unwrap();
    cmd.args(["text", "whatever.pdf", "--flag", "diagonal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized flag"));
}
