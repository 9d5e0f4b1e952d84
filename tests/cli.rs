use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const REFERENCE_DOCS: &str = r#"{
  "drivers": [
    {"id": "d1", "name": "Dana Reyes", "totalDocuments": 4},
    {"id": "d2", "name": "Sam Okafor"},
    {"id": "d3", "name": "Lee Park"}
  ],
  "documents": [
    {"id": "a", "driverId": "d1", "documentType": "CDL", "status": "ACTIVE", "expiryDate": "2024-05-30"},
    {"id": "b", "driverId": "d1", "documentType": "Medical Card", "status": "ACTIVE", "expiryDate": "2024-06-25"},
    {"id": "c", "driverId": "d1", "documentType": "Insurance", "status": "ACTIVE", "expiryDate": "2025-01-01"},
    {"id": "d", "driverId": "d1", "documentType": "Permit", "status": "PENDING", "expiryDate": "2024-07-01"},
    {"id": "e", "driverId": "d2", "documentType": "CDL", "status": "ACTIVE", "expiryDate": "2025-03-01"},
    {"id": "f", "driverId": "d2", "documentType": "Medical Card", "status": "ACTIVE", "expiryDate": null}
  ]
}"#;

const COMPLIANT_DOCS: &str = r#"[
  {"id": "1", "driverId": "d1", "documentType": "CDL", "status": "ACTIVE", "expiryDate": "2030-01-01"},
  {"id": "2", "driverId": "d2", "documentType": "CDL", "status": "ACTIVE"}
]"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("fleetdoc").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

#[test]
fn critical_driver_fails_the_run() {
    let ws = Workspace::new();
    let docs = ws.write("docs.json", REFERENCE_DOCS);
    ws.cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01"])
        .assert()
        .code(1)
        .stdout(contains("SUMMARY"))
        .stdout(contains("Dana Reyes"))
        .stdout(contains("Critical"));
}

#[test]
fn json_report_matches_reference_scenario() {
    let ws = Workspace::new();
    let docs = ws.write("docs.json", REFERENCE_DOCS);
    let output = ws
        .cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01", "--report", "json", "--fail-on", "never"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let dana = &value["drivers"][0];
    assert_eq!(dana["verdict"], "Critical");
    assert_eq!(dana["expected_total"], 4);
    assert_eq!(dana["counts"]["expired"], 1);
    assert_eq!(dana["counts"]["expiring"], 1);
    assert_eq!(dana["counts"]["verified"], 1);
    assert_eq!(dana["counts"]["pending"], 1);
    assert_eq!(dana["counts"]["total"], 4);

    assert_eq!(value["drivers"][1]["verdict"], "Compliant");
    assert_eq!(value["drivers"][2]["verdict"], "No Documents");
    assert_eq!(value["summary"]["critical"], 1);
    assert_eq!(value["summary"]["no_documents"], 1);
}

#[test]
fn compliant_fleet_succeeds() {
    let ws = Workspace::new();
    let docs = ws.write("docs.json", COMPLIANT_DOCS);
    ws.cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01", "--quiet"])
        .assert()
        .success()
        .stdout(contains("Drivers: 2"))
        .stdout(contains("Compliant: 2"));
}

#[test]
fn fail_on_warning_from_config() {
    let ws = Workspace::new();
    let docs = ws.write(
        "docs.json",
        r#"[{"driverId": "d1", "documentType": "CDL", "status": "PENDING"}]"#,
    );
    ws.cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01", "--quiet"])
        .assert()
        .success();

    ws.write(".fleetdoc/config.toml", "[compliance]\nfail_on = \"warning\"\n");
    ws.cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01", "--quiet"])
        .assert()
        .code(1)
        .stdout(contains("Warning: 1"));
}

#[test]
fn required_types_raise_expected_total() {
    let ws = Workspace::new();
    let docs = ws.write("docs.json", COMPLIANT_DOCS);
    ws.write(
        ".fleetdoc/config.toml",
        "[compliance]\nrequired_document_types = [\"CDL\", \"Medical Card\", \"Insurance\"]\n",
    );
    let output = ws
        .cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01", "--report", "json"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["drivers"][0]["expected_total"], 3);
}

#[test]
fn viewer_cannot_export() {
    let ws = Workspace::new();
    let docs = ws.write("docs.json", COMPLIANT_DOCS);
    ws.cmd()
        .arg(&docs)
        .args(["--role", "viewer", "--report", "json"])
        .assert()
        .failure()
        .stderr(contains("lacks the 'export_reports' capability"));
}

#[test]
fn viewer_sees_no_document_tables() {
    let ws = Workspace::new();
    let docs = ws.write("docs.json", REFERENCE_DOCS);
    ws.cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01", "--role", "viewer", "--fail-on", "never"])
        .assert()
        .success()
        .stdout(contains("Dana Reyes"))
        .stdout(contains("Medical Card").not());
}

#[test]
fn dispatcher_gets_reminders() {
    let ws = Workspace::new();
    let docs = ws.write("docs.json", REFERENCE_DOCS);
    ws.cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01", "--role", "dispatcher", "--reminders", "--fail-on", "never"])
        .assert()
        .success()
        .stdout(contains("[REMINDERS]"))
        .stdout(contains("2 days ago"))
        .stdout(contains("in 24 days"));
}

#[test]
fn driver_filter_limits_report() {
    let ws = Workspace::new();
    let docs = ws.write("docs.json", REFERENCE_DOCS);
    ws.cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01", "--driver", "d2", "--quiet"])
        .assert()
        .success()
        .stdout(contains("Drivers: 1"))
        .stdout(contains("Critical: 0"));
}

#[test]
fn pdf_report_is_written() {
    let ws = Workspace::new();
    let docs = ws.write("docs.json", REFERENCE_DOCS);
    let out = ws.path().join("out.pdf");
    ws.cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01", "--fail-on", "never", "--pdf"])
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("PDF report written to"));
    assert!(std::fs::read(&out).unwrap().starts_with(b"%PDF"));
}

#[test]
fn missing_input_is_an_error() {
    let ws = Workspace::new();
    ws.cmd().assert().failure();
    ws.cmd()
        .arg(ws.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(contains("nope.json"));
}

#[test]
fn online_without_base_url_is_an_error() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("--online")
        .assert()
        .failure()
        .stderr(contains("API base URL"));
}

#[test]
fn misspelled_export_key_fails_instead_of_passing() {
    let ws = Workspace::new();
    let docs = ws.write(
        "docs.json",
        r#"{"document": [{"driverId": "d1", "status": "ACTIVE", "expiryDate": "2020-01-01"}]}"#,
    );
    ws.cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01", "--quiet"])
        .assert()
        .failure()
        .stderr(contains("unrecognised document file layout"))
        .stdout(contains("Drivers: 0").not());
}

#[test]
fn saved_api_envelope_is_evaluated() {
    let ws = Workspace::new();
    let docs = ws.write(
        "docs.json",
        r#"{"data": [{"driverId": "d1", "status": "ACTIVE", "expiryDate": "2020-01-01"}]}"#,
    );
    ws.cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01", "--quiet"])
        .assert()
        .code(1)
        .stdout(contains("Critical: 1"));
}

#[test]
fn api_url_without_online_is_rejected() {
    let ws = Workspace::new();
    let docs = ws.write("docs.json", COMPLIANT_DOCS);
    ws.cmd()
        .arg(&docs)
        .args(["--api-url", "https://api.example.com"])
        .assert()
        .failure()
        .stderr(contains("--online"));
}

#[test]
fn quiet_reminders_reports_a_count() {
    let ws = Workspace::new();
    let docs = ws.write("docs.json", REFERENCE_DOCS);
    ws.cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01", "--quiet", "--reminders", "--fail-on", "never"])
        .assert()
        .success()
        .stdout(contains("Reminders: 2"));
}

#[test]
fn documents_without_driver_are_labelled_unassigned() {
    let ws = Workspace::new();
    let docs = ws.write(
        "docs.json",
        r#"[{"documentType": "CDL", "status": "ACTIVE", "expiryDate": "2030-01-01"}]"#,
    );
    let output = ws
        .cmd()
        .arg(&docs)
        .args(["--today", "2024-06-01", "--report", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["drivers"][0]["driver_name"], "(unassigned)");
}
