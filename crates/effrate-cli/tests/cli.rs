//! Command-line integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FUND: &str = r#"{
    "version": 1,
    "fundName": "Global Index",
    "cashFlows": [
        { "date": "2024-01-01", "amount": 1000, "direction": "deposit" }
    ],
    "valuationDate": "2024-12-31",
    "currentValue": 1100,
    "history": []
}"#;

const OTHER_FUND: &str = r#"{
    "version": 1,
    "fundName": "Bonds",
    "cashFlows": [
        { "date": "2024-01-01", "amount": 1000, "direction": "deposit" },
        { "date": "2024-04-01", "amount": 1000, "direction": "deposit" }
    ],
    "valuationDate": "2025-01-01",
    "currentValue": 2200,
    "history": [
        { "calculationDateTime": "2025-01-02T10:00:00Z", "valuationDate": "2025-01-01",
          "currentValue": 2200, "netInvested": 2000 }
    ]
}"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    fn effrate(&self) -> Command {
        let mut cmd = Command::cargo_bin("effrate").unwrap();
        cmd.env("EFFRATE_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// =============================================================================
// METRICS
// =============================================================================

#[test]
fn metrics_json() {
    let ws = Workspace::new();
    let fund = ws.write("fund.json", FUND);

    let json = json_output(ws.effrate().args(["metrics", "--format", "json"]).arg(&fund));

    assert_eq!(json["fundName"], "Global Index");
    assert_eq!(json["netInvested"], 1000.0);
    assert_eq!(json["profit"], 100.0);
    assert!((json["irr"].as_f64().unwrap() - 0.10).abs() < 1e-6);
    assert!((json["simpleRate"].as_f64().unwrap() - 0.10).abs() < 1e-9);
}

#[test]
fn metrics_table_shows_rates() {
    let ws = Workspace::new();
    let fund = ws.write("fund.json", FUND);

    ws.effrate()
        .arg("metrics")
        .arg(&fund)
        .assert()
        .success()
        .stdout(predicate::str::contains("Return Metrics"))
        .stdout(predicate::str::contains("10.00%"));
}

#[test]
fn metrics_without_valuation_reports_na() {
    let ws = Workspace::new();
    let fund = ws.write(
        "fund.json",
        r#"{"version":1,"cashFlows":[{"date":"2024-01-01","amount":500,"direction":"deposit"}]}"#,
    );

    let json = json_output(ws.effrate().args(["metrics", "-f", "json"]).arg(&fund));

    assert_eq!(json["netInvested"], 500.0);
    assert!(json["irr"].is_null());
    assert!(json["simpleRate"].is_null());
}

#[test]
fn metrics_rejects_unsupported_version() {
    let ws = Workspace::new();
    let fund = ws.write("fund.json", r#"{"version":2,"cashFlows":[]}"#);

    ws.effrate()
        .arg("metrics")
        .arg(&fund)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported scenario version"));
}

// =============================================================================
// HISTORY
// =============================================================================

#[test]
fn history_save_edit_delete() {
    let ws = Workspace::new();
    let fund = ws.write("fund.json", FUND);

    ws.effrate()
        .args(["history", "save"])
        .arg(&fund)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved snapshot"));

    let saved = read_json(&fund);
    assert_eq!(saved["history"].as_array().unwrap().len(), 1);
    assert_eq!(saved["history"][0]["netInvested"], 1000.0);
    assert!(saved["history"][0].get("irr").is_none());

    ws.effrate()
        .args(["history", "edit"])
        .arg(&fund)
        .args(["0", "--valuation-date", "2024-12-31", "--value", "1200"])
        .assert()
        .success();

    let edited = read_json(&fund);
    assert_eq!(edited["history"][0]["currentValue"], 1200.0);
    assert!(edited["history"][0].get("netInvested").is_none());

    let listed = json_output(ws.effrate().args(["history", "show", "-f", "json"]).arg(&fund));
    assert_eq!(listed[0]["profit"], 200.0);
    assert_eq!(listed[0]["netInvestedWasPersisted"], false);

    ws.effrate()
        .args(["history", "delete"])
        .arg(&fund)
        .arg("0")
        .assert()
        .success();

    assert!(read_json(&fund)["history"].as_array().unwrap().is_empty());
}

#[test]
fn history_save_requires_positive_value() {
    let ws = Workspace::new();
    let fund = ws.write("fund.json", FUND);

    ws.effrate()
        .args(["history", "save"])
        .arg(&fund)
        .args(["--value", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than 0"));
}

#[test]
fn history_edit_rejects_negative_value() {
    let ws = Workspace::new();
    let fund = ws.write("fund.json", OTHER_FUND);

    ws.effrate()
        .args(["history", "edit"])
        .arg(&fund)
        .args(["0", "--valuation-date", "2025-01-01", "--value=-100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than 0"));

    let unchanged = read_json(&fund);
    assert_eq!(unchanged["history"][0]["currentValue"], 2200.0);
    assert_eq!(unchanged["history"][0]["netInvested"], 2000.0);
}

#[test]
fn history_delete_out_of_range() {
    let ws = Workspace::new();
    let fund = ws.write("fund.json", FUND);

    ws.effrate()
        .args(["history", "delete"])
        .arg(&fund)
        .arg("3")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// =============================================================================
// SUMMARY
// =============================================================================

#[test]
fn summary_compares_funds() {
    let ws = Workspace::new();
    let bonds = ws.write("bonds.json", OTHER_FUND);

    let json = json_output(ws.effrate().args(["summary", "-f", "json"]).arg(&bonds));

    assert_eq!(json[0]["fundName"], "Bonds");
    let simple = json[0]["latestSimpleRate"].as_f64().unwrap();
    assert!((simple - 0.1139).abs() < 0.002, "simple rate = {simple}");
}

#[test]
fn summary_requires_history() {
    let ws = Workspace::new();
    let fund = ws.write("fund.json", FUND);

    ws.effrate()
        .arg("summary")
        .arg(&fund)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one snapshot"));
}

#[test]
fn summary_replaces_same_fund_ignoring_case() {
    let ws = Workspace::new();
    let first = ws.write("a.json", OTHER_FUND);
    let second = ws.write("b.json", &OTHER_FUND.replace("\"Bonds\"", "\"BONDS\""));

    let json = json_output(ws.effrate().args(["summary", "-f", "json"]).arg(&first).arg(&second));

    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["fundName"], "BONDS");
}

// =============================================================================
// IRR
// =============================================================================

#[test]
fn irr_minimal() {
    let ws = Workspace::new();

    ws.effrate()
        .args(["irr", "-f", "minimal", "--flow", "2024-01-01:-1000", "--flow", "2024-12-31:1100"])
        .assert()
        .success()
        .stdout("0.1000\n");
}

#[test]
fn irr_undefined_for_same_sign_flows() {
    let ws = Workspace::new();

    ws.effrate()
        .args(["irr", "-f", "minimal", "--flow", "2024-01-01:-1000", "--flow", "2024-12-31:-100"])
        .assert()
        .success()
        .stdout("n/a\n");
}

#[test]
fn irr_rejects_bad_flow() {
    let ws = Workspace::new();

    ws.effrate()
        .args(["irr", "--flow", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid flow"));
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn config_default_format_applies() {
    let ws = Workspace::new();
    let fund = ws.write("fund.json", FUND);

    ws.effrate()
        .args(["config", "set", "default_format", "json"])
        .assert()
        .success();
    ws.effrate()
        .args(["config", "get", "format", "-f", "minimal"])
        .assert()
        .success()
        .stdout("json\n");

    let json = json_output(ws.effrate().arg("metrics").arg(&fund));
    assert_eq!(json["netInvested"], 1000.0);
}

#[test]
fn config_rejects_invalid_value() {
    let ws = Workspace::new();

    ws.effrate()
        .args(["config", "set", "decimal_precision", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid precision"));
    assert!(!ws.config_path().exists());
}
