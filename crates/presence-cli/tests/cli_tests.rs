use std::io::Write;
use std::process::Command;

fn presence() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_presence"));
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_catalog_json_lists_scenarios() {
    let out = presence().args(["catalog", "--json"]).output().unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["page"], "dashboard");
    assert_eq!(json["scenarios"].as_array().unwrap().len(), 3);
}

#[test]
fn test_growth_uses_configured_horizon() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "weeks = 4").unwrap();
    let out = presence()
        .arg("--config")
        .arg(file.path())
        .args(["growth", "--scenario", "board-update", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["trajectory"]["actual"].as_array().unwrap().len(), 4);
    assert_eq!(json["export_available"], false);
}

#[test]
fn test_unknown_scenario_fails_cleanly() {
    let out = presence()
        .args(["growth", "--scenario", "Nonexistent"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("scenario not found"));
}

#[test]
fn test_score_reports_clamping() {
    let out = presence()
        .args([
            "score",
            "--scenario",
            "client-negotiation",
            "--shape",
            "stage",
            "--attempt",
            "2",
            "--values",
            "11,-2,5",
        ])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("note: Adjusted into 0-10"));
    assert!(stdout.contains("[10.0, 0.0, 5.0]"));
}

#[test]
fn test_short_simulation_passes() {
    let out = presence()
        .args(["simulate", "--ops", "300", "--seed", "5"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("=== Result: PASS ==="));
}
