use std::process::Command;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_airburst-cli"))
}

// A strong, steep scenario that reaches the ground in a few hundred
// steps, keeping the CLI runs quick.
const FAST_SCENARIO: [&str; 10] = [
    "--radius", "5",
    "--velocity", "19000",
    "--density", "7800",
    "--strength", "1e10",
    "--angle", "45",
];

#[test]
fn test_cli_help_lists_commands() {
    let output = cli().arg("--help").output().expect("failed to run CLI");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("entry"), "should list entry command");
    assert!(stdout.contains("outcome"), "should list outcome command");
    assert!(stdout.contains("info"), "should list info command");
}

#[test]
fn test_cli_info() {
    let output = cli().arg("info").output().expect("failed to run CLI");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Airburst Engine"));
}

#[test]
fn test_cli_entry_csv() {
    let output = cli()
        .arg("entry")
        .args(FAST_SCENARIO)
        .args(["--format", "csv"])
        .output()
        .expect("failed to run CLI");
    assert!(output.status.success(), "entry should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("velocity,mass,angle,altitude,distance,radius,time")
    );
    assert!(lines.count() > 10, "should emit one row per step");
}

#[test]
fn test_cli_outcome_reports_classification() {
    let output = cli()
        .arg("outcome")
        .args(FAST_SCENARIO)
        .output()
        .expect("failed to run CLI");
    assert!(output.status.success(), "outcome should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Outcome:"));
    assert!(
        stdout.contains("Airburst") || stdout.contains("Cratering"),
        "should print a classification: {}",
        stdout
    );
}

#[test]
fn test_cli_outcome_json() {
    let output = cli()
        .arg("outcome")
        .args(FAST_SCENARIO)
        .args(["--format", "json"])
        .output()
        .expect("failed to run CLI");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let summary: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert!(summary.get("outcome").is_some());
    assert!(summary.get("burst_energy").is_some());
}

#[test]
fn test_cli_unknown_backend_falls_back() {
    let output = cli()
        .arg("outcome")
        .args(FAST_SCENARIO)
        .args(["--backend", "leapfrog"])
        .output()
        .expect("failed to run CLI");
    assert!(output.status.success(), "fallback must be non-fatal");
}

#[test]
fn test_cli_rejects_negative_radius() {
    let output = cli()
        .arg("entry")
        .args([
            "--radius=-1",
            "--velocity", "19000",
            "--density", "3000",
            "--strength", "1e5",
            "--angle", "45",
        ])
        .output()
        .expect("failed to run CLI");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "should report the bad input: {}", stderr);
}

#[test]
fn test_cli_tabular_without_table_fails() {
    let output = cli()
        .arg("entry")
        .args(FAST_SCENARIO)
        .args(["--atmosphere", "tabular"])
        .output()
        .expect("failed to run CLI");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("table"));
}
