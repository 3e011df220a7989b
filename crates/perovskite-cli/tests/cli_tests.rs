//! Integration tests for the perovskite CLI
//!
//! These tests invoke the actual perovskite-cli binary and verify:
//! - Exit codes (0 = success, 1 = rejected input, 2 = error)
//! - stdout/stderr output
//! - JSON document layout
//! - Reference tables resolved from a data directory

use std::path::PathBuf;
use std::process::{Command, Stdio};

// ── Helpers ───────────────────────────────────────────────

fn perovskite_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_perovskite-cli"))
}

fn fixture_input(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(format!("../../tests/fixtures/input/{}", name))
        .display()
        .to_string()
}

fn reference_dir() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures/reference")
        .display()
        .to_string()
}

fn run_perovskite(args: &[&str]) -> std::process::Output {
    Command::new(perovskite_bin())
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to execute perovskite-cli")
}

fn convert_to_value(input: &str) -> serde_json::Value {
    let dir = reference_dir();
    let output = run_perovskite(&["convert", input, "--origin", "local", "--data-dir", &dir]);
    assert!(
        output.status.success(),
        "convert should exit 0, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ── Version ───────────────────────────────────────────────

#[test]
fn test_version_command() {
    let output = run_perovskite(&["version"]);
    assert!(output.status.success(), "version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("perovskite"), "should contain 'perovskite'");
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "should contain version"
    );
}

#[test]
fn test_version_flag() {
    let output = run_perovskite(&["--version"]);
    assert!(output.status.success(), "--version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ── Formula ───────────────────────────────────────────────

#[test]
fn test_formula_scenario() {
    let output = run_perovskite(&["formula", &fixture_input("scenario.json")]);
    assert!(output.status.success(), "formula should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CsFAMAPbBrI"), "short form: {}", stdout);
    assert!(
        stdout.contains("Cs0.05FA0.18MA0.79PbBr0.5I2.5"),
        "long form: {}",
        stdout
    );
}

#[test]
fn test_formula_json_unknown_coefficient() {
    let output = run_perovskite(&["formula", &fixture_input("layered.txt"), "--json"]);
    assert!(output.status.success(), "formula --json should exit 0");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["short_form"], "(PEA)PbI");
    assert_eq!(value["long_form"], "(PEA)2PbxI4");
}

#[test]
fn test_formula_from_stdin() {
    let mut child = Command::new(perovskite_bin())
        .args(["formula", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn perovskite-cli");
    {
        use std::io::Write;
        let stdin = child.stdin.as_mut().unwrap();
        stdin
            .write_all(br#"{"x_ions_abbreviations": ["I"], "x_coefficients": ["3"]}"#)
            .unwrap();
    }
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("I3"));
}

#[test]
fn test_formula_length_mismatch_exits_1() {
    let output = run_perovskite(&["formula", &fixture_input("mismatch.json")]);
    assert_eq!(output.status.code(), Some(1), "mismatch should exit 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("a_coefficients"), "stderr: {}", stderr);
}

#[test]
fn test_formula_unknown_key_exits_1() {
    let output = run_perovskite(&["formula", &fixture_input("unknown_key.json")]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_formula_missing_file_exits_2() {
    let output = run_perovskite(&["formula", "nonexistent.json"]);
    assert_eq!(output.status.code(), Some(2), "missing file should exit 2");
}

// ── Convert ───────────────────────────────────────────────

#[test]
fn test_convert_scenario_to_stdout() {
    let value = convert_to_value(&fixture_input("scenario.json"));
    let data = &value["data"];

    assert_eq!(
        data["m_def"],
        "perovskite_solar_cell_database.composition.PerovskiteComposition"
    );
    assert_eq!(data["short_form"], "CsFAMAPbBrI");
    assert_eq!(data["long_form"], "Cs0.05FA0.18MA0.79PbBr0.5I2.5");
    assert_eq!(data["band_gap"], 1.6);
    assert_eq!(data["dimensionality"], "3D");

    let a = data["ions_a_site"].as_array().unwrap();
    let names: Vec<&str> = a.iter().map(|i| i["abbreviation"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Cs", "FA", "MA"]);
    assert_eq!(a[1]["coefficient"], "0.18");
    assert!(a[1].get("cas_number").is_none(), "nan cell should be dropped");
    assert_eq!(a[2]["cas_number"], "17000-00-9");

    let b = &data["ions_b_site"][0];
    assert_eq!(b["coefficient"], "1");
    assert_eq!(b["common_name"], "Lead");

    let x = data["ions_x_site"].as_array().unwrap();
    assert_eq!(x[0]["abbreviation"], "Br");
    assert_eq!(x[0]["coefficient"], "0.5");

    let additive = &data["additives"][0];
    assert_eq!(additive["abbreviation"], "KI");
    assert_eq!(additive["concentration"], 5.0);
    assert!(additive.get("mass_fraction").is_none());
    assert!(data.get("impurities").is_none());
}

#[test]
fn test_convert_uses_four_space_indent() {
    let dir = reference_dir();
    let output = run_perovskite(&[
        "convert",
        &fixture_input("scenario.json"),
        "--data-dir",
        &dir,
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("{\n    \"data\": {\n        \"m_def\""));
}

#[test]
fn test_convert_unknown_coefficient_omits_key() {
    let value = convert_to_value(&fixture_input("layered.txt"));
    let data = &value["data"];
    assert_eq!(data["long_form"], "(PEA)2PbxI4");
    assert!(data["ions_b_site"][0].get("coefficient").is_none());
    assert_eq!(data["ions_a_site"][0]["common_name"], "Phenethylammonium");
}

#[test]
fn test_convert_writes_json_file() {
    let dir = reference_dir();
    let target = std::env::temp_dir().join("perovskite_cli_convert.txt");
    let expected = std::env::temp_dir().join("perovskite_cli_convert.json");
    let _ = std::fs::remove_file(&expected);

    let output = run_perovskite(&[
        "convert",
        &fixture_input("scenario.json"),
        "--data-dir",
        &dir,
        "-o",
        &target.display().to_string(),
    ]);
    assert!(output.status.success(), "convert -o should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("perovskite_cli_convert.json"), "stdout: {}", stdout);

    let text = std::fs::read_to_string(&expected).expect("record should be written");
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["data"]["short_form"], "CsFAMAPbBrI");
    let _ = std::fs::remove_file(&expected);
}

#[test]
fn test_convert_quiet_prints_nothing() {
    let dir = reference_dir();
    let target = std::env::temp_dir().join("perovskite_cli_quiet.json");
    let output = run_perovskite(&[
        "--quiet",
        "convert",
        &fixture_input("scenario.json"),
        "--data-dir",
        &dir,
        "-o",
        &target.display().to_string(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "quiet should print nothing");
    assert!(target.exists());
    let _ = std::fs::remove_file(&target);
}

#[test]
fn test_convert_missing_tables_exits_2() {
    let output = run_perovskite(&[
        "convert",
        &fixture_input("scenario.json"),
        "--data-dir",
        "no_such_dir",
    ]);
    assert_eq!(output.status.code(), Some(2), "missing tables should exit 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("A-ion_data"), "stderr: {}", stderr);
}

#[test]
fn test_convert_missing_tables_reported_before_bad_input() {
    let output = run_perovskite(&[
        "convert",
        &fixture_input("mismatch.json"),
        "--data-dir",
        "no_such_dir",
    ]);
    assert_eq!(
        output.status.code(),
        Some(2),
        "table load failure should win over input errors"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("A-ion_data"), "stderr: {}", stderr);
    assert!(!stderr.contains("Length mismatch"), "stderr: {}", stderr);
}

#[test]
fn test_convert_mismatch_exits_1() {
    let dir = reference_dir();
    let output = run_perovskite(&[
        "convert",
        &fixture_input("mismatch.json"),
        "--data-dir",
        &dir,
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_convert_with_settings_file() {
    let settings = std::env::temp_dir().join("perovskite_cli_settings.json");
    let body = serde_json::json!({ "origin": "local", "data_dir": reference_dir() });
    std::fs::write(&settings, body.to_string()).unwrap();

    let output = run_perovskite(&[
        "--config",
        &settings.display().to_string(),
        "formula",
        &fixture_input("scenario.json"),
    ]);
    assert!(output.status.success());

    let output = run_perovskite(&[
        "--config",
        &settings.display().to_string(),
        "convert",
        &fixture_input("scenario.json"),
    ]);
    assert!(output.status.success(), "settings data_dir should be used");
    let _ = std::fs::remove_file(&settings);
}

#[test]
fn test_convert_broken_settings_exits_2() {
    let settings = std::env::temp_dir().join("perovskite_cli_settings_broken.json");
    std::fs::write(&settings, "{ not json").unwrap();
    let output = run_perovskite(&[
        "--config",
        &settings.display().to_string(),
        "convert",
        &fixture_input("scenario.json"),
    ]);
    assert_eq!(output.status.code(), Some(2));
    let _ = std::fs::remove_file(&settings);
}

// ── Options ───────────────────────────────────────────────

#[test]
fn test_options_json() {
    let dir = reference_dir();
    let output = run_perovskite(&["options", "--data-dir", &dir, "--json"]);
    assert!(output.status.success(), "options should exit 0");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let a: Vec<&str> = value["a_ions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(a[..3], ["Cs", "FA", "MA"]);
    assert!(a.contains(&"PEA"));

    assert_eq!(value["additives"], serde_json::json!(["KI", "RbI"]));
    assert!(value["dimensionalities"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("2D/3D")));
}

#[test]
fn test_options_text() {
    let dir = reference_dir();
    let output = run_perovskite(&["options", "--data-dir", &dir]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("X-site ions"));
    assert!(stdout.contains("  RbI"));
}

#[test]
fn test_invalid_origin_rejected() {
    let output = run_perovskite(&["options", "--origin", "ftp"]);
    assert!(!output.status.success());
}
