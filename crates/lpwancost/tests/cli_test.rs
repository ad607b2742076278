//! Integration tests for the `lpwancost` CLI binary.
//!
//! These tests run the binary against the fleet fixture with the
//! preferences directory pointed at a scratch location.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `lpwancost` binary with env isolation.
fn lpwancost_cmd() -> assert_cmd::Command {
    lpwancost_cmd_in(Path::new("/tmp/lpwancost-cli-test-nonexistent"))
}

fn lpwancost_cmd_in(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("lpwancost");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("RUST_LOG")
        .env_remove("LPWANCOST_OUTPUT")
        .env_remove("LPWANCOST_DEFAULTS__OUTPUT")
        .env_remove("LPWANCOST_DEFAULTS__HORIZON_MONTHS");
    cmd
}

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fleet.json")
}

fn stdout_of(cmd: &mut assert_cmd::Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

/// Write a copy of the fixture with one field replaced.
fn patched_fixture(dir: &Path, pointer: &str, value: serde_json::Value) -> PathBuf {
    let mut doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(fixture()).unwrap()).unwrap();
    *doc.pointer_mut(pointer).unwrap() = value;
    let path = dir.join("patched.json");
    std::fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();
    path
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = lpwancost_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Expected 'Usage' in:\n{stderr}");
}

#[test]
fn test_help_flag() {
    lpwancost_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("LPWAN")
            .and(predicate::str::contains("cumulative"))
            .and(predicate::str::contains("amortized"))
            .and(predicate::str::contains("estimate")),
    );
}

#[test]
fn test_version_flag() {
    lpwancost_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lpwancost"));
}

#[test]
fn test_invalid_output_format() {
    lpwancost_cmd()
        .args(["-o", "xml", "cumulative"])
        .arg(fixture())
        .assert()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    lpwancost_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lpwancost"));
}

#[test]
fn test_completions_zsh() {
    lpwancost_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Reports ─────────────────────────────────────────────────────────

#[test]
fn test_cumulative_tsv() {
    let out = stdout_of(lpwancost_cmd().arg("cumulative").arg(fixture()));
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 38);
    assert_eq!(lines[0], "month\tlora-edge\tlora-managed\tnbiot-mec");
    assert_eq!(lines[1], "0\t2380\t2300\t3000");
    assert_eq!(lines[2], "1\t2463\t2469\t3786");
    assert_eq!(lines[37], "36\t5371\t8387\t31329");
}

#[test]
fn test_cumulative_months_flag() {
    let out = stdout_of(lpwancost_cmd().args(["cumulative", "--months", "2"]).arg(fixture()));
    assert_eq!(
        out,
        "month\tlora-edge\tlora-managed\tnbiot-mec\n\
         0\t2380\t2300\t3000\n\
         1\t2463\t2469\t3786\n\
         2\t2546\t2638\t4573\n"
    );
}

#[test]
fn test_cumulative_horizon_from_environment() {
    let out = stdout_of(
        lpwancost_cmd()
            .env("LPWANCOST_DEFAULTS__HORIZON_MONTHS", "1")
            .arg("cumulative")
            .arg(fixture()),
    );
    assert_eq!(out.lines().count(), 3);
}

#[test]
fn test_cumulative_json_keeps_precision() {
    let out = stdout_of(lpwancost_cmd().args(["-o", "json", "cumulative"]).arg(fixture()));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["index_label"], "month");
    assert_eq!(value["rows"].as_array().unwrap().len(), 37);
    assert_eq!(value["rows"][1]["costs"][0], 2463.09521484375);
}

#[test]
fn test_amortized_default_sweep() {
    let out = stdout_of(lpwancost_cmd().arg("amortized").arg(fixture()));
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 21);
    assert_eq!(lines[0], "devices\tlora-edge\tlora-managed\tnbiot-mec");
    assert_eq!(lines[1], "100\t5\t15\t14");
    assert!(lines[20].starts_with("2000\t"));
}

#[test]
fn test_amortized_narrow_sweep() {
    let out = stdout_of(
        lpwancost_cmd()
            .args(["amortized", "--from", "100", "--to", "250", "--step", "100"])
            .arg(fixture()),
    );
    let index: Vec<&str> = out
        .lines()
        .skip(1)
        .map(|l| l.split('\t').next().unwrap())
        .collect();
    assert_eq!(index, ["100", "200"]);
}

#[test]
fn test_amortized_inverted_range_is_usage_error() {
    lpwancost_cmd()
        .args(["amortized", "--from", "500", "--to", "100"])
        .arg(fixture())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--to"));
}

#[test]
fn test_amortized_zero_regions_rejected() {
    lpwancost_cmd()
        .args(["amortized", "--regions", "0"])
        .arg(fixture())
        .assert()
        .code(2);
}

#[test]
fn test_table_output() {
    lpwancost_cmd()
        .args(["-o", "table", "cumulative", "-m", "1"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("lora-managed").and(predicate::str::contains("2469")));
}

#[test]
fn test_quiet_suppresses_report() {
    lpwancost_cmd()
        .args(["-q", "cumulative"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ── Estimate ────────────────────────────────────────────────────────

#[test]
fn test_estimate_selected_model_json() {
    let out = stdout_of(
        lpwancost_cmd()
            .args(["-o", "json", "estimate", "--model", "nbiot-mec"])
            .arg(fixture()),
    );
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let rows = value.as_array().unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["model"], "nbiot-mec");
    assert_eq!(rows[0]["setup"], 3000.0);
    assert_eq!(rows[0]["monthly"], 786.932373046875);
}

#[test]
fn test_estimate_keeps_requested_order() {
    let out = stdout_of(
        lpwancost_cmd()
            .args(["estimate", "-M", "lora-managed", "-M", "lora-edge"])
            .arg(fixture()),
    );
    let models: Vec<&str> = out
        .lines()
        .skip(1)
        .map(|l| l.split('\t').next().unwrap())
        .collect();
    assert_eq!(models, ["lora-managed", "lora-edge"]);
}

#[test]
fn test_estimate_tsv_totals() {
    let out = stdout_of(lpwancost_cmd().arg("estimate").arg(fixture()));
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("model\tsetup\tmonthly\t"));
    assert!(lines[1].starts_with("lora-edge\t2380\t83\t"));
    assert!(lines[2].starts_with("lora-managed\t2300\t169\t"));
    assert!(lines[3].starts_with("nbiot-mec\t3000\t786\t"));
}

#[test]
fn test_estimate_unknown_model() {
    lpwancost_cmd()
        .args(["estimate", "--model", "ghost"])
        .arg(fixture())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("ghost").and(predicate::str::contains("lora-edge")));
}

// ── Settings errors ─────────────────────────────────────────────────

#[test]
fn test_missing_settings_file() {
    lpwancost_cmd()
        .args(["cumulative", "/tmp/lpwancost-cli-test-nonexistent/fleet.json"])
        .assert()
        .code(4);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fleet.txt");
    std::fs::write(&path, "{}").unwrap();

    lpwancost_cmd().arg("validate").arg(&path).assert().code(2);
}

#[test]
fn test_zero_throughput_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = patched_fixture(dir.path(), "/compute/rpi/throughput", 0.into());

    lpwancost_cmd()
        .arg("cumulative")
        .arg(&path)
        .assert()
        .code(6)
        .stderr(predicate::str::contains("compute.rpi.throughput"));
}

#[test]
fn test_unparseable_document_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "topology: [unterminated").unwrap();

    lpwancost_cmd().arg("validate").arg(&path).assert().code(6);
}

#[test]
fn test_validate_lists_models() {
    lpwancost_cmd()
        .arg("validate")
        .arg(fixture())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("3 models")
                .and(predicate::str::contains("lora-edge, lora-managed, nbiot-mec")),
        );
}

// ── Preferences ─────────────────────────────────────────────────────

#[test]
fn test_config_show_defaults() {
    lpwancost_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("output = \"tsv\"")
                .and(predicate::str::contains("horizon_months = 36")),
        );
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_init_then_refuse_overwrite() {
    let home = tempfile::tempdir().unwrap();

    let path = stdout_of(lpwancost_cmd_in(home.path()).args(["config", "path"]));
    assert!(path.trim().starts_with(home.path().to_str().unwrap()));

    lpwancost_cmd_in(home.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(Path::new(path.trim()).exists());

    lpwancost_cmd_in(home.path())
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--force"));

    lpwancost_cmd_in(home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[cfg(target_os = "linux")]
#[test]
fn test_preferred_output_format() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("lpwancost");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[defaults]\noutput = \"json\"\n").unwrap();

    let out = stdout_of(lpwancost_cmd_in(home.path()).args(["cumulative", "-m", "1"]).arg(fixture()));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["rows"].as_array().unwrap().len(), 2);
}
