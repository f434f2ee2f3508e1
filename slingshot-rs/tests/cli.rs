//! CLI integration tests
//!
//! These run the real binary against the bundled assets and temporary files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn cli() -> Command {
    Command::cargo_bin("slingshot-rs").unwrap()
}

fn asset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets").join(name)
}

#[test]
fn test_spline_info() {
    cli()
        .args(["spline", "info"])
        .arg(asset("spline.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Control points: 6"))
        .stdout(predicate::str::contains("Segments: 3"))
        .stdout(predicate::str::contains("Duration: 3.000s"));
}

#[test]
fn test_spline_info_detailed_lists_points() {
    cli()
        .args(["spline", "info", "--detailed"])
        .arg(asset("spline.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("(11.000, 4.000, -7.000)"));
}

#[test]
fn test_spline_sample_table() {
    cli()
        .args(["spline", "sample", "--steps", "4"])
        .arg(asset("spline.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Orientation"))
        .stdout(predicate::str::contains("0.500"))
        .stdout(predicate::str::contains("1.000"));
}

#[test]
fn test_spline_sample_rejects_zero_steps() {
    cli()
        .args(["spline", "sample", "--steps", "0"])
        .arg(asset("spline.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--steps"));
}

#[test]
fn test_spline_info_reports_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.txt");
    std::fs::write(&path, "1\n2\n1.0\n0,0,0\n0,0,0\n1,1,1\n0,0,0\n").unwrap();

    cli()
        .args(["spline", "info"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load spline"));
}

#[test]
fn test_simulate_default_miss() {
    cli()
        .args(["simulate", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("launched blue bird"))
        .stdout(predicate::str::contains("failure"))
        .stdout(predicate::str::contains("Banner: Failure"))
        .stdout(predicate::str::contains("tower collapse begins").not());
}

#[test]
fn test_simulate_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.yaml");
    std::fs::write(&path, "tower:\n  height: 2\n").unwrap();

    cli()
        .args(["simulate", "--seed", "1", "--vertical-angle", "90", "--horizontal-angle", "0"])
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tower: Standing"));
}

#[test]
fn test_simulate_bundled_config() {
    cli()
        .args(["simulate", "--seed", "3", "--config"])
        .arg(asset("scene.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("slingshot drawn"));
}

#[test]
fn test_simulate_red_bird_along_spline() {
    cli()
        .args(["simulate", "--projectile", "red", "--seed", "2", "--spline"])
        .arg(asset("spline.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("launched red bird"))
        .stdout(predicate::str::contains("red bird flight finished"));
}

#[test]
fn test_simulate_missing_config() {
    cli()
        .args(["simulate", "--config", "/nonexistent/scene.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load scene config"));
}

#[test]
fn test_completions() {
    cli()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slingshot-rs"));
}
