//! End-to-end tests of the corridormap binary.

mod common;

use assert_cmd::Command;
use common::{point, segment};
use corridormap::core::Element;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn corridormap(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_corridormap"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn write_elements(dir: &Path, elements: &[Element]) -> PathBuf {
    let path = dir.join("elements.json");
    std::fs::write(&path, serde_json::to_string(elements).unwrap()).unwrap();
    path
}

fn chained_segments() -> Vec<Element> {
    vec![
        segment("seg-1", 0.0, 100.0, 0.80),
        segment("seg-2", 100.0, 180.0, 0.75),
        segment("seg-3", 180.0, 250.0, 0.90),
        segment("seg-low", 400.0, 500.0, 0.10),
    ]
}

fn stdout_json(cmd: &mut Command) -> Value {
    let assert = cmd.assert().success();
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

#[test]
fn test_aggregate_segments_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write_elements(dir.path(), &chained_segments());

    let json = stdout_json(corridormap(dir.path()).args([
        "aggregate",
        input.to_str().unwrap(),
        "--format",
        "json",
    ]));

    assert_eq!(json["summary"]["corridor_count"], 1);
    assert_eq!(json["corridors"][0]["member_count"], 3);
    assert_eq!(
        json["corridors"][0]["member_ids"],
        serde_json::json!(["seg-1", "seg-2", "seg-3"])
    );
    assert!(json["corridors"][0]["corridor_id"]
        .as_str()
        .unwrap()
        .starts_with("cor-"));
    assert_eq!(json["params"]["mode"], "segment");
}

#[test]
fn test_min_length_flag_drops_corridor() {
    let dir = TempDir::new().unwrap();
    let input = write_elements(dir.path(), &chained_segments());

    let json = stdout_json(corridormap(dir.path()).args([
        "aggregate",
        input.to_str().unwrap(),
        "--format",
        "json",
        "--min-length",
        "300",
    ]));

    assert_eq!(json["summary"]["corridor_count"], 0);
    assert_eq!(
        json["orphan_ids"],
        serde_json::json!(["seg-1", "seg-2", "seg-3"])
    );
}

#[test]
fn test_point_mode_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_elements(
        dir.path(),
        &[
            point("a1", 0.0, 0.0, 0.9),
            point("a2", 20.0, 0.0, 0.8),
            point("b1", 60.0, 0.0, 0.85),
            point("b2", 80.0, 0.0, 0.75),
        ],
    );
    let output = dir.path().join("corridors.json");

    corridormap(dir.path())
        .args([
            "aggregate",
            input.to_str().unwrap(),
            "--mode",
            "point",
            "--n-min",
            "2",
            "--format",
            "json",
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let json: Value = serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
    assert_eq!(json["summary"]["corridor_count"], 2);
    assert_eq!(json["point_ids"].as_array().unwrap().len(), 4);
}

#[test]
fn test_config_file_supplies_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".corridormap.toml"),
        "[aggregation]\nmin_length_m = 1000.0\n\n[output]\ndefault_format = \"json\"\n",
    )
    .unwrap();
    let input = write_elements(dir.path(), &chained_segments());

    let json = stdout_json(corridormap(dir.path()).args(["aggregate", input.to_str().unwrap()]));
    assert_eq!(json["summary"]["corridor_count"], 0);
}

#[test]
fn test_terminal_output_lists_corridor() {
    let dir = TempDir::new().unwrap();
    let input = write_elements(dir.path(), &chained_segments());

    let assert = corridormap(dir.path())
        .args(["aggregate", input.to_str().unwrap(), "--no-color"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("CORRIDOR AGGREGATION REPORT"));
    assert!(stdout.contains("cor-"));
}

#[test]
fn test_invalid_parameter_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_elements(dir.path(), &chained_segments());

    let assert = corridormap(dir.path())
        .args(["aggregate", input.to_str().unwrap(), "--tolerance=-5"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("connectivity_tolerance_m"));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    corridormap(dir.path())
        .args(["aggregate", "does-not-exist.json"])
        .assert()
        .failure();
}

#[test]
fn test_score_without_aqi() {
    let dir = TempDir::new().unwrap();
    let json = stdout_json(corridormap(dir.path()).args([
        "score", "--heat", "0.8", "--ndvi", "0.25", "--json",
    ]));

    let priority = json["priority_score"].as_f64().unwrap();
    assert!((priority - 0.78).abs() < 1e-9);
    assert!(json["aqi_norm"].is_null());
}

#[test]
fn test_score_with_raw_aqi() {
    let dir = TempDir::new().unwrap();
    let json = stdout_json(corridormap(dir.path()).args([
        "score", "--heat", "0.8", "--ndvi", "0.25", "--aqi-raw", "175", "--json",
    ]));

    assert_eq!(json["aqi_norm"], 0.5);
    let expected = 0.45 * 0.8 + 0.35 * 0.75 + 0.20 * 0.5;
    assert!((json["priority_score"].as_f64().unwrap() - expected).abs() < 1e-9);
}

#[test]
fn test_init_writes_config_once() {
    let dir = TempDir::new().unwrap();

    corridormap(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".corridormap.toml").exists());

    corridormap(dir.path()).arg("init").assert().failure();
    corridormap(dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
}
