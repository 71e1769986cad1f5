use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("health-dash").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("health-dash"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn export_writes_full_csv() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("mydf.csv");
    let mut cmd = Command::cargo_bin("health-dash").unwrap();
    cmd.args(["export", "--out"]).arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Saved 5 rows"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("country,Year,Life Expectancy"));
    assert_eq!(content.lines().count(), 6);
}

#[test]
fn export_infers_json_from_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("health.json");
    let mut cmd = Command::cargo_bin("health-dash").unwrap();
    cmd.args(["export", "--out"]).arg(&out);
    cmd.assert().success();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 5);
}

#[test]
fn chart_writes_svg() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("chart.svg");
    let mut cmd = Command::cargo_bin("health-dash").unwrap();
    cmd.args([
        "chart",
        "--countries",
        "USA,Canada",
        "--indicator",
        "Heart Disease",
        "--variant",
        "toggle",
        "--kind",
        "bar",
        "--out",
    ])
    .arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Heart Disease Over Time (Bar Chart)"));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("Canada"));
}

#[test]
fn chart_rejects_unknown_indicator() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("health-dash").unwrap();
    cmd.args(["chart", "--indicator", "bogus", "--out"])
        .arg(tmp.path().join("x.svg"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown indicator"));
}

#[test]
fn serve_rejects_tiny_chart_size() {
    let mut cmd = Command::cargo_bin("health-dash").unwrap();
    cmd.args(["serve", "--width", "120"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--width"));
}
