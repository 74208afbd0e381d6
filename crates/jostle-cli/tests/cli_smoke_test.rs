use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;

const CORNERS: &str = r#"{
  "items": [
    {"position": [-5, -5], "size": [1, 1]},
    {"position": [5, -5], "size": [1, 1]},
    {"position": [-5, 5], "size": [1, 1]},
    {"position": [5, 5], "size": [1, 1]}
  ],
  "params": {"grid_size": 1.0}
}"#;

fn positions(doc: &Value) -> Vec<(f64, f64)> {
    doc["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|it| {
            (
                it["position"][0].as_f64().expect("x"),
                it["position"][1].as_f64().expect("y"),
            )
        })
        .collect()
}

#[test]
fn cli_clusters_items_from_a_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("corners.json");
    let out = tmp.path().join("out.json");
    fs::write(&input, CORNERS).expect("write input");

    let exe = assert_cmd::cargo_bin!("jostle-cli");
    Command::new(exe)
        .args([
            "cluster",
            "--out",
            out.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let doc: Value = serde_json::from_str(&fs::read_to_string(&out).expect("read out"))
        .expect("output is JSON");
    let ps = positions(&doc);
    assert_eq!(ps.len(), 4);
    for &(x, y) in &ps {
        assert!(x.abs() < 5.0 && y.abs() < 5.0, "({x}, {y}) was not pulled in");
    }
    assert!(doc["report"]["total_steps"].as_u64().expect("report") > 0);
}

#[test]
fn cli_snaps_a_bare_array_from_stdin() {
    let exe = assert_cmd::cargo_bin!("jostle-cli");
    let output = assert_cmd::Command::new(exe)
        .args(["snap", "--grid", "2"])
        .write_stdin(r#"[{"position": [1.2, 3.9], "size": [2, 2]}]"#)
        .output()
        .expect("run");
    assert!(output.status.success());

    let doc: Value = serde_json::from_slice(&output.stdout).expect("output is JSON");
    // top-left (0.2, 2.9) snaps to (0, 2)
    assert_eq!(positions(&doc), vec![(1.0, 3.0)]);
    assert!(doc.get("report").is_none());
}

#[test]
fn cli_emits_one_frame_per_step() {
    let exe = assert_cmd::cargo_bin!("jostle-cli");
    let output = assert_cmd::Command::new(exe)
        .args(["rail", "--axis", "horizontal", "--frames", "-"])
        .write_stdin(CORNERS)
        .output()
        .expect("run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let frames: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("frame is JSON"))
        .collect();
    assert!(frames.len() >= 4);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame["step"].as_u64(), Some(i as u64 + 1));
        assert_eq!(frame["done"].as_bool(), Some(i + 1 == frames.len()));
    }
    assert_eq!(frames[0]["phase"], "settle");
    assert_eq!(frames[frames.len() - 1]["phase"], "finalize");
}

#[test]
fn cli_reports_usage_and_input_errors() {
    let exe = assert_cmd::cargo_bin!("jostle-cli");
    Command::new(exe)
        .args(["--method", "spring"])
        .assert()
        .code(2);

    let exe = assert_cmd::cargo_bin!("jostle-cli");
    assert_cmd::Command::new(exe)
        .args(["cluster"])
        .write_stdin("not json")
        .assert()
        .code(1);

    let exe = assert_cmd::cargo_bin!("jostle-cli");
    assert_cmd::Command::new(exe)
        .args(["snap", "--grid", "0"])
        .write_stdin("[]")
        .assert()
        .code(1);
}
