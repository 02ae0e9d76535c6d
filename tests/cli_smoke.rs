use std::path::PathBuf;
use std::process::Command;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_growtree")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "growtree.exe"
            } else {
                "growtree"
            });
            p
        })
}

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn cli_frame_writes_svg_and_png() {
    let dir = out_dir("frame");
    for name in ["out.svg", "out.png"] {
        let out = dir.join(name);
        let status = Command::new(exe())
            .args(["frame", "--progress", "0.8", "--settle", "--out"])
            .arg(&out)
            .status()
            .unwrap();
        assert!(status.success());
        assert!(out.exists());
    }
    let svg = std::fs::read_to_string(dir.join("out.svg")).unwrap();
    assert!(svg.contains(r#"data-section="canopy""#));
}

#[test]
fn cli_frame_width_selects_narrow_cards() {
    let dir = out_dir("narrow");
    let out = dir.join("narrow.svg");
    let status = Command::new(exe())
        .args(["frame", "--progress", "0.5", "--width", "600", "--out"])
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());
    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"data-section="intro""#));
    assert!(!svg.contains("data-node="));
}

#[test]
fn cli_sweep_writes_one_file_per_frame() {
    let dir = out_dir("sweep");
    let status = Command::new(exe())
        .args(["sweep", "--frames", "4", "--out"])
        .arg(&dir)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 4);
    assert!(dir.join("frame_00003.svg").exists());
}

#[test]
fn cli_story_and_dump_layout() {
    let output = Command::new(exe())
        .args(["story", "--progress", "0.2", "--progress", "0.9"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let ids: Vec<&str> = text
        .lines()
        .filter_map(|l| l.split('\t').nth(1))
        .collect();
    assert_eq!(ids, ["germination", "canopy"]);

    let output = Command::new(exe())
        .args(["dump-layout", "--progress", "0.5"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["section"], "sprout");
    assert_eq!(json["edges"].as_array().unwrap().len(), 10);
}

#[test]
fn cli_rejects_bad_config() {
    let dir = out_dir("bad_config");
    let cfg = dir.join("bad.json");
    std::fs::write(&cfg, r#"{"fps": 0}"#).unwrap();
    let status = Command::new(exe())
        .args(["story", "--config"])
        .arg(&cfg)
        .status()
        .unwrap();
    assert!(!status.success());
}
