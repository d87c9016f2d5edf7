use std::path::PathBuf;

use trackexport::{CompositionBuilder, LayerBuilder, Project, read_json};

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_trackexport")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "trackexport.exe"
            } else {
                "trackexport"
            });
            p
        })
}

#[test]
fn cli_export_writes_document() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let project_path = dir.join("project.json");
    let out_path = dir.join("out").join("track.json");
    let _ = std::fs::remove_file(&out_path);

    let comp = CompositionBuilder::new("Smoke", 0.2, 10.0)
        .size(64, 64)
        .layer(LayerBuilder::new("Solid").build().unwrap())
        .build()
        .unwrap();
    let project = Project {
        compositions: vec![comp],
    };

    let f = std::fs::File::create(&project_path).unwrap();
    serde_json::to_writer_pretty(f, &project).unwrap();

    let project_arg = project_path.to_string_lossy().to_string();
    let out_arg = out_path.to_string_lossy().to_string();

    let status = std::process::Command::new(exe())
        .args(["export", "--in", project_arg.as_str(), "--comp", "Smoke", "--out"])
        .arg(out_arg.as_str())
        .status()
        .unwrap();

    assert!(status.success());
    let rec = read_json(&out_path).unwrap();
    assert_eq!(rec.name, "Smoke");
    assert_eq!(rec.layers[0].frames.len(), 3);
}

#[test]
fn cli_list_prints_compositions() {
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("tracked_comp.json");
    let fixture_arg = fixture.to_string_lossy().to_string();

    let output = std::process::Command::new(exe())
        .args(["list", "--in", fixture_arg.as_str()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "1\tShot 010\n2\tEmpty Precomp\n");
}

#[test]
fn cli_unknown_composition_fails() {
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("static_comp.json");
    let fixture_arg = fixture.to_string_lossy().to_string();
    let out = PathBuf::from("target").join("cli_smoke").join("never.json");
    let _ = std::fs::remove_file(&out);

    let output = std::process::Command::new(exe())
        .args(["export", "--in", fixture_arg.as_str(), "--comp", "Nope", "--out"])
        .arg(&out)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!out.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no composition matches 'Nope'"));
}
