//! Runs the built `raster-rotate` binary against files in a temp directory.

use image::{Rgb, RgbImage};
use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_raster-rotate"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn write_input(dir: &Path) -> std::path::PathBuf {
    let input = dir.join("input.png");
    RgbImage::from_fn(24, 16, |x, y| Rgb([(x * 10) as u8, (y * 15) as u8, 128]))
        .save(&input)
        .unwrap();
    input
}

#[test]
fn rotates_png_and_reports() {
    let tmp = tempfile::TempDir::new().unwrap();
    let input = write_input(tmp.path());
    let output = tmp.path().join("rotated.png");

    let out = run(&[path_str(&input), path_str(&output), "30"]);

    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Image rotated by 30 degrees."), "{stdout}");
    assert_eq!(image::image_dimensions(&output).unwrap(), (24, 16));
}

#[test]
fn negative_angle_and_flags() {
    let tmp = tempfile::TempDir::new().unwrap();
    let input = write_input(tmp.path());
    let output = tmp.path().join("rotated.jpg");

    let out = run(&[
        "--sequential",
        "--threads",
        "1",
        "--quality",
        "75",
        path_str(&input),
        path_str(&output),
        "-45",
    ]);

    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("(sequential)"), "{stdout}");
    assert!(output.exists());
}

#[test]
fn json_report() {
    let tmp = tempfile::TempDir::new().unwrap();
    let input = write_input(tmp.path());
    let output = tmp.path().join("rotated.bmp");

    let out = run(&["--json", path_str(&input), path_str(&output), "90"]);

    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["angle_degrees"], 90.0);
    assert_eq!(report["width"], 24);
    assert_eq!(report["format"], "bmp");
}

#[test]
fn config_file_is_applied() {
    let tmp = tempfile::TempDir::new().unwrap();
    let input = write_input(tmp.path());
    let output = tmp.path().join("rotated.png");
    let config = tmp.path().join("rotate.toml");
    std::fs::write(&config, "[processing]\nparallel = false\n").unwrap();

    let out = run(&[
        "--config",
        path_str(&config),
        path_str(&input),
        path_str(&output),
        "5",
    ]);

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("(sequential)"));
}

#[test]
fn print_config_outputs_stock_toml() {
    let out = run(&["--print-config"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[processing]"));
    assert!(stdout.contains("[output]"));
}

#[test]
fn unreadable_input_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = tmp.path().join("rotated.png");

    let out = run(&[
        path_str(&tmp.path().join("missing.png")),
        path_str(&output),
        "10",
    ]);

    assert!(!out.status.success());
    assert!(!output.exists());
}

#[test]
fn unsupported_output_extension_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let input = write_input(tmp.path());

    let out = run(&[
        path_str(&input),
        path_str(&tmp.path().join("rotated.xyz")),
        "10",
    ]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("xyz"));
}

#[test]
fn non_numeric_angle_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let input = write_input(tmp.path());

    let out = run(&[
        path_str(&input),
        path_str(&tmp.path().join("rotated.png")),
        "sideways",
    ]);

    assert!(!out.status.success());
}

#[test]
fn invalid_config_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let input = write_input(tmp.path());
    let config = tmp.path().join("rotate.toml");
    std::fs::write(&config, "[output]\nquality = 500\n").unwrap();

    let out = run(&[
        "--config",
        path_str(&config),
        path_str(&input),
        path_str(&tmp.path().join("rotated.png")),
        "10",
    ]);

    assert!(!out.status.success());
}
