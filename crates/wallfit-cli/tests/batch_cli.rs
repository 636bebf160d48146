//! End-to-end tests for the `wallfit` binary.

use std::path::Path;
use std::process::{Command, Output};
use wallfit_core::RgbaImage;

fn wallfit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wallfit"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run wallfit")
}

fn write_solid(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    let image = RgbaImage::filled(width, height, rgba).unwrap();
    wallfit_io::write_png(path, &image).unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn batch_converts_every_image() {
    let dir = tempfile::tempdir().unwrap();
    write_solid(&dir.path().join("square.png"), 40, 40, [200, 10, 10, 255]);
    write_solid(&dir.path().join("tall.PNG"), 27, 48, [10, 200, 10, 255]);
    write_solid(&dir.path().join("wide.png"), 100, 20, [10, 10, 200, 255]);
    std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

    let output = wallfit(&["batch", dir.path().to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Processed: square.png"));
    assert!(out.contains("Processed: tall.PNG"));
    assert!(out.contains("Processed: wide.png"));
    assert!(!out.contains("notes.txt"));

    for stem in ["square", "tall", "wide"] {
        let result = wallfit_io::read(dir.path().join("result").join(format!("{stem}.png"))).unwrap();
        assert_eq!(result.dimensions(), (1920, 1080), "{stem}");
    }
    assert!(!dir.path().join("result").join("notes.png").exists());
}

#[test]
fn batch_keeps_going_after_a_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a_broken.jpg"), b"definitely not a jpeg").unwrap();
    write_solid(&dir.path().join("b_good.png"), 30, 30, [90, 90, 90, 255]);

    let output = wallfit(&["batch", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Error processing a_broken.jpg"));
    assert!(stdout(&output).contains("Processed: b_good.png"));
    assert!(stdout(&output).contains("1 succeeded, 1 failed"));

    assert!(dir.path().join("result").join("b_good.png").exists());
    assert!(!dir.path().join("result").join("a_broken.png").exists());
}

#[test]
fn batch_exact_1080p_is_copied_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut image = RgbaImage::filled(1920, 1080, [12, 34, 56, 255]).unwrap();
    image.data_mut()[0..4].copy_from_slice(&[255, 0, 0, 255]);
    wallfit_io::write_png(dir.path().join("wall.png"), &image).unwrap();

    let output = wallfit(&["batch", dir.path().to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let result = wallfit_io::read(dir.path().join("result").join("wall.png")).unwrap();
    assert_eq!(result, image);
}

#[test]
fn batch_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_solid(&dir.path().join("tile.png"), 50, 50, [1, 2, 3, 255]);

    let output = wallfit(&["batch", dir.path().to_str().unwrap(), "--dry-run"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("tile.png: 50x50 -> square"));
    assert!(!dir.path().join("result").exists());
}

#[test]
fn batch_custom_output_name() {
    let dir = tempfile::tempdir().unwrap();
    write_solid(&dir.path().join("x.png"), 16, 9, [0, 0, 0, 255]);

    let output = wallfit(&["batch", dir.path().to_str().unwrap(), "--output-name", "walls"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(dir.path().join("walls").join("x.png").exists());
    assert!(!dir.path().join("result").exists());
}

#[test]
fn batch_rejects_missing_folder() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let output = wallfit(&["batch", missing.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn layout_single_file_with_forced_class() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let out = dir.path().join("out.png");
    write_solid(&input, 60, 20, [255, 255, 255, 255]);

    let output = wallfit(&[
        "layout",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--class",
        "square",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let result = wallfit_io::read(&out).unwrap();
    assert_eq!(result.dimensions(), (1920, 1080));
}

#[test]
fn classify_prints_class() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("p.png");
    write_solid(&input, 90, 160, [5, 5, 5, 255]);

    let output = wallfit(&["classify", input.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("portrait"));
}

#[test]
fn batch_handles_extreme_aspect_ratio_next_to_normal_file() {
    let dir = tempfile::tempdir().unwrap();
    write_solid(&dir.path().join("a_strip.png"), 20000, 2, [30, 60, 90, 255]);
    write_solid(&dir.path().join("b_good.png"), 40, 40, [200, 200, 200, 255]);

    let output = wallfit(&["batch", dir.path().to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Processed: a_strip.png"));
    assert!(stdout(&output).contains("Processed: b_good.png"));

    for stem in ["a_strip", "b_good"] {
        let result = wallfit_io::read(dir.path().join("result").join(format!("{stem}.png"))).unwrap();
        assert_eq!(result.dimensions(), (1920, 1080), "{stem}");
    }
}
