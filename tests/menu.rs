//! Drives the interactive menu with scripted input.

use image::{Rgb, RgbImage};
use pdftools::pipeline::inspect::page_count;
use pdftools::{run_menu_loop, ToolsConfig};
use std::io::Cursor;
use tempfile::TempDir;

fn run(config: &ToolsConfig, script: &str) -> String {
    let mut out = Vec::new();
    run_menu_loop(config, Cursor::new(script.as_bytes().to_vec()), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn workspace_with_images(names: &[&str]) -> (TempDir, ToolsConfig) {
    let tmp = TempDir::new().unwrap();
    let config = ToolsConfig::builder()
        .input_dir(tmp.path().join("input"))
        .output_dir(tmp.path().join("output"))
        .ghostscript(tmp.path().join("no-gs"))
        .build()
        .unwrap();
    std::fs::create_dir_all(&config.input_dir).unwrap();
    for name in names {
        RgbImage::from_pixel(16, 16, Rgb([1, 2, 3]))
            .save(config.input_dir.join(name))
            .unwrap();
    }
    (tmp, config)
}

#[test]
fn merge_everything_with_default_name() {
    let (_tmp, config) = workspace_with_images(&["b.png", "a.png", "c.png"]);

    // 1 → merge, Enter → all images, Enter → "combined", 4 → exit
    let out = run(&config, "1\n\n\n4\n");

    let pdf = config.output_dir.join("combined.pdf");
    assert_eq!(page_count(&pdf).unwrap(), 3);
    assert!(out.contains("[+] Images in input: 3"));
    assert!(out.contains("[OK] Created PDF from 3 images."), "got: {out}");
    assert!(out.contains("Goodbye!"));
}

#[test]
fn merge_selection_and_custom_name() {
    let (_tmp, config) = workspace_with_images(&["p1.png", "p2.png", "p3.png", "p4.png"]);

    // Pick 4 then 1-2, confirm, rename with a bad name first.
    let out = run(&config, "1\n4 1-2\ny\nbad:name\nalbum\n4\n");

    assert!(out.contains("Page order:"));
    assert!(out.contains("1. p4.png"));
    assert!(out.contains("invalid characters"));
    assert_eq!(page_count(&config.output_dir.join("album.pdf")).unwrap(), 3);
}

#[test]
fn cancelled_merge_writes_nothing() {
    let (_tmp, config) = workspace_with_images(&["x.png"]);
    let out = run(&config, "1\n0\n4\n");
    assert!(out.contains("Operation cancelled."));
    assert_eq!(std::fs::read_dir(&config.output_dir).unwrap().count(), 0);
}

#[test]
fn eof_mid_operation_exits_cleanly() {
    let (_tmp, config) = workspace_with_images(&["x.png"]);
    let out = run(&config, "1\n");
    assert!(out.trim_end().ends_with("Goodbye!"));
}
