//! Integration tests for the extract pipeline.
//!
//! Rendering needs the PDFium shared library. Tests that render skip with a
//! printed `SKIP` line when it cannot be bound.
//!
//! Run with:
//!   PDFIUM_LIB_PATH=/path/to/libpdfium.so cargo test --test extract -- --nocapture

use image::{Rgb, RgbImage};
use pdftools::{
    engine, extract_pages, merge_images, ExtractRequest, ImageFormat, MergeRequest,
    OperationKind, PdfToolsError, ToolsConfig,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn workspace() -> (TempDir, ToolsConfig) {
    let tmp = TempDir::new().unwrap();
    let config = ToolsConfig::builder()
        .input_dir(tmp.path().join("input"))
        .output_dir(tmp.path().join("output"))
        .build()
        .unwrap();
    std::fs::create_dir_all(&config.input_dir).unwrap();
    (tmp, config)
}

/// Build a PDF with one page per entry of `sizes`, using the merge pipeline.
fn pdf_with_pages(config: &ToolsConfig, name: &str, sizes: &[(u32, u32)]) -> PathBuf {
    let images: Vec<PathBuf> = sizes
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| {
            let path = config.input_dir.join(format!("{name}_src_{i}.png"));
            RgbImage::from_pixel(w, h, Rgb([30, 120, 200])).save(&path).unwrap();
            path
        })
        .collect();
    let merged = merge_images(&MergeRequest::with_images(name, images), config).unwrap();
    let target = config.input_dir.join(format!("{name}.pdf"));
    std::fs::rename(&merged.output_path, &target).unwrap();
    target
}

macro_rules! skip_unless_pdfium {
    () => {
        if !engine::is_available() {
            println!("SKIP — PDFium library not available (set PDFIUM_LIB_PATH)");
            return;
        }
    };
}

#[test]
fn extracts_one_file_per_page_in_order() {
    skip_unless_pdfium!();
    let (_tmp, config) = workspace();
    let pdf = pdf_with_pages(&config, "three", &[(100, 100), (200, 100), (100, 300)]);

    let request = ExtractRequest {
        source: pdf,
        dpi: Some(72),
        format: Some(ImageFormat::Png),
    };
    let result = extract_pages(&request, &config).unwrap();

    assert_eq!(result.kind, OperationKind::Extract);
    assert_eq!(result.files_count, 3);
    assert_eq!(result.output_path, config.output_dir.join("three"));

    let mut names: Vec<String> = std::fs::read_dir(&result.output_path)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["page_001.png", "page_002.png", "page_003.png"]);

    // Merged at 100 DPI, rendered at 72: every dimension scales by 0.72.
    let (w2, h2) = image::image_dimensions(result.output_path.join("page_002.png")).unwrap();
    assert!(w2 > h2, "page 2 should be landscape, got {w2}x{h2}");
    let (w3, h3) = image::image_dimensions(result.output_path.join("page_003.png")).unwrap();
    assert!(h3 > w3, "page 3 should be portrait, got {w3}x{h3}");
}

#[test]
fn jpg_output_and_dpi_scaling() {
    skip_unless_pdfium!();
    let (_tmp, config) = workspace();
    let pdf = pdf_with_pages(&config, "single", &[(100, 100)]);

    let low = extract_pages(
        &ExtractRequest {
            source: pdf.clone(),
            dpi: Some(72),
            format: Some(ImageFormat::Jpg),
        },
        &config,
    )
    .unwrap();
    let (w_low, _) = image::image_dimensions(low.output_path.join("page_001.jpg")).unwrap();

    let high = extract_pages(
        &ExtractRequest {
            source: pdf,
            dpi: Some(144),
            format: Some(ImageFormat::Jpg),
        },
        &config,
    )
    .unwrap();
    let (w_high, _) = image::image_dimensions(high.output_path.join("page_001.jpg")).unwrap();

    assert!(
        (w_high as i64 - 2 * w_low as i64).abs() <= 2,
        "{w_high} should be about twice {w_low}"
    );
}

#[test]
fn missing_pdf_is_reported_without_pdfium() {
    let (_tmp, config) = workspace();
    let err = extract_pages(&ExtractRequest::new(config.input_dir.join("gone.pdf")), &config)
        .unwrap_err();
    assert!(matches!(err, PdfToolsError::FileNotFound { .. }), "got: {err}");
}

#[test]
fn corrupt_pdf_is_reported() {
    skip_unless_pdfium!();
    let (_tmp, config) = workspace();
    let path = config.input_dir.join("broken.pdf");
    std::fs::write(&path, b"%PDF-1.7\nthis is not a real document").unwrap();

    let err = extract_pages(&ExtractRequest::new(&path), &config).unwrap_err();
    assert!(matches!(err, PdfToolsError::CorruptPdf { .. }), "got: {err}");
}
