//! Merge pipeline: N images → one PDF with N pages.
//!
//! Each image is decoded, flattened to RGB8 and placed on its own page. The
//! page is exactly the size of the image at [`ToolsConfig::merge_dpi`], so no
//! image is scaled or cropped. The document is written to a temporary file
//! next to the destination and renamed into place, so a failed run never
//! leaves a truncated PDF behind.

use crate::config::ToolsConfig;
use crate::error::PdfToolsError;
use crate::files;
use crate::naming::output_file_name;
use crate::output::{OperationKind, OperationResult};
use crate::progress::notify;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default output name when the user gives none.
pub const DEFAULT_OUTPUT_NAME: &str = "combined";

/// What to merge and where to write it.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// Output file stem; sanitised, `.pdf` appended.
    pub output_name: String,
    /// Images in page order. `None` merges every image of the input directory
    /// in natural filename order.
    pub images: Option<Vec<PathBuf>>,
}

impl Default for MergeRequest {
    fn default() -> Self {
        Self {
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            images: None,
        }
    }
}

impl MergeRequest {
    pub fn with_images(output_name: impl Into<String>, images: Vec<PathBuf>) -> Self {
        Self {
            output_name: output_name.into(),
            images: Some(images),
        }
    }
}

/// Merge images into a single PDF in the output directory.
///
/// # Errors
/// - [`PdfToolsError::NoFiles`] when there is nothing to merge
/// - [`PdfToolsError::FileNotFound`] / [`PdfToolsError::ImageDecode`] for a bad image
/// - [`PdfToolsError::OutputDirUnavailable`] / [`PdfToolsError::OutputWriteFailed`]
pub fn merge_images(
    request: &MergeRequest,
    config: &ToolsConfig,
) -> Result<OperationResult, PdfToolsError> {
    let images = match &request.images {
        Some(list) => list.clone(),
        None => files::list_images(&config.input_dir),
    };

    if images.is_empty() {
        return Err(PdfToolsError::NoFiles {
            kind: "images",
            dir: config.input_dir.clone(),
            hint: format!("Supported formats: {}", files::supported_image_formats()),
        });
    }

    let stem = if request.output_name.trim().is_empty() {
        DEFAULT_OUTPUT_NAME
    } else {
        request.output_name.as_str()
    };
    let output_path = config.output_dir.join(output_file_name(stem, "", ".pdf"));
    info!(
        "Merging {} images into {}",
        images.len(),
        output_path.display()
    );

    let mut loaded = 0;
    let written = build_pdf(&images, stem, config, &mut loaded).and_then(|bytes| {
        files::ensure_dir(&config.output_dir)?;
        write_atomically(&output_path, &bytes)?;
        Ok(bytes.len())
    });
    let pdf_len = match written {
        Ok(len) => len,
        Err(e) => {
            notify(&config.progress_callback, |cb| cb.on_operation_failed(loaded));
            return Err(e);
        }
    };

    notify(&config.progress_callback, |cb| {
        cb.on_operation_complete(images.len())
    });
    info!("Wrote {} ({} bytes)", output_path.display(), pdf_len);

    Ok(OperationResult {
        kind: OperationKind::Merge,
        message: format!("Created PDF from {} images.", images.len()),
        output_path,
        files_count: images.len(),
        compression: None,
    })
}

/// Decode every image and lay it out one per page. `loaded` counts the
/// images placed so far.
fn build_pdf(
    images: &[PathBuf],
    title: &str,
    config: &ToolsConfig,
    loaded: &mut usize,
) -> Result<Vec<u8>, PdfToolsError> {
    let total = images.len();
    notify(&config.progress_callback, |cb| {
        cb.on_operation_start("Merging", total)
    });

    let dpi = config.merge_dpi as f32;
    let mut doc = PdfDocument::new(title);
    let mut pages: Vec<PdfPage> = Vec::with_capacity(total);

    for (i, path) in images.iter().enumerate() {
        let raw = load_rgb(path)?;
        let (width_px, height_px) = (raw.width, raw.height);
        let xobject_id = doc.add_image(&raw);

        let page_w = Mm(width_px as f32 / dpi * 25.4);
        let page_h = Mm(height_px as f32 / dpi * 25.4);

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: None,
                scale_y: None,
                dpi: Some(dpi),
                rotate: None,
            },
        }];
        pages.push(PdfPage::new(page_w, page_h, ops));

        debug!(
            "Page {}/{}: {} ({}x{} px)",
            i + 1,
            total,
            path.display(),
            width_px,
            height_px
        );
        notify(&config.progress_callback, |cb| {
            cb.on_item_complete(i + 1, total, path)
        });
        *loaded = i + 1;
    }

    doc.with_pages(pages);

    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        warn!("PDF writer reported {} warnings", warnings.len());
    }
    Ok(bytes)
}

/// Open an image and convert it to raw RGB8 pixels for embedding.
fn load_rgb(path: &Path) -> Result<RawImage, PdfToolsError> {
    files::ensure_readable(path)?;

    let image = image::open(path).map_err(|e| PdfToolsError::ImageDecode {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    Ok(RawImage {
        pixels: RawImageData::U8(rgb.into_raw()),
        width,
        height,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    })
}

/// Write `bytes` to a temp file in the destination directory, then rename.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), PdfToolsError> {
    let write_err = |source: std::io::Error| PdfToolsError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::Builder::new()
        .prefix(".pdftools-")
        .suffix(".pdf.tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
