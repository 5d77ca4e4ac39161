//! Extract pipeline: one PDF → one image per page, via pdfium.
//!
//! Pages are rendered in order at `dpi / 72` scale (PDF user space is 72
//! units per inch) and written as `page_001.png`, `page_002.png`, … into a
//! sub-directory of the output directory named after the PDF. The page
//! number width grows with the page count so names always sort correctly.

use crate::config::{ImageFormat, ToolsConfig, MAX_DPI, MIN_DPI};
use crate::engine;
use crate::error::PdfToolsError;
use crate::files;
use crate::naming::{format_page_number, sanitize_filename};
use crate::output::{OperationKind, OperationResult};
use crate::progress::notify;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Which PDF to extract and how.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub source: PathBuf,
    /// Rendering DPI; [`ToolsConfig::dpi`] when `None`.
    pub dpi: Option<u32>,
    /// Output format; [`ToolsConfig::image_format`] when `None`.
    pub format: Option<ImageFormat>,
}

impl ExtractRequest {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dpi: None,
            format: None,
        }
    }
}

/// Directory the pages of `source` are written to.
pub fn pages_dir(source: &Path, config: &ToolsConfig) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    config.output_dir.join(sanitize_filename(&stem))
}

/// File name of page `page_num` (1-indexed) out of `total`.
pub fn page_file_name(page_num: usize, total: usize, format: ImageFormat) -> String {
    format!(
        "page_{}{}",
        format_page_number(page_num, total),
        format.extension()
    )
}

/// Render every page of a PDF to an image file.
///
/// # Errors
/// - [`PdfToolsError::FileNotFound`] / [`PdfToolsError::CorruptPdf`] for a bad input
/// - [`PdfToolsError::PasswordRequired`] for encrypted documents
/// - [`PdfToolsError::EmptyPdf`] for a document without pages
/// - [`PdfToolsError::EngineUnavailable`] when PDFium cannot be loaded
/// - [`PdfToolsError::RenderFailed`] / [`PdfToolsError::OutputWriteFailed`] per page
pub fn extract_pages(
    request: &ExtractRequest,
    config: &ToolsConfig,
) -> Result<OperationResult, PdfToolsError> {
    let source = request.source.as_path();
    files::ensure_pdf(source)?;

    let dpi = request.dpi.unwrap_or(config.dpi).clamp(MIN_DPI, MAX_DPI);
    let format = request.format.unwrap_or(config.image_format);

    let pdfium = engine::bind()?;
    let document = open_document(&pdfium, source)?;
    let pages = document.pages();
    let total = pages.len() as usize;
    info!("PDF loaded: {} pages", total);

    if total == 0 {
        return Err(PdfToolsError::EmptyPdf {
            path: source.to_path_buf(),
        });
    }

    let out_dir = pages_dir(source, config);
    files::ensure_dir(&out_dir)?;

    let render_config = PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / 72.0);

    notify(&config.progress_callback, |cb| {
        cb.on_operation_start("Extracting", total)
    });

    let mut written = 0;
    let rendered: Result<(), PdfToolsError> = pages.iter().enumerate().try_for_each(|(idx, page)| {
        let page_num = idx + 1;
        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| PdfToolsError::RenderFailed {
                page: page_num,
                detail: format!("{e:?}"),
            })?;
        let image = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px",
            page_num,
            image.width(),
            image.height()
        );

        let path = out_dir.join(page_file_name(page_num, total, format));
        save_image(&image, &path, format, config.jpeg_quality)?;

        notify(&config.progress_callback, |cb| {
            cb.on_item_complete(page_num, total, &path)
        });
        written = page_num;
        Ok(())
    });
    if let Err(e) = rendered {
        notify(&config.progress_callback, |cb| cb.on_operation_failed(written));
        return Err(e);
    }

    notify(&config.progress_callback, |cb| cb.on_operation_complete(total));
    info!("Extracted {} pages to {}", total, out_dir.display());

    Ok(OperationResult {
        kind: OperationKind::Extract,
        message: format!(
            "Extracted {} pages as {} ({} DPI).",
            total,
            format.as_str().to_uppercase(),
            dpi
        ),
        output_path: out_dir,
        files_count: total,
        compression: None,
    })
}

fn open_document<'a>(pdfium: &'a Pdfium, path: &Path) -> Result<PdfDocument<'a>, PdfToolsError> {
    pdfium.load_pdf_from_file(path, None).map_err(|e| {
        let detail = format!("{e:?}");
        if detail.contains("Password") || detail.contains("password") {
            PdfToolsError::PasswordRequired {
                path: path.to_path_buf(),
            }
        } else {
            PdfToolsError::CorruptPdf {
                path: path.to_path_buf(),
                detail,
            }
        }
    })
}

/// Write one rendered page. JPEG has no alpha channel, so it is dropped first.
fn save_image(
    image: &DynamicImage,
    path: &Path,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<(), PdfToolsError> {
    let write_err = |detail: String| PdfToolsError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: std::io::Error::other(detail),
    };

    match format {
        ImageFormat::Png => image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| write_err(e.to_string())),
        ImageFormat::Jpg => {
            let file = File::create(path).map_err(|source| PdfToolsError::OutputWriteFailed {
                path: path.to_path_buf(),
                source,
            })?;
            let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), jpeg_quality);
            encoder
                .encode_image(&image.to_rgb8())
                .map_err(|e| write_err(e.to_string()))
        }
    }
}
