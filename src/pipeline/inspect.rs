//! Structural PDF inspection with lopdf: page count and header version,
//! without rendering anything or loading PDFium.

use crate::error::PdfToolsError;
use crate::files;
use crate::output::DocumentInfo;
use std::path::Path;
use tracing::debug;

/// Read page count, version and size of a PDF.
pub fn inspect(path: &Path) -> Result<DocumentInfo, PdfToolsError> {
    files::ensure_pdf(path)?;

    let document = lopdf::Document::load(path).map_err(|e| {
        let detail = e.to_string();
        if detail.to_lowercase().contains("decrypt") {
            PdfToolsError::PasswordRequired {
                path: path.to_path_buf(),
            }
        } else {
            PdfToolsError::CorruptPdf {
                path: path.to_path_buf(),
                detail,
            }
        }
    })?;

    let info = DocumentInfo {
        path: path.to_path_buf(),
        page_count: document.get_pages().len(),
        pdf_version: document.version.clone(),
        size_bytes: files::file_size(path),
    };
    debug!(
        "Inspected {}: {} pages, PDF {}",
        path.display(),
        info.page_count,
        info.pdf_version
    );
    Ok(info)
}

/// Page count of a PDF; shorthand for `inspect(path)?.page_count`.
pub fn page_count(path: &Path) -> Result<usize, PdfToolsError> {
    inspect(path).map(|info| info.page_count)
}
