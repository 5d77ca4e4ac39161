//! Binding to the PDFium library used for page rasterisation.
//!
//! Lookup order (first hit wins):
//!
//! 1. `PDFIUM_LIB_PATH` — explicit path to `libpdfium.so` / `.dylib` / `pdfium.dll`
//! 2. the directory containing the running executable
//! 3. the current working directory
//! 4. the system library search path
//!
//! Only the extract pipeline needs PDFium; merge and compress work without it.

use crate::error::PdfToolsError;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit PDFium library file.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind to PDFium from an explicit library file.
pub fn bind_from_path(path: &Path) -> Result<Pdfium, PdfToolsError> {
    Pdfium::bind_to_library(path)
        .map(Pdfium::new)
        .map_err(|e| {
            PdfToolsError::EngineUnavailable(format!("cannot load '{}': {e}", path.display()))
        })
}

/// Candidate library files checked before falling back to the system search path.
fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(p) = std::env::var_os(PDFIUM_LIB_PATH_ENV) {
        candidates.push(PathBuf::from(p));
    }
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(Pdfium::pdfium_platform_library_name_at_path(&dir));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(Pdfium::pdfium_platform_library_name_at_path(&cwd));
    }

    candidates
}

/// Bind to PDFium using the lookup order described in the module docs.
pub fn bind() -> Result<Pdfium, PdfToolsError> {
    for candidate in candidate_paths() {
        if !candidate.is_file() {
            continue;
        }
        match bind_from_path(&candidate) {
            Ok(pdfium) => {
                debug!("Bound PDFium from {}", candidate.display());
                return Ok(pdfium);
            }
            Err(e) => debug!("Skipping {}: {}", candidate.display(), e),
        }
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| PdfToolsError::EngineUnavailable(format!("{e}")))
}

/// `true` if [`bind`] currently succeeds.
pub fn is_available() -> bool {
    bind().is_ok()
}
