//! Input discovery: list images and PDFs in a directory, naturally sorted,
//! and validate single input files before a pipeline touches them.
//!
//! Files are ordered the way people number scans: `page2.png` comes before
//! `page10.png`. Every pipeline validates its input here first so that a
//! missing file is reported before any output is created or any external
//! tool is started.

use crate::config::{ToolsConfig, IMAGE_EXTENSIONS, PDF_EXTENSION};
use crate::error::PdfToolsError;
use crate::output::InputSummary;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

static DIGIT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// One run of a natural-sort key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyPart {
    Text(String),
    Number(u64),
}

/// Natural-sort key of a path: its lower-cased stem split into alternating
/// text and numeric runs, so `file2` < `file10`.
pub fn natural_sort_key(path: &Path) -> Vec<KeyPart> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let mut parts = Vec::new();
    let mut last = 0;
    for m in DIGIT_RUNS.find_iter(&stem) {
        parts.push(KeyPart::Text(stem[last..m.start()].to_string()));
        parts.push(KeyPart::Number(m.as_str().parse().unwrap_or(u64::MAX)));
        last = m.end();
    }
    parts.push(KeyPart::Text(stem[last..].to_string()));
    parts
}

fn natural_cmp(a: &Path, b: &Path) -> Ordering {
    natural_sort_key(a)
        .cmp(&natural_sort_key(b))
        .then_with(|| a.file_name().cmp(&b.file_name()))
}

/// Lower-cased extension of `path` with the leading dot, e.g. `".png"`.
fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

pub fn is_image(path: &Path) -> bool {
    dotted_extension(path).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

pub fn is_pdf(path: &Path) -> bool {
    dotted_extension(path).is_some_and(|ext| ext == PDF_EXTENSION)
}

/// Regular files in `dir` accepted by `filter`, naturally sorted.
/// A missing or unreadable directory yields an empty list.
fn list_files(dir: &Path, filter: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && filter(p))
        .collect();
    files.sort_by(|a, b| natural_cmp(a, b));
    files
}

/// All supported images in `dir`, naturally sorted.
pub fn list_images(dir: &Path) -> Vec<PathBuf> {
    list_files(dir, is_image)
}

/// All PDFs in `dir`, naturally sorted.
pub fn list_pdfs(dir: &Path) -> Vec<PathBuf> {
    list_files(dir, is_pdf)
}

/// Count images and PDFs in `dir`.
pub fn summarize(dir: &Path) -> InputSummary {
    InputSummary {
        images: list_images(dir).len(),
        pdfs: list_pdfs(dir).len(),
    }
}

/// Human-readable list of supported image formats, e.g. `"JPEG, JPG, PNG, …"`.
pub fn supported_image_formats() -> String {
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_uppercase())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Create the input and output directories if they don't exist.
pub fn ensure_dirs(config: &ToolsConfig) -> Result<(), PdfToolsError> {
    for dir in [&config.input_dir, &config.output_dir] {
        ensure_dir(dir)?;
    }
    Ok(())
}

/// Create `dir` (and parents) if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), PdfToolsError> {
    std::fs::create_dir_all(dir).map_err(|source| PdfToolsError::OutputDirUnavailable {
        path: dir.to_path_buf(),
        source,
    })
}

/// Check that `path` exists and can be opened for reading.
pub fn ensure_readable(path: &Path) -> Result<std::fs::File, PdfToolsError> {
    if !path.is_file() {
        return Err(PdfToolsError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    match std::fs::File::open(path) {
        Ok(f) => Ok(f),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(PdfToolsError::PermissionDenied {
                path: path.to_path_buf(),
            })
        }
        Err(_) => Err(PdfToolsError::FileNotFound {
            path: path.to_path_buf(),
        }),
    }
}

/// Validate a PDF input: readable and starting with the `%PDF` magic bytes.
pub fn ensure_pdf(path: &Path) -> Result<(), PdfToolsError> {
    let mut f = ensure_readable(path)?;
    let mut magic = [0u8; 4];
    if f.read_exact(&mut magic).is_err() || &magic != b"%PDF" {
        return Err(PdfToolsError::CorruptPdf {
            path: path.to_path_buf(),
            detail: format!("not a PDF file (first bytes: {magic:?})"),
        });
    }
    debug!("Validated PDF input: {}", path.display());
    Ok(())
}

/// File size in bytes, 0 if it cannot be read.
pub fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
