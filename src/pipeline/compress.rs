//! Compress pipeline: recompress a PDF with Ghostscript.
//!
//! The input is validated before anything else happens, so a missing file
//! never starts a subprocess or touches the output directory. Ghostscript
//! writes into a temporary file inside the output directory; only after a
//! clean exit is that file renamed to `<stem>_compressed_<preset>.pdf`.
//! On any failure the temporary file is removed and no output exists.
//!
//! The result is never larger than the input: when Ghostscript cannot shrink
//! the document (already-optimised input), the original bytes are kept as the
//! output and the report says so.

use crate::config::{CompressionPreset, ToolsConfig};
use crate::error::PdfToolsError;
use crate::files;
use crate::ghostscript;
use crate::naming::output_file_name;
use crate::output::{format_mb, CompressionReport, OperationKind, OperationResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Which PDF to compress and how hard.
#[derive(Debug, Clone)]
pub struct CompressRequest {
    pub source: PathBuf,
    /// Quality preset; [`ToolsConfig::preset`] when `None`.
    pub preset: Option<CompressionPreset>,
}

impl CompressRequest {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            preset: None,
        }
    }

    pub fn with_preset(mut self, preset: CompressionPreset) -> Self {
        self.preset = Some(preset);
        self
    }
}

/// Where the compressed copy of `source` is written.
pub fn compressed_path(source: &Path, preset: CompressionPreset, config: &ToolsConfig) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!("_compressed_{}", preset.as_str());
    config.output_dir.join(output_file_name(&stem, &suffix, ".pdf"))
}

/// Compress a PDF with Ghostscript.
///
/// # Errors
/// - [`PdfToolsError::FileNotFound`] / [`PdfToolsError::CorruptPdf`] before Ghostscript runs
/// - [`PdfToolsError::ToolNotFound`] when Ghostscript is not installed
/// - [`PdfToolsError::ToolFailed`] on a nonzero exit, with Ghostscript's message
/// - [`PdfToolsError::NoOutputProduced`] when Ghostscript exits cleanly but writes nothing
/// - [`PdfToolsError::OutputDirUnavailable`] / [`PdfToolsError::OutputWriteFailed`]
pub fn compress_pdf(
    request: &CompressRequest,
    config: &ToolsConfig,
) -> Result<OperationResult, PdfToolsError> {
    let source = request.source.as_path();
    let preset = request.preset.unwrap_or(config.preset);

    files::ensure_pdf(source)?;
    let gs = ghostscript::locate(config)?;
    files::ensure_dir(&config.output_dir)?;

    let original_bytes = files::file_size(source);
    let output_path = compressed_path(source, preset, config);
    info!(
        "Compressing {} with preset '{}' → {}",
        source.display(),
        preset,
        output_path.display()
    );

    let write_err = |source: std::io::Error| PdfToolsError::OutputWriteFailed {
        path: output_path.clone(),
        source,
    };

    // Ghostscript opens the file by name itself; we only hold the path, and
    // the guard deletes it on every early return.
    let staging = tempfile::Builder::new()
        .prefix(".pdftools-")
        .suffix(".pdf.tmp")
        .tempfile_in(&config.output_dir)
        .map_err(write_err)?
        .into_temp_path();
    std::fs::remove_file(&staging).map_err(write_err)?;

    ghostscript::run_compress(&gs, source, &staging, preset)?;

    if !staging.exists() || files::ensure_pdf(&staging).is_err() {
        return Err(PdfToolsError::NoOutputProduced {
            tool: ghostscript::TOOL_NAME,
        });
    }

    let produced_bytes = files::file_size(&staging);
    let reduced = produced_bytes < original_bytes;
    if reduced {
        staging.persist(&output_path).map_err(|e| write_err(e.error))?;
    } else {
        warn!(
            "Ghostscript output ({} bytes) is not smaller than the input ({} bytes); keeping the original",
            produced_bytes, original_bytes
        );
        std::fs::copy(source, &staging).map_err(write_err)?;
        staging.persist(&output_path).map_err(|e| write_err(e.error))?;
    }

    let report = CompressionReport {
        original_bytes,
        compressed_bytes: files::file_size(&output_path),
        preset,
        reduced,
    };
    info!(
        "Compression done: {} → {} bytes",
        report.original_bytes, report.compressed_bytes
    );

    Ok(OperationResult {
        kind: OperationKind::Compress,
        message: compression_message(&report),
        output_path,
        files_count: 1,
        compression: Some(report),
    })
}

/// Multi-line summary shown after compression.
pub fn compression_message(report: &CompressionReport) -> String {
    if report.reduced {
        format!(
            "PDF compressed successfully.\n  Original: {}\n  Result:   {}\n  Saved:    {:.1}%\n  Preset:   {}",
            format_mb(report.original_bytes),
            format_mb(report.compressed_bytes),
            report.reduction_percent(),
            report.preset
        )
    } else {
        format!(
            "Compression finished, but the size did not decrease; the original was kept.\n  Original: {}\n  Result:   {}\n  Preset:   {}",
            format_mb(report.original_bytes),
            format_mb(report.compressed_bytes),
            report.preset
        )
    }
}
