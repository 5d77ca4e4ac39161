//! Result types returned by the pipelines.
//!
//! All of them are `Serialize` so the CLI can print them with `--json`.

use crate::config::CompressionPreset;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which pipeline produced an [`OperationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Merge,
    Extract,
    Compress,
}

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    pub kind: OperationKind,
    /// Human-readable summary, printed by the menu.
    pub message: String,
    /// The written PDF (merge, compress) or the page directory (extract).
    pub output_path: PathBuf,
    /// Images merged, pages extracted, or 1 for compression.
    pub files_count: usize,
    /// Size figures, present for compression only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<CompressionReport>,
}

/// Before/after sizes of a compression run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionReport {
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub preset: CompressionPreset,
    /// `false` when Ghostscript could not shrink the file and the input was kept as-is.
    pub reduced: bool,
}

impl CompressionReport {
    /// Space saved as a percentage of the original size.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        let saved = self.original_bytes.saturating_sub(self.compressed_bytes);
        saved as f64 * 100.0 / self.original_bytes as f64
    }
}

/// Structural facts about a PDF, read without rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub path: PathBuf,
    pub page_count: usize,
    /// Header version, e.g. `"1.4"`.
    pub pdf_version: String,
    pub size_bytes: u64,
}

/// Image and PDF counts of the input directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSummary {
    pub images: usize,
    pub pdfs: usize,
}

/// Format a byte count as mebibytes with two decimals, e.g. `"1.50 MB"`.
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Format a byte count as kibibytes with one decimal, e.g. `"12.5 KB"`.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduction_percent() {
        let r = CompressionReport {
            original_bytes: 1000,
            compressed_bytes: 250,
            preset: CompressionPreset::Ebook,
            reduced: true,
        };
        assert!((r.reduction_percent() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reduction_percent_handles_empty_and_growth() {
        let empty = CompressionReport {
            original_bytes: 0,
            compressed_bytes: 0,
            preset: CompressionPreset::Screen,
            reduced: false,
        };
        assert_eq!(empty.reduction_percent(), 0.0);

        let grown = CompressionReport {
            original_bytes: 100,
            compressed_bytes: 100,
            preset: CompressionPreset::Screen,
            reduced: false,
        };
        assert_eq!(grown.reduction_percent(), 0.0);
    }

    #[test]
    fn size_formatting() {
        assert_eq!(format_mb(1024 * 1024 * 3 / 2), "1.50 MB");
        assert_eq!(format_kb(12 * 1024 + 512), "12.5 KB");
    }

    #[test]
    fn result_serialises_without_empty_compression() {
        let r = OperationResult {
            kind: OperationKind::Merge,
            message: "ok".into(),
            output_path: PathBuf::from("output/combined.pdf"),
            files_count: 3,
            compression: None,
        };
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"kind\":\"merge\""), "got: {json}");
        assert!(!json.contains("compression"));
    }
}
