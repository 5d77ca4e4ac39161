//! Error types for the pdftools library.
//!
//! Every pipeline returns `Result<_, PdfToolsError>`. Each variant maps to one
//! failure category a user can act on (missing file, missing tool, tool
//! failure, unwritable output), and its `Display` text is the message shown
//! in the menu or on stderr. Nothing is retried: the user fixes the condition
//! and runs the operation again.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdftools library.
#[derive(Debug, Error)]
pub enum PdfToolsError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input directory holds nothing the operation can use.
    #[error("No {kind} found in '{dir}'.\n{hint}")]
    NoFiles {
        kind: &'static str,
        dir: PathBuf,
        hint: String,
    },

    /// An image could not be opened or decoded.
    #[error("Cannot read image '{path}': {detail}")]
    ImageDecode { path: PathBuf, detail: String },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("Cannot open PDF '{path}': {detail}\nThe file may be damaged.")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password.
    #[error("PDF '{path}' is encrypted and requires a password.")]
    PasswordRequired { path: PathBuf },

    /// The document parsed but has no pages.
    #[error("PDF '{path}' has no pages")]
    EmptyPdf { path: PathBuf },

    /// pdfium-render returned an error for a specific page.
    #[error("Rendering failed for page {page}: {detail}")]
    RenderFailed { page: usize, detail: String },

    /// Could not bind to a pdfium library.
    #[error(
        "PDF rendering engine unavailable: {0}\n\n\
Page extraction needs the PDFium shared library. You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium (or pdfium.dll).\n\
  • Place the library next to the pdftools binary or in the working directory.\n\
  • Install it system-wide. Builds: https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    EngineUnavailable(String),

    // ── External tool errors ──────────────────────────────────────────────
    /// The external renderer could not be located or launched.
    #[error("{tool} not found.\n{hint}")]
    ToolNotFound { tool: &'static str, hint: String },

    /// The external renderer exited with a nonzero status.
    #[error("{tool} failed (exit code {}):\n{stderr}", code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    ToolFailed {
        tool: &'static str,
        code: Option<i32>,
        stderr: String,
    },

    /// The external renderer reported success but wrote nothing.
    #[error("{tool} did not produce an output file.\nThe input PDF may be damaged or protected.")]
    NoOutputProduced { tool: &'static str },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The output directory is missing and could not be created.
    #[error("Output directory '{path}' is unavailable: {source}")]
    OutputDirUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}\nMake sure it is not open in another program.")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PdfToolsError {
    /// `true` when the failure is the missing external renderer, which the
    /// menu reports with installation hints rather than as an operation error.
    pub fn is_tool_not_found(&self) -> bool {
        matches!(self, PdfToolsError::ToolNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failed_display_with_code() {
        let e = PdfToolsError::ToolFailed {
            tool: "Ghostscript",
            code: Some(1),
            stderr: "Unrecoverable error".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("exit code 1"), "got: {msg}");
        assert!(msg.contains("Unrecoverable error"), "got: {msg}");
    }

    #[test]
    fn tool_failed_display_without_code() {
        let e = PdfToolsError::ToolFailed {
            tool: "Ghostscript",
            code: None,
            stderr: "killed".into(),
        };
        assert!(e.to_string().contains("exit code unknown"));
    }

    #[test]
    fn tool_not_found_is_flagged() {
        let e = PdfToolsError::ToolNotFound {
            tool: "Ghostscript",
            hint: "install it".into(),
        };
        assert!(e.is_tool_not_found());
        assert!(e.to_string().starts_with("Ghostscript not found."));
        assert!(!PdfToolsError::Internal("x".into()).is_tool_not_found());
    }

    #[test]
    fn no_files_display() {
        let e = PdfToolsError::NoFiles {
            kind: "images",
            dir: PathBuf::from("input"),
            hint: "Supported formats: PNG".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("No images found in 'input'"), "got: {msg}");
        assert!(msg.contains("PNG"));
    }
}
