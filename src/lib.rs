//! # pdftools
//!
//! Three everyday PDF chores behind one small tool:
//!
//! - **merge** a folder of images into a single PDF, one page per image;
//! - **extract** every page of a PDF as a numbered PNG or JPEG;
//! - **compress** a PDF with Ghostscript's `pdfwrite` device.
//!
//! Each operation is one blocking, linear pipeline from input files to output
//! files. Nothing runs concurrently, nothing is cached, nothing is retried.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input/                              output/
//!  ├─ *.png *.jpg … ─ merge ────────▶ combined.pdf
//!  ├─ report.pdf ──── extract ──────▶ report/page_001.png …
//!  └─ report.pdf ──── compress (gs) ▶ report_compressed_ebook.pdf
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdftools::{compress_pdf, merge_images, CompressRequest, MergeRequest, ToolsConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ToolsConfig::builder()
//!         .input_dir("scans")
//!         .output_dir("out")
//!         .build()?;
//!
//!     let merged = merge_images(&MergeRequest::default(), &config)?;
//!     println!("{}", merged.message);
//!
//!     let compressed = compress_pdf(&CompressRequest::new(&merged.output_path), &config)?;
//!     println!("{}", compressed.message);
//!     Ok(())
//! }
//! ```
//!
//! ## External requirements
//!
//! | Operation | Needs |
//! |-----------|-------|
//! | merge     | nothing beyond this crate |
//! | extract   | the PDFium shared library (`PDFIUM_LIB_PATH` or system install) |
//! | compress  | Ghostscript on `PATH` (`gs`, `gswin64c` or `gswin32c`) |
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdftools` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod engine;
pub mod error;
pub mod files;
pub mod ghostscript;
pub mod menu;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod selection;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{CompressionPreset, ImageFormat, ToolsConfig, ToolsConfigBuilder};
pub use error::PdfToolsError;
pub use menu::run_menu_loop;
pub use output::{CompressionReport, DocumentInfo, InputSummary, OperationKind, OperationResult};
pub use pipeline::compress::{compress_pdf, CompressRequest};
pub use pipeline::extract::{extract_pages, ExtractRequest};
pub use pipeline::inspect::inspect;
pub use pipeline::merge::{merge_images, MergeRequest};
pub use progress::{NoopProgressCallback, OperationProgressCallback, ProgressCallback};
