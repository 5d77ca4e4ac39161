//! The three document pipelines, plus structural inspection.
//!
//! Each pipeline is one straight, blocking run from input path(s) to output
//! path(s). They share nothing but [`crate::config::ToolsConfig`].
//!
//! ```text
//! merge    images ──▶ printpdf ──▶ <output>/<name>.pdf
//! extract  PDF    ──▶ pdfium   ──▶ <output>/<stem>/page_NNN.png
//! compress PDF    ──▶ gs       ──▶ <output>/<stem>_compressed_<preset>.pdf
//! inspect  PDF    ──▶ lopdf    ──▶ DocumentInfo
//! ```
//!
//! 1. [`merge`]    — decode images and lay one out per page
//! 2. [`extract`]  — rasterise every page; needs the PDFium library
//! 3. [`compress`] — run Ghostscript; the only stage with a subprocess
//! 4. [`inspect`]  — page count and version without rendering

pub mod compress;
pub mod extract;
pub mod inspect;
pub mod merge;
