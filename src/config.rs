//! Configuration types shared by all pipelines.
//!
//! [`ToolsConfig`] holds the two working directories plus the defaults each
//! pipeline falls back to when a request leaves an option unset. It is built
//! via [`ToolsConfigBuilder`], which clamps numeric knobs and validates the
//! directory layout in [`ToolsConfigBuilder::build`].

use crate::error::PdfToolsError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Image file extensions accepted as merge input (lower-case, with dot).
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpeg", ".jpg", ".png", ".tif", ".tiff", ".webp"];

/// Extension of PDF input files.
pub const PDF_EXTENSION: &str = ".pdf";

/// Lowest rendering DPI accepted by the extract pipeline.
pub const MIN_DPI: u32 = 72;

/// Highest rendering DPI accepted by the extract pipeline.
pub const MAX_DPI: u32 = 600;

/// Configuration for pdftools operations.
///
/// # Example
/// ```rust
/// use pdftools::{CompressionPreset, ToolsConfig};
///
/// let config = ToolsConfig::builder()
///     .input_dir("scans")
///     .output_dir("out")
///     .preset(CompressionPreset::Screen)
///     .build()
///     .unwrap();
/// assert_eq!(config.dpi, 150);
/// ```
#[derive(Clone)]
pub struct ToolsConfig {
    /// Directory the menu lists images and PDFs from. Default: `./input`.
    pub input_dir: PathBuf,

    /// Directory all results are written to. Default: `./output`.
    pub output_dir: PathBuf,

    /// Explicit Ghostscript binary. When `None`, PATH is searched.
    pub ghostscript: Option<PathBuf>,

    /// Rendering DPI for page extraction. Range: 72–600. Default: 150.
    pub dpi: u32,

    /// Image format written by page extraction. Default: PNG.
    pub image_format: ImageFormat,

    /// Ghostscript quality preset for compression. Default: ebook.
    pub preset: CompressionPreset,

    /// JPEG quality used when extracting to JPG. Range: 1–100. Default: 95.
    pub jpeg_quality: u8,

    /// Resolution at which merged images are laid out. Default: 100.
    ///
    /// A 1000 px wide image becomes a 10 inch wide page.
    pub merge_dpi: u32,

    /// Per-item progress events for merge and extract.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            ghostscript: None,
            dpi: 150,
            image_format: ImageFormat::default(),
            preset: CompressionPreset::default(),
            jpeg_quality: 95,
            merge_dpi: 100,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ToolsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolsConfig")
            .field("input_dir", &self.input_dir)
            .field("output_dir", &self.output_dir)
            .field("ghostscript", &self.ghostscript)
            .field("dpi", &self.dpi)
            .field("image_format", &self.image_format)
            .field("preset", &self.preset)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("merge_dpi", &self.merge_dpi)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn OperationProgressCallback>"),
            )
            .finish()
    }
}

impl ToolsConfig {
    /// Create a new builder for `ToolsConfig`.
    pub fn builder() -> ToolsConfigBuilder {
        ToolsConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ToolsConfig`].
#[derive(Debug)]
pub struct ToolsConfigBuilder {
    config: ToolsConfig,
}

impl ToolsConfigBuilder {
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn ghostscript(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ghostscript = Some(path.into());
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(MIN_DPI, MAX_DPI);
        self
    }

    pub fn image_format(mut self, format: ImageFormat) -> Self {
        self.config.image_format = format;
        self
    }

    pub fn preset(mut self, preset: CompressionPreset) -> Self {
        self.config.preset = preset;
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn merge_dpi(mut self, dpi: u32) -> Self {
        self.config.merge_dpi = dpi.max(1);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ToolsConfig, PdfToolsError> {
        let c = &self.config;
        if c.dpi < MIN_DPI || c.dpi > MAX_DPI {
            return Err(PdfToolsError::InvalidConfig(format!(
                "DPI must be {MIN_DPI}–{MAX_DPI}, got {}",
                c.dpi
            )));
        }
        if c.input_dir.as_os_str().is_empty() || c.output_dir.as_os_str().is_empty() {
            return Err(PdfToolsError::InvalidConfig(
                "input and output directories must not be empty".into(),
            ));
        }
        if c.input_dir == c.output_dir {
            return Err(PdfToolsError::InvalidConfig(format!(
                "input and output directories must differ (both are '{}')",
                c.input_dir.display()
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Image format produced by page extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossless; the default.
    #[default]
    Png,
    /// Lossy, written at [`ToolsConfig::jpeg_quality`].
    Jpg,
}

impl ImageFormat {
    /// File extension including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => ".png",
            ImageFormat::Jpg => ".jpg",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = PdfToolsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            other => Err(PdfToolsError::InvalidConfig(format!(
                "unknown image format '{other}' (expected png or jpg)"
            ))),
        }
    }
}

/// Ghostscript `PDFSETTINGS` profile, from smallest output to highest quality.
///
/// | Preset | Image resolution | Use |
/// |--------|------------------|-----|
/// | `screen`   | 72 dpi  | on-screen viewing, smallest file |
/// | `ebook`    | 150 dpi | reading (default) |
/// | `printer`  | 300 dpi | printing |
/// | `prepress` | 300 dpi | highest quality, least compression |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionPreset {
    Screen,
    #[default]
    Ebook,
    Printer,
    Prepress,
}

impl CompressionPreset {
    /// All presets in menu order.
    pub const ALL: [CompressionPreset; 4] = [
        CompressionPreset::Screen,
        CompressionPreset::Ebook,
        CompressionPreset::Printer,
        CompressionPreset::Prepress,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CompressionPreset::Screen => "screen",
            CompressionPreset::Ebook => "ebook",
            CompressionPreset::Printer => "printer",
            CompressionPreset::Prepress => "prepress",
        }
    }

    /// One-line description shown next to the preset in the menu.
    pub fn description(self) -> &'static str {
        match self {
            CompressionPreset::Screen => "low quality (72 dpi), smallest size",
            CompressionPreset::Ebook => "medium quality (150 dpi), for reading",
            CompressionPreset::Printer => "high quality (300 dpi), for printing",
            CompressionPreset::Prepress => "maximum quality, least compression",
        }
    }
}

impl fmt::Display for CompressionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompressionPreset {
    type Err = PdfToolsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        CompressionPreset::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                PdfToolsError::InvalidConfig(format!(
                    "unknown preset '{s}' (expected screen, ebook, printer or prepress)"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ToolsConfig::default();
        assert_eq!(c.input_dir, PathBuf::from("input"));
        assert_eq!(c.output_dir, PathBuf::from("output"));
        assert_eq!(c.dpi, 150);
        assert_eq!(c.image_format, ImageFormat::Png);
        assert_eq!(c.preset, CompressionPreset::Ebook);
        assert_eq!(c.jpeg_quality, 95);
        assert_eq!(c.merge_dpi, 100);
    }

    #[test]
    fn builder_clamps_dpi() {
        let c = ToolsConfig::builder().dpi(10).build().unwrap();
        assert_eq!(c.dpi, MIN_DPI);
        let c = ToolsConfig::builder().dpi(5000).build().unwrap();
        assert_eq!(c.dpi, MAX_DPI);
    }

    #[test]
    fn builder_rejects_same_dirs() {
        let err = ToolsConfig::builder()
            .input_dir("work")
            .output_dir("work")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("must differ"), "got: {err}");
    }

    #[test]
    fn preset_round_trips_through_str() {
        for p in CompressionPreset::ALL {
            assert_eq!(p.as_str().parse::<CompressionPreset>().unwrap(), p);
        }
        assert!("extreme".parse::<CompressionPreset>().is_err());
    }

    #[test]
    fn image_format_accepts_jpeg_alias() {
        assert_eq!("JPEG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpg);
        assert_eq!(ImageFormat::Jpg.extension(), ".jpg");
        assert!("gif".parse::<ImageFormat>().is_err());
    }
}
