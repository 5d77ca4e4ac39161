//! Interactive numbered menu over the three pipelines.
//!
//! The loop is generic over its input and output streams; the binary passes
//! locked stdin/stdout, tests pass byte buffers. A pipeline error is printed
//! with an `[ERROR]` marker and the menu is shown again. End of input exits
//! like option 4.

use crate::config::ToolsConfig;
use crate::error::PdfToolsError;
use crate::files;
use crate::ghostscript;
use crate::output::OperationResult;
use crate::pipeline::compress::{compress_pdf, CompressRequest};
use crate::pipeline::extract::{extract_pages, ExtractRequest};
use crate::pipeline::merge::{merge_images, MergeRequest, DEFAULT_OUTPUT_NAME};
use crate::prompts::Prompter;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::debug;

const HEADER: &str = "\
╔══════════════════════════════════════════╗
║               PDF TOOLS                  ║
╚══════════════════════════════════════════╝";

const OPTIONS: &str = "
  1) Merge images into PDF
  2) Extract PDF pages as images
  3) Compress PDF (Ghostscript)
  4) Exit
";

const SEPARATOR_WIDTH: usize = 44;

/// What the user picked at the main prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Merge,
    Extract,
    Compress,
    Exit,
}

impl MenuChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::Merge),
            "2" => Some(Self::Extract),
            "3" => Some(Self::Compress),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Run the menu until the user exits or input ends.
///
/// Only console I/O failures are returned; pipeline errors are shown and the
/// loop continues.
pub fn run_menu_loop<R: BufRead, W: Write>(
    config: &ToolsConfig,
    input: R,
    output: W,
) -> io::Result<()> {
    let mut menu = Menu {
        prompter: Prompter::new(input, output),
        config,
    };
    match menu.run() {
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            writeln!(menu.prompter.out(), "\n\n  Goodbye!")?;
            Ok(())
        }
        other => other,
    }
}

struct Menu<'a, R, W> {
    prompter: Prompter<R, W>,
    config: &'a ToolsConfig,
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    fn run(&mut self) -> io::Result<()> {
        if let Err(e) = files::ensure_dirs(self.config) {
            self.error(&e.to_string())?;
        }
        self.show_status()?;

        loop {
            writeln!(self.out(), "{}", "─".repeat(SEPARATOR_WIDTH))?;
            writeln!(self.out(), "{OPTIONS}")?;

            let raw = self.prompter.read_line("  Choose an action: ")?;
            match MenuChoice::parse(&raw) {
                Some(MenuChoice::Merge) => self.handle_merge()?,
                Some(MenuChoice::Extract) => self.handle_extract()?,
                Some(MenuChoice::Compress) => self.handle_compress()?,
                Some(MenuChoice::Exit) => {
                    writeln!(self.out(), "\n  Goodbye!")?;
                    return Ok(());
                }
                None => {
                    debug!("Rejected menu input {:?}", raw);
                    writeln!(self.out(), "\n  Invalid choice. Enter a number from 1 to 4.")?;
                }
            }
            writeln!(self.out())?;
        }
    }

    fn out(&mut self) -> &mut W {
        self.prompter.out()
    }

    fn status(&mut self, label: &str, value: &str, ok: bool) -> io::Result<()> {
        let mark = if ok { "[+]" } else { "[-]" };
        writeln!(self.out(), "  {mark} {label}: {value}")
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out(), "  [ERROR] {message}")
    }

    fn show_status(&mut self) -> io::Result<()> {
        let config = self.config;
        writeln!(self.out(), "\n{HEADER}\n")?;
        writeln!(self.out(), "System status:")?;

        match ghostscript::locate(config) {
            Ok(path) => self.status("Ghostscript", &format!("found ({})", path.display()), true)?,
            Err(_) => self.status("Ghostscript", "not found", false)?,
        }
        self.dir_status("Input folder", &config.input_dir)?;
        self.dir_status("Output folder", &config.output_dir)?;

        let summary = files::summarize(&config.input_dir);
        self.status("Images in input", &summary.images.to_string(), summary.images > 0)?;
        self.status("PDF files in input", &summary.pdfs.to_string(), summary.pdfs > 0)?;
        writeln!(self.out())
    }

    fn dir_status(&mut self, label: &str, dir: &Path) -> io::Result<()> {
        self.status(label, &dir.display().to_string(), dir.is_dir())
    }

    fn report(&mut self, outcome: Result<OperationResult, PdfToolsError>, what: &str) -> io::Result<()> {
        writeln!(self.out())?;
        match outcome {
            Ok(result) => {
                writeln!(self.out(), "  [OK] {}", result.message)?;
                writeln!(self.out(), "  {what}: {}", result.output_path.display())
            }
            Err(e) => self.error(&e.to_string()),
        }
    }

    fn cancelled(&mut self) -> io::Result<()> {
        writeln!(self.out(), "\n  Operation cancelled.")
    }

    fn handle_merge(&mut self) -> io::Result<()> {
        writeln!(self.out(), "\n=== Merge images into PDF ===")?;

        let images = files::list_images(&self.config.input_dir);
        let Some(selected) = self.prompter.select_images(&images)? else {
            return self.cancelled();
        };
        writeln!(self.out())?;
        let name = self.prompter.output_name(DEFAULT_OUTPUT_NAME)?;

        writeln!(self.out(), "\n  Working...")?;
        let outcome = merge_images(&MergeRequest::with_images(name, selected), self.config);
        self.report(outcome, "File")
    }

    fn handle_extract(&mut self) -> io::Result<()> {
        writeln!(self.out(), "\n=== Extract PDF pages as images ===")?;

        let pdfs = files::list_pdfs(&self.config.input_dir);
        let Some(source) = self.prompter.select_pdf(&pdfs, &self.config.input_dir)? else {
            return self.cancelled();
        };
        writeln!(self.out(), "\n  Selected: {}", display_name(&source))?;

        let dpi = self.prompter.dpi(self.config.dpi)?;
        let format = self.prompter.image_format(self.config.image_format)?;

        writeln!(self.out(), "\n  Working...")?;
        let request = ExtractRequest {
            source,
            dpi: Some(dpi),
            format: Some(format),
        };
        let outcome = extract_pages(&request, self.config);
        self.report(outcome, "Folder")
    }

    fn handle_compress(&mut self) -> io::Result<()> {
        writeln!(self.out(), "\n=== Compress PDF (Ghostscript) ===")?;

        if let Err(e) = ghostscript::locate(self.config) {
            writeln!(self.out())?;
            return self.error(&e.to_string());
        }

        let pdfs = files::list_pdfs(&self.config.input_dir);
        let Some(source) = self.prompter.select_pdf(&pdfs, &self.config.input_dir)? else {
            return self.cancelled();
        };
        writeln!(self.out(), "\n  Selected: {}", display_name(&source))?;

        let preset = self.prompter.preset(self.config.preset)?;

        writeln!(self.out(), "\n  Compressing... (this may take a while)")?;
        let outcome = compress_pdf(&CompressRequest::new(source).with_preset(preset), self.config);
        self.report(outcome, "File")
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run(config: &ToolsConfig, input: &str) -> String {
        let mut out = Vec::new();
        run_menu_loop(config, Cursor::new(input.as_bytes().to_vec()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn config_in(tmp: &TempDir) -> ToolsConfig {
        ToolsConfig::builder()
            .input_dir(tmp.path().join("input"))
            .output_dir(tmp.path().join("output"))
            .ghostscript(tmp.path().join("no-such-gs"))
            .build()
            .unwrap()
    }

    #[test]
    fn choice_parsing() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::Merge));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("5"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn startup_creates_dirs_and_shows_status() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(&tmp);
        let out = run(&config, "4\n");

        assert!(config.input_dir.is_dir());
        assert!(config.output_dir.is_dir());
        assert!(out.contains("[-] Ghostscript: not found"));
        assert!(out.contains("[-] Images in input: 0"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn invalid_choice_then_eof_exits() {
        let tmp = TempDir::new().unwrap();
        let out = run(&config_in(&tmp), "9\n");
        assert!(out.contains("Invalid choice"));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn compress_without_ghostscript_reports_error() {
        let tmp = TempDir::new().unwrap();
        let out = run(&config_in(&tmp), "3\n4\n");
        assert!(out.contains("[ERROR] Ghostscript not found"), "got: {out}");
    }

    #[test]
    fn merge_with_empty_input_is_cancelled() {
        let tmp = TempDir::new().unwrap();
        let out = run(&config_in(&tmp), "1\n4\n");
        assert!(out.contains("No images in the input folder."));
        assert!(out.contains("Operation cancelled."));
    }
}
