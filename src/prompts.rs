//! Line-oriented user prompts.
//!
//! [`Prompter`] wraps any `BufRead` + `Write` pair, so the interactive menu
//! runs against the real terminal and tests drive it with byte buffers.
//! Every prompt re-asks until the answer is valid. End of input surfaces as
//! an `UnexpectedEof` I/O error, which the menu treats as "quit".

use crate::config::{CompressionPreset, ImageFormat, MAX_DPI, MIN_DPI};
use crate::files;
use crate::naming::{has_forbidden_chars, FORBIDDEN_NAME_CHARS};
use crate::output::{format_kb, format_mb};
use crate::selection::parse_selection;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const YES_VALUES: &[&str] = &["y", "yes"];
const RULE: &str = "----------------------------------------";

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Prompt helper over an input and an output stream.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// The output stream, for printing between prompts.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the prompter, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `message`, read one line and return it trimmed.
    pub fn read_line(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        Ok(line.trim().to_string())
    }

    /// Yes/no question. With `default_yes`, an empty answer means yes.
    pub fn confirm(&mut self, message: &str, default_yes: bool) -> io::Result<bool> {
        let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
        let raw = self.read_line(&format!("{message} {hint}: "))?.to_lowercase();
        if raw.is_empty() {
            return Ok(default_yes);
        }
        Ok(YES_VALUES.contains(&raw.as_str()))
    }

    /// Integer in `min..=max`; an empty answer returns `default` when given.
    pub fn int(
        &mut self,
        message: &str,
        default: Option<i64>,
        min: Option<i64>,
        max: Option<i64>,
    ) -> io::Result<i64> {
        let default_str = default.map(|d| format!(" [{d}]")).unwrap_or_default();
        loop {
            let raw = self.read_line(&format!("{message}{default_str}: "))?;
            if raw.is_empty() {
                if let Some(d) = default {
                    return Ok(d);
                }
            }
            let value: i64 = match raw.parse() {
                Ok(v) => v,
                Err(_) => {
                    writeln!(self.output, "  Enter a whole number.")?;
                    continue;
                }
            };
            if let Some(lo) = min.filter(|lo| value < *lo) {
                writeln!(self.output, "  Value must be >= {lo}")?;
                continue;
            }
            if let Some(hi) = max.filter(|hi| value > *hi) {
                writeln!(self.output, "  Value must be <= {hi}")?;
                continue;
            }
            return Ok(value);
        }
    }

    /// One of `choices` (case-insensitive); an empty answer returns `default`.
    pub fn choice(
        &mut self,
        message: &str,
        choices: &[&str],
        default: Option<&str>,
    ) -> io::Result<String> {
        let choices_str = choices.join("/");
        let default_str = default.map(|d| format!(" [{d}]")).unwrap_or_default();
        loop {
            let raw = self
                .read_line(&format!("{message} ({choices_str}){default_str}: "))?
                .to_lowercase();
            if raw.is_empty() {
                if let Some(d) = default {
                    return Ok(d.to_string());
                }
            }
            if choices.contains(&raw.as_str()) {
                return Ok(raw);
            }
            writeln!(self.output, "  Choose one of: {choices_str}")?;
        }
    }

    /// Output file stem (without `.pdf`); rejects characters unsafe in file names.
    pub fn output_name(&mut self, default: &str) -> io::Result<String> {
        loop {
            let raw = self.read_line(&format!("  Output file name (without .pdf) [{default}]: "))?;
            if raw.is_empty() {
                return Ok(default.to_string());
            }
            if has_forbidden_chars(&raw) {
                writeln!(
                    self.output,
                    "  The name contains invalid characters ({FORBIDDEN_NAME_CHARS})."
                )?;
                continue;
            }
            return Ok(raw);
        }
    }
}

// ── Domain prompts ──────────────────────────────────────────────────────

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Pick one PDF out of `pdfs`. `None` means nothing to pick or cancelled.
    ///
    /// A single candidate is offered with a yes/no question; several are
    /// listed with sizes and picked by number, `0` cancelling.
    pub fn select_pdf(&mut self, pdfs: &[PathBuf], input_dir: &Path) -> io::Result<Option<PathBuf>> {
        match pdfs {
            [] => {
                writeln!(self.output, "\n  No PDF files in the input folder.")?;
                writeln!(self.output, "  Path: {}", input_dir.display())?;
                Ok(None)
            }
            [only] => {
                writeln!(self.output, "\n  Found one PDF: {}", display_name(only))?;
                if self.confirm("  Use it?", true)? {
                    Ok(Some(only.clone()))
                } else {
                    Ok(None)
                }
            }
            _ => {
                writeln!(self.output, "\n  PDF files found: {}", pdfs.len())?;
                writeln!(self.output, "  {RULE}")?;
                for (i, pdf) in pdfs.iter().enumerate() {
                    writeln!(
                        self.output,
                        "  {}) {} ({})",
                        i + 1,
                        display_name(pdf),
                        format_mb(files::file_size(pdf))
                    )?;
                }
                writeln!(self.output, "  {RULE}")?;
                writeln!(self.output, "  0) Cancel\n")?;

                let choice = self.int("  Pick a number", None, Some(0), Some(pdfs.len() as i64))?;
                if choice == 0 {
                    return Ok(None);
                }
                Ok(pdfs.get(choice as usize - 1).cloned())
            }
        }
    }

    /// Choose which images to merge and in what order.
    ///
    /// Enter or `*` takes every image as listed, `0` cancels (`None`), anything
    /// else is parsed as a selection and confirmed before it is returned.
    pub fn select_images(&mut self, images: &[PathBuf]) -> io::Result<Option<Vec<PathBuf>>> {
        if images.is_empty() {
            writeln!(self.output, "\n  No images in the input folder.")?;
            writeln!(self.output, "  Supported formats: {}", files::supported_image_formats())?;
            return Ok(None);
        }

        writeln!(self.output, "\n  Images found: {}", images.len())?;
        writeln!(self.output, "  {RULE}")?;
        for (i, image) in images.iter().enumerate() {
            writeln!(
                self.output,
                "  {:>3}) {} ({})",
                i + 1,
                display_name(image),
                format_kb(files::file_size(image))
            )?;
        }
        writeln!(self.output, "  {RULE}\n")?;
        writeln!(self.output, "  Input options:")?;
        writeln!(self.output, "    * (or Enter)  use every file in the listed order")?;
        writeln!(self.output, "    1 3 5         files 1, 3 and 5 in that order")?;
        writeln!(self.output, "    1-5           files 1 through 5")?;
        writeln!(self.output, "    1-3 7 9-11    ranges and single numbers combined")?;
        writeln!(self.output, "    0             cancel\n")?;

        loop {
            let raw = self.read_line("  File numbers: ")?;
            match raw.as_str() {
                "" | "*" => return Ok(Some(images.to_vec())),
                "0" => return Ok(None),
                _ => {}
            }

            let indices = match parse_selection(&raw, images.len()) {
                Ok(indices) => indices,
                Err(e) => {
                    writeln!(self.output, "  {e}")?;
                    continue;
                }
            };
            if indices.is_empty() {
                writeln!(self.output, "  No files selected.")?;
                continue;
            }

            let selected: Vec<PathBuf> = indices.iter().map(|&i| images[i].clone()).collect();
            writeln!(self.output, "\n  Files selected: {}", selected.len())?;
            writeln!(self.output, "  Page order:")?;
            for (i, path) in selected.iter().enumerate() {
                writeln!(self.output, "    {}. {}", i + 1, display_name(path))?;
            }
            if self.confirm("\n  Confirm?", true)? {
                return Ok(Some(selected));
            }
            writeln!(self.output)?;
        }
    }

    pub fn dpi(&mut self, default: u32) -> io::Result<u32> {
        let value = self.int(
            "  DPI (resolution)",
            Some(default as i64),
            Some(MIN_DPI as i64),
            Some(MAX_DPI as i64),
        )?;
        Ok(value as u32)
    }

    pub fn image_format(&mut self, default: ImageFormat) -> io::Result<ImageFormat> {
        let raw = self.choice("  Image format", &["png", "jpg"], Some(default.as_str()))?;
        Ok(raw.parse().unwrap_or(default))
    }

    /// Preset prompt, preceded by a one-line description of every preset.
    pub fn preset(&mut self, default: CompressionPreset) -> io::Result<CompressionPreset> {
        writeln!(self.output, "\n  Compression presets:")?;
        for preset in CompressionPreset::ALL {
            writeln!(self.output, "    {:<8} - {}", preset.as_str(), preset.description())?;
        }
        writeln!(self.output)?;

        let names: Vec<&str> = CompressionPreset::ALL.iter().map(|p| p.as_str()).collect();
        let raw = self.choice("  Preset", &names, Some(default.as_str()))?;
        Ok(raw.parse().unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn confirm_defaults_and_answers() {
        let mut p = prompter("\nn\nYES\nmaybe\n");
        assert!(p.confirm("Use it?", true).unwrap());
        assert!(!p.confirm("Use it?", true).unwrap());
        assert!(p.confirm("Use it?", false).unwrap());
        assert!(!p.confirm("Use it?", true).unwrap());
        assert!(printed(p).contains("Use it? [Y/n]: "));
    }

    #[test]
    fn int_retries_until_in_range() {
        let mut p = prompter("abc\n50\n900\n300\n");
        let v = p.int("DPI", Some(150), Some(72), Some(600)).unwrap();
        assert_eq!(v, 300);
        let out = printed(p);
        assert!(out.contains("Enter a whole number."));
        assert!(out.contains("Value must be >= 72"));
        assert!(out.contains("Value must be <= 600"));
    }

    #[test]
    fn int_uses_default_on_empty() {
        let mut p = prompter("\n");
        assert_eq!(p.int("DPI", Some(150), None, None).unwrap(), 150);
    }

    #[test]
    fn choice_is_case_insensitive() {
        let mut p = prompter("gif\nJPG\n\n");
        assert_eq!(p.choice("Format", &["png", "jpg"], Some("png")).unwrap(), "jpg");
        assert_eq!(p.choice("Format", &["png", "jpg"], Some("png")).unwrap(), "png");
        assert!(printed(p).contains("Choose one of: png/jpg"));
    }

    #[test]
    fn output_name_rejects_unsafe_chars() {
        let mut p = prompter("bad/name\nreport\n");
        assert_eq!(p.output_name("combined").unwrap(), "report");
        let mut p = prompter("\n");
        assert_eq!(p.output_name("combined").unwrap(), "combined");
    }

    #[test]
    fn eof_is_unexpected_eof() {
        let mut p = prompter("");
        let err = p.read_line("> ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
    fn touch_all(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = dir.join(name);
                std::fs::write(&path, b"x").unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn image_selection_all_cancel_and_ordered() {
        let tmp = tempfile::TempDir::new().unwrap();
        let images = touch_all(tmp.path(), &["a.png", "b.png", "c.png"]);

        let mut p = prompter("*\n");
        assert_eq!(p.select_images(&images).unwrap(), Some(images.clone()));

        let mut p = prompter("0\n");
        assert_eq!(p.select_images(&images).unwrap(), None);

        let mut p = prompter("7\n3-2\ny\n");
        let picked = p.select_images(&images).unwrap().unwrap();
        assert_eq!(picked, vec![images[2].clone(), images[1].clone()]);
        let out = printed(p);
        assert!(out.contains("Number 7 is out of range (1-3)."));
        assert!(out.contains("1. c.png"));
    }

    #[test]
    fn image_selection_reprompts_after_rejection() {
        let tmp = tempfile::TempDir::new().unwrap();
        let images = touch_all(tmp.path(), &["a.png", "b.png"]);
        let mut p = prompter("2\nn\n1\n\n");
        assert_eq!(p.select_images(&images).unwrap(), Some(vec![images[0].clone()]));
    }

    #[test]
    fn pdf_selection_single_and_multiple() {
        let tmp = tempfile::TempDir::new().unwrap();
        let one = touch_all(tmp.path(), &["only.pdf"]);
        let mut p = prompter("\n");
        assert_eq!(p.select_pdf(&one, tmp.path()).unwrap(), Some(one[0].clone()));

        let many = touch_all(tmp.path(), &["a.pdf", "b.pdf"]);
        let mut p = prompter("5\n2\n");
        assert_eq!(p.select_pdf(&many, tmp.path()).unwrap(), Some(many[1].clone()));

        let mut p = prompter("0\n");
        assert_eq!(p.select_pdf(&many, tmp.path()).unwrap(), None);

        let mut p = prompter("");
        assert_eq!(p.select_pdf(&[], tmp.path()).unwrap(), None);
        assert!(printed(p).contains("No PDF files"));
    }

    #[test]
    fn typed_option_prompts() {
        let mut p = prompter("\njpg\nscreen\n");
        assert_eq!(p.dpi(150).unwrap(), 150);
        assert_eq!(p.image_format(ImageFormat::Png).unwrap(), ImageFormat::Jpg);
        assert_eq!(
            p.preset(CompressionPreset::Ebook).unwrap(),
            CompressionPreset::Screen
        );
        assert!(printed(p).contains("prepress"));
    }
}
