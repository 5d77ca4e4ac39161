//! Ghostscript discovery and invocation.
//!
//! Ghostscript is the external renderer behind the compress pipeline. It is
//! looked up on `PATH` under its platform-specific names (or taken from an
//! explicit override), then run once with a fixed `pdfwrite` argument
//! template. The call blocks until the process exits; its stderr is captured
//! and surfaced verbatim on failure.

use crate::config::{CompressionPreset, ToolsConfig};
use crate::error::PdfToolsError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Display name used in errors and status lines.
pub const TOOL_NAME: &str = "Ghostscript";

/// Binary names tried in order: Unix first, then the Windows console builds.
pub const GS_BINARIES: &[&str] = &["gs", "gswin64c", "gswin32c"];

/// Installation instructions appended to [`PdfToolsError::ToolNotFound`].
pub fn install_hint() -> String {
    "Ghostscript was not found in PATH.\n\
To install it:\n\
  Windows: download from https://ghostscript.com/releases/gsdnld.html\n\
           and add the folder containing gswin64c.exe to PATH.\n\
  Linux:   sudo apt install ghostscript\n\
  macOS:   brew install ghostscript\n\
\n\
Check with 'gs --version' or 'gswin64c --version' in a terminal."
        .to_string()
}

fn tool_not_found() -> PdfToolsError {
    PdfToolsError::ToolNotFound {
        tool: TOOL_NAME,
        hint: install_hint(),
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Search `dirs` for the first Ghostscript binary, trying every name in
/// [`GS_BINARIES`] in each directory before moving to the next name.
pub fn find_in_dirs<I>(dirs: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    let dirs: Vec<PathBuf> = dirs.into_iter().collect();
    for name in GS_BINARIES {
        let file_name = format!("{name}{}", std::env::consts::EXE_SUFFIX);
        for dir in &dirs {
            let candidate = dir.join(&file_name);
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Find Ghostscript on the process `PATH`.
pub fn find_ghostscript() -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    find_in_dirs(std::env::split_paths(&path))
}

/// Resolve the binary to run: the configured override if set, else `PATH`.
pub fn locate(config: &ToolsConfig) -> Result<PathBuf, PdfToolsError> {
    match &config.ghostscript {
        Some(path) if path.is_file() => Ok(path.clone()),
        Some(path) => {
            debug!("Configured Ghostscript '{}' does not exist", path.display());
            Err(tool_not_found())
        }
        None => find_ghostscript().ok_or_else(tool_not_found),
    }
}

/// `true` if [`locate`] would succeed.
pub fn is_available(config: &ToolsConfig) -> bool {
    locate(config).is_ok()
}

/// The fixed `pdfwrite` argument list (without the binary itself).
pub fn compress_args(input: &Path, output: &Path, preset: CompressionPreset) -> Vec<OsString> {
    let mut output_arg = OsString::from("-sOutputFile=");
    output_arg.push(output);

    vec![
        "-sDEVICE=pdfwrite".into(),
        "-dCompatibilityLevel=1.4".into(),
        format!("-dPDFSETTINGS=/{}", preset.as_str()).into(),
        "-dNOPAUSE".into(),
        "-dBATCH".into(),
        "-dQUIET".into(),
        output_arg,
        input.as_os_str().to_os_string(),
    ]
}

/// Run Ghostscript once, writing a recompressed copy of `input` to `output`.
///
/// Blocks until the process exits. A nonzero exit becomes
/// [`PdfToolsError::ToolFailed`] carrying stderr (or stdout when stderr is
/// empty); a launch failure with `NotFound` becomes
/// [`PdfToolsError::ToolNotFound`].
pub fn run_compress(
    gs: &Path,
    input: &Path,
    output: &Path,
    preset: CompressionPreset,
) -> Result<(), PdfToolsError> {
    let args = compress_args(input, output, preset);
    debug!("Running {} {:?}", gs.display(), args);

    let result = Command::new(gs).args(&args).output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            tool_not_found()
        } else {
            PdfToolsError::Internal(format!("failed to launch {}: {e}", gs.display()))
        }
    })?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let stdout = String::from_utf8_lossy(&result.stdout);
        let detail = [stderr.trim(), stdout.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or("unknown error")
            .to_string();
        return Err(PdfToolsError::ToolFailed {
            tool: TOOL_NAME,
            code: result.status.code(),
            stderr: detail,
        });
    }

    info!("Ghostscript finished: {}", output.display());
    Ok(())
}
