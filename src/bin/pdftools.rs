//! CLI binary for pdftools.
//!
//! Without a subcommand it starts the interactive menu. The subcommands run
//! one pipeline non-interactively, for scripts.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use pdftools::selection::parse_selection;
use pdftools::{
    compress_pdf, engine, extract_pages, files, ghostscript, inspect, merge_images,
    run_menu_loop, CompressRequest, CompressionPreset, ExtractRequest, ImageFormat, MergeRequest,
    OperationProgressCallback, OperationResult, ProgressCallback, ToolsConfig,
};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress bar for merge and extract. The bar is hidden until the
/// pipeline reports how many items it will process.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            bar: ProgressBar::hidden(),
        })
    }
}

impl OperationProgressCallback for CliProgressCallback {
    fn on_operation_start(&self, label: &str, total_items: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len}  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        self.bar.set_length(total_items as u64);
        self.bar.set_position(0);
        self.bar.set_style(style);
        self.bar.set_prefix(label.to_string());
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_item_complete(&self, index: usize, total: usize, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}",
            green("✓"),
            index,
            total,
            dim(&name)
        ));
        self.bar.inc(1);
    }

    fn on_operation_complete(&self, _total_items: usize) {
        self.bar.finish_and_clear();
    }

    fn on_operation_failed(&self, _completed_items: usize) {
        self.bar.abandon();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Interactive menu (default)
  pdftools

  # Merge every image in ./input into ./output/combined.pdf
  pdftools merge

  # Merge images 3, 1 and 5 to 8, in that order, as album.pdf
  pdftools merge --name album --select "3 1 5-8"

  # Extract pages as 300 DPI JPEGs into ./output/report/
  pdftools extract input/report.pdf --dpi 300 --format jpg

  # Compress for printing
  pdftools compress input/report.pdf --preset printer

  # Page count and version, as JSON
  pdftools --json inspect input/report.pdf

REQUIREMENTS:
  extract   PDFium shared library (PDFIUM_LIB_PATH, next to the binary, or system-wide)
            https://github.com/bblanchon/pdfium-binaries/releases
  compress  Ghostscript on PATH (gs, gswin64c or gswin32c), or --ghostscript PATH

ENVIRONMENT VARIABLES:
  PDFTOOLS_INPUT_DIR     Input folder (default: input)
  PDFTOOLS_OUTPUT_DIR    Output folder (default: output)
  PDFTOOLS_GHOSTSCRIPT   Ghostscript binary to use instead of searching PATH
  PDFIUM_LIB_PATH        Path to libpdfium / pdfium.dll
  RUST_LOG               Log filter; overrides -v / -q
"#;

/// Merge images into PDF, extract PDF pages as images, compress PDFs.
#[derive(Parser, Debug)]
#[command(
    name = "pdftools",
    version,
    about = "Merge images into PDF, extract PDF pages as images, compress PDFs",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Folder the menu and `merge` read from.
    #[arg(long, global = true, env = "PDFTOOLS_INPUT_DIR", default_value = "input")]
    input_dir: PathBuf,

    /// Folder all results are written to.
    #[arg(long, global = true, env = "PDFTOOLS_OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Ghostscript binary to use instead of searching PATH.
    #[arg(long, global = true, env = "PDFTOOLS_GHOSTSCRIPT")]
    ghostscript: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "PDFTOOLS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and result paths.
    #[arg(short, long, global = true, env = "PDFTOOLS_QUIET")]
    quiet: bool,

    /// Print results as JSON.
    #[arg(long, global = true, env = "PDFTOOLS_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, global = true, env = "PDFTOOLS_NO_PROGRESS")]
    no_progress: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive menu (default when no command is given).
    Menu,

    /// Merge images into one PDF, one page per image.
    Merge {
        /// Output file name without `.pdf`.
        #[arg(long, default_value = "combined")]
        name: String,

        /// Pick and order images by number, e.g. "1 3 5", "1-5", "5-1", "1-3 7 9-11".
        #[arg(long)]
        select: Option<String>,

        /// Images to merge, in page order. Default: every image in the input folder.
        images: Vec<PathBuf>,
    },

    /// Extract every page of a PDF as an image.
    Extract {
        pdf: PathBuf,

        /// Rendering DPI (72–600).
        #[arg(long, value_parser = clap::value_parser!(u32).range(72..=600))]
        dpi: Option<u32>,

        /// Image format.
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Compress a PDF with Ghostscript.
    Compress {
        pdf: PathBuf,

        /// Quality preset.
        #[arg(long, value_enum)]
        preset: Option<PresetArg>,
    },

    /// Print page count, PDF version and size.
    Inspect { pdf: PathBuf },

    /// Show which external tools are available and what the input folder holds.
    Status,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Png,
    #[value(alias = "jpeg")]
    Jpg,
}

impl From<FormatArg> for ImageFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Jpg => ImageFormat::Jpg,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PresetArg {
    Screen,
    Ebook,
    Printer,
    Prepress,
}

impl From<PresetArg> for CompressionPreset {
    fn from(v: PresetArg) -> Self {
        match v {
            PresetArg::Screen => CompressionPreset::Screen,
            PresetArg::Ebook => CompressionPreset::Ebook,
            PresetArg::Printer => CompressionPreset::Printer,
            PresetArg::Prepress => CompressionPreset::Prepress,
        }
    }
}

/// `status` output.
#[derive(Serialize)]
struct StatusReport {
    ghostscript: Option<PathBuf>,
    pdfium: bool,
    input_dir: PathBuf,
    output_dir: PathBuf,
    images: usize,
    pdfs: usize,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Command::Menu);

    // ── Logging setup ────────────────────────────────────────────────────
    // While a bar is drawn only errors are logged, so log lines don't tear it.
    let interactive = matches!(command, Command::Menu);
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !interactive;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn OperationProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    match command {
        Command::Menu => {
            let stdin = io::stdin();
            run_menu_loop(&config, stdin.lock(), io::stdout().lock())
                .context("Console I/O failed")?;
        }
        Command::Merge {
            name,
            select,
            images,
        } => {
            let images = if images.is_empty() {
                files::list_images(&config.input_dir)
            } else {
                images
            };
            let images = match select {
                Some(raw) => apply_selection(&images, &raw)?,
                None => images,
            };
            let result = merge_images(&MergeRequest::with_images(name, images), &config)
                .context("Merge failed")?;
            print_result(&cli, &result)?;
        }
        Command::Extract { pdf, dpi, format } => {
            let request = ExtractRequest {
                source: pdf,
                dpi,
                format: format.map(Into::into),
            };
            let result = extract_pages(&request, &config).context("Extraction failed")?;
            print_result(&cli, &result)?;
        }
        Command::Compress { pdf, preset } => {
            let mut request = CompressRequest::new(pdf);
            if let Some(p) = preset {
                request = request.with_preset(p.into());
            }
            let result = compress_pdf(&request, &config).context("Compression failed")?;
            print_result(&cli, &result)?;
        }
        Command::Inspect { pdf } => {
            let info = inspect(&pdf).context("Failed to inspect PDF")?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&info).context("Failed to serialise metadata")?
                );
            } else {
                println!("File:         {}", info.path.display());
                println!("Pages:        {}", info.page_count);
                println!("PDF Version:  {}", info.pdf_version);
                println!("Size:         {}", pdftools::output::format_mb(info.size_bytes));
            }
        }
        Command::Status => print_status(&cli, &config)?,
    }

    Ok(())
}

/// Map CLI args to `ToolsConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ToolsConfig> {
    let mut builder = ToolsConfig::builder()
        .input_dir(&cli.input_dir)
        .output_dir(&cli.output_dir);
    if let Some(ref gs) = cli.ghostscript {
        builder = builder.ghostscript(gs);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }
    builder.build().context("Invalid configuration")
}

/// Reorder/filter `images` by a user selection string.
fn apply_selection(images: &[PathBuf], raw: &str) -> Result<Vec<PathBuf>> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "*" {
        return Ok(images.to_vec());
    }
    let indices = parse_selection(raw, images.len())
        .with_context(|| format!("Invalid selection '{raw}'"))?;
    if indices.is_empty() {
        bail!("The selection '{raw}' picks no images");
    }
    Ok(indices.into_iter().map(|i| images[i].clone()).collect())
}

fn print_result(cli: &Cli, result: &OperationResult) -> Result<()> {
    if cli.json {
        let json = serde_json::to_string_pretty(result).context("Failed to serialise result")?;
        println!("{json}");
    } else if cli.quiet {
        println!("{}", result.output_path.display());
    } else {
        let mut lines = result.message.lines();
        if let Some(first) = lines.next() {
            eprintln!("{} {}", green("✔"), bold(first));
        }
        for line in lines {
            eprintln!("{}", dim(line));
        }
        println!("   →  {}", bold(&result.output_path.display().to_string()));
    }
    Ok(())
}

fn print_status(cli: &Cli, config: &ToolsConfig) -> Result<()> {
    let summary = files::summarize(&config.input_dir);
    let report = StatusReport {
        ghostscript: ghostscript::locate(config).ok(),
        pdfium: engine::is_available(),
        input_dir: config.input_dir.clone(),
        output_dir: config.output_dir.clone(),
        images: summary.images,
        pdfs: summary.pdfs,
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise status")?
        );
        return Ok(());
    }

    let mark = |ok: bool| if ok { green("✓") } else { red("✗") };
    println!("{}", bold("System status"));
    match &report.ghostscript {
        Some(path) => println!("  {} Ghostscript    {}", mark(true), dim(&path.display().to_string())),
        None => println!("  {} Ghostscript    {}", mark(false), dim("not found (compress unavailable)")),
    }
    if report.pdfium {
        println!("  {} PDFium", mark(true));
    } else {
        println!("  {} PDFium         {}", mark(false), dim("not found (extract unavailable)"));
    }
    println!(
        "  {} Input folder   {}",
        mark(report.input_dir.is_dir()),
        report.input_dir.display()
    );
    println!(
        "  {} Output folder  {}",
        mark(report.output_dir.is_dir()),
        report.output_dir.display()
    );
    println!("  {} {} images, {} PDFs in input", cyan("◆"), report.images, report.pdfs);
    Ok(())
}
