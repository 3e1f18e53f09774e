//! CLI binary for bookvoice.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and prints results. The two subcommands replace the
//! original tool's module dispatcher with an explicit command registry.

use anyhow::{Context, Result};
use bookvoice::{
    convert, convert_library, ConversionConfig, LibraryProgressCallback, ProgressCallback,
};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress for library conversion: one bar, one line per file.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} files  ⏱ {elapsed_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.set_prefix("Converting");
        Arc::new(Self { bar })
    }
}

impl LibraryProgressCallback for CliProgressCallback {
    fn on_scan_complete(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
        self.bar
            .println(format!("Found {} PDFs", bold(&total_files.to_string())));
    }

    fn on_file_start(&self, _index: usize, _total: usize, source: &Path) {
        self.bar.set_message(source.display().to_string());
    }

    fn on_file_complete(&self, index: usize, total: usize, chars: usize) {
        self.bar.println(format!(
            "  {} File {:>3}/{:<3}  {}",
            green("✓"),
            index,
            total,
            dim(&format!("{chars:>7} chars")),
        ));
        self.bar.inc(1);
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # PDF to audiobook next to the input (Babel.pdf -> Babel.mp3)
  bookvoice convert Babel.pdf

  # Explicit output, overwrite if present, British voice at 96 kbit/s
  bookvoice convert notes.txt notes.mp3 --force --voice en-gb --bitrate 96

  # Mirror a PDF library into a text tree
  bookvoice library ~/books -o ~/books-txt

REQUIRED TOOLS:
  pdftotext              (poppler-utils) — PDF text extraction
  espeak-ng or espeak    speech synthesis
  lame or ffmpeg         MP3 encoding
"#;

/// Convert PDF and text documents into MP3 audiobooks.
#[derive(Parser, Debug)]
#[command(
    name = "bookvoice",
    version,
    about = "Convert PDF and text documents into MP3 audiobooks",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "BOOKVOICE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "BOOKVOICE_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one PDF or TXT document into an MP3 audiobook.
    Convert {
        /// Input document (.pdf or .txt, must exist).
        input: PathBuf,

        /// Output MP3 path. Defaults to the input stem with `.mp3`.
        output: Option<PathBuf>,

        /// Overwrite the output file if it already exists.
        #[arg(short, long)]
        force: bool,

        /// Speech-engine voice (e.g. en-us, en-gb, de).
        #[arg(long, env = "BOOKVOICE_VOICE")]
        voice: Option<String>,

        /// Speaking rate in words per minute.
        #[arg(long, env = "BOOKVOICE_RATE")]
        rate: Option<u32>,

        /// MP3 bitrate in kbit/s (8–320).
        #[arg(long, env = "BOOKVOICE_BITRATE", default_value_t = 128)]
        bitrate: u32,
    },

    /// Mirror a PDF library into a tree of extracted text files.
    Library {
        /// Source directory containing PDFs (must exist).
        library: PathBuf,

        /// Destination directory for the mirrored `.txt` tree.
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Convert {
            input,
            output,
            force,
            voice,
            rate,
            bitrate,
        } => run_convert(input, output, force, voice, rate, bitrate, cli.quiet),
        Command::Library { library, output } => run_library(library, output, cli.quiet),
    }
}

fn run_convert(
    input: PathBuf,
    output: Option<PathBuf>,
    force: bool,
    voice: Option<String>,
    rate: Option<u32>,
    bitrate: u32,
    quiet: bool,
) -> Result<()> {
    let mut builder = ConversionConfig::builder()
        .allow_overwrite(force)
        .bitrate_kbps(bitrate);
    if let Some(v) = voice {
        builder = builder.voice(v);
    }
    if let Some(r) = rate {
        builder = builder.rate_wpm(r);
    }
    let config = builder.build().context("Invalid configuration")?;

    let report = convert(&input, output.as_deref(), &config).context("Conversion failed")?;

    if !quiet {
        eprintln!(
            "{}  {}  {}  {}",
            green("✔"),
            bold(&report.output.display().to_string()),
            dim(&format!("{} chars", report.characters)),
            dim(&format!("{}ms", report.total_duration_ms)),
        );
    }
    Ok(())
}

fn run_library(library: PathBuf, output: PathBuf, quiet: bool) -> Result<()> {
    // Resolve the source strictly (it must exist) and the destination to an
    // absolute path without requiring it to exist yet.
    let source = library
        .canonicalize()
        .with_context(|| format!("Library root not found: {}", library.display()))?;
    let dest = std::path::absolute(&output)
        .with_context(|| format!("Cannot resolve destination: {}", output.display()))?;

    let mut config = ConversionConfig::default();
    let progress = if quiet {
        None
    } else {
        Some(CliProgressCallback::new())
    };
    if let Some(ref cb) = progress {
        config.progress = Some(Arc::clone(cb) as ProgressCallback);
    }

    let report = convert_library(&source, &dest, &config).context("Library conversion failed")?;

    if let Some(cb) = progress {
        cb.bar.finish_and_clear();
    }
    if !quiet {
        eprintln!(
            "{} {} files converted  {}  →  {}",
            green("✔"),
            bold(&report.files_converted.to_string()),
            dim(&format!("{} chars", report.total_characters)),
            bold(&dest.display().to_string()),
        );
    }
    Ok(())
}
