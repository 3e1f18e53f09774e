//! # bookvoice
//!
//! Convert PDF and plain-text documents into MP3 audiobooks, and
//! batch-convert a PDF library into a mirrored tree of text files.
//!
//! ## Pipeline Overview
//!
//! ```text
//! document (.pdf | .txt)
//!  │
//!  ├─ 1. Classify   extension + existence validation, overwrite check
//!  ├─ 2. Extract    PDF → text via an extraction engine (pdftotext)
//!  ├─ 3. Synthesize text → temporary WAV via a speech engine (espeak-ng)
//!  └─ 4. Encode     WAV → .mp3 via an encoding engine (lame / ffmpeg)
//! ```
//!
//! Everything is synchronous and single-threaded: each engine call blocks
//! until it finishes, stages run strictly in order, and batch conversion
//! processes one file at a time. Temporary files are owned by the step that
//! creates them and are deleted on every exit path.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bookvoice::{convert, ConversionConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let report = convert(Path::new("Babel.pdf"), None, &config)?;
//!     println!("wrote {} ({} chars)", report.output.display(), report.characters);
//!     Ok(())
//! }
//! ```
//!
//! ## External engines
//!
//! The extraction, synthesis, and encoding engines are out-of-process
//! collaborators reached through the traits in [`engine`]. The defaults
//! drive `pdftotext`, `espeak-ng` (or `espeak`), and `lame` (or `ffmpeg`);
//! any of them can be replaced through
//! [`ConversionConfig::builder`](config::ConversionConfig::builder).
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `bookvoice` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! bookvoice = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod classify;
pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod library;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use classify::{classify, default_output_path, ExistencePolicy, FileKind};
pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, ConversionReport, ConversionStage};
pub use error::BookvoiceError;
pub use library::{convert_library, LibraryReport};
pub use pipeline::{extract, synthesize, ExtractedText};
pub use progress::{LibraryProgressCallback, NoopProgressCallback, ProgressCallback};
