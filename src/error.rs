//! Error types for the bookvoice library.
//!
//! Every failure is fatal to the job that raised it — there is no retry
//! layer and no partial-success accounting. The enum therefore splits along
//! *when* a failure can be detected rather than severity:
//!
//! * Validation variants (wrong extension, missing input, disallowed
//!   overwrite, bad destination) are raised before any external engine is
//!   invoked, so a doomed job never does any synthesis work.
//! * Engine variants ([`BookvoiceError::ExtractionFailed`],
//!   [`BookvoiceError::SynthesisFailed`], [`BookvoiceError::EncodingFailed`])
//!   carry the external engine's own diagnostics unchanged. The pipeline
//!   never swallows an engine error; it only holds control long enough to
//!   delete its own temporary files, then propagates.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the bookvoice library.
#[derive(Debug, Error)]
pub enum BookvoiceError {
    // ── Validation errors ─────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// The input exists but is neither a PDF nor a plain-text file.
    #[error("Unsupported input '{path}': expected a .pdf or .txt file")]
    UnsupportedInput { path: PathBuf },

    /// The requested output path does not end in `.mp3`.
    #[error("Output path '{path}' is not an MP3 path (must end in .mp3)")]
    NotAnMp3Path { path: PathBuf },

    /// The output file already exists and overwriting was not permitted.
    #[error("Output file already exists: '{path}'\nPass --force to overwrite it.")]
    OutputExists { path: PathBuf },

    /// Library destination root exists but is not a directory.
    #[error("Destination '{path}' exists and is not a directory")]
    DestinationNotADirectory { path: PathBuf },

    /// Library source root does not exist or is not a directory.
    #[error("Library root not found or not a directory: '{path}'")]
    LibraryRootNotFound { path: PathBuf },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The extraction engine returned without writing its output file.
    ///
    /// Some engines exit successfully and signal failure only by not
    /// producing output, so the expected path is all we can report.
    #[error("Expected extracted text at '{path}', but the extraction engine wrote nothing")]
    ExtractionOutputMissing { path: PathBuf },

    /// The extraction engine reported a failure of its own.
    #[error("Text extraction failed for '{path}': {detail}")]
    ExtractionFailed { path: PathBuf, detail: String },

    // ── Synthesis / encoding errors ───────────────────────────────────────
    /// The speech engine failed while rendering text to audio.
    #[error("Speech synthesis failed: {detail}")]
    SynthesisFailed { detail: String },

    /// The audio encoder failed while transcoding WAV to the output format.
    #[error("Audio encoding failed: {detail}")]
    EncodingFailed { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not read a file the pipeline needs (input text, extracted text).
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write a destination file or directory.
    #[error("Failed to write output '{path}': {source}")]
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
    /// Unexpected internal error (temp directory creation and the like).
    #[error("Internal error: {0}")]
    Internal(String),
}
