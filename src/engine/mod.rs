//! External-engine seams: extraction, speech synthesis, and audio encoding.
//!
//! The conversion core treats all three engines as opaque collaborators and
//! talks to them only through these traits. Callers can inject their own
//! implementations via [`crate::config::ConversionConfigBuilder`] — tests do
//! exactly that with in-memory stubs — while the default implementations
//! drive well-known command-line tools:
//!
//! | Concern    | Trait                | Default driver              |
//! |------------|----------------------|-----------------------------|
//! | Extraction | [`ExtractionEngine`] | `pdftotext`                 |
//! | Synthesis  | [`SpeechEngine`]     | `espeak-ng` (or `espeak`)   |
//! | Encoding   | [`EncodingEngine`]   | `lame` (or `ffmpeg`)        |

pub mod espeak;
pub mod lame;
pub mod pdftotext;

pub use espeak::EspeakEngine;
pub use lame::LameEncoder;
pub use pdftotext::PdftotextEngine;

use crate::error::BookvoiceError;
use std::path::Path;

/// Extracts the full text of a PDF document into a file.
///
/// The engine writes everything it extracted to `output`. Engines that fail
/// silently (exit cleanly without producing output) are tolerated here — the
/// caller detects that case by the absence of `output` after the call.
pub trait ExtractionEngine: Send + Sync {
    fn extract_text(&self, input: &Path, output: &Path) -> Result<(), BookvoiceError>;
}

/// Renders text to uncompressed audio, bound to one output WAV file.
///
/// An engine is a factory for [`SpeechSession`]s; each session owns exactly
/// one WAV file for its lifetime.
pub trait SpeechEngine: Send + Sync {
    /// Open a session bound to `wav_path`. The file is created (or
    /// finalized) by the session, not by the caller.
    fn open(&self, wav_path: &Path) -> Result<Box<dyn SpeechSession>, BookvoiceError>;
}

/// A scoped speech-rendering session.
///
/// `say` may be called any number of times; each call appends to the bound
/// WAV. Nothing is guaranteed to be on disk until [`SpeechSession::finish`]
/// returns. Dropping an unfinished session discards the session without
/// leaving the engine running.
pub trait SpeechSession {
    /// Render `text` and append it to the bound WAV file.
    fn say(&mut self, text: &str) -> Result<(), BookvoiceError>;

    /// Finalize and close the bound WAV file.
    fn finish(self: Box<Self>) -> Result<(), BookvoiceError>;
}

/// Transcodes an uncompressed WAV file into a compressed output file.
///
/// The target format is inferred from the output path's extension.
pub trait EncodingEngine: Send + Sync {
    fn export(&self, wav: &Path, output: &Path) -> Result<(), BookvoiceError>;
}
