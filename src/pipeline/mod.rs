//! The two real pipeline steps: text extraction and speech synthesis.
//!
//! Each step owns exactly one temporary resource (a text file, a WAV file),
//! allocated inside a [`tempfile::TempDir`] whose drop deletes it on every
//! exit path — success, error, or panic. Ownership never escapes the step.

pub mod extract;
pub mod synthesize;

pub use extract::{extract, ExtractedText};
pub use synthesize::synthesize;
