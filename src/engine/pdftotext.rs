//! Default extraction engine: the `pdftotext` binary from poppler-utils.
//!
//! `pdftotext <input> <output>` matches the extraction call contract
//! exactly: full text goes to the output file, and some builds signal
//! failure only by writing nothing. We additionally surface a non-zero exit
//! status with captured stderr, which gives far better diagnostics than the
//! absence check alone.

use crate::engine::ExtractionEngine;
use crate::error::BookvoiceError;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Drives `pdftotext` as the extraction engine.
#[derive(Debug, Clone, Default)]
pub struct PdftotextEngine;

impl PdftotextEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ExtractionEngine for PdftotextEngine {
    fn extract_text(&self, input: &Path, output: &Path) -> Result<(), BookvoiceError> {
        debug!("pdftotext: {} -> {}", input.display(), output.display());

        let result = Command::new("pdftotext")
            .arg("-enc")
            .arg("UTF-8")
            .arg(input)
            .arg(output)
            .output()
            .map_err(|e| BookvoiceError::ExtractionFailed {
                path: input.to_path_buf(),
                detail: format!("failed to run pdftotext (is poppler-utils installed?): {e}"),
            })?;

        if !result.status.success() {
            return Err(BookvoiceError::ExtractionFailed {
                path: input.to_path_buf(),
                detail: format!(
                    "pdftotext exited with {}: {}",
                    result.status,
                    String::from_utf8_lossy(&result.stderr).trim()
                ),
            });
        }

        Ok(())
    }
}
