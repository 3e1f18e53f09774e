//! PDF text extraction through a temporary intermediate file.
//!
//! ## Why a temp file at all?
//!
//! The extraction call contract is file-to-file: the engine writes the full
//! text to a path we name and signals silent failure by not writing it.
//! Allocating that path inside a `TempDir` means deletion is bound to the
//! scope's exit — the read can fail, the engine can fail, the process can
//! panic, and the intermediate file still never outlives this function.

use crate::classify::{classify, ExistencePolicy, FileKind};
use crate::engine::ExtractionEngine;
use crate::error::BookvoiceError;
use std::path::Path;
use tempfile::TempDir;
use tracing::{debug, info};

/// The full text of one source document. Never partially populated:
/// extraction either yields the whole content or fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// Entire extracted text.
    pub content: String,
    /// Character count, recorded for observability.
    pub chars: usize,
}

impl ExtractedText {
    pub fn new(content: String) -> Self {
        let chars = content.chars().count();
        Self { content, chars }
    }
}

/// Extract the full text of `pdf` via the given engine.
///
/// # Errors
/// - [`BookvoiceError::InputNotFound`] / [`BookvoiceError::UnsupportedInput`]
///   when `pdf` is not an existing `.pdf` file (checked before the engine runs)
/// - [`BookvoiceError::ExtractionOutputMissing`] when the engine returned
///   without writing its output file
/// - any error the engine itself reported, unchanged
pub fn extract(engine: &dyn ExtractionEngine, pdf: &Path) -> Result<ExtractedText, BookvoiceError> {
    if !classify(pdf, FileKind::Pdf, ExistencePolicy::MustExist) {
        return Err(if pdf.is_file() {
            BookvoiceError::UnsupportedInput {
                path: pdf.to_path_buf(),
            }
        } else {
            BookvoiceError::InputNotFound {
                path: pdf.to_path_buf(),
            }
        });
    }

    // The TempDir owns the intermediate file; dropping it at any return
    // below (or during unwind) removes it.
    let temp_dir = TempDir::new().map_err(|e| BookvoiceError::Internal(e.to_string()))?;
    let text_path = temp_dir.path().join("extracted.txt");

    debug!("extracting text to {}", text_path.display());
    engine.extract_text(pdf, &text_path)?;

    if !text_path.is_file() {
        return Err(BookvoiceError::ExtractionOutputMissing { path: text_path });
    }

    let content = std::fs::read_to_string(&text_path).map_err(|e| BookvoiceError::ReadFailed {
        path: text_path.clone(),
        source: e,
    })?;

    let extracted = ExtractedText::new(content);
    info!("text extracted: {} characters", extracted.chars);
    Ok(extracted)
}
