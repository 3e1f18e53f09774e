//! Batch conversion: mirror a PDF library into a tree of text files.
//!
//! Walks the source tree, extracts every PDF, and writes each result to the
//! same relative path under the destination root with the extension
//! rewritten to `.txt`, creating directories as needed. The walk is
//! deterministic (lexicographic by path) so two runs over the same tree
//! produce identical traversal order. The first per-file failure aborts the
//! remaining traversal; files already written stay on disk.

use crate::classify::{classify, ExistencePolicy, FileKind};
use crate::config::ConversionConfig;
use crate::convert::resolve_extractor;
use crate::error::BookvoiceError;
use crate::pipeline::extract;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Permission bits for directories created while mirroring: `rwxr-xr-x`.
#[cfg(unix)]
const MIRROR_DIR_MODE: u32 = 0o755;

/// Summary of one completed library conversion.
#[derive(Debug, Clone)]
pub struct LibraryReport {
    /// PDFs found and converted.
    pub files_converted: usize,
    /// Total characters extracted across all files.
    pub total_characters: usize,
}

/// Convert every PDF under `source` into a `.txt` file under `dest`.
///
/// `dest` may be missing (it is created) or an existing directory; an
/// existing non-directory is rejected before any traversal begins.
///
/// # Errors
/// - [`BookvoiceError::LibraryRootNotFound`] when `source` is not a directory
/// - [`BookvoiceError::DestinationNotADirectory`] when `dest` exists and is
///   a regular file
/// - the first extraction or write failure, which aborts the run without
///   rolling back already-written outputs
pub fn convert_library(
    source: &Path,
    dest: &Path,
    config: &ConversionConfig,
) -> Result<LibraryReport, BookvoiceError> {
    if !source.is_dir() {
        return Err(BookvoiceError::LibraryRootNotFound {
            path: source.to_path_buf(),
        });
    }
    if dest.exists() && !dest.is_dir() {
        return Err(BookvoiceError::DestinationNotADirectory {
            path: dest.to_path_buf(),
        });
    }

    let pdfs = find_pdfs(source)?;
    info!(
        "library scan: {} PDFs under {}",
        pdfs.len(),
        source.display()
    );
    if let Some(ref cb) = config.progress {
        cb.on_scan_complete(pdfs.len());
    }

    let extractor = resolve_extractor(config);
    let total = pdfs.len();
    let mut total_characters = 0;

    for (i, pdf) in pdfs.iter().enumerate() {
        if let Some(ref cb) = config.progress {
            cb.on_file_start(i + 1, total, pdf);
        }

        // source is a prefix of every enumerated path by construction
        let relative = pdf
            .strip_prefix(source)
            .map_err(|e| BookvoiceError::Internal(e.to_string()))?;
        let target = dest.join(relative).with_extension("txt");
        debug!("{} -> {}", pdf.display(), target.display());

        if let Some(parent) = target.parent() {
            create_mirror_dirs(parent)?;
        }

        let text = extract(extractor.as_ref(), pdf)?;
        if text.chars == 0 {
            warn!("'{}' extracted to empty text", pdf.display());
        }
        std::fs::write(&target, &text.content).map_err(|e| BookvoiceError::OutputWriteFailed {
            path: target.clone(),
            source: e,
        })?;
        total_characters += text.chars;

        if let Some(ref cb) = config.progress {
            cb.on_file_complete(i + 1, total, text.chars);
        }
    }

    info!(
        "library conversion complete: {} files, {} characters",
        total, total_characters
    );
    Ok(LibraryReport {
        files_converted: total,
        total_characters,
    })
}

/// Every `.pdf` under `root`, lexicographic by full path.
fn find_pdfs(root: &Path) -> Result<Vec<PathBuf>, BookvoiceError> {
    let mut found = Vec::new();
    walk(root, &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), BookvoiceError> {
    let entries = std::fs::read_dir(dir).map_err(|e| BookvoiceError::ReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;
    // Sort each level so traversal order never depends on readdir order.
    let mut entries: Vec<_> = entries
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| BookvoiceError::ReadFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, found)?;
        } else if classify(&path, FileKind::Pdf, ExistencePolicy::MustExist) {
            found.push(path);
        }
    }
    Ok(())
}

/// `create_dir_all` with the fixed mirroring permission bits on Unix.
fn create_mirror_dirs(dir: &Path) -> Result<(), BookvoiceError> {
    let wrap = |e: std::io::Error| BookvoiceError::OutputWriteFailed {
        path: dir.to_path_buf(),
        source: e,
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        std::fs::DirBuilder::new()
            .recursive(true)
            .mode(MIRROR_DIR_MODE)
            .create(dir)
            .map_err(wrap)
    }
    #[cfg(not(unix))]
    {
        std::fs::create_dir_all(dir).map_err(wrap)
    }
}
