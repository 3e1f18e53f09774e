//! Progress-callback trait for per-file library-conversion events.
//!
//! Inject an [`Arc<dyn LibraryProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress`] to receive events as
//! the library converter processes each PDF.
//!
//! The callback approach keeps the library ignorant of how the host
//! application reports progress — the bundled CLI renders these events with
//! an `indicatif` bar, a GUI could post them to a channel, and tests count
//! them with atomics. The trait is `Send + Sync` so a callback can be shared
//! with whatever the host is doing on other threads, even though the
//! converter itself calls it strictly sequentially.

use std::path::Path;
use std::sync::Arc;

/// Called by the library converter as it mirrors a PDF tree.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. There is no per-file error event: the first failure
/// aborts the whole run and surfaces as the converter's return value.
pub trait LibraryProgressCallback: Send + Sync {
    /// Called once after the source tree has been enumerated.
    ///
    /// # Arguments
    /// * `total_files` — number of PDFs that will be converted
    fn on_scan_complete(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a PDF's extraction starts.
    ///
    /// # Arguments
    /// * `index`  — 1-indexed position in the run
    /// * `total`  — total PDFs in the run
    /// * `source` — the PDF being converted
    fn on_file_start(&self, index: usize, total: usize, source: &Path) {
        let _ = (index, total, source);
    }

    /// Called when a PDF's text has been written to the destination tree.
    ///
    /// # Arguments
    /// * `index` — 1-indexed position in the run
    /// * `total` — total PDFs in the run
    /// * `chars` — character count of the extracted text
    fn on_file_complete(&self, index: usize, total: usize, chars: usize) {
        let _ = (index, total, chars);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl LibraryProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn LibraryProgressCallback>;
