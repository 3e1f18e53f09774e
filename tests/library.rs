//! Integration tests for library (batch) conversion.
//!
//! The extraction engine is an in-process stub, so the tests exercise the
//! mirroring algorithm itself: destination validation, deterministic
//! traversal, relative-path rewriting, directory permission bits, and the
//! abort-on-first-failure contract.

use bookvoice::engine::ExtractionEngine;
use bookvoice::{convert_library, BookvoiceError, ConversionConfig, LibraryProgressCallback};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Writes "text of <stem>" for every PDF, recording the order of inputs.
#[derive(Default)]
struct StubExtractor {
    seen: Mutex<Vec<PathBuf>>,
}

impl ExtractionEngine for StubExtractor {
    fn extract_text(&self, input: &Path, output: &Path) -> Result<(), BookvoiceError> {
        self.seen.lock().unwrap().push(input.to_path_buf());
        let stem = input.file_stem().unwrap().to_string_lossy();
        std::fs::write(output, format!("text of {stem}")).unwrap();
        Ok(())
    }
}

/// Fails on a specific file name, succeeds on everything else.
struct PoisonedExtractor {
    poison: &'static str,
    calls: AtomicUsize,
}

impl ExtractionEngine for PoisonedExtractor {
    fn extract_text(&self, input: &Path, output: &Path) -> Result<(), BookvoiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if input.file_name().unwrap().to_string_lossy() == self.poison {
            return Err(BookvoiceError::ExtractionFailed {
                path: input.to_path_buf(),
                detail: "poisoned".into(),
            });
        }
        std::fs::write(output, "ok").unwrap();
        Ok(())
    }
}

fn config_with(extractor: Arc<dyn ExtractionEngine>) -> ConversionConfig {
    ConversionConfig::builder()
        .extractor(extractor)
        .build()
        .expect("valid config")
}

fn make_tree(root: &Path, files: &[&str]) {
    for f in files {
        let p = root.join(f);
        std::fs::create_dir_all(p.parent().unwrap()).unwrap();
        std::fs::write(&p, "%PDF fake").unwrap();
    }
}

#[test]
fn mirrors_the_tree_with_txt_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("books");
    let dest = dir.path().join("texts");
    make_tree(&source, &["a.pdf", "sub/b.pdf"]);

    let extractor = Arc::new(StubExtractor::default());
    let report = convert_library(&source, &dest, &config_with(extractor)).unwrap();

    assert_eq!(report.files_converted, 2);
    assert_eq!(
        std::fs::read_to_string(dest.join("a.txt")).unwrap(),
        "text of a"
    );
    assert_eq!(
        std::fs::read_to_string(dest.join("sub/b.txt")).unwrap(),
        "text of b"
    );
}

#[cfg(unix)]
#[test]
fn mirrored_directories_get_fixed_permission_bits() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("books");
    let dest = dir.path().join("texts");
    make_tree(&source, &["sub/deep/c.pdf"]);

    convert_library(&source, &dest, &config_with(Arc::new(StubExtractor::default()))).unwrap();

    for d in [dest.join("sub"), dest.join("sub/deep")] {
        let mode = std::fs::metadata(&d).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755, "{} has mode {mode:o}", d.display());
    }
}

#[test]
fn traversal_is_lexicographic() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("books");
    let dest = dir.path().join("texts");
    make_tree(&source, &["z.pdf", "a/n.pdf", "m.pdf"]);

    let extractor = Arc::new(StubExtractor::default());
    convert_library(&source, &dest, &config_with(Arc::clone(&extractor) as _)).unwrap();

    let seen: Vec<_> = extractor
        .seen
        .lock()
        .unwrap()
        .iter()
        .map(|p| p.strip_prefix(&source).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        seen,
        vec![
            PathBuf::from("a/n.pdf"),
            PathBuf::from("m.pdf"),
            PathBuf::from("z.pdf"),
        ]
    );
}

#[test]
fn existing_file_destination_aborts_before_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("books");
    make_tree(&source, &["a.pdf"]);
    let dest = dir.path().join("not-a-dir");
    std::fs::write(&dest, "regular file").unwrap();

    let extractor = Arc::new(StubExtractor::default());
    let err = convert_library(&source, &dest, &config_with(Arc::clone(&extractor) as _))
        .unwrap_err();

    assert!(matches!(err, BookvoiceError::DestinationNotADirectory { .. }));
    assert!(
        extractor.seen.lock().unwrap().is_empty(),
        "no file may be processed when the destination is invalid"
    );
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "regular file");
}

#[test]
fn existing_directory_destination_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("books");
    let dest = dir.path().join("texts");
    make_tree(&source, &["a.pdf"]);
    std::fs::create_dir_all(&dest).unwrap();

    let report =
        convert_library(&source, &dest, &config_with(Arc::new(StubExtractor::default()))).unwrap();
    assert_eq!(report.files_converted, 1);
}

#[test]
fn missing_source_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_library(
        &dir.path().join("nope"),
        &dir.path().join("out"),
        &ConversionConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, BookvoiceError::LibraryRootNotFound { .. }));
}

#[test]
fn first_failure_aborts_without_rolling_back() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("books");
    let dest = dir.path().join("texts");
    // Lexicographic order: a.pdf, b.pdf, c.pdf — poison the middle one.
    make_tree(&source, &["a.pdf", "b.pdf", "c.pdf"]);

    let extractor = Arc::new(PoisonedExtractor {
        poison: "b.pdf",
        calls: AtomicUsize::new(0),
    });
    let err = convert_library(&source, &dest, &config_with(Arc::clone(&extractor) as _))
        .unwrap_err();

    assert!(matches!(err, BookvoiceError::ExtractionFailed { .. }));
    assert_eq!(
        extractor.calls.load(Ordering::SeqCst),
        2,
        "c.pdf must not be attempted after b.pdf fails"
    );
    assert!(dest.join("a.txt").exists(), "prior outputs are kept");
    assert!(!dest.join("b.txt").exists());
    assert!(!dest.join("c.txt").exists());
}

#[test]
fn progress_callback_sees_every_file() {
    #[derive(Default)]
    struct Tracking {
        scanned: AtomicUsize,
        starts: AtomicUsize,
        completes: AtomicUsize,
    }
    impl LibraryProgressCallback for Tracking {
        fn on_scan_complete(&self, total_files: usize) {
            self.scanned.store(total_files, Ordering::SeqCst);
        }
        fn on_file_start(&self, _i: usize, _t: usize, _p: &Path) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }
        fn on_file_complete(&self, _i: usize, _t: usize, _c: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("books");
    let dest = dir.path().join("texts");
    make_tree(&source, &["a.pdf", "sub/b.pdf"]);

    let tracker = Arc::new(Tracking::default());
    let config = ConversionConfig::builder()
        .extractor(Arc::new(StubExtractor::default()))
        .progress(Arc::clone(&tracker) as _)
        .build()
        .unwrap();

    convert_library(&source, &dest, &config).unwrap();
    assert_eq!(tracker.scanned.load(Ordering::SeqCst), 2);
    assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
    assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
}

#[test]
fn empty_extraction_result_still_writes_the_file() {
    struct EmptyExtractor;
    impl ExtractionEngine for EmptyExtractor {
        fn extract_text(&self, _input: &Path, output: &Path) -> Result<(), BookvoiceError> {
            std::fs::write(output, "").unwrap();
            Ok(())
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("books");
    let dest = dir.path().join("texts");
    make_tree(&source, &["blank.pdf"]);

    let report =
        convert_library(&source, &dest, &config_with(Arc::new(EmptyExtractor))).unwrap();
    assert_eq!(report.files_converted, 1);
    assert_eq!(report.total_characters, 0);
    assert_eq!(std::fs::read_to_string(dest.join("blank.txt")).unwrap(), "");
}
