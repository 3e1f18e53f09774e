//! File classification: extension + existence checks for pipeline inputs
//! and outputs.
//!
//! [`classify`] is deliberately a pure boolean predicate, not a
//! `Result`-returning validator. A mismatch is not an error at this layer —
//! the single-file pipeline asks "is this a PDF?" and "is this a TXT?" in
//! turn, and only when *both* answers are false does the caller raise
//! [`crate::error::BookvoiceError::UnsupportedInput`]. Keeping the predicate
//! side-effect-free also makes the overwrite check trivially testable.

use std::path::{Path, PathBuf};

/// The file kinds the pipeline knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A PDF document (`.pdf`).
    Pdf,
    /// A plain-text document (`.txt`).
    Text,
    /// Uncompressed audio (`.wav`) — the intermediate synthesis format.
    Wav,
    /// Compressed audio (`.mp3`) — the final artifact format.
    Mp3,
}

impl FileKind {
    /// Lower-case extension for this kind, without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Text => "txt",
            FileKind::Wav => "wav",
            FileKind::Mp3 => "mp3",
        }
    }
}

/// Whether [`classify`] should also check on-disk existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistencePolicy {
    /// The path must name an existing regular file (inputs).
    MustExist,
    /// The path must not exist yet (outputs without an overwrite flag).
    MustNotExist,
    /// Existence is irrelevant; only the extension is checked.
    Ignore,
}

/// Check whether `path` has the extension of `kind` (case-insensitive) and
/// satisfies `policy`.
///
/// Never errors and never touches anything but file metadata. Returns
/// `false` for any mismatch; callers decide whether that is fatal.
pub fn classify(path: &Path, kind: FileKind, policy: ExistencePolicy) -> bool {
    let ext_matches = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(kind.extension()))
        .unwrap_or(false);

    if !ext_matches {
        return false;
    }

    match policy {
        ExistencePolicy::MustExist => path.is_file(),
        ExistencePolicy::MustNotExist => !path.exists(),
        ExistencePolicy::Ignore => true,
    }
}

/// Default output path for an input document: same stem, `.mp3` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("mp3")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_extension_is_false_regardless_of_existence() {
        // None of these paths exist, and none of them are PDFs either —
        // classify must be false under every policy.
        let path = Path::new("notes.docx");
        for policy in [
            ExistencePolicy::MustExist,
            ExistencePolicy::MustNotExist,
            ExistencePolicy::Ignore,
        ] {
            assert!(!classify(path, FileKind::Pdf, policy));
        }
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(classify(
            Path::new("BOOK.PDF"),
            FileKind::Pdf,
            ExistencePolicy::Ignore
        ));
        assert!(classify(
            Path::new("book.Mp3"),
            FileKind::Mp3,
            ExistencePolicy::Ignore
        ));
    }

    #[test]
    fn no_extension_is_never_classified() {
        assert!(!classify(
            Path::new("Makefile"),
            FileKind::Text,
            ExistencePolicy::Ignore
        ));
    }

    #[test]
    fn must_exist_rejects_missing_file() {
        assert!(!classify(
            Path::new("/definitely/not/here.pdf"),
            FileKind::Pdf,
            ExistencePolicy::MustExist
        ));
    }

    #[test]
    fn must_not_exist_accepts_missing_and_rejects_present() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("new.mp3");
        assert!(classify(&missing, FileKind::Mp3, ExistencePolicy::MustNotExist));

        let present = dir.path().join("old.mp3");
        std::fs::write(&present, b"x").unwrap();
        assert!(!classify(&present, FileKind::Mp3, ExistencePolicy::MustNotExist));
        assert!(classify(&present, FileKind::Mp3, ExistencePolicy::Ignore));
        assert!(classify(&present, FileKind::Mp3, ExistencePolicy::MustExist));
    }

    #[test]
    fn default_output_swaps_extension_for_mp3() {
        assert_eq!(
            default_output_path(Path::new("shelf/Babel.pdf")),
            PathBuf::from("shelf/Babel.mp3")
        );
        assert_eq!(
            default_output_path(Path::new("notes.txt")),
            PathBuf::from("notes.mp3")
        );
    }
}
