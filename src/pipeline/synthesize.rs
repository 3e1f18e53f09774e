//! Speech synthesis and MP3 encoding, composed into one step.
//!
//! The step owns a single temporary WAV inside a `TempDir`. The speech
//! session is scoped: `open` binds it to the WAV path, `finish` finalizes
//! the file, and the encoder then exports the compressed artifact. Whatever
//! happens after `open` — a failing `say`, a failing export, a panic — the
//! WAV is removed when the `TempDir` drops.

use crate::classify::{classify, ExistencePolicy, FileKind};
use crate::engine::{EncodingEngine, SpeechEngine};
use crate::error::BookvoiceError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// Render `text` as speech and encode it to `output`.
///
/// The output path is validated before any synthesis work begins: it must
/// end in `.mp3`, and unless `allow_overwrite` is set it must not already
/// exist. Returns the output path only on full success.
///
/// # Errors
/// - [`BookvoiceError::NotAnMp3Path`] / [`BookvoiceError::OutputExists`]
///   for an invalid destination (fail fast, nothing rendered)
/// - any speech-engine or encoder error, unchanged
pub fn synthesize(
    speech: &dyn SpeechEngine,
    encoder: &dyn EncodingEngine,
    text: &str,
    output: &Path,
    allow_overwrite: bool,
) -> Result<PathBuf, BookvoiceError> {
    let policy = if allow_overwrite {
        ExistencePolicy::Ignore
    } else {
        ExistencePolicy::MustNotExist
    };
    if !classify(output, FileKind::Mp3, policy) {
        // Distinguish the two mismatch causes for the error message.
        return Err(
            if classify(output, FileKind::Mp3, ExistencePolicy::Ignore) {
                BookvoiceError::OutputExists {
                    path: output.to_path_buf(),
                }
            } else {
                BookvoiceError::NotAnMp3Path {
                    path: output.to_path_buf(),
                }
            },
        );
    }

    if text.is_empty() {
        warn!("synthesizing empty text; the resulting audiobook will be silent");
    }

    // WAV lives in the TempDir; dropped (and deleted) on every path out.
    let temp_dir = TempDir::new().map_err(|e| BookvoiceError::Internal(e.to_string()))?;
    let wav_path = temp_dir.path().join("spoken.wav");

    debug!("speaking to {}", wav_path.display());
    let mut session = speech.open(&wav_path)?;
    session.say(text)?;
    session.finish()?;

    debug!("encoding {} -> {}", wav_path.display(), output.display());
    encoder.export(&wav_path, output)?;

    info!("audiobook written: {}", output.display());
    Ok(output.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SpeechSession;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Writes the spoken text verbatim as the "WAV"; encoding copies it.
    struct EchoSpeech;
    struct EchoSession {
        wav: PathBuf,
        buf: String,
    }
    impl SpeechEngine for EchoSpeech {
        fn open(&self, wav_path: &Path) -> Result<Box<dyn SpeechSession>, BookvoiceError> {
            Ok(Box::new(EchoSession {
                wav: wav_path.to_path_buf(),
                buf: String::new(),
            }))
        }
    }
    impl SpeechSession for EchoSession {
        fn say(&mut self, text: &str) -> Result<(), BookvoiceError> {
            self.buf.push_str(text);
            Ok(())
        }
        fn finish(self: Box<Self>) -> Result<(), BookvoiceError> {
            std::fs::write(&self.wav, self.buf.as_bytes()).unwrap();
            Ok(())
        }
    }

    struct CopyEncoder;
    impl EncodingEngine for CopyEncoder {
        fn export(&self, wav: &Path, output: &Path) -> Result<(), BookvoiceError> {
            std::fs::copy(wav, output).unwrap();
            Ok(())
        }
    }

    struct CountingSpeech(Arc<AtomicUsize>);
    impl SpeechEngine for CountingSpeech {
        fn open(&self, wav_path: &Path) -> Result<Box<dyn SpeechSession>, BookvoiceError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            EchoSpeech.open(wav_path)
        }
    }

    #[test]
    fn rejects_non_mp3_output_before_any_work() {
        let opened = Arc::new(AtomicUsize::new(0));
        let speech = CountingSpeech(Arc::clone(&opened));

        let err = synthesize(&speech, &CopyEncoder, "hi", Path::new("out.ogg"), false).unwrap_err();
        assert!(matches!(err, BookvoiceError::NotAnMp3Path { .. }));
        assert_eq!(opened.load(Ordering::SeqCst), 0, "no session may be opened");
    }

    #[test]
    fn rejects_existing_output_unless_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("book.mp3");
        std::fs::write(&out, b"old").unwrap();

        let err = synthesize(&EchoSpeech, &CopyEncoder, "new", &out, false).unwrap_err();
        assert!(matches!(err, BookvoiceError::OutputExists { .. }));
        assert_eq!(std::fs::read(&out).unwrap(), b"old");

        synthesize(&EchoSpeech, &CopyEncoder, "new", &out, true).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "new");
    }

    #[test]
    fn returns_output_path_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("book.mp3");
        let returned = synthesize(&EchoSpeech, &CopyEncoder, "spoken words", &out, false).unwrap();
        assert_eq!(returned, out);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "spoken words");
    }

    #[test]
    fn wav_is_deleted_on_success_and_on_encoder_failure() {
        use std::sync::Mutex;

        struct RecordingSpeech(Arc<Mutex<Option<PathBuf>>>);
        impl SpeechEngine for RecordingSpeech {
            fn open(&self, wav_path: &Path) -> Result<Box<dyn SpeechSession>, BookvoiceError> {
                *self.0.lock().unwrap() = Some(wav_path.to_path_buf());
                EchoSpeech.open(wav_path)
            }
        }

        struct FailingEncoder;
        impl EncodingEngine for FailingEncoder {
            fn export(&self, _wav: &Path, _output: &Path) -> Result<(), BookvoiceError> {
                Err(BookvoiceError::EncodingFailed {
                    detail: "boom".into(),
                })
            }
        }

        let dir = tempfile::tempdir().unwrap();

        // Success path.
        let wav_seen = Arc::new(Mutex::new(None));
        let out = dir.path().join("ok.mp3");
        synthesize(
            &RecordingSpeech(Arc::clone(&wav_seen)),
            &CopyEncoder,
            "t",
            &out,
            false,
        )
        .unwrap();
        let wav = wav_seen.lock().unwrap().clone().unwrap();
        assert!(!wav.exists(), "WAV must not survive a successful export");

        // Failure path.
        let wav_seen = Arc::new(Mutex::new(None));
        let out = dir.path().join("fail.mp3");
        let err = synthesize(
            &RecordingSpeech(Arc::clone(&wav_seen)),
            &FailingEncoder,
            "t",
            &out,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, BookvoiceError::EncodingFailed { .. }));
        let wav = wav_seen.lock().unwrap().clone().unwrap();
        assert!(!wav.exists(), "WAV must not survive a failed export");
    }
}
