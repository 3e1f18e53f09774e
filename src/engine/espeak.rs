//! Default speech engine: eSpeak NG, with classic `espeak` as fallback.
//!
//! Both binaries share a CLI: `-w <file>` renders to WAV instead of the
//! sound card, `--stdin` reads the text from standard input, `-v` selects a
//! voice and `-s` the speaking rate in words per minute.
//!
//! A [`SpeechSession`] buffers the text it is asked to speak and runs the
//! binary exactly once in `finish()`. Rendering a whole book is one long
//! blocking process invocation either way, and deferring it means a dropped
//! (unfinished) session costs nothing and leaves no half-written WAV from
//! the engine itself.

use crate::engine::{SpeechEngine, SpeechSession};
use crate::error::BookvoiceError;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Candidate binaries, tried in order.
const SPEAKERS: &[&str] = &["espeak-ng", "espeak"];

/// Drives `espeak-ng` (or `espeak`) as the speech engine.
#[derive(Debug, Clone, Default)]
pub struct EspeakEngine {
    /// Voice identifier passed as `-v` (e.g. "en-us"). Engine default if None.
    pub voice: Option<String>,
    /// Speaking rate in words per minute, passed as `-s`. Engine default if None.
    pub rate_wpm: Option<u32>,
}

impl EspeakEngine {
    pub fn new(voice: Option<String>, rate_wpm: Option<u32>) -> Self {
        Self { voice, rate_wpm }
    }

    /// First candidate binary that responds to `--version`.
    fn locate_binary() -> Result<&'static str, BookvoiceError> {
        for candidate in SPEAKERS {
            let probe = Command::new(candidate)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            if matches!(probe, Ok(s) if s.success()) {
                debug!("speech engine: {candidate}");
                return Ok(candidate);
            }
        }
        Err(BookvoiceError::SynthesisFailed {
            detail: "no speech engine found; install espeak-ng or espeak".into(),
        })
    }
}

impl SpeechEngine for EspeakEngine {
    fn open(&self, wav_path: &Path) -> Result<Box<dyn SpeechSession>, BookvoiceError> {
        let binary = Self::locate_binary()?;
        Ok(Box::new(EspeakSession {
            binary,
            voice: self.voice.clone(),
            rate_wpm: self.rate_wpm,
            wav_path: wav_path.to_path_buf(),
            segments: Vec::new(),
        }))
    }
}

/// One WAV's worth of buffered speech.
struct EspeakSession {
    binary: &'static str,
    voice: Option<String>,
    rate_wpm: Option<u32>,
    wav_path: PathBuf,
    segments: Vec<String>,
}

impl SpeechSession for EspeakSession {
    fn say(&mut self, text: &str) -> Result<(), BookvoiceError> {
        self.segments.push(text.to_string());
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<(), BookvoiceError> {
        let text = self.segments.join("\n");
        info!(
            "speaking {} characters to {}",
            text.chars().count(),
            self.wav_path.display()
        );

        let mut cmd = Command::new(self.binary);
        cmd.arg("-w").arg(&self.wav_path).arg("--stdin");
        if let Some(ref voice) = self.voice {
            cmd.arg("-v").arg(voice);
        }
        if let Some(rate) = self.rate_wpm {
            cmd.arg("-s").arg(rate.to_string());
        }

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BookvoiceError::SynthesisFailed {
                detail: format!("failed to run {}: {e}", self.binary),
            })?;

        // Take and drop the handle so stdin closes before we wait, or the
        // engine blocks forever reading.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| BookvoiceError::SynthesisFailed {
                detail: format!("{}: stdin unavailable", self.binary),
            })?;
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| BookvoiceError::SynthesisFailed {
                detail: format!("{}: writing text to stdin: {e}", self.binary),
            })?;
        drop(stdin);

        let result = child
            .wait_with_output()
            .map_err(|e| BookvoiceError::SynthesisFailed {
                detail: format!("{}: {e}", self.binary),
            })?;

        if !result.status.success() {
            return Err(BookvoiceError::SynthesisFailed {
                detail: format!(
                    "{} exited with {}: {}",
                    self.binary,
                    result.status,
                    String::from_utf8_lossy(&result.stderr).trim()
                ),
            });
        }

        Ok(())
    }
}
