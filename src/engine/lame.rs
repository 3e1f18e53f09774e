//! Default encoding engine: `lame`, falling back to `ffmpeg`.
//!
//! `lame` is the canonical MP3 encoder and takes a WAV directly; `ffmpeg`
//! with `libmp3lame` is everywhere `lame` isn't. Probing order matters only
//! for diagnostics — both produce equivalent output at the same bitrate.

use crate::engine::EncodingEngine;
use crate::error::BookvoiceError;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Drives `lame` (or `ffmpeg`) as the MP3 encoder.
#[derive(Debug, Clone)]
pub struct LameEncoder {
    /// Constant bitrate in kbit/s.
    pub bitrate_kbps: u32,
}

impl Default for LameEncoder {
    fn default() -> Self {
        Self { bitrate_kbps: 128 }
    }
}

impl LameEncoder {
    pub fn new(bitrate_kbps: u32) -> Self {
        Self { bitrate_kbps }
    }

    fn probe(binary: &str) -> bool {
        Command::new(binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn encode_with_lame(&self, wav: &Path, output: &Path) -> Result<(), BookvoiceError> {
        let result = Command::new("lame")
            .arg("--quiet")
            .arg("-b")
            .arg(self.bitrate_kbps.to_string())
            .arg(wav)
            .arg(output)
            .output()
            .map_err(|e| BookvoiceError::EncodingFailed {
                detail: format!("failed to run lame: {e}"),
            })?;

        if !result.status.success() {
            return Err(BookvoiceError::EncodingFailed {
                detail: format!(
                    "lame exited with {}: {}",
                    result.status,
                    String::from_utf8_lossy(&result.stderr).trim()
                ),
            });
        }
        Ok(())
    }

    fn encode_with_ffmpeg(&self, wav: &Path, output: &Path) -> Result<(), BookvoiceError> {
        let result = Command::new("ffmpeg")
            .arg("-y")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(wav)
            .arg("-codec:a")
            .arg("libmp3lame")
            .arg("-b:a")
            .arg(format!("{}k", self.bitrate_kbps))
            .arg(output)
            .output()
            .map_err(|e| BookvoiceError::EncodingFailed {
                detail: format!("failed to run ffmpeg: {e}"),
            })?;

        if !result.status.success() {
            return Err(BookvoiceError::EncodingFailed {
                detail: format!(
                    "ffmpeg exited with {}: {}",
                    result.status,
                    String::from_utf8_lossy(&result.stderr).trim()
                ),
            });
        }
        Ok(())
    }
}

impl EncodingEngine for LameEncoder {
    fn export(&self, wav: &Path, output: &Path) -> Result<(), BookvoiceError> {
        debug!(
            "encoding {} -> {} at {} kbit/s",
            wav.display(),
            output.display(),
            self.bitrate_kbps
        );

        if Self::probe("lame") {
            self.encode_with_lame(wav, output)
        } else if Self::probe("ffmpeg") {
            self.encode_with_ffmpeg(wav, output)
        } else {
            Err(BookvoiceError::EncodingFailed {
                detail: "no MP3 encoder found; install lame or ffmpeg".into(),
            })
        }
    }
}
