//! Single-document conversion entry point.
//!
//! ## Pipeline
//!
//! ```text
//! input (.pdf | .txt)
//!  │
//!  ├─ 1. Validate   extension + existence, output overwrite check
//!  ├─ 2. Extract    PDF → text via the extraction engine (PDF inputs only)
//!  ├─ 3. Synthesize text → temporary WAV via the speech engine
//!  └─ 4. Encode     WAV → .mp3 via the encoding engine
//! ```
//!
//! Every stage is a blocking call, issued strictly in order. The first
//! unrecovered error moves the job to [`ConversionStage::Failed`] and
//! propagates; `Done` and `Failed` are terminal.

use crate::classify::{classify, default_output_path, ExistencePolicy, FileKind};
use crate::config::ConversionConfig;
use crate::engine::{
    EncodingEngine, EspeakEngine, ExtractionEngine, LameEncoder, PdftotextEngine, SpeechEngine,
};
use crate::error::BookvoiceError;
use crate::pipeline::{extract, synthesize, ExtractedText};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The states a conversion job moves through.
///
/// `Extracting` is entered for PDF inputs only; text inputs go straight
/// from `Validated` to `Synthesizing`. Any state may transition to
/// `Failed` on the first unrecovered error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    Validated,
    Extracting,
    Synthesizing,
    Encoding,
    Done,
    Failed,
}

impl ConversionStage {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, ConversionStage::Done | ConversionStage::Failed)
    }
}

/// Summary of one completed conversion.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// The produced MP3 artifact.
    pub output: PathBuf,
    /// Characters of text that were spoken.
    pub characters: usize,
    /// Wall-clock time spent in extraction (0 for text inputs).
    pub extract_duration_ms: u64,
    /// Wall-clock time spent in synthesis + encoding.
    pub synthesize_duration_ms: u64,
    /// Total wall-clock time.
    pub total_duration_ms: u64,
}

/// Convert a PDF or plain-text document into an MP3 audiobook.
///
/// When `output` is `None` the artifact lands next to the input with the
/// same stem and an `.mp3` extension.
///
/// # Errors
/// Validation failures ([`BookvoiceError::UnsupportedInput`],
/// [`BookvoiceError::OutputExists`], …) are returned before any engine is
/// invoked. Engine failures propagate unchanged; temporary files are
/// cleaned up regardless.
pub fn convert(
    input: &Path,
    output: Option<&Path>,
    config: &ConversionConfig,
) -> Result<ConversionReport, BookvoiceError> {
    let total_start = Instant::now();
    let mut stage = ConversionStage::Validated;
    info!("starting conversion: {}", input.display());

    // ── Step 1: Validate input and resolve the output path ───────────────
    let is_pdf = classify(input, FileKind::Pdf, ExistencePolicy::MustExist);
    let is_txt = classify(input, FileKind::Text, ExistencePolicy::MustExist);
    if !is_pdf && !is_txt {
        return Err(fail(&mut stage, if input.is_file() {
            BookvoiceError::UnsupportedInput {
                path: input.to_path_buf(),
            }
        } else {
            BookvoiceError::InputNotFound {
                path: input.to_path_buf(),
            }
        }));
    }

    let output = match output {
        Some(p) => p.to_path_buf(),
        None => default_output_path(input),
    };
    debug!("output resolved to {}", output.display());

    // Fail fast on a doomed destination — before extraction, not just
    // before synthesis, so a long PDF extraction is never wasted.
    let policy = if config.allow_overwrite {
        ExistencePolicy::Ignore
    } else {
        ExistencePolicy::MustNotExist
    };
    if !classify(&output, FileKind::Mp3, policy) {
        let err = if classify(&output, FileKind::Mp3, ExistencePolicy::Ignore) {
            BookvoiceError::OutputExists { path: output }
        } else {
            BookvoiceError::NotAnMp3Path { path: output }
        };
        return Err(fail(&mut stage, err));
    }

    // ── Step 2: Obtain the text ──────────────────────────────────────────
    let extract_start = Instant::now();
    let text: ExtractedText = if is_pdf {
        stage = ConversionStage::Extracting;
        debug!(?stage, "extracting");
        let extractor = resolve_extractor(config);
        extract(extractor.as_ref(), input).map_err(|e| fail(&mut stage, e))?
    } else {
        let content =
            std::fs::read_to_string(input).map_err(|e| {
                fail(
                    &mut stage,
                    BookvoiceError::ReadFailed {
                        path: input.to_path_buf(),
                        source: e,
                    },
                )
            })?;
        ExtractedText::new(content)
    };
    let extract_duration_ms = if is_pdf {
        extract_start.elapsed().as_millis() as u64
    } else {
        0
    };

    if text.chars == 0 {
        warn!("'{}' produced no text", input.display());
    }

    // ── Step 3+4: Synthesize and encode ──────────────────────────────────
    stage = ConversionStage::Synthesizing;
    debug!(?stage, "synthesizing {} characters", text.chars);
    let synth_start = Instant::now();
    let speech = resolve_speech(config);
    let encoder = resolve_encoder(config);
    // Encoding happens inside synthesize(); the stage split exists for
    // logging and error context, not for separate scheduling.
    stage = ConversionStage::Encoding;
    let produced = synthesize(
        speech.as_ref(),
        encoder.as_ref(),
        &text.content,
        &output,
        config.allow_overwrite,
    )
    .map_err(|e| fail(&mut stage, e))?;
    let synthesize_duration_ms = synth_start.elapsed().as_millis() as u64;

    stage = ConversionStage::Done;
    let report = ConversionReport {
        output: produced,
        characters: text.chars,
        extract_duration_ms,
        synthesize_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "conversion complete: {} ({} chars, {}ms)",
        report.output.display(),
        report.characters,
        report.total_duration_ms
    );
    debug_assert!(stage.is_terminal());
    Ok(report)
}

fn fail(stage: &mut ConversionStage, err: BookvoiceError) -> BookvoiceError {
    debug!(from = ?*stage, "conversion failed: {err}");
    *stage = ConversionStage::Failed;
    err
}

// ── Engine resolution ────────────────────────────────────────────────────

/// Caller-injected engine if present, otherwise the built-in default.
pub(crate) fn resolve_extractor(config: &ConversionConfig) -> Arc<dyn ExtractionEngine> {
    match config.extractor {
        Some(ref e) => Arc::clone(e),
        None => Arc::new(PdftotextEngine::new()),
    }
}

fn resolve_speech(config: &ConversionConfig) -> Arc<dyn SpeechEngine> {
    match config.speech {
        Some(ref e) => Arc::clone(e),
        None => Arc::new(EspeakEngine::new(config.voice.clone(), config.rate_wpm)),
    }
}

fn resolve_encoder(config: &ConversionConfig) -> Arc<dyn EncodingEngine> {
    match config.encoder {
        Some(ref e) => Arc::clone(e),
        None => Arc::new(LameEncoder::new(config.bitrate_kbps)),
    }
}
