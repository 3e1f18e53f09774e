//! Configuration for audiobook and library conversion.
//!
//! All behaviour is controlled through [`ConversionConfig`], built via its
//! [`ConversionConfigBuilder`]. Keeping every knob in one struct lets the
//! single-file pipeline and the library converter share engine wiring, and
//! makes a run reproducible from its config alone.
//!
//! # Design choice: builder over constructor
//! Callers almost always want the defaults (`pdftotext` + `espeak-ng` +
//! `lame`, 128 kbit/s, no overwrite). The builder lets them set only what
//! they care about — tests inject stub engines, the CLI sets voice and
//! bitrate — without a many-argument constructor.

use crate::engine::{EncodingEngine, ExtractionEngine, SpeechEngine};
use crate::error::BookvoiceError;
use crate::progress::LibraryProgressCallback;
use std::fmt;
use std::sync::Arc;

/// Lowest bitrate `lame` accepts for MPEG-1 layer III.
const MIN_BITRATE_KBPS: u32 = 8;
/// Highest bitrate `lame` accepts.
const MAX_BITRATE_KBPS: u32 = 320;

/// Configuration for a conversion run.
///
/// Built via [`ConversionConfig::builder()`] or
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use bookvoice::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .allow_overwrite(true)
///     .voice("en-us")
///     .bitrate_kbps(96)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Permit replacing an existing output file. Default: false.
    ///
    /// Checked before any synthesis work starts, so a disallowed overwrite
    /// costs nothing but the stat call.
    pub allow_overwrite: bool,

    /// Speech-engine voice identifier (e.g. "en-us", "de").
    /// If None, the engine's own default voice is used.
    pub voice: Option<String>,

    /// Speaking rate in words per minute. If None, the engine default
    /// (175 wpm for eSpeak NG) applies.
    pub rate_wpm: Option<u32>,

    /// MP3 constant bitrate in kbit/s. Default: 128.
    ///
    /// 64 is plenty for mono synthesized speech; 128 keeps headroom for
    /// engines that render stereo.
    pub bitrate_kbps: u32,

    /// Pre-constructed extraction engine. Default: `pdftotext`.
    pub extractor: Option<Arc<dyn ExtractionEngine>>,

    /// Pre-constructed speech engine. Default: `espeak-ng`/`espeak` with
    /// `voice` and `rate_wpm` applied.
    pub speech: Option<Arc<dyn SpeechEngine>>,

    /// Pre-constructed encoding engine. Default: `lame`/`ffmpeg` at
    /// `bitrate_kbps`.
    pub encoder: Option<Arc<dyn EncodingEngine>>,

    /// Per-file progress events during library conversion.
    pub progress: Option<Arc<dyn LibraryProgressCallback>>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            allow_overwrite: false,
            voice: None,
            rate_wpm: None,
            bitrate_kbps: 128,
            extractor: None,
            speech: None,
            encoder: None,
            progress: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("allow_overwrite", &self.allow_overwrite)
            .field("voice", &self.voice)
            .field("rate_wpm", &self.rate_wpm)
            .field("bitrate_kbps", &self.bitrate_kbps)
            .field("extractor", &self.extractor.as_ref().map(|_| "<dyn ExtractionEngine>"))
            .field("speech", &self.speech.as_ref().map(|_| "<dyn SpeechEngine>"))
            .field("encoder", &self.encoder.as_ref().map(|_| "<dyn EncodingEngine>"))
            .field("progress", &self.progress.as_ref().map(|_| "<dyn LibraryProgressCallback>"))
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn allow_overwrite(mut self, v: bool) -> Self {
        self.config.allow_overwrite = v;
        self
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.config.voice = Some(voice.into());
        self
    }

    pub fn rate_wpm(mut self, wpm: u32) -> Self {
        self.config.rate_wpm = Some(wpm);
        self
    }

    pub fn bitrate_kbps(mut self, kbps: u32) -> Self {
        self.config.bitrate_kbps = kbps;
        self
    }

    pub fn extractor(mut self, engine: Arc<dyn ExtractionEngine>) -> Self {
        self.config.extractor = Some(engine);
        self
    }

    pub fn speech(mut self, engine: Arc<dyn SpeechEngine>) -> Self {
        self.config.speech = Some(engine);
        self
    }

    pub fn encoder(mut self, engine: Arc<dyn EncodingEngine>) -> Self {
        self.config.encoder = Some(engine);
        self
    }

    pub fn progress(mut self, cb: Arc<dyn LibraryProgressCallback>) -> Self {
        self.config.progress = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, BookvoiceError> {
        let c = &self.config;
        if c.bitrate_kbps < MIN_BITRATE_KBPS || c.bitrate_kbps > MAX_BITRATE_KBPS {
            return Err(BookvoiceError::InvalidConfig(format!(
                "MP3 bitrate must be {MIN_BITRATE_KBPS}–{MAX_BITRATE_KBPS} kbit/s, got {}",
                c.bitrate_kbps
            )));
        }
        if let Some(0) = c.rate_wpm {
            return Err(BookvoiceError::InvalidConfig(
                "Speaking rate must be ≥ 1 wpm".into(),
            ));
        }
        Ok(self.config)
    }
}
