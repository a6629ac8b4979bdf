//! Per-operation synthesis options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TtsError;
use crate::segmenter::SplitConfig;

/// Maximum text length (in characters) the remote endpoint accepts per request.
pub const REMOTE_TEXT_LIMIT: usize = 200;

/// Default language code.
pub const DEFAULT_LANG: &str = "en";

/// Default endpoint base URL.
pub const DEFAULT_HOST: &str = "https://translate.google.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Options for a single synthesis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioOptions {
    pub lang: String,      // Language code, e.g. "en", "es", "zh-CN"
    pub slow: bool,        // Ask the endpoint for slower speech
    pub host: String,      // Endpoint base URL
    pub timeout: Duration, // Bound on the whole request/response cycle
}

impl Default for AudioOptions {
    fn default() -> Self {
        Self { lang: DEFAULT_LANG.to_string(), slow: false, host: DEFAULT_HOST.to_string(), timeout: DEFAULT_TIMEOUT }
    }
}

impl AudioOptions {
    pub fn new(lang: impl Into<String>) -> Self {
        Self { lang: lang.into(), ..Default::default() }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_slow(mut self, slow: bool) -> Self {
        self.slow = slow;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check required fields before any network activity.
    pub fn validate(&self) -> Result<(), TtsError> {
        if self.lang.is_empty() {
            return Err(TtsError::validation("lang should be a non-empty string"));
        }
        if self.host.is_empty() {
            return Err(TtsError::validation("host should be a non-empty string"));
        }
        if self.timeout.is_zero() {
            return Err(TtsError::validation("timeout should be a positive number"));
        }
        Ok(())
    }
}

/// Options for long-text synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongAudioOptions {
    pub audio: AudioOptions,
    pub split: SplitConfig,
    /// Number of chunk requests in flight at once (1 = strictly sequential)
    pub concurrency: usize,
}

impl Default for LongAudioOptions {
    fn default() -> Self {
        Self { audio: AudioOptions::default(), split: SplitConfig::default(), concurrency: 1 }
    }
}

impl LongAudioOptions {
    pub fn new(audio: AudioOptions) -> Self {
        Self { audio, ..Default::default() }
    }

    pub fn with_split_punct(mut self, punct: &str) -> Self {
        self.split = self.split.with_split_punct(punct);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn validate(&self) -> Result<(), TtsError> {
        self.audio.validate()?;

        // Chunks longer than the remote limit would fail one by one mid-run
        if !(1..=REMOTE_TEXT_LIMIT).contains(&self.split.max_length) {
            return Err(TtsError::Validation(format!(
                "max length should be between 1 and {}, got {}",
                REMOTE_TEXT_LIMIT, self.split.max_length
            )));
        }
        if self.concurrency == 0 {
            return Err(TtsError::validation("concurrency should be at least 1"));
        }
        Ok(())
    }
}
