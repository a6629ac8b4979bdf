//! Application configuration and CLI argument parsing.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::languages;
use crate::segmenter::{DEFAULT_MAX_LENGTH, SplitConfig};
use crate::tts::{AudioOptions, DEFAULT_HOST, LongAudioOptions, REMOTE_TEXT_LIMIT};

/// Which synthesis entry point to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Single request; text must fit the remote limit
    Short,
    /// Split the text and synthesize chunk by chunk (default)
    #[default]
    Long,
}

/// Where results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array of {shortText, base64} on stdout (default)
    #[default]
    Json,
    /// One decoded audio file per chunk in --output-dir
    Files,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Short => write!(f, "short"),
            Mode::Long => write!(f, "long"),
        }
    }
}

/// Chunked text-to-speech configuration.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "chunked-tts")]
#[command(author, version, about = "Speak long text through a length-limited remote TTS endpoint", long_about = None)]
pub struct AppConfig {
    /// Text to synthesize (reads --file or stdin when omitted)
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text to synthesize from a file
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// List known language codes and exit
    #[arg(long)]
    pub list_languages: bool,

    /// Show information about a language code and exit
    #[arg(long)]
    pub language_info: Option<String>,

    /// Language code of the text (e.g., en, es, fr, zh-CN)
    #[arg(long, short = 'l', env = "TTS_LANG", default_value = "en")]
    pub lang: String,

    /// Ask for slower speech
    #[arg(long)]
    pub slow: bool,

    /// Base URL of the synthesis endpoint
    #[arg(long, env = "TTS_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value = "10000", value_parser = parse_timeout)]
    pub timeout_ms: u64,

    /// Extra characters to split on, in addition to whitespace and ASCII punctuation (e.g. "，。")
    #[arg(long, default_value = "")]
    pub split_punct: String,

    /// Maximum chunk length in characters (1-200)
    #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    /// Number of chunk requests in flight (1 = sequential, 0 = one per CPU core)
    #[arg(long, short = 'j', default_value = "1")]
    pub concurrency: usize,

    /// Synthesis mode: 'long' splits the text, 'short' sends it as one request
    #[arg(long, value_enum, default_value = "long")]
    pub mode: Mode,

    /// Output format: 'json' prints results, 'files' writes decoded audio per chunk
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Output directory for --format files
    #[arg(long, short = 'o', default_value = ".")]
    pub output_dir: PathBuf,

    /// Print the chunks the text would be split into and exit without synthesizing
    #[arg(long)]
    pub split_only: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse configuration from command line arguments.
    pub fn from_args() -> Self {
        let mut config = Self::parse();

        // Handle language listing commands
        if config.list_languages {
            languages::print_languages();
            std::process::exit(0);
        }

        if let Some(ref code) = config.language_info {
            match languages::print_language_info(code) {
                Ok(_) => std::process::exit(0),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        config.normalize_concurrency();
        config
    }

    /// Resolve `--concurrency 0` to the number of CPU cores.
    fn normalize_concurrency(&mut self) {
        if self.concurrency == 0 {
            self.concurrency = num_cpus::get().max(1);
        }
    }

    /// Per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Options for a single synthesis request.
    pub fn audio_options(&self) -> AudioOptions {
        AudioOptions { lang: self.lang.clone(), slow: self.slow, host: self.host.clone(), timeout: self.timeout() }
    }

    /// Options for chunked synthesis.
    pub fn long_audio_options(&self) -> LongAudioOptions {
        LongAudioOptions {
            audio: self.audio_options(),
            split: self.split_config(),
            concurrency: self.concurrency,
        }
    }

    /// Segmenter configuration.
    pub fn split_config(&self) -> SplitConfig {
        SplitConfig::new(self.max_length).with_split_punct(&self.split_punct)
    }

    /// Read the input text from the positional argument, --file, or stdin.
    ///
    /// Trailing line breaks of file and stdin input are dropped.
    pub fn read_text(&self) -> Result<String> {
        if let Some(ref text) = self.text {
            return Ok(text.clone());
        }

        let mut text = match self.file {
            Some(ref path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?,
            None => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text).context("Failed to read text from stdin")?;
                text
            }
        };

        text.truncate(text.trim_end_matches(['\n', '\r']).len());
        Ok(text)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.lang.is_empty() {
            anyhow::bail!("Language code must not be empty");
        }

        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            anyhow::bail!("Host must be an http:// or https:// URL, got '{}'", self.host);
        }

        if !(1..=REMOTE_TEXT_LIMIT).contains(&self.max_length) {
            anyhow::bail!("Max length must be between 1 and {}", REMOTE_TEXT_LIMIT);
        }

        if let Some(ref path) = self.file
            && !path.exists()
        {
            anyhow::bail!("Input file does not exist: {}", path.display());
        }

        if languages::get_language(&self.lang).is_none() {
            warn!("Unknown language code '{}', the endpoint may reject it", self.lang);
        }

        Ok(())
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        info!("Configuration:");
        info!("  Mode: {}", self.mode);
        info!("  Language: {} ({})", self.lang, languages::get_language(&self.lang).unwrap_or("unknown"));
        info!("  Slow: {}", self.slow);
        info!("  Host: {}", self.host);
        info!("  Timeout: {}ms", self.timeout_ms);
        if matches!(self.mode, Mode::Long) {
            info!("  Max chunk length: {}", self.max_length);
            if !self.split_punct.is_empty() {
                info!("  Extra split punctuation: {}", self.split_punct);
            }
            info!("  Concurrency: {}", self.concurrency);
        }
        if matches!(self.format, OutputFormat::Files) {
            info!("  Output directory: {}", self.output_dir.display());
        }
    }
}

/// Parse and validate the timeout (positive milliseconds).
fn parse_timeout(s: &str) -> Result<u64, String> {
    let value: u64 = s.parse().map_err(|_| format!("'{}' is not a valid number of milliseconds", s))?;
    if value > 0 { Ok(value) } else { Err("timeout should be a positive number".to_string()) }
}
