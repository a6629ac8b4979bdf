//! Chunked TTS - command line client.
//!
//! Reads text from an argument, a file or stdin, splits it into chunks the remote
//! endpoint accepts, and prints the base64 audio per chunk as JSON or writes one
//! audio file per chunk.

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use chunked_tts::config::{AppConfig, Mode, OutputFormat};
use chunked_tts::{SynthesisResult, Synthesizer, output, split_text};

/// Run the configured operation.
fn run(config: &AppConfig) -> Result<()> {
    let text = config.read_text()?;

    if config.split_only {
        let chunks = split_text(&text, &config.split_config())?;
        info!("✂️  Split {} chars into {} chunk(s)", text.chars().count(), chunks.len());
        return output::write_chunks(&chunks, std::io::stdout().lock());
    }

    let synthesizer = Synthesizer::new().context("Failed to initialize HTTP client")?;

    let results = match config.mode {
        Mode::Short => {
            let base64 = synthesizer.synthesize_one(&text, &config.audio_options())?;
            vec![SynthesisResult { short_text: text, base64 }]
        }
        Mode::Long => synthesizer.synthesize_all(&text, &config.long_audio_options())?,
    };

    match config.format {
        OutputFormat::Json => output::write_json(&results, std::io::stdout().lock())?,
        OutputFormat::Files => {
            let paths = output::write_files(&results, &config.output_dir)?;
            info!("✅ Wrote {} audio file(s) to {}", paths.len(), config.output_dir.display());
        }
    }

    Ok(())
}

fn main() {
    // Parse command line arguments
    let config = AppConfig::from_args();

    // Respect RUST_LOG env var, fallback to verbose flag, default to info.
    // Logs go to stderr so stdout stays clean for JSON output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if config.verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();

    info!("🔊 Chunked TTS v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("❌ Configuration error: {}", e);
        std::process::exit(1);
    }

    config.log_config();

    if let Err(e) = run(&config) {
        error!("❌ {:#}", e);
        std::process::exit(1);
    }
}
