//! Configuration module for the chunked TTS client.
//!
//! Provides CLI argument parsing and configuration management.

#[allow(clippy::module_inception)]
mod config;
mod languages;

pub use config::{AppConfig, Mode, OutputFormat};
pub use languages::get_language;
