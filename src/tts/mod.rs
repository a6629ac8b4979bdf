//! Text-to-speech client for the remote synthesis endpoint.
//!
//! Provides single-request synthesis for short text and chunked synthesis for long text.

mod options;
pub mod protocol;
mod synthesizer;
mod transport;

pub use options::{AudioOptions, DEFAULT_HOST, DEFAULT_LANG, DEFAULT_TIMEOUT, LongAudioOptions, REMOTE_TEXT_LIMIT};
pub use synthesizer::{SynthesisResult, Synthesizer, generate_audio, generate_long_audio};
pub use transport::{HttpTransport, Transport};
