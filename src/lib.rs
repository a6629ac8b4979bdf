//! Chunked TTS - speak arbitrarily long text through a length-limited remote endpoint.
//!
//! The remote endpoint accepts at most 200 characters per request. Long text is
//! split at whitespace or punctuation by the [`segmenter`], and each chunk is
//! synthesized with one request by the [`tts`] client. Results come back in input
//! order with base64 audio per chunk; merging the audio is left to the caller.

pub mod config;
pub mod error;
pub mod output;
pub mod segmenter;
pub mod tts;

pub use error::TtsError;
pub use segmenter::{Chunk, SegmentError, SplitConfig, is_break_point, split_text};
pub use tts::{AudioOptions, HttpTransport, LongAudioOptions, SynthesisResult, Synthesizer, Transport, generate_audio, generate_long_audio};
