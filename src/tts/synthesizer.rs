//! Text-to-speech synthesizer over the remote `batchexecute` endpoint.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use super::options::{AudioOptions, LongAudioOptions, REMOTE_TEXT_LIMIT};
use super::protocol;
use super::transport::{HttpTransport, Transport};
use crate::error::TtsError;
use crate::segmenter::{Chunk, split_text};

/// Audio for one chunk of the input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisResult {
    pub short_text: String, // The chunk text that was synthesized
    pub base64: String,     // Base64-encoded MP3 returned by the endpoint
}

/// Text-to-speech synthesizer.
pub struct Synthesizer<T: Transport = HttpTransport> {
    transport: T, // One request per call, no retries
}

impl Synthesizer<HttpTransport> {
    /// Create a synthesizer backed by a blocking HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, TtsError> {
        Ok(Self::with_transport(HttpTransport::new()?))
    }
}

impl<T: Transport> Synthesizer<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Synthesize a short text with a single request.
    ///
    /// # Arguments
    /// * `text` - Text of at most `REMOTE_TEXT_LIMIT` characters
    /// * `options` - Language, speed, host and timeout
    ///
    /// # Returns
    /// The base64-encoded audio.
    ///
    /// # Errors
    /// Validation and length errors are returned before any network activity.
    /// Otherwise returns transport, unsupported-language or parse errors.
    pub fn synthesize_one(&self, text: &str, options: &AudioOptions) -> Result<String, TtsError> {
        validate_text(text)?;
        options.validate()?;

        let length = text.chars().count();
        if length > REMOTE_TEXT_LIMIT {
            return Err(TtsError::TextTooLong { length, limit: REMOTE_TEXT_LIMIT });
        }

        let url = protocol::endpoint_url(&options.host);
        let body = protocol::encode_request(text, &options.lang, options.slow);

        debug!("Synthesizing \"{}\" (lang={}, slow={})", text, options.lang, options.slow);
        let response = self.transport.post_form(&url, body, options.timeout)?;
        let audio = protocol::parse_response(&response, &options.lang)?;

        debug!("Received {} bytes of base64 audio", audio.len());
        Ok(audio)
    }

    /// Synthesize text of any length, one request per chunk.
    ///
    /// The text is split with the configured segmenter and chunks are synthesized
    /// in order. With `concurrency > 1` requests overlap but results keep the
    /// original order.
    ///
    /// # Arguments
    /// * `text` - The text to synthesize
    /// * `options` - Request options, split configuration and concurrency
    ///
    /// # Returns
    /// One `SynthesisResult` per chunk, in input order.
    ///
    /// # Errors
    /// The first error aborts the remaining chunks; no partial list is returned.
    pub fn synthesize_all(&self, text: &str, options: &LongAudioOptions) -> Result<Vec<SynthesisResult>, TtsError> {
        validate_text(text)?;
        options.validate()?;

        let chunks = split_text(text, &options.split)?;
        info!("Synthesizing {} chars in {} chunk(s)", text.chars().count(), chunks.len());

        let results = if options.concurrency <= 1 || chunks.len() <= 1 {
            self.synthesize_sequential(&chunks, &options.audio)?
        } else {
            self.synthesize_concurrent(&chunks, &options.audio, options.concurrency)?
        };

        info!("Synthesized {} chunk(s)", results.len());
        Ok(results)
    }

    fn synthesize_sequential(&self, chunks: &[Chunk<'_>], options: &AudioOptions) -> Result<Vec<SynthesisResult>, TtsError> {
        let total = chunks.len();
        let mut results = Vec::with_capacity(total);

        for (i, chunk) in chunks.iter().enumerate() {
            debug!("Synthesizing chunk {}/{}", i + 1, total);
            let base64 = self.synthesize_one(chunk.text, options)?;
            results.push(SynthesisResult { short_text: chunk.text.to_string(), base64 });
        }

        Ok(results)
    }

    /// Fan chunks out over scoped worker threads.
    ///
    /// Workers claim chunk indices in increasing order and stop claiming after the
    /// first failure, so every unclaimed chunk lies after every failed one.
    fn synthesize_concurrent(&self, chunks: &[Chunk<'_>], options: &AudioOptions, workers: usize) -> Result<Vec<SynthesisResult>, TtsError> {
        let workers = workers.min(chunks.len());
        let next = AtomicUsize::new(0);
        let failed = AtomicBool::new(false);
        let slots: Vec<Mutex<Option<Result<String, TtsError>>>> = chunks.iter().map(|_| Mutex::new(None)).collect();

        debug!("Synthesizing {} chunks with {} workers", chunks.len(), workers);

        std::thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| {
                    while !failed.load(Ordering::Acquire) {
                        let index = next.fetch_add(1, Ordering::AcqRel);
                        let Some(chunk) = chunks.get(index) else { break };

                        let result = self.synthesize_one(chunk.text, options);
                        if result.is_err() {
                            failed.store(true, Ordering::Release);
                        }
                        *slots[index].lock() = Some(result);
                    }
                });
            }
        });

        let mut results = Vec::with_capacity(chunks.len());
        for (i, (chunk, slot)) in chunks.iter().zip(slots).enumerate() {
            match slot.into_inner() {
                Some(Ok(base64)) => results.push(SynthesisResult { short_text: chunk.text.to_string(), base64 }),
                Some(Err(e)) => return Err(e),
                // Unclaimed chunks only follow a failed one, which returns above.
                None => unreachable!("chunk {} was never claimed", i + 1),
            }
        }

        Ok(results)
    }
}

/// Synthesize a short text with a default HTTP synthesizer.
pub fn generate_audio(text: &str, options: &AudioOptions) -> Result<String, TtsError> {
    Synthesizer::new()?.synthesize_one(text, options)
}

/// Synthesize long text with a default HTTP synthesizer.
pub fn generate_long_audio(text: &str, options: &LongAudioOptions) -> Result<Vec<SynthesisResult>, TtsError> {
    Synthesizer::new()?.synthesize_all(text, options)
}

fn validate_text(text: &str) -> Result<(), TtsError> {
    if text.is_empty() {
        return Err(TtsError::validation("text should be a non-empty string"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::segmenter::SplitConfig;
    use crate::tts::protocol::{audio_response, decode_request};

    /// Fake endpoint: answers "audio:<text>" and records every request text.
    #[derive(Default)]
    struct FakeTransport {
        fail_on: Option<&'static str>,          // Fail requests whose text contains this
        unsupported_lang: Option<&'static str>, // Answer without audio for this lang
        calls: Mutex<Vec<String>>,              // Texts received, in arrival order
    }

    impl FakeTransport {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    impl Transport for FakeTransport {
        fn post_form(&self, url: &str, body: String, _timeout: Duration) -> Result<String, TtsError> {
            assert!(url.ends_with(protocol::BATCH_EXECUTE_PATH));
            let (text, lang, _slow) = decode_request(&body).expect("well-formed request body");
            self.calls.lock().push(text.clone());

            if self.fail_on.is_some_and(|needle| text.contains(needle)) {
                return Err(TtsError::Transport("connection reset".to_string()));
            }
            if self.unsupported_lang == Some(lang.as_str()) {
                return Ok(")]}'\n[[\"wrb.fr\",\"jQ1olc\",null,null,null,[3],\"generic\"]]".to_string());
            }
            Ok(audio_response(&format!("audio:{}", text)))
        }
    }

    /// Transport that must never be reached.
    struct NoNetwork;

    impl Transport for NoNetwork {
        fn post_form(&self, _url: &str, _body: String, _timeout: Duration) -> Result<String, TtsError> {
            panic!("validation should fail before any network activity");
        }
    }

    fn long_options(max_length: usize) -> LongAudioOptions {
        LongAudioOptions { split: SplitConfig::new(max_length), ..Default::default() }
    }

    #[test]
    fn test_synthesize_one() {
        let synth = Synthesizer::with_transport(FakeTransport::default());
        let audio = synth.synthesize_one("hello world", &AudioOptions::default()).unwrap();
        assert_eq!(audio, "audio:hello world");
        assert_eq!(synth.transport.calls(), vec!["hello world"]);
    }

    #[test]
    fn test_short_text_limit_checked_before_io() {
        let synth = Synthesizer::with_transport(NoNetwork);
        let text = "a".repeat(201);
        let err = synth.synthesize_one(&text, &AudioOptions::default()).unwrap_err();
        assert!(matches!(err, TtsError::TextTooLong { length: 201, limit: 200 }));
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let synth = Synthesizer::with_transport(FakeTransport::default());
        let text = "é".repeat(200);
        assert!(synth.synthesize_one(&text, &AudioOptions::default()).is_ok());
    }

    #[test]
    fn test_validation_before_io() {
        let synth = Synthesizer::with_transport(NoNetwork);

        let err = synth.synthesize_one("", &AudioOptions::default()).unwrap_err();
        assert!(matches!(err, TtsError::Validation(_)));

        let invalid = [
            AudioOptions::new(""),
            AudioOptions::default().with_host(""),
            AudioOptions::default().with_timeout(Duration::ZERO),
        ];
        for options in invalid {
            assert!(matches!(synth.synthesize_one("hi", &options), Err(TtsError::Validation(_))));
            assert!(matches!(synth.synthesize_all("hi", &LongAudioOptions::new(options)), Err(TtsError::Validation(_))));
        }

        assert!(matches!(synth.synthesize_all("", &LongAudioOptions::default()), Err(TtsError::Validation(_))));
        assert!(matches!(synth.synthesize_all("hi", &long_options(500)), Err(TtsError::Validation(_))));
    }

    #[test]
    fn test_unsupported_language() {
        let synth = Synthesizer::with_transport(FakeTransport { unsupported_lang: Some("xx"), ..Default::default() });
        let err = synth.synthesize_one("hello", &AudioOptions::new("xx")).unwrap_err();
        assert!(matches!(err, TtsError::UnsupportedLanguage(ref lang) if lang == "xx"));
        assert!(err.to_string().contains("xx"));
    }

    #[test]
    fn test_synthesize_all_preserves_order() {
        let synth = Synthesizer::with_transport(FakeTransport::default());
        let results = synth.synthesize_all("one two three four", &long_options(6)).unwrap();

        let texts: Vec<&str> = results.iter().map(|r| r.short_text.as_str()).collect();
        assert_eq!(texts, vec!["one ", "two ", "three ", "four"]);
        for result in &results {
            assert_eq!(result.base64, format!("audio:{}", result.short_text));
        }
        assert_eq!(synth.transport.calls(), vec!["one ", "two ", "three ", "four"]);
    }

    #[test]
    fn test_synthesize_all_aborts_on_first_error() {
        let synth = Synthesizer::with_transport(FakeTransport { fail_on: Some("three"), ..Default::default() });
        let err = synth.synthesize_all("one two three four", &long_options(6)).unwrap_err();

        assert!(matches!(err, TtsError::Transport(_)));
        assert_eq!(synth.transport.calls(), vec!["one ", "two ", "three "]);
    }

    #[test]
    fn test_synthesize_all_segmentation_error_before_io() {
        let synth = Synthesizer::with_transport(NoNetwork);
        let err = synth.synthesize_all("abcdefghij", &long_options(5)).unwrap_err();
        assert!(matches!(err, TtsError::Segmentation(_)));
        assert!(err.to_string().contains("abcde"));
    }

    #[test]
    fn test_synthesize_all_concurrent_keeps_order() {
        let text = (0..40).map(|i| format!("word{:02}", i)).collect::<Vec<_>>().join(" ");
        let synth = Synthesizer::with_transport(FakeTransport::default());

        let sequential = synth.synthesize_all(&text, &long_options(14)).unwrap();
        let concurrent = synth.synthesize_all(&text, &long_options(14).with_concurrency(4)).unwrap();

        assert!(sequential.len() > 4);
        assert_eq!(sequential, concurrent);
        assert_eq!(concurrent.iter().map(|r| r.short_text.as_str()).collect::<String>(), text);
    }

    #[test]
    fn test_synthesize_all_concurrent_failure() {
        let text = (0..40).map(|i| format!("word{:02}", i)).collect::<Vec<_>>().join(" ");
        let synth = Synthesizer::with_transport(FakeTransport { fail_on: Some("word20"), ..Default::default() });

        let err = synth.synthesize_all(&text, &long_options(14).with_concurrency(4)).unwrap_err();
        assert!(matches!(err, TtsError::Transport(_)));
    }

    #[test]
    fn test_synthesize_all_concurrent_returns_failed_chunk_error() {
        let text = (0..40).map(|i| format!("word{:02}", i)).collect::<Vec<_>>().join(" ");
        let synth = Synthesizer::with_transport(FakeTransport { fail_on: Some("word00"), ..Default::default() });

        let err = synth.synthesize_all(&text, &long_options(14).with_concurrency(4)).unwrap_err();
        assert!(matches!(err, TtsError::Transport(ref msg) if msg == "connection reset"));
    }

    #[test]
    fn test_result_json_field_names() {
        let result = SynthesisResult { short_text: "hi".to_string(), base64: "AAA=".to_string() };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({ "shortText": "hi", "base64": "AAA=" }));
    }
}
