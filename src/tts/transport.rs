//! HTTP transport for the synthesis endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::error::TtsError;

/// Sends one url-encoded form body and returns the response text.
///
/// Implementations make exactly one attempt; timeouts and connection failures
/// surface as `TtsError::Transport`.
pub trait Transport: Send + Sync {
    fn post_form(&self, url: &str, body: String, timeout: Duration) -> Result<String, TtsError>;
}

/// Blocking reqwest transport.
pub struct HttpTransport {
    client: Client, // Reused across requests for connection pooling
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Errors
    /// Returns an error if the TLS backend or client cannot be initialized.
    pub fn new() -> Result<Self, TtsError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TtsError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, body: String, timeout: Duration) -> Result<String, TtsError> {
        debug!("POST {} ({} bytes, timeout {}ms)", url, body.len(), timeout.as_millis());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded;charset=UTF-8")
            .body(body)
            .timeout(timeout)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Transport(format!("request timed out after {}ms", timeout.as_millis()))
                } else if e.is_connect() {
                    TtsError::Transport(format!("cannot connect to {}: {}", url, e))
                } else {
                    TtsError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TtsError::Transport(format!("HTTP {}", status)));
        }

        response.text().map_err(|e| TtsError::Transport(format!("failed to read response body: {}", e)))
    }
}
