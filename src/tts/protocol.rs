//! Request envelope and response decoding for the `batchexecute` endpoint.
//!
//! Request: form field `f.req` holding
//! `[[["jQ1olc", "<json [text, lang, true|null, \"null\"]>", null, "generic"]]]`.
//! Response: an anti-XSSI preamble followed by JSON whose `[0][2]` is itself a
//! JSON string `["<base64 audio>", ...]`.

use serde_json::{Value, json};

use crate::error::TtsError;

/// Path of the synthesis RPC, relative to the host.
pub const BATCH_EXECUTE_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";

/// RPC identifier of the text-to-speech call.
pub const RPC_ID: &str = "jQ1olc";

/// Length of the non-JSON prefix on every response body.
const RESPONSE_PREAMBLE_LEN: usize = 5;

/// Build the endpoint URL for a host.
pub fn endpoint_url(host: &str) -> String {
    format!("{}{}", host.trim_end_matches('/'), BATCH_EXECUTE_PATH)
}

/// Encode the url-encoded form body for one synthesis request.
pub fn encode_request(text: &str, lang: &str, slow: bool) -> String {
    let slow_flag = if slow { Some(true) } else { None };
    let params = json!([text, lang, slow_flag, "null"]).to_string();
    let envelope = json!([[[RPC_ID, params, Value::Null, "generic"]]]);
    format!("f.req={}", urlencoding::encode(&envelope.to_string()))
}

/// Extract the base64 audio from a response body.
///
/// # Errors
/// - `TtsError::UnsupportedLanguage` if the audio field is missing, null or empty
/// - `TtsError::Parse` if the body does not have the expected nested shape
pub fn parse_response(body: &str, lang: &str) -> Result<String, TtsError> {
    let json_part = body.char_indices().nth(RESPONSE_PREAMBLE_LEN).map_or("", |(i, _)| &body[i..]);

    let parsed: Value = serde_json::from_str(json_part).map_err(|e| TtsError::Parse(format!("invalid JSON: {}", e)))?;

    let entry = parsed.get(0).filter(|v| v.is_array()).ok_or_else(|| TtsError::Parse("unexpected structure".to_string()))?;

    let payload = match entry.get(2) {
        None | Some(Value::Null) => return Err(TtsError::UnsupportedLanguage(lang.to_string())),
        Some(Value::String(s)) if s.is_empty() => return Err(TtsError::UnsupportedLanguage(lang.to_string())),
        Some(Value::String(s)) => s,
        Some(_) => return Err(TtsError::Parse("audio field is not a string".to_string())),
    };

    let inner: Value = serde_json::from_str(payload).map_err(|e| TtsError::Parse(format!("invalid audio payload: {}", e)))?;

    inner
        .get(0)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| TtsError::Parse("unexpected structure".to_string()))
}

/// Decode a form body built by `encode_request` back into `(text, lang, slow)`.
#[cfg(test)]
pub(crate) fn decode_request(body: &str) -> Option<(String, String, bool)> {
    let encoded = body.strip_prefix("f.req=")?;
    let envelope: Value = serde_json::from_str(&urlencoding::decode(encoded).ok()?).ok()?;
    let params: Value = serde_json::from_str(envelope[0][0][1].as_str()?).ok()?;
    Some((params[0].as_str()?.to_string(), params[1].as_str()?.to_string(), params[2] == Value::Bool(true)))
}

/// Build a successful response body carrying `audio`.
#[cfg(test)]
pub(crate) fn audio_response(audio: &str) -> String {
    let payload = json!([audio, Value::Null]).to_string();
    format!(")]}}'\n{}", json!([["wrb.fr", RPC_ID, payload, null, null, null, "generic"]]))
}
