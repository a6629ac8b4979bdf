//! Writing synthesis results and chunk listings.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use tracing::info;

use crate::segmenter::Chunk;
use crate::tts::SynthesisResult;

/// One line of the `--split-only` listing.
#[derive(Debug, Serialize)]
struct ChunkLine<'a> {
    start: usize,
    length: usize,
    text: &'a str,
}

/// Write results as a pretty-printed JSON array of `{shortText, base64}`.
pub fn write_json(results: &[SynthesisResult], mut writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, results).context("Failed to serialize results")?;
    writeln!(writer)?;
    Ok(())
}

/// Decode each chunk's audio and write it to `chunk-NNN.mp3` in `dir`.
///
/// # Returns
/// The written paths, in chunk order.
///
/// # Errors
/// Returns an error if a payload is not valid base64 or a file cannot be written.
pub fn write_files(results: &[SynthesisResult], dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut paths = Vec::with_capacity(results.len());
    for (i, result) in results.iter().enumerate() {
        let audio = BASE64.decode(&result.base64).with_context(|| format!("Chunk {} has an invalid base64 payload", i + 1))?;

        let path = dir.join(format!("chunk-{:03}.mp3", i));
        std::fs::write(&path, &audio).with_context(|| format!("Failed to write {}", path.display()))?;

        info!("💾 Wrote {} ({} bytes): \"{}\"", path.display(), audio.len(), result.short_text.trim());
        paths.push(path);
    }

    Ok(paths)
}

/// Write one JSON object per chunk: `{"start":..,"length":..,"text":..}`.
pub fn write_chunks(chunks: &[Chunk<'_>], mut writer: impl Write) -> Result<()> {
    for chunk in chunks {
        let line = ChunkLine { start: chunk.start, length: chunk.char_len(), text: chunk.text };
        serde_json::to_writer(&mut writer, &line)?;
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::{SplitConfig, split_text};

    fn result(text: &str, audio: &[u8]) -> SynthesisResult {
        SynthesisResult { short_text: text.to_string(), base64: BASE64.encode(audio) }
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_json(&[result("hello ", b"ID3a"), result("world", b"ID3b")], &mut out).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["shortText"], "hello ");
        assert_eq!(parsed[1]["base64"], BASE64.encode(b"ID3b"));
    }

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_files(&[result("one ", b"first"), result("two", b"second")], dir.path()).unwrap();

        assert_eq!(paths, vec![dir.path().join("chunk-000.mp3"), dir.path().join("chunk-001.mp3")]);
        assert_eq!(std::fs::read(&paths[0]).unwrap(), b"first");
        assert_eq!(std::fs::read(&paths[1]).unwrap(), b"second");
    }

    #[test]
    fn test_write_files_rejects_bad_base64() {
        let dir = tempfile::tempdir().unwrap();
        let bad = SynthesisResult { short_text: "x".to_string(), base64: "not base64!".to_string() };
        let err = write_files(&[bad], dir.path()).unwrap_err();
        assert!(err.to_string().contains("invalid base64"));
    }

    #[test]
    fn test_write_chunks() {
        let chunks = split_text("hello world foo", &SplitConfig::new(6)).unwrap();
        let mut out = Vec::new();
        write_chunks(&chunks, &mut out).unwrap();

        let lines: Vec<serde_json::Value> = String::from_utf8(out).unwrap().lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], serde_json::json!({ "start": 6, "length": 6, "text": "world " }));
    }
}
