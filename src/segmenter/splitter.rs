//! Greedy left-to-right splitter with a precomputed boundary bitmap.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default maximum chunk length in characters (matches the remote per-request limit).
pub const DEFAULT_MAX_LENGTH: usize = 200;

/// Errors produced while splitting text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("max length must be at least 1 character")]
    ZeroMaxLength,

    /// A run of `max_length` characters with no whitespace or punctuation in it.
    #[error(
        "the word is too long to split into a short text:\n{fragment} ...\n\nTry extra split punctuation (--split-punct) to split the text by punctuation."
    )]
    UnsplittableRun {
        offset: usize,    // Char offset where the run starts
        fragment: String, // The first `max_length` chars of the run
    },
}

/// Segmenter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Maximum chunk length in characters (Unicode scalar values, not bytes)
    pub max_length: usize,
    /// Characters accepted as break points in addition to whitespace and ASCII punctuation
    pub extra_split_punctuation: Vec<char>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self { max_length: DEFAULT_MAX_LENGTH, extra_split_punctuation: Vec::new() }
    }
}

impl SplitConfig {
    pub fn new(max_length: usize) -> Self {
        Self { max_length, ..Default::default() }
    }

    /// Add every character of `punct` as an extra break point.
    pub fn with_split_punct(mut self, punct: &str) -> Self {
        self.extra_split_punctuation.extend(punct.chars());
        self
    }
}

/// A contiguous piece of the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub text: &'a str, // Borrowed slice of the input text
    pub start: usize,  // Char offset of the first character
}

impl Chunk<'_> {
    /// Length of the chunk in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Check whether a character is an eligible chunk boundary.
///
/// Break points are Unicode whitespace (including NBSP), the zero-width no-break
/// space U+FEFF, the ASCII punctuation set ``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~``,
/// and any caller-supplied extra characters.
#[inline]
pub fn is_break_point(c: char, extra: &[char]) -> bool {
    c.is_whitespace() || c == '\u{FEFF}' || c.is_ascii_punctuation() || extra.contains(&c)
}

/// Split `text` into chunks of at most `config.max_length` characters.
///
/// Each step emits the longest window that ends at a break point, preferring an
/// exact cut at the limit when the character at the limit, or the one right after
/// it, is a break point. Concatenating the returned chunks yields `text` exactly.
///
/// # Arguments
/// * `text` - The text to split
/// * `config` - Maximum length and extra break characters
///
/// # Returns
/// Chunks in left-to-right order. Empty text yields no chunks.
///
/// # Errors
/// Returns `SegmentError::UnsplittableRun` if a window of `max_length` characters
/// contains no break point, and `SegmentError::ZeroMaxLength` for a zero limit.
pub fn split_text<'a>(text: &'a str, config: &SplitConfig) -> Result<Vec<Chunk<'a>>, SegmentError> {
    if config.max_length == 0 {
        return Err(SegmentError::ZeroMaxLength);
    }
    if text.is_empty() {
        return Ok(Vec::new());
    }

    // Byte offset of every char plus the end of the text, so char ranges map to str slices
    let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect();
    let breaks: Vec<bool> = text.chars().map(|c| is_break_point(c, &config.extra_split_punctuation)).collect();

    let len = breaks.len();
    let max_length = config.max_length;
    let mut chunks = Vec::with_capacity(len / max_length + 1);
    let mut start = 0;

    loop {
        if len - start <= max_length {
            chunks.push(Chunk { text: char_slice(text, &offsets, start, len), start });
            break;
        }

        // Last index of a full-length window; end + 1 < len holds here
        let end = start + max_length - 1;

        let cut = if breaks[end] || breaks[end + 1] {
            end
        } else {
            match (start..=end).rev().find(|&i| breaks[i]) {
                Some(j) => j,
                None => {
                    return Err(SegmentError::UnsplittableRun {
                        offset: start,
                        fragment: char_slice(text, &offsets, start, end + 1).to_string(),
                    });
                }
            }
        };

        chunks.push(Chunk { text: char_slice(text, &offsets, start, cut + 1), start });
        start = cut + 1;
    }

    debug!("Split {} chars into {} chunk(s) (max {})", len, chunks.len(), max_length);
    Ok(chunks)
}

/// Slice `text` by char positions `[from, to)`.
fn char_slice<'a>(text: &'a str, offsets: &[usize], from: usize, to: usize) -> &'a str {
    &text[offsets[from]..offsets[to]]
}
