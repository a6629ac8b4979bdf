//! Text segmentation for the length-limited synthesis endpoint.
//!
//! Splits long text into chunks that fit the per-request limit, cutting only at
//! whitespace or punctuation so no word is ever broken across two requests.

mod splitter;

pub use splitter::{Chunk, DEFAULT_MAX_LENGTH, SegmentError, SplitConfig, is_break_point, split_text};
