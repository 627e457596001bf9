//! Stateless pagination over text and record sequences.
//!
//! One contract, two parameterizations: raw map markup is split into
//! character chunks, extracted identifier lists into record chunks. Both are
//! pure functions of `(sequence, size, index)` — no caching, no state — so
//! any client can re-request any page and get the identical slice.

use crate::error::{MapError, Result};

/// Default characters per text chunk.
pub const TEXT_CHUNK_SIZE: usize = 5000;
/// Default records per list chunk.
pub const RECORD_CHUNK_SIZE: usize = 1000;

/// One page of a chunked sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: T,
    pub index: usize,
    pub total: usize,
}

/// Number of chunks a sequence of `len` items splits into at `size` per
/// chunk. An empty sequence has zero chunks, so every index into it is out
/// of range.
pub fn total_chunks(len: usize, size: usize) -> usize {
    assert!(size > 0, "chunk size must be non-zero");
    if len == 0 {
        0
    } else {
        len.div_ceil(size)
    }
}

/// Slice page `index` out of `text`, `size` characters per page.
///
/// Counts Unicode scalar values, never bytes, so a page boundary cannot
/// split a code point and concatenating pages 0..total reproduces the input
/// byte-exactly.
pub fn text_page(text: &str, size: usize, index: usize) -> Result<Page<String>> {
    let len = text.chars().count();
    let total = total_chunks(len, size);
    if index >= total {
        return Err(MapError::ChunkOutOfRange { index, total });
    }
    let content: String = text.chars().skip(index * size).take(size).collect();
    Ok(Page {
        content,
        index,
        total,
    })
}

/// Slice page `index` out of `records`, `size` records per page.
pub fn record_page<T: Clone>(records: &[T], size: usize, index: usize) -> Result<Page<Vec<T>>> {
    let total = total_chunks(records.len(), size);
    if index >= total {
        return Err(MapError::ChunkOutOfRange { index, total });
    }
    let start = index * size;
    let end = (start + size).min(records.len());
    Ok(Page {
        content: records[start..end].to_vec(),
        index,
        total,
    })
}
