//! Error taxonomy for the map-serving pipeline.

use thiserror::Error;

/// Errors a request pipeline can fail with. Each request either fully
/// succeeds or fails at exactly one of these stages.
#[derive(Debug, Error)]
pub enum MapError {
    /// The requested map identifier has no backing document.
    #[error("map not found")]
    NotFound,

    /// The requested chunk index is at or past the total chunk count.
    #[error("chunk index {index} out of range (total {total})")]
    ChunkOutOfRange { index: usize, total: usize },

    /// The stored document is not well-formed markup.
    #[error("malformed svg document: {0}")]
    Parse(String),

    /// Underlying I/O failure other than a missing document.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;
