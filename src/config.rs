//! Server configuration, fixed at startup.

use crate::chunk::{RECORD_CHUNK_SIZE, TEXT_CHUNK_SIZE};
use std::path::PathBuf;

/// Container id of the path layer in venue floor plans.
pub const PATH_CONTAINER_ID: &str = "paths";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP surface binds on.
    pub port: u16,
    /// Directory holding `{id}.svg` map documents.
    pub maps_dir: PathBuf,
    /// Characters per raw-markup chunk.
    pub text_chunk_size: usize,
    /// Records per identifier-list chunk.
    pub record_chunk_size: usize,
    /// Id of the `<g>` scoping the geometry pass.
    pub container_id: String,
    /// JSONL file persisting registered notification tokens.
    pub token_store_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            maps_dir: PathBuf::from("maps"),
            text_chunk_size: TEXT_CHUNK_SIZE,
            record_chunk_size: RECORD_CHUNK_SIZE,
            container_id: PATH_CONTAINER_ID.to_string(),
            token_store_path: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".mapserve")
                .join("tokens.jsonl"),
        }
    }
}
