//! Map document storage.
//!
//! Maps live as `{id}.svg` files in a configured directory. Documents are
//! read byte-exact and re-fetched on every request; nothing is cached.

use crate::error::{MapError, Result};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::warn;

/// Storage seam consumed by the query surface.
pub trait MapStore: Send + Sync {
    /// Resolve a map identifier to its raw markup text.
    fn load(&self, map_id: &str) -> Result<String>;
}

/// Filesystem-backed store reading from a single maps directory.
pub struct FsMapStore {
    maps_dir: PathBuf,
}

impl FsMapStore {
    pub fn new(maps_dir: impl Into<PathBuf>) -> Self {
        Self {
            maps_dir: maps_dir.into(),
        }
    }
}

impl MapStore for FsMapStore {
    fn load(&self, map_id: &str) -> Result<String> {
        // Identifiers name files directly, so anything that could walk out
        // of the maps directory is treated as an unknown map.
        if !is_valid_map_id(map_id) {
            warn!("rejected map id {map_id:?}");
            return Err(MapError::NotFound);
        }

        let path = self.maps_dir.join(format!("{map_id}.svg"));
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(MapError::NotFound),
            Err(e) => Err(MapError::Io(e)),
        }
    }
}

fn is_valid_map_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\', '\0']) && !id.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(maps: &[(&str, &str)]) -> (tempfile::TempDir, FsMapStore) {
        let dir = tempfile::tempdir().unwrap();
        for (id, content) in maps {
            std::fs::write(dir.path().join(format!("{id}.svg")), content).unwrap();
        }
        let store = FsMapStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_load_returns_content_byte_exact() {
        let content = "<svg>\n  <g id=\"paths\"/>\r\n</svg>\n";
        let (_dir, store) = store_with(&[("map1", content)]);
        assert_eq!(store.load("map1").unwrap(), content);
    }

    #[test]
    fn test_unknown_map_is_not_found() {
        let (_dir, store) = store_with(&[("map1", "<svg/>")]);
        assert!(matches!(store.load("map2"), Err(MapError::NotFound)));
    }

    #[test]
    fn test_traversal_ids_rejected() {
        let (_dir, store) = store_with(&[("map1", "<svg/>")]);
        for id in ["../map1", "a/b", "..", "", "a\\b"] {
            assert!(matches!(store.load(id), Err(MapError::NotFound)), "{id:?}");
        }
    }
}
