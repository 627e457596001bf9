//! Notification destination registry and batched dispatch boundary.
//!
//! The map server only owns the registration list: an append-only JSONL
//! store of destination tokens with dedup on insert. Actual push delivery
//! goes through the [`Notifier`] seam; the default implementation just logs
//! the dispatch, so production transports plug in without touching the
//! serving pipeline.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Maximum destinations per dispatch batch.
pub const MAX_BATCH: usize = 100;

/// One persisted registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenRecord {
    token: String,
    registered_at: String,
}

/// Per-token delivery outcome of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryStatus {
    pub token: String,
    pub delivered: bool,
}

/// Registration list with an explicit open/read/append/flush lifecycle.
pub trait TokenStore: Send + Sync {
    /// All registered tokens in registration order.
    fn read_all(&self) -> Result<Vec<String>>;
    /// Register a token. Returns `false` if it was already registered.
    fn append(&mut self, token: &str) -> Result<bool>;
    fn flush(&mut self) -> Result<()>;
}

/// Append-only JSONL token store, one record per line.
pub struct FsTokenStore {
    file: File,
    tokens: Vec<String>,
    seen: HashSet<String>,
}

impl FsTokenStore {
    /// Open the store, replaying any existing records.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut tokens = Vec::new();
        let mut seen = HashSet::new();
        if let Ok(existing) = std::fs::read_to_string(path) {
            for line in existing.lines() {
                if let Ok(rec) = serde_json::from_str::<TokenRecord>(line) {
                    if seen.insert(rec.token.clone()) {
                        tokens.push(rec.token);
                    }
                }
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open token store: {}", path.display()))?;

        Ok(Self { file, tokens, seen })
    }
}

impl TokenStore for FsTokenStore {
    fn read_all(&self) -> Result<Vec<String>> {
        Ok(self.tokens.clone())
    }

    fn append(&mut self, token: &str) -> Result<bool> {
        if token.is_empty() || self.seen.contains(token) {
            return Ok(false);
        }
        let record = TokenRecord {
            token: token.to_string(),
            registered_at: Utc::now().to_rfc3339(),
        };
        writeln!(self.file, "{}", serde_json::to_string(&record)?)?;
        self.seen.insert(token.to_string());
        self.tokens.push(token.to_string());
        Ok(true)
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }
}

/// Push-delivery seam. One call covers at most [`MAX_BATCH`] tokens.
pub trait Notifier: Send + Sync {
    fn send_batch(&self, tokens: &[String], title: &str, body: &str) -> Vec<DeliveryStatus>;
}

/// Default notifier: records the dispatch in the log and reports success.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send_batch(&self, tokens: &[String], title: &str, _body: &str) -> Vec<DeliveryStatus> {
        info!("dispatching {:?} to {} destination(s)", title, tokens.len());
        tokens
            .iter()
            .map(|t| DeliveryStatus {
                token: t.clone(),
                delivered: true,
            })
            .collect()
    }
}

/// Fan a full token list out to the notifier in batches of [`MAX_BATCH`].
pub fn dispatch(
    notifier: &dyn Notifier,
    tokens: &[String],
    title: &str,
    body: &str,
) -> Vec<DeliveryStatus> {
    tokens
        .chunks(MAX_BATCH)
        .flat_map(|batch| notifier.send_batch(batch, title, body))
        .collect()
}
