//! Persistence Bridge Module
//!
//! Serializes the three bounded article caches into a single versioned
//! JSON blob on disk and restores them at startup. Persistence is
//! best-effort: every failure on this path degrades to an empty snapshot
//! (or a skipped write) and the in-memory caches stay authoritative.
//!
//! Restoration is lenient per record: a malformed record is dropped alone
//! while the rest of the snapshot survives.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::CacheEntry;
use crate::error::{CacheError, Result};
use crate::models::{ArticleDetail, ArticleExtra};

// == Constants ==
/// Versioned name of the snapshot blob. Bump the suffix when the layout
/// changes; stale blobs under the old name are simply never read again.
pub const SNAPSHOT_FILE: &str = "article-cache-v1.json";

// == Persistent Snapshot ==
/// Serialized union of the three article caches, each as an ordered
/// sequence of `(article id, entry)` pairs.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentSnapshot {
    pub article_details: Vec<(u64, CacheEntry<ArticleDetail>)>,
    pub article_extras: Vec<(u64, CacheEntry<ArticleExtra>)>,
    pub article_merged_contents: Vec<(u64, CacheEntry<String>)>,
}

/// Read-side counterpart of [`PersistentSnapshot`]: records stay opaque
/// until decoded one by one, so a single bad record cannot poison the
/// rest of the blob.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawSnapshot {
    article_details: Vec<Value>,
    article_extras: Vec<Value>,
    article_merged_contents: Vec<Value>,
}

/// Decodes one domain's records, dropping malformed ones.
fn decode_records<T: DeserializeOwned>(raw: Vec<Value>, domain: &str) -> Vec<(u64, CacheEntry<T>)> {
    let mut records = Vec::with_capacity(raw.len());
    for value in raw {
        match serde_json::from_value::<(u64, CacheEntry<T>)>(value) {
            Ok(record) => records.push(record),
            Err(err) => debug!("Dropping malformed {} snapshot record: {}", domain, err),
        }
    }
    records
}

// == Snapshot Store ==
/// Reads and writes the snapshot blob in a single directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    /// Directory holding the blob
    dir: PathBuf,
}

impl SnapshotStore {
    /// Creates a store in the platform cache directory
    /// (`~/.cache/feed-cache/` on Linux).
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "feed-cache").ok_or_else(|| {
            CacheError::StorageUnavailable("no platform cache directory".to_string())
        })?;
        Ok(Self {
            dir: dirs.cache_dir().to_path_buf(),
        })
    }

    /// Creates a store over a specific directory.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }

    // == Read ==
    /// Reads the snapshot, degrading to an empty one on any failure.
    ///
    /// A missing blob is the normal first-run case; an unreadable or
    /// unparsable blob is treated the same way.
    pub fn read(&self) -> PersistentSnapshot {
        match self.try_read() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                debug!("No usable snapshot at {:?}: {}", self.path(), err);
                PersistentSnapshot::default()
            }
        }
    }

    fn try_read(&self) -> Result<PersistentSnapshot> {
        let content = fs::read_to_string(self.path())?;
        let raw: RawSnapshot = serde_json::from_str(&content)?;
        Ok(PersistentSnapshot {
            article_details: decode_records(raw.article_details, "article-detail"),
            article_extras: decode_records(raw.article_extras, "article-extra"),
            article_merged_contents: decode_records(raw.article_merged_contents, "merged-content"),
        })
    }

    // == Write ==
    /// Writes the snapshot. Best-effort: a failure is logged and
    /// swallowed, never surfaced to the caller.
    pub fn write(&self, snapshot: &PersistentSnapshot) {
        if let Err(err) = self.try_write(snapshot) {
            warn!("Snapshot write to {:?} failed: {}", self.path(), err);
        }
    }

    fn try_write(&self, snapshot: &PersistentSnapshot) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(snapshot)?;
        fs::write(self.path(), json)?;
        Ok(())
    }

    // == Clear ==
    /// Deletes the blob. A missing file is not an error.
    pub fn clear(&self) {
        if let Err(err) = fs::remove_file(self.path()) {
            if err.kind() != ErrorKind::NotFound {
                warn!("Snapshot delete at {:?} failed: {}", self.path(), err);
            }
        }
    }

    /// True when a blob exists on disk.
    #[allow(dead_code)]
    pub fn exists(&self) -> bool {
        self.path().exists()
    }
}
