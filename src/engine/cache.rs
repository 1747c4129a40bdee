use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use serde::{Deserialize, Serialize};

use crate::error::{ParlintError, Result};
use crate::report::Message;

const CACHE_VERSION: u32 = 1;

/// Cached findings for one file, validated by metadata only. The cache
/// format is owned by the engine; the orchestrator never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// File modification time (seconds since epoch)
    pub mtime: u64,
    /// File size in bytes
    pub size: u64,
    pub messages: Vec<Message>,
}

impl CacheEntry {
    #[must_use]
    pub const fn metadata_matches(&self, mtime: u64, size: u64) -> bool {
        self.mtime == mtime && self.size == size
    }
}

/// Persistent analysis results keyed by absolute file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCache {
    version: u32,
    files: HashMap<String, CacheEntry>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: CACHE_VERSION,
            files: HashMap::new(),
        }
    }

    /// Load the cache, falling back to an empty one if the file is
    /// missing, unreadable, unparsable or from another version. A stale
    /// cache is never an error, it just means re-analyzing.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::new();
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(cache) if cache.version == CACHE_VERSION => cache,
            _ => Self::new(),
        }
    }

    /// # Errors
    /// Returns an error if the cache file cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json).map_err(|source| ParlintError::FileWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn get_if_fresh(&self, path: &str, mtime: u64, size: u64) -> Option<&CacheEntry> {
        self.files
            .get(path)
            .filter(|entry| entry.metadata_matches(mtime, size))
    }

    pub fn set(&mut self, path: &str, mtime: u64, size: u64, messages: Vec<Message>) {
        self.files.insert(
            path.to_string(),
            CacheEntry {
                mtime,
                size,
                messages,
            },
        );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Modification time (seconds since epoch) and size of a file, if it can
/// be statted.
#[must_use]
pub fn file_metadata(path: &Path) -> Option<(u64, u64)> {
    let metadata = fs::metadata(path).ok()?;
    let mtime = metadata
        .modified()
        .ok()?
        .duration_since(UNIX_EPOCH)
        .ok()?
        .as_secs();
    Some((mtime, metadata.len()))
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
