//! Cache file storage.
//!
//! The whole cache is one JSON document under the repository root. There is
//! no locking: concurrent invocations race, the last writer wins, and a
//! reader that catches a half-written file sees an empty cache.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::entry::RevisionEntry;
use crate::error::{Result, StatusMarkError};

/// Directory under the repository root holding the cache.
pub const CACHE_DIR: &str = ".github-commit-status";

/// Cache file name inside [`CACHE_DIR`].
pub const CACHE_FILE: &str = "cache";

/// Path of the cache file for a repository root.
pub fn cache_path(repo_root: &Path) -> PathBuf {
    repo_root.join(CACHE_DIR).join(CACHE_FILE)
}

/// Revision → last observed status, persisted across invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCache {
    /// Entries keyed by full commit hash.
    #[serde(rename = "Revisions", default, deserialize_with = "nullable_map")]
    revisions: HashMap<String, RevisionEntry>,
}

fn nullable_map<'de, D>(
    deserializer: D,
) -> std::result::Result<HashMap<String, RevisionEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

impl StatusCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the cache from `path`.
    ///
    /// A missing file, or one that is empty or not valid JSON, yields an
    /// empty cache. Other read failures are errors.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cache at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(StatusMarkError::cache(path, e)),
        };

        match serde_json::from_slice(&content) {
            Ok(cache) => Ok(cache),
            Err(e) => {
                debug!("Ignoring unreadable cache {}: {}", path.display(), e);
                Ok(Self::new())
            }
        }
    }

    /// Write the full cache to `path`, replacing previous content.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StatusMarkError::cache(parent, e))?;
        }

        let json = serde_json::to_string(self).map_err(anyhow::Error::from)?;
        fs::write(path, json).map_err(|e| StatusMarkError::cache(path, e))?;

        debug!(
            "Saved {} cached revisions to {}",
            self.revisions.len(),
            path.display()
        );
        Ok(())
    }

    /// Stored entry for `revision`, if any.
    pub fn get(&self, revision: &str) -> Option<&RevisionEntry> {
        self.revisions.get(revision)
    }

    /// Stored entry for `revision`, or the never-fresh default.
    pub fn entry(&self, revision: &str) -> RevisionEntry {
        self.get(revision).copied().unwrap_or_default()
    }

    /// Insert or replace the entry for `revision`.
    pub fn put(&mut self, revision: impl Into<String>, entry: RevisionEntry) {
        self.revisions.insert(revision.into(), entry);
    }

    /// Number of cached revisions.
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// Whether the cache holds no revisions.
    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }
}
