use super::types::CachedAvatar;
use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

type Entries = BTreeMap<String, CachedAvatar>;

/// Username → avatar URL cache with a freshness window.
///
/// Backed by a JSON file when given a path; in-memory otherwise. Write
/// failures are reported to the caller but never lose the in-memory entry.
pub struct AvatarCache {
    path: Option<PathBuf>,
    ttl: Duration,
    entries: Mutex<Entries>,
}

impl AvatarCache {
    pub fn in_memory(ttl: Duration) -> Self {
        Self {
            path: None,
            ttl,
            entries: Mutex::new(Entries::new()),
        }
    }

    /// Open a file-backed cache. A missing or corrupt file starts empty.
    pub fn open(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        let path = path.into();
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<Entries>(&raw).ok())
            .unwrap_or_default();
        Self {
            path: Some(path),
            ttl,
            entries: Mutex::new(entries),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, username: &str) -> Result<Option<String>> {
        self.get_at(username, Utc::now())
    }

    /// Fresh URL for `username` as of `now`. An expired record is dropped
    /// from memory even when rewriting the file fails.
    pub fn get_at(&self, username: &str, now: DateTime<Utc>) -> Result<Option<String>> {
        let mut entries = self.lock();
        let Some(cached) = entries.get(username) else {
            return Ok(None);
        };
        if now - cached.timestamp < self.ttl {
            return Ok(Some(cached.url.clone()));
        }

        entries.remove(username);
        self.persist(&entries)?;
        Ok(None)
    }

    pub fn insert(&self, username: &str, url: &str) -> Result<()> {
        self.insert_at(username, url, Utc::now())
    }

    pub fn insert_at(&self, username: &str, url: &str, now: DateTime<Utc>) -> Result<()> {
        let mut entries = self.lock();
        entries.insert(
            username.to_string(),
            CachedAvatar {
                url: url.to_string(),
                timestamp: now,
            },
        );
        self.persist(&entries)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        // A poisoned cache still holds usable entries.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, entries: &Entries) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}
