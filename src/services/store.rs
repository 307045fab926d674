use crate::error::*;
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The three things a session remembers between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionKey {
    /// Last-entered followers text, verbatim.
    Followers,
    /// Last-entered following text, verbatim.
    Following,
    /// Last computed result list, as a JSON array of strings.
    Results,
}

impl SessionKey {
    pub const ALL: [SessionKey; 3] = [
        SessionKey::Followers,
        SessionKey::Following,
        SessionKey::Results,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Followers => "followers",
            Self::Following => "following",
            Self::Results => "results",
        }
    }

    fn file_name(&self) -> &'static str {
        match self {
            Self::Followers => "followers.txt",
            Self::Following => "following.txt",
            Self::Results => "results.json",
        }
    }
}

pub trait SessionStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>>;
    fn set(&self, key: SessionKey, value: &str) -> Result<()>;
    fn remove(&self, key: SessionKey) -> Result<()>;
}

/// Platform data directory for session files, the avatar cache and the log.
pub fn default_data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from("io", "followback", "followback").ok_or_else(|| {
        FollowbackError::storage_error("initialization", "could not resolve data dir")
    })?;
    Ok(proj.data_local_dir().to_path_buf())
}

/// One file per [`SessionKey`] under a data directory.
pub struct LocalFsStore {
    root: PathBuf,
}

impl LocalFsStore {
    pub fn new() -> Result<Self> {
        Self::at(default_data_dir()?)
    }

    pub fn at(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: SessionKey) -> PathBuf {
        self.root.join(key.file_name())
    }
}

impl SessionStore for LocalFsStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>> {
        let p = self.path_for(key);
        if !p.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(p)?))
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> Result<()> {
        let p = self.path_for(key);
        if p.exists() {
            fs::remove_file(p)?;
        }
        Ok(())
    }
}

/// In-process store, for embedding and tests.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<SessionKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<SessionKey, String>>> {
        self.values
            .lock()
            .map_err(|_| FollowbackError::storage_error("lock", "memory store poisoned"))
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>> {
        Ok(self.values()?.get(&key).cloned())
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<()> {
        self.values()?.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> Result<()> {
        self.values()?.remove(&key);
        Ok(())
    }
}
