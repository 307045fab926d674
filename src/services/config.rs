use crate::error::*;
use crate::tools::avatar::AvatarConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "config.json";

/// On-disk settings document. Every section is optional.
///
/// ```json
/// { "avatar": { "proxies": ["https://corsproxy.io/?{url}"], "cacheTtlHours": 24 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub avatar: AvatarConfig,
}

impl Settings {
    /// Read `config.json` from `dir`. A missing file yields the defaults; a
    /// malformed one is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let file = fs::File::open(&path)?;
        Ok(serde_json::from_reader(file)?)
    }
}
