use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the (percent-encoded) profile page URL.
pub const URL_PLACEHOLDER: &str = "{url}";

/// Placeholder replaced by the username.
pub const USERNAME_PLACEHOLDER: &str = "{username}";

/// Settings for best-effort avatar lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AvatarConfig {
    /// Proxy URL templates, tried in order. Each holds a `{url}` placeholder.
    pub proxies: Vec<String>,
    /// Profile page to look the avatar up on. Holds a `{username}` placeholder.
    pub profile_url_template: String,
    pub cache_ttl_hours: i64,
    pub timeout_ms: u64,
    /// How many lookups `resolve_many` runs at once.
    pub concurrency: usize,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            proxies: vec![
                "https://api.allorigins.win/get?url={url}".to_string(),
                "https://corsproxy.io/?{url}".to_string(),
            ],
            profile_url_template: "https://www.instagram.com/{username}/".to_string(),
            cache_ttl_hours: 7 * 24,
            timeout_ms: 10_000,
            concurrency: 4,
        }
    }
}

/// One avatar cache record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedAvatar {
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

/// A username paired with whatever avatar was found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarLookup {
    pub username: String,
    pub avatar: Option<String>,
}
