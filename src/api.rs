use crate::error::FollowbackError;
use crate::services::{ActivityLogger, SessionKey, SessionStore, Settings};
use crate::tools::avatar::{
    self, AvatarCache, AvatarConfig, AvatarLookup, AvatarResolver, CachedAvatars, NoAvatars,
    ProxyAvatars,
};
use crate::tools::compare::non_followers;
use crate::tools::normalize::{normalize, NormalizeError};
use crate::types::*;
use std::path::Path;
use std::time::Instant;

const AVATAR_CACHE_FILE: &str = "avatar_cache.json";

/* ------------ logging helpers (never fail the caller) ------------ */

fn log_info(components: &Components, subject: Option<&str>, event: &str, details: &str) {
    if let Some(logger) = &components.logger {
        let _ = logger.info(subject, event, Some(details));
    }
}

fn log_error(components: &Components, subject: Option<&str>, event: &str, details: &str) {
    if let Some(logger) = &components.logger {
        let _ = logger.error(subject, event, Some(details));
    }
}

/* ------------ public facade components ------------ */

pub struct Components {
    pub logger: Option<ActivityLogger>,
    pub avatars: Box<dyn AvatarResolver>,
    pub avatar_concurrency: usize,
}

/// No logging, no network.
impl Default for Components {
    fn default() -> Self {
        Self {
            logger: None,
            avatars: Box::new(NoAvatars),
            avatar_concurrency: AvatarConfig::default().concurrency,
        }
    }
}

impl Components {
    /// Logger, settings and avatar cache all rooted at `dir`.
    pub fn for_data_dir(dir: &Path) -> crate::Result<Self> {
        let settings = Settings::load(dir)?;
        let logger = ActivityLogger::at(dir)?;
        let cache = AvatarCache::open(
            dir.join(AVATAR_CACHE_FILE),
            chrono::Duration::hours(settings.avatar.cache_ttl_hours),
        );
        let concurrency = settings.avatar.concurrency;
        let proxies = ProxyAvatars::new(settings.avatar).map_err(FollowbackError::Other)?;

        Ok(Self {
            avatars: Box::new(CachedAvatars::new(proxies, cache).with_logger(logger.clone())),
            logger: Some(logger),
            avatar_concurrency: concurrency,
        })
    }
}

/* ------------ inputs ------------ */

/// Validate one input, returning how many usernames it holds.
pub fn check_input(text: &str) -> Result<usize, NormalizeError> {
    normalize(text).map(|usernames| usernames.len())
}

/// Normalize both inputs, diff them, and remember inputs and result.
///
/// Both raw texts are saved even when one of them is rejected. Store
/// failures are logged and otherwise ignored.
pub fn compare<S: SessionStore>(
    store: &S,
    components: &Components,
    followers_text: &str,
    following_text: &str,
) -> Result<Comparison, CompareError> {
    let start_time = Instant::now();
    save(store, components, SessionKey::Followers, followers_text);
    save(store, components, SessionKey::Following, following_text);

    let normalized = normalize(followers_text)
        .map_err(CompareError::Followers)
        .and_then(|followers| {
            normalize(following_text)
                .map_err(CompareError::Following)
                .map(|following| (followers, following))
        });

    let (followers, following) = match normalized {
        Ok(pair) => pair,
        Err(e) => {
            let details = format!("failed in {}ms: {}", start_time.elapsed().as_millis(), e);
            log_error(components, None, "compare", &details);
            return Err(e);
        }
    };

    let comparison = Comparison {
        followers_count: followers.len(),
        following_count: following.len(),
        non_followers: non_followers(&following, &followers),
    };
    save_results(store, components, &comparison.non_followers);

    let details = format!(
        "succeeded in {}ms ({} of {} not following back)",
        start_time.elapsed().as_millis(),
        comparison.non_followers.len(),
        comparison.following_count
    );
    log_info(components, None, "compare", &details);
    Ok(comparison)
}

/* ------------ session ------------ */

/// Whatever the store remembers. Missing or unreadable values come back empty.
pub fn load_session<S: SessionStore>(store: &S) -> Session {
    Session {
        followers: load_text(store, SessionKey::Followers),
        following: load_text(store, SessionKey::Following),
        results: load_results(store),
    }
}

/// Drop `username` (exact match) from the stored results and return the rest.
pub fn remove_result<S: SessionStore>(
    store: &S,
    components: &Components,
    username: &str,
) -> Vec<String> {
    let mut results = load_results(store);
    let before = results.len();
    results.retain(|user| user != username);
    save_results(store, components, &results);

    let details = format!("removed {}, {} left", before - results.len(), results.len());
    log_info(components, Some(username), "remove_result", &details);
    results
}

pub fn clear_session<S: SessionStore>(store: &S, components: &Components) -> crate::Result<()> {
    for key in SessionKey::ALL {
        if let Err(e) = store.remove(key) {
            log_error(components, Some(key.name()), "clear_session", &e.to_string());
            return Err(e);
        }
    }
    log_info(components, None, "clear_session", "succeeded");
    Ok(())
}

fn load_text<S: SessionStore>(store: &S, key: SessionKey) -> String {
    store.get(key).ok().flatten().unwrap_or_default()
}

fn load_results<S: SessionStore>(store: &S) -> Vec<String> {
    store
        .get(SessionKey::Results)
        .ok()
        .flatten()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

fn save<S: SessionStore>(store: &S, components: &Components, key: SessionKey, value: &str) {
    if let Err(e) = store.set(key, value) {
        log_error(components, Some(key.name()), "save_session", &e.to_string());
    }
}

fn save_results<S: SessionStore>(store: &S, components: &Components, results: &[String]) {
    match serde_json::to_string(results) {
        Ok(raw) => save(store, components, SessionKey::Results, &raw),
        Err(e) => log_error(components, Some("results"), "save_session", &e.to_string()),
    }
}

/* ------------ avatars ------------ */

pub async fn resolve_avatar(components: &Components, username: &str) -> Option<String> {
    let start_time = Instant::now();
    let avatar = components.avatars.resolve(username).await;
    let details = format!(
        "{} in {}ms",
        if avatar.is_some() { "found" } else { "unknown" },
        start_time.elapsed().as_millis()
    );
    log_info(components, Some(username), "resolve_avatar", &details);
    avatar
}

pub async fn resolve_avatars(components: &Components, usernames: &[String]) -> Vec<AvatarLookup> {
    let start_time = Instant::now();
    let lookups =
        avatar::resolve_many(&*components.avatars, usernames, components.avatar_concurrency).await;
    let found = lookups.iter().filter(|l| l.avatar.is_some()).count();
    let details = format!(
        "{} of {} found in {}ms",
        found,
        lookups.len(),
        start_time.elapsed().as_millis()
    );
    log_info(components, None, "resolve_avatars", &details);
    lookups
}
