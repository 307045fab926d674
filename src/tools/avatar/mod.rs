//! Avatar Tools
//!
//! Best-effort profile picture lookup. Nothing here ever fails the caller:
//! every path ends in `Some(url)` or `None`.

mod cache;
mod client;
mod strategies;
pub mod types;
mod utils;

pub use cache::AvatarCache;
pub use strategies::ProxyAvatars;
pub use types::*;

use crate::services::ActivityLogger;
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};

/// Maps a username to an avatar URL, or `None` when unknown.
#[async_trait]
pub trait AvatarResolver: Send + Sync {
    async fn resolve(&self, username: &str) -> Option<String>;
}

/// Resolver that never finds anything. Used when network lookups are off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAvatars;

#[async_trait]
impl AvatarResolver for NoAvatars {
    async fn resolve(&self, _username: &str) -> Option<String> {
        None
    }
}

/// Consults an [`AvatarCache`] before the wrapped resolver, and remembers
/// what the wrapped resolver finds.
///
/// Cache file failures never change the answer; they go to the logger when
/// one is attached.
pub struct CachedAvatars<R> {
    inner: R,
    cache: AvatarCache,
    logger: Option<ActivityLogger>,
}

impl<R: AvatarResolver> CachedAvatars<R> {
    pub fn new(inner: R, cache: AvatarCache) -> Self {
        Self {
            inner,
            cache,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: ActivityLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn cache(&self) -> &AvatarCache {
        &self.cache
    }

    fn report(&self, username: &str, err: &crate::FollowbackError) {
        if let Some(logger) = &self.logger {
            let _ = logger.error(Some(username), "avatar_cache", Some(&err.to_string()));
        }
    }
}

#[async_trait]
impl<R: AvatarResolver> AvatarResolver for CachedAvatars<R> {
    async fn resolve(&self, username: &str) -> Option<String> {
        match self.cache.get(username) {
            Ok(Some(url)) => return Some(url),
            Ok(None) => {}
            Err(e) => self.report(username, &e),
        }
        let url = self.inner.resolve(username).await?;
        if let Err(e) = self.cache.insert(username, &url) {
            self.report(username, &e);
        }
        Some(url)
    }
}

/// Resolve many usernames with at most `concurrency` lookups in flight.
///
/// Results come back in input order.
pub async fn resolve_many<R>(
    resolver: &R,
    usernames: &[String],
    concurrency: usize,
) -> Vec<AvatarLookup>
where
    R: AvatarResolver + ?Sized,
{
    stream::iter(usernames.iter().cloned())
        .map(|username| async move {
            let avatar = resolver.resolve(&username).await;
            AvatarLookup { username, avatar }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}
