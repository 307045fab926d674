use super::client::build_client;
use super::types::AvatarConfig;
use super::utils::*;
use super::AvatarResolver;
use async_trait::async_trait;
use reqwest::Client;

/// Looks avatars up on the public profile page, fetched through each
/// configured proxy in turn.
pub struct ProxyAvatars {
    client: Client,
    config: AvatarConfig,
}

impl ProxyAvatars {
    pub fn new(config: AvatarConfig) -> Result<Self, String> {
        let client = build_client(config.timeout_ms)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AvatarConfig {
        &self.config
    }

    /// Proxy request URLs for `username`, in the order they are tried.
    pub fn request_urls(&self, username: &str) -> Vec<String> {
        let target = profile_url(&self.config.profile_url_template, username);
        self.config
            .proxies
            .iter()
            .map(|template| proxy_url(template, &target))
            .collect()
    }

    async fn fetch_page(&self, request_url: &str) -> Result<String, String> {
        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP status {}", status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read response: {}", e))?;

        Ok(unwrap_proxy_body(&body))
    }
}

#[async_trait]
impl AvatarResolver for ProxyAvatars {
    async fn resolve(&self, username: &str) -> Option<String> {
        for request_url in self.request_urls(username) {
            // Any failure moves on to the next proxy.
            let Ok(html) = self.fetch_page(&request_url).await else {
                continue;
            };
            if let Some(avatar) = avatar_from_html(&html) {
                return Some(avatar);
            }
        }
        None
    }
}
