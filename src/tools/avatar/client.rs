use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{redirect, Client};
use std::time::Duration;

const REDIRECT_LIMIT: usize = 5;
const POOL_IDLE_TIMEOUT_SEC: u64 = 90;

const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Headers sent with every proxy request.
pub(crate) fn proxy_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DESKTOP_USER_AGENT));
    // allorigins answers with a JSON wrapper; corsproxy passes the page through
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/html;q=0.9, */*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.8"));
    headers
}

/// Build the reqwest client used for avatar lookups.
pub(crate) fn build_client(timeout_ms: u64) -> Result<Client, String> {
    Client::builder()
        .default_headers(proxy_headers())
        .redirect(redirect::Policy::limited(REDIRECT_LIMIT))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .timeout(Duration::from_millis(timeout_ms))
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC))
        .build()
        .map_err(|e| format!("Failed to build client: {}", e))
}
