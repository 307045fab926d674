use super::types::{URL_PLACEHOLDER, USERNAME_PLACEHOLDER};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

static OG_IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[property='og:image'], meta[name='og:image']")
        .expect("valid og:image selector")
});
static JSONLD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("script[type='application/ld+json']").expect("valid jsonld selector")
});

static SIZE_TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"s\d{3,4}x\d{3,4}").expect("valid regex"));
static SCONTENT_PATH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(scontent[^/]+)/([^?]+)").expect("valid regex"));
static SHARED_DATA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"window\._sharedData\s*=\s*(\{.+?\});").expect("valid regex"));

const THUMBNAIL_SIZE: &str = "s150x150";

type HtmlExtractor = fn(&str) -> Option<String>;

/// Page-level avatar sources, most reliable first.
const AVATAR_EXTRACTORS: [HtmlExtractor; 3] = [from_og_image, from_jsonld, from_shared_data];

/// Profile page URL for `username`.
pub(crate) fn profile_url(template: &str, username: &str) -> String {
    template.replace(USERNAME_PLACEHOLDER, username)
}

/// Proxy request URL wrapping `target`, percent-encoded.
pub(crate) fn proxy_url(template: &str, target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    template.replace(URL_PLACEHOLDER, &encoded)
}

/// Page HTML from a proxy response: the `contents` field of a JSON wrapper,
/// or the body itself.
pub(crate) fn unwrap_proxy_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(obj)) => match obj.get("contents") {
            Some(Value::String(contents)) => contents.clone(),
            _ => body.to_string(),
        },
        _ => body.to_string(),
    }
}

/// Avatar URL found in a profile page, if any.
pub(crate) fn avatar_from_html(html: &str) -> Option<String> {
    AVATAR_EXTRACTORS.iter().find_map(|extract| extract(html))
}

/// Rewrite the first `sNNNxNNN` size token to the thumbnail size.
pub(crate) fn resize(url: &str) -> String {
    SIZE_TOKEN_REGEX.replace(url, THUMBNAIL_SIZE).into_owned()
}

/// Like [`resize`], but also inserts a size segment into CDN URLs that carry none.
pub(crate) fn resize_cdn(url: &str) -> String {
    let resized = resize(url);
    if resized.contains(THUMBNAIL_SIZE) || !resized.contains("scontent") {
        return resized;
    }
    SCONTENT_PATH_REGEX
        .replace(&resized, format!("$1/{THUMBNAIL_SIZE}/$2").as_str())
        .into_owned()
}

pub(super) fn from_og_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let avatar = document
        .select(&OG_IMAGE_SELECTOR)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(resize_cdn);
    avatar
}

pub(super) fn from_jsonld(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let avatar = document
        .select(&JSONLD_SELECTOR)
        .filter_map(|el| serde_json::from_str::<Value>(&el.text().collect::<String>()).ok())
        .flat_map(flatten_jsonld)
        .find_map(|obj| {
            obj.get("image")
                .and_then(image_url)
                .or_else(|| obj.pointer("/author/image").and_then(image_url))
        })
        .map(|url| resize(&url));
    avatar
}

pub(super) fn from_shared_data(html: &str) -> Option<String> {
    let raw = SHARED_DATA_REGEX.captures(html)?.get(1)?.as_str();
    let shared: Value = serde_json::from_str(raw).ok()?;
    let user = shared.pointer("/entry_data/ProfilePage/0/graphql/user")?;
    ["profile_pic_url_hd", "profile_pic_url"]
        .iter()
        .find_map(|key| {
            user.get(*key)
                .and_then(Value::as_str)
                .filter(|url| !url.is_empty())
        })
        .map(resize)
}

/// JSON-LD `image` may be a URL, a list of URLs, or an ImageObject.
fn image_url(value: &Value) -> Option<String> {
    match value {
        Value::String(url) if !url.trim().is_empty() => Some(url.trim().to_string()),
        Value::Array(items) => items.iter().find_map(image_url),
        Value::Object(obj) => obj.get("url").and_then(image_url),
        _ => None,
    }
}

fn flatten_jsonld(value: Value) -> Vec<Value> {
    match value {
        Value::Array(arr) => arr.into_iter().flat_map(flatten_jsonld).collect(),
        Value::Object(mut obj) => {
            if let Some(Value::Array(arr)) = obj.remove("@graph") {
                return arr.into_iter().flat_map(flatten_jsonld).collect();
            }
            vec![Value::Object(obj)]
        }
        _ => Vec::new(),
    }
}
