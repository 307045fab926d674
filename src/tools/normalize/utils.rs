use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Top-level export keys, highest priority first.
pub(super) const EXPORT_KEYS: [&str; 2] = ["relationships_followers", "relationships_following"];

/// Flat object keys that may carry a username, highest priority first.
pub(super) const ALIAS_KEYS: [&str; 3] = ["username", "name", "value"];

pub(super) type Extractor = fn(&Map<String, Value>) -> Option<String>;

/// Export entry strategies, tried in order until one yields a username.
pub(super) const ENTRY_EXTRACTORS: [Extractor; 3] = [from_title, from_link_value, from_link_href];

// instagram.com/<name> or instagram.com/_u/<name>
static PROFILE_URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"instagram\.com(?:/_u)?/([^/?]+)").expect("valid regex"));

fn non_empty_trimmed(value: &Value) -> Option<String> {
    let trimmed = value.as_str()?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Records of the entry's `string_list_data` list that are objects.
fn link_records(entry: &Map<String, Value>) -> impl Iterator<Item = &Map<String, Value>> {
    entry
        .get("string_list_data")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// Strategy 1: the entry's own `title` label.
pub(super) fn from_title(entry: &Map<String, Value>) -> Option<String> {
    entry.get("title").and_then(non_empty_trimmed)
}

/// Strategy 2: the first link record carrying a `value`.
pub(super) fn from_link_value(entry: &Map<String, Value>) -> Option<String> {
    link_records(entry).find_map(|record| record.get("value").and_then(non_empty_trimmed))
}

/// Strategy 3: the first link record whose `href` is a profile URL.
pub(super) fn from_link_href(entry: &Map<String, Value>) -> Option<String> {
    link_records(entry).find_map(|record| {
        record
            .get("href")
            .and_then(Value::as_str)
            .and_then(username_from_profile_url)
    })
}

/// Username segment of a profile URL, if the URL is one.
pub fn username_from_profile_url(href: &str) -> Option<String> {
    PROFILE_URL_REGEX
        .captures(href)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

pub(super) fn extract_entry(entry: &Map<String, Value>) -> Option<String> {
    ENTRY_EXTRACTORS.iter().find_map(|extract| extract(entry))
}

fn extract_alias(entry: &Map<String, Value>) -> Option<String> {
    ALIAS_KEYS.iter().find_map(|key| {
        entry
            .get(*key)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    })
}

/// Usernames of a platform export, or `None` when the object is not one or
/// its relationship list yields nothing.
pub(super) fn extract_export(root: &Map<String, Value>) -> Option<Vec<String>> {
    let entries = EXPORT_KEYS
        .iter()
        .find_map(|key| root.get(*key).and_then(Value::as_array))?;

    let usernames: Vec<String> = entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(extract_entry)
        .collect();

    if usernames.is_empty() {
        None
    } else {
        Some(usernames)
    }
}

/// Usernames of a flat array. Entries that carry nothing are skipped.
pub(super) fn extract_array(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            // verbatim, except that an empty string is never a username
            Value::String(name) if !name.is_empty() => Some(name.clone()),
            Value::Object(entry) => extract_entry(entry).or_else(|| extract_alias(entry)),
            _ => None,
        })
        .collect()
}
