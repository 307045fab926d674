//! Normalize Tools
//!
//! Turns a pasted followers/following export into a plain list of usernames.
//! Two shapes are understood: a flat array (of strings, or of objects with a
//! username-like field) and the nested platform data export.

mod tests;
pub mod types;
mod utils;

pub use types::*;
pub use utils::username_from_profile_url;
use utils::*;

use serde_json::Value;

/// Normalize a JSON text blob into usernames, in input order.
///
/// Duplicates are kept. Names taken from structured export fields are
/// trimmed; plain array strings are passed through untouched.
///
/// # Examples
/// ```
/// use followback::tools::normalize::{normalize, NormalizeError};
///
/// assert_eq!(normalize(r#"["a", "b", "a"]"#).unwrap(), vec!["a", "b", "a"]);
/// assert_eq!(normalize("42"), Err(NormalizeError::UnsupportedShape));
/// ```
pub fn normalize(text: &str) -> NormalizationResult {
    if text.trim().is_empty() {
        return Err(NormalizeError::EmptyInput);
    }

    let parsed: Value =
        serde_json::from_str(text).map_err(|e| NormalizeError::Syntax(e.to_string()))?;

    // An export whose relationship list yields nothing falls through to the
    // array handling below rather than failing here.
    if let Value::Object(root) = &parsed {
        if let Some(usernames) = extract_export(root) {
            return Ok(usernames);
        }
    }

    match &parsed {
        Value::Array(items) => {
            let usernames = extract_array(items);
            if usernames.is_empty() {
                Err(NormalizeError::NoUsernamesFound)
            } else {
                Ok(usernames)
            }
        }
        _ => Err(NormalizeError::UnsupportedShape),
    }
}

/// Username of a single export entry (or flat array object), if any.
pub fn entry_username(entry: &Value) -> Option<String> {
    entry.as_object().and_then(extract_entry)
}
