use serde::Serialize;
use thiserror::Error;

/// Outcome of normalizing one input: usernames in input order, or the reason
/// the input was rejected.
pub type NormalizationResult = Result<Vec<String>, NormalizeError>;

/// Why an input could not be turned into a username list.
///
/// Every input maps to exactly one of these or to a non-empty list.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum NormalizeError {
    #[error("JSON input is empty")]
    EmptyInput,

    /// Carries the JSON parser's message verbatim.
    #[error("invalid JSON: {0}")]
    Syntax(String),

    #[error("unsupported JSON format, expected an array or a platform export")]
    UnsupportedShape,

    #[error("no valid usernames found in array")]
    NoUsernamesFound,
}
