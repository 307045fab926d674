use crate::tools::normalize::NormalizeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which of the two inputs could not be normalized. Followers are checked first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("Followers JSON error: {0}")]
    Followers(NormalizeError),
    #[error("Following JSON error: {0}")]
    Following(NormalizeError),
}

/// Outcome of one compare run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub followers_count: usize,
    pub following_count: usize,
    pub non_followers: Vec<String>,
}

impl Comparison {
    /// One-line human summary.
    pub fn summary(&self) -> String {
        match self.non_followers.len() {
            0 => "Everyone you follow also follows you back!".to_string(),
            1 => "Found 1 user who doesn't follow you back".to_string(),
            n => format!("Found {n} users who don't follow you back"),
        }
    }
}

/// What the store remembers from the last run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub followers: String,
    pub following: String,
    pub results: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
