//! User credential handling for imageboard APIs.
use serde::{Deserialize, Serialize};

/// API key and user id pair for imageboards that accept authenticated
/// queries.
///
/// Imageboards expect both halves of the pair, so a partial pair is treated
/// as if no credentials were supplied at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub user_id: String,
}

impl Credentials {
    /// Resolves raw constructor input into usable credentials.
    ///
    /// Returns `None` unless both fields are non-empty.
    #[must_use]
    pub fn resolve(api_key: &str, user_id: &str) -> Option<Self> {
        if api_key.is_empty() || user_id.is_empty() {
            return None;
        }

        Some(Self {
            api_key: api_key.to_string(),
            user_id: user_id.to_string(),
        })
    }
}
