//! [`Token`] — the on-disk and in-memory credential record.

use serde::{Deserialize, Serialize};

/// An access token authorizing deploys under one repository subtree.
///
/// Tokens are replaced wholesale or removed — there is no partial update.
/// The `alias` is the store's lookup key and unique across live tokens.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Repository path prefix this token may deploy under.
    pub path: String,
    /// Unique, human-readable identifier.
    pub alias: String,
    /// Shared secret. Compared, never logged.
    pub secret: String,
}

impl Token {
    pub fn new(
        path: impl Into<String>,
        alias: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            alias: alias.into(),
            secret: secret.into(),
        }
    }

    /// Whether this token's scope covers the given request path.
    pub fn covers(&self, request_path: &str) -> bool {
        request_path.starts_with(&self.path)
    }
}

// Manual impl so the secret never leaks through debug logging.
impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("path", &self.path)
            .field("alias", &self.alias)
            .field("secret", &"<redacted>")
            .finish()
    }
}
