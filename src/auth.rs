//! Token-based authentication for deploy requests.
//!
//! Read-only against the token store: authenticating never mutates
//! anything, and a failure is a classified value, not an error.

use crate::token::{TokenMedium, TokenStore};
use std::sync::Arc;

/// Basic credentials presented by an uploader.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub alias: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(alias: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("alias", &self.alias)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Successful authentication: the resolved alias plus the subtree it may
/// write to. Lives for one deploy request, never persisted.
#[derive(Debug, Clone)]
pub struct Session {
    pub alias: String,
    pub path: String,
}

/// Why authentication was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// No credentials were presented at all.
    MissingCredentials,
    /// Unknown alias or wrong secret — deliberately indistinguishable.
    InvalidCredentials,
    /// Valid token, but its scope does not cover the request path.
    InsufficientScope,
}

impl AuthFailure {
    /// User-visible message.
    pub fn message(&self) -> &'static str {
        match self {
            AuthFailure::MissingCredentials => "Authorization credentials are not specified",
            AuthFailure::InvalidCredentials => "Invalid authorization credentials",
            AuthFailure::InsufficientScope => "Invalid authorization scope",
        }
    }
}

/// Validates presented credentials against the token store.
pub struct Authenticator<M: TokenMedium> {
    tokens: Arc<TokenStore<M>>,
}

impl<M: TokenMedium> Authenticator<M> {
    pub fn new(tokens: Arc<TokenStore<M>>) -> Self {
        Self { tokens }
    }

    /// Resolve credentials into a [`Session`] authorized for `request_path`.
    pub async fn authenticate(
        &self,
        credentials: Option<&Credentials>,
        request_path: &str,
    ) -> Result<Session, AuthFailure> {
        let credentials = credentials.ok_or(AuthFailure::MissingCredentials)?;

        let token = self
            .tokens
            .get(&credentials.alias)
            .await
            .ok_or(AuthFailure::InvalidCredentials)?;

        if token.secret != credentials.secret {
            return Err(AuthFailure::InvalidCredentials);
        }

        if !token.covers(request_path) {
            return Err(AuthFailure::InsufficientScope);
        }

        Ok(Session {
            alias: token.alias,
            path: token.path,
        })
    }
}
