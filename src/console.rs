//! Operator commands against the token store.

use crate::token::{TokenMedium, TokenStore};

/// Revoke a token by alias.
///
/// Returns `true` only if a token existed and was durably removed.
/// An unknown alias or a persistence failure both come back `false`; the
/// persistence failure is logged and the command can simply be re-run once
/// the token file is writable again.
pub struct RevokeCommand {
    alias: String,
}

impl RevokeCommand {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
        }
    }

    pub async fn execute<M: TokenMedium>(&self, tokens: &TokenStore<M>) -> bool {
        match tokens.remove(&self.alias).await {
            Ok(true) => {
                tracing::info!(alias = %self.alias, "token revoked");
                true
            }
            Ok(false) => {
                tracing::info!(alias = %self.alias, "no token registered under alias");
                false
            }
            Err(e) => {
                tracing::error!(alias = %self.alias, error = %e, "failed to revoke token");
                false
            }
        }
    }
}
