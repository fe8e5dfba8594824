//! [`TokenStore`] — in-memory token cache over a durable medium.

use crate::error::DeployError;
use crate::token::{Token, TokenMedium};
use std::collections::HashMap;
use tokio::sync::{Mutex, RwLock};

/// Token store with an in-memory cache and durable write-through.
///
/// Mutations persist first, then update the cache, so a failed durable
/// write leaves both representations exactly as they were — the in-memory
/// view never runs ahead of the file. A single mutation lock serializes
/// `put`/`remove`; lookups only take the cache read lock and may run
/// concurrently with an in-flight mutation, observing the old or new record
/// but never a torn one.
pub struct TokenStore<M: TokenMedium> {
    cache: RwLock<HashMap<String, Token>>,
    medium: M,
    mutation: Mutex<()>,
}

impl<M: TokenMedium> TokenStore<M> {
    /// Open a store, loading the medium's durable state into the cache.
    pub async fn open(medium: M) -> Result<Self, DeployError> {
        let cache = medium.load().await?;
        tracing::debug!(tokens = cache.len(), "token store loaded");

        Ok(Self {
            cache: RwLock::new(cache),
            medium,
            mutation: Mutex::new(()),
        })
    }

    /// Insert or replace the record for `token.alias`.
    pub async fn put(&self, token: Token) -> Result<(), DeployError> {
        let _guard = self.mutation.lock().await;
        self.medium.put(&token).await?;
        self.cache.write().await.insert(token.alias.clone(), token);
        Ok(())
    }

    /// Issue a new token for the given scope. Replaces any token already
    /// registered under the alias.
    pub async fn issue(
        &self,
        path: impl Into<String>,
        alias: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Token, DeployError> {
        let token = Token::new(path, alias, secret);
        self.put(token.clone()).await?;
        Ok(token)
    }

    /// Look up a token by alias. Pure cache read, never fails.
    pub async fn get(&self, alias: &str) -> Option<Token> {
        self.cache.read().await.get(alias).cloned()
    }

    /// Delete the record for `alias`.
    ///
    /// Returns whether a record was actually deleted. If the durable remove
    /// fails the cached record stays in place and the call is safe to
    /// retry; repeated removes of an absent alias return `false` without
    /// touching the medium.
    pub async fn remove(&self, alias: &str) -> Result<bool, DeployError> {
        let _guard = self.mutation.lock().await;
        if !self.cache.read().await.contains_key(alias) {
            return Ok(false);
        }
        self.medium.remove(alias).await?;
        self.cache.write().await.remove(alias);
        Ok(true)
    }

    /// Number of live tokens.
    pub async fn count(&self) -> usize {
        self.cache.read().await.len()
    }

    /// Access the underlying durable medium.
    pub fn medium(&self) -> &M {
        &self.medium
    }
}
