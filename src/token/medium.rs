//! [`TokenMedium`] trait definition and the ephemeral fallback.

use crate::error::DeployError;
use crate::token::Token;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Durable medium for token records.
///
/// The [`TokenStore`](crate::token::TokenStore) owns the in-memory view; the
/// medium owns durability. Every method must be all-or-nothing: a failed
/// `put` or `remove` leaves prior durable contents intact so the caller can
/// retry once the obstruction clears.
#[async_trait]
pub trait TokenMedium: Send + Sync {
    /// Read the full durable state. Missing or unreadable state on first
    /// run yields an empty map, not an error.
    async fn load(&self) -> Result<HashMap<String, Token>, DeployError>;

    /// Durably insert or replace one record.
    async fn put(&self, token: &Token) -> Result<(), DeployError>;

    /// Durably delete one record. Absent alias is not an error.
    async fn remove(&self, alias: &str) -> Result<(), DeployError>;
}

/// In-memory medium — nothing survives the process.
///
/// Used when the `file-storage` feature is off, and as the failure-injection
/// seam in tests: flip `fail_writes` and every mutation reports a
/// [`DeployError::Persistence`] without touching stored state.
#[derive(Default)]
pub struct EphemeralMedium {
    records: Mutex<HashMap<String, Token>>,
    fail_writes: std::sync::atomic::AtomicBool,
}

impl EphemeralMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `put`/`remove` calls fail, simulating an
    /// externally locked medium.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), DeployError> {
        if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(DeployError::Persistence(
                "medium is locked by another writer".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TokenMedium for EphemeralMedium {
    async fn load(&self) -> Result<HashMap<String, Token>, DeployError> {
        Ok(self.records.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn put(&self, token: &Token) -> Result<(), DeployError> {
        self.check_writable()?;
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.alias.clone(), token.clone());
        Ok(())
    }

    async fn remove(&self, alias: &str) -> Result<(), DeployError> {
        self.check_writable()?;
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(alias);
        Ok(())
    }
}
