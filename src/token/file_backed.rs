//! File-backed token medium.
//!
//! All tokens live in one JSON file (`tokens.json` by convention). Every
//! mutation is read-modify-write through a sibling temp file followed by an
//! atomic rename, so the live file is never observed truncated or
//! half-written. If the destination is obstructed — held by another process,
//! replaced by a directory, on a read-only mount — the rename fails, the
//! temp file is discarded, and prior contents stay intact.

use crate::error::DeployError;
use crate::token::{Token, TokenMedium};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File-backed implementation of [`TokenMedium`].
pub struct FileTokenMedium {
    tokens_file: PathBuf,
}

impl FileTokenMedium {
    /// Create a medium persisting to the given file. Parent directories are
    /// created eagerly; the file itself appears on first mutation.
    pub async fn new(tokens_file: PathBuf) -> Result<Self, DeployError> {
        if let Some(parent) = tokens_file.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DeployError::Persistence(format!("failed to create token store dir: {}", e))
            })?;
        }
        Ok(Self { tokens_file })
    }

    /// Create a medium at `{working_dir}/tokens.json`.
    pub async fn in_working_dir(working_dir: &Path) -> Result<Self, DeployError> {
        Self::new(working_dir.join("tokens.json")).await
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .tokens_file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "tokens.json".into());
        name.push(".tmp");
        self.tokens_file.with_file_name(name)
    }

    /// Read the current durable map. A file that exists but does not parse
    /// is treated the same way [`TokenMedium::load`] treats it — warn and
    /// start empty — otherwise a store that opened "empty" over a corrupt
    /// file could never accept a mutation again. I/O errors stay hard:
    /// they clear on retry, an unreadable disk does not.
    async fn read_current(&self) -> Result<HashMap<String, Token>, DeployError> {
        match tokio::fs::read_to_string(&self.tokens_file).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(tokens) => Ok(tokens),
                Err(e) => {
                    tracing::warn!(
                        file = %self.tokens_file.display(),
                        error = %e,
                        "tokens file is corrupt, treating it as empty"
                    );
                    Ok(HashMap::new())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(DeployError::Persistence(format!(
                "failed to read tokens file: {}",
                e
            ))),
        }
    }

    /// Serialize the full map to a temp file, then rename over the live
    /// file. Cleans up the temp file on any failure.
    async fn replace_with(&self, tokens: &HashMap<String, Token>) -> Result<(), DeployError> {
        let content = serde_json::to_string_pretty(tokens)
            .map_err(|e| DeployError::Persistence(format!("failed to serialize tokens: {}", e)))?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, content).await.map_err(|e| {
            DeployError::Persistence(format!("failed to write tokens temp file: {}", e))
        })?;

        if let Err(e) = tokio::fs::rename(&temp, &self.tokens_file).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(DeployError::Persistence(format!(
                "failed to replace tokens file: {}",
                e
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl TokenMedium for FileTokenMedium {
    async fn load(&self) -> Result<HashMap<String, Token>, DeployError> {
        self.read_current().await
    }

    async fn put(&self, token: &Token) -> Result<(), DeployError> {
        let mut tokens = self.read_current().await?;
        tokens.insert(token.alias.clone(), token.clone());
        self.replace_with(&tokens).await
    }

    async fn remove(&self, alias: &str) -> Result<(), DeployError> {
        let mut tokens = self.read_current().await?;
        if tokens.remove(alias).is_none() {
            return Ok(());
        }
        self.replace_with(&tokens).await
    }
}
