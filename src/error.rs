//! Error types for the deploy path.
//!
//! No `anyhow` leakage. Explicit, typed errors. Expected request-level
//! failures (bad credentials, quota, disabled deployment) are NOT errors —
//! they are [`DeployRejection`](crate::pipeline::DeployRejection) values.

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The token store's durable medium could not complete a write.
    /// In-memory state is unchanged; the call is safe to retry.
    #[error("token persistence failed: {0}")]
    Persistence(String),

    /// Artifact bytes could not be written to the repository tree.
    #[error("artifact upload failed: {0}")]
    Upload(String),
}

impl DeployError {
    /// Whether this error might be recoverable by retry.
    ///
    /// Persistence failures are typically an external lock on the token
    /// file and clear on their own once the other holder releases it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DeployError::Persistence(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeployError::Persistence("tokens file locked".to_string());
        assert_eq!(
            err.to_string(),
            "token persistence failed: tokens file locked"
        );

        let err = DeployError::Upload("disk full".to_string());
        assert_eq!(err.to_string(), "artifact upload failed: disk full");
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(DeployError::Persistence("test".to_string()).is_recoverable());
        assert!(!DeployError::Upload("test".to_string()).is_recoverable());
    }
}
