//! Deploy configuration.
//!
//! An explicit value handed to the pipeline at construction — no component
//! reads ambient process-wide state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the deploy path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Whether artifact deployment is accepted at all.
    pub deploy_enabled: bool,
    /// Root of the repository storage tree.
    pub repositories_dir: PathBuf,
    /// Storage ceiling as a size string (`"10GB"`), or `None` for
    /// unlimited. Parsed by [`DiskQuota::of`](crate::quota::DiskQuota::of).
    pub disk_quota: Option<String>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            deploy_enabled: true,
            repositories_dir: PathBuf::from("repositories"),
            disk_quota: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DeployConfig::default();
        assert!(config.deploy_enabled);
        assert_eq!(config.repositories_dir, PathBuf::from("repositories"));
        assert!(config.disk_quota.is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = DeployConfig {
            deploy_enabled: false,
            repositories_dir: PathBuf::from("/srv/repo"),
            disk_quota: Some("10GB".to_string()),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: DeployConfig = serde_json::from_str(&json).unwrap();
        assert!(!back.deploy_enabled);
        assert_eq!(back.disk_quota.as_deref(), Some("10GB"));
    }
}
