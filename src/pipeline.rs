//! Deploy pipeline.
//!
//! The gate between an uploaded byte stream and the repository tree:
//! feature flag → authentication → quota check → metadata invalidation →
//! write → quota accounting. Every expected failure comes back as a
//! classified [`DeployRejection`], never as a panic or a bare error — the
//! transport layer only has to render the envelope.

use crate::auth::{AuthFailure, Authenticator, Credentials};
use crate::config::DeployConfig;
use crate::layout::{FlatLayout, RepositoryLayout};
use crate::metadata::MetadataInvalidator;
use crate::quota::DiskQuota;
use crate::token::{TokenMedium, TokenStore};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWriteExt};

/// One deploy invocation from the transport layer.
pub struct DeployRequest<R> {
    /// Request path — storage target and authorization scope at once.
    pub path: String,
    /// Basic credentials, if any were presented.
    pub credentials: Option<Credentials>,
    /// The artifact body.
    pub body: R,
}

/// Why a deploy was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployRejection {
    /// Deployment is administratively disabled.
    Disabled,
    /// Authentication failed.
    Auth(AuthFailure),
    /// The soft quota is exhausted.
    OutOfSpace,
    /// The artifact bytes could not be written. Detail goes to the
    /// operator log, not the client.
    UploadFailed,
}

impl DeployRejection {
    /// HTTP-equivalent status for the boundary envelope.
    pub fn status(&self) -> u16 {
        match self {
            DeployRejection::UploadFailed => 500,
            _ => 401,
        }
    }

    /// User-visible message.
    pub fn message(&self) -> &'static str {
        match self {
            DeployRejection::Disabled => "Artifact deployment is disabled",
            DeployRejection::Auth(failure) => failure.message(),
            DeployRejection::OutOfSpace => "Out of disk space",
            DeployRejection::UploadFailed => "Failed to upload artifact",
        }
    }

    /// Whether the response should carry a credentials challenge.
    pub fn challenge(&self) -> bool {
        matches!(self, DeployRejection::Auth(_))
    }
}

/// Terminal result of a deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Artifact accepted. Response body is the literal `"Success"`.
    Success,
    /// Refused with a classified reason.
    Rejected(DeployRejection),
}

impl DeployOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeployOutcome::Success)
    }

    pub fn status(&self) -> u16 {
        match self {
            DeployOutcome::Success => 200,
            DeployOutcome::Rejected(rejection) => rejection.status(),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            DeployOutcome::Success => "Success",
            DeployOutcome::Rejected(rejection) => rejection.message(),
        }
    }

    pub fn challenge(&self) -> bool {
        match self {
            DeployOutcome::Success => false,
            DeployOutcome::Rejected(rejection) => rejection.challenge(),
        }
    }
}

/// The deploy pipeline.
///
/// Synchronous from the caller's viewpoint: one request runs front to back
/// on its worker with no internal coordination. Concurrent deploys to the
/// same path race at the filesystem — last write wins, and each request
/// still allocates its own quota share.
pub struct DeployPipeline<M: TokenMedium, L: RepositoryLayout = FlatLayout> {
    enabled: bool,
    authenticator: Authenticator<M>,
    quota: Arc<DiskQuota>,
    invalidator: MetadataInvalidator,
    layout: L,
}

impl<M: TokenMedium> DeployPipeline<M, FlatLayout> {
    /// Build a pipeline from configuration, with the default flat layout
    /// rooted at `config.repositories_dir`.
    pub fn from_config(config: &DeployConfig, tokens: Arc<TokenStore<M>>) -> Self {
        let quota = config
            .disk_quota
            .as_deref()
            .and_then(DiskQuota::of)
            .unwrap_or_else(DiskQuota::unlimited);

        Self::new(
            config.deploy_enabled,
            tokens,
            Arc::new(quota),
            FlatLayout::new(&config.repositories_dir),
        )
    }
}

impl<M: TokenMedium, L: RepositoryLayout> DeployPipeline<M, L> {
    pub fn new(
        enabled: bool,
        tokens: Arc<TokenStore<M>>,
        quota: Arc<DiskQuota>,
        layout: L,
    ) -> Self {
        Self {
            enabled,
            authenticator: Authenticator::new(tokens),
            quota,
            invalidator: MetadataInvalidator::new(),
            layout,
        }
    }

    /// Run one deploy request to its terminal outcome.
    pub async fn deploy<R>(&self, request: DeployRequest<R>) -> DeployOutcome
    where
        R: AsyncRead + Unpin + Send,
    {
        tracing::info!(path = %request.path, "DEPLOY request");

        if !self.enabled {
            return DeployOutcome::Rejected(DeployRejection::Disabled);
        }

        let session = match self
            .authenticator
            .authenticate(request.credentials.as_ref(), &request.path)
            .await
        {
            Ok(session) => session,
            Err(failure) => return DeployOutcome::Rejected(DeployRejection::Auth(failure)),
        };

        if !self.quota.has_usable_space() {
            return DeployOutcome::Rejected(DeployRejection::OutOfSpace);
        }

        let file = match self.layout.resolve(&request.path) {
            Some(file) => file,
            None => {
                tracing::error!(path = %request.path, "request path does not resolve to a repository file");
                return DeployOutcome::Rejected(DeployRejection::UploadFailed);
            }
        };

        // Whatever lands in this directory, its cached listing is stale —
        // invalidate before branching on the filename.
        if let Some(parent) = file.parent() {
            self.invalidator.invalidate(parent).await;
        }

        // Client-supplied metadata is discarded; the server regenerates it
        // from the directory on next read.
        let is_metadata = file
            .file_name()
            .map(|name| name.to_string_lossy().contains("maven-metadata"))
            .unwrap_or(false);
        if is_metadata {
            return DeployOutcome::Success;
        }

        match self.write_artifact(&file, request.body).await {
            Ok(bytes) => {
                self.quota.allocate(bytes);
                tracing::info!(
                    alias = %session.alias,
                    file = %file.display(),
                    bytes,
                    "DEPLOY succeeded"
                );
                DeployOutcome::Success
            }
            Err(e) => {
                // Full detail for the operator, a generic message for
                // the client.
                tracing::error!(path = %request.path, error = %e, "DEPLOY failed");
                DeployOutcome::Rejected(DeployRejection::UploadFailed)
            }
        }
    }

    /// Stream the body to the target path, replacing existing content.
    /// Returns the number of bytes written.
    async fn write_artifact<R>(&self, file: &std::path::Path, mut body: R) -> std::io::Result<u64>
    where
        R: AsyncRead + Unpin + Send,
    {
        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut target = tokio::fs::File::create(file).await?;
        let bytes = tokio::io::copy(&mut body, &mut target).await?;
        target.flush().await?;

        Ok(bytes)
    }
}
