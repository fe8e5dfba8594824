//! Artifact Deploy Library
//!
//! The deploy path of a self-hosted artifact repository: accept uploaded
//! build artifacts, authenticate the uploader against a persistent token
//! store, enforce a soft storage quota, persist the artifact, and
//! invalidate stale directory metadata.
//!
//! # Design
//!
//! This library is the logic between the transport layer and the disk.
//! HTTP routing, response formatting, and request logging live outside;
//! you hand the pipeline a [`DeployRequest`] and get a [`DeployOutcome`]
//! back — status, message, and credentials-challenge flag included.
//! Token durability is abstracted behind the [`TokenMedium`] trait, with a
//! file-backed implementation behind the `file-storage` feature.
//!
//! # Usage
//!
//! ```ignore
//! use artifact_deploy_rs::{
//!     Credentials, DeployConfig, DeployError, DeployPipeline, DeployRequest,
//!     FileTokenMedium, TokenStore,
//! };
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let medium = FileTokenMedium::in_working_dir(&working_dir).await?;
//! let tokens = Arc::new(TokenStore::open(medium).await?);
//! tokens.issue("/releases/auth", "authtest", "secure").await?;
//!
//! let pipeline = DeployPipeline::from_config(&DeployConfig::default(), tokens);
//! let outcome = pipeline.deploy(DeployRequest {
//!     path: "/releases/auth/test/artifact-1.0.jar".to_string(),
//!     credentials: Some(Credentials::new("authtest", "secure")),
//!     body: upload_stream,
//! }).await;
//!
//! assert_eq!(outcome.status(), 200);
//! # Ok::<(), DeployError>(())
//! # });
//! ```

pub mod auth;
pub mod config;
pub mod console;
pub mod error;
pub mod layout;
pub mod metadata;
pub mod pipeline;
pub mod quota;
pub mod token;

// Re-export the main types at crate root for convenience
pub use auth::{AuthFailure, Authenticator, Credentials, Session};
pub use config::DeployConfig;
pub use console::RevokeCommand;
pub use error::DeployError;
pub use layout::{FlatLayout, RepositoryLayout};
pub use metadata::{MetadataInvalidator, METADATA_FILE};
pub use pipeline::{DeployOutcome, DeployPipeline, DeployRejection, DeployRequest};
pub use quota::DiskQuota;
pub use token::{EphemeralMedium, Token, TokenMedium, TokenStore};

#[cfg(feature = "file-storage")]
pub use token::FileTokenMedium;
