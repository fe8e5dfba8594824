//! Persistence layer for access tokens.
//!
//! This module contains:
//! - [`Token`] — the credential record (scope path, alias, secret)
//! - [`TokenMedium`] trait — the durable medium seam (`load` / `put` / `remove`)
//! - [`EphemeralMedium`] — in-memory medium, no persistence across runs
//! - [`FileTokenMedium`] — JSON-file medium with atomic replace
//! - [`TokenStore`] — in-memory cache over a medium, safe under concurrent use

mod medium;
mod record;
mod store;

#[cfg(feature = "file-storage")]
pub mod file_backed;

pub use medium::{EphemeralMedium, TokenMedium};
pub use record::Token;
pub use store::TokenStore;

#[cfg(feature = "file-storage")]
pub use file_backed::FileTokenMedium;

#[cfg(test)]
mod tests;
