//! Invalidation of cached directory metadata.

use std::path::Path;

/// Name of the cached aggregate-metadata artifact kept per directory.
pub const METADATA_FILE: &str = "maven-metadata.xml";

/// Checksum siblings that go stale together with the metadata file.
const CHECKSUM_EXTENSIONS: [&str; 2] = ["md5", "sha1"];

/// Deletes cached directory-listing metadata so it is regenerated lazily
/// on the next read.
///
/// Invalidation is best-effort: a stale cache will simply be rebuilt, so a
/// missing file is fine and a deletion failure is logged and swallowed —
/// it must never fail a deploy.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetadataInvalidator;

impl MetadataInvalidator {
    pub fn new() -> Self {
        Self
    }

    /// Drop the cached metadata (and its checksums) for one directory.
    pub async fn invalidate(&self, directory: &Path) {
        let metadata_file = directory.join(METADATA_FILE);
        self.remove_if_present(&metadata_file).await;

        for extension in CHECKSUM_EXTENSIONS {
            let mut checksum = metadata_file.clone().into_os_string();
            checksum.push(".");
            checksum.push(extension);
            self.remove_if_present(Path::new(&checksum)).await;
        }
    }

    async fn remove_if_present(&self, file: &Path) {
        match tokio::fs::remove_file(file).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    file = %file.display(),
                    error = %e,
                    "failed to invalidate cached metadata"
                );
            }
        }
    }
}
