//! Mapping of request paths onto the repository storage tree.

use std::path::PathBuf;

/// Pure resolution of a request path to a storage location.
///
/// The pipeline treats this as an external collaborator: it never inspects
/// the request path itself, only the resolved file. `None` means the path
/// cannot map to a file inside the tree and the request is refused.
pub trait RepositoryLayout: Send + Sync {
    fn resolve(&self, request_path: &str) -> Option<PathBuf>;
}

/// Default layout: request segments joined directly under one root.
///
/// `/releases/g/a/file.jar` resolves to `{root}/releases/g/a/file.jar`.
/// Traversal segments (`..`) and paths with no filename resolve to `None` —
/// an embedded server has no servlet container normalizing these away.
pub struct FlatLayout {
    root: PathBuf,
}

impl FlatLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl RepositoryLayout for FlatLayout {
    fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let mut target = self.root.clone();
        let mut depth = 0usize;

        for segment in request_path.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return None,
                segment => {
                    target.push(segment);
                    depth += 1;
                }
            }
        }

        (depth > 0).then_some(target)
    }
}
