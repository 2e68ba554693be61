use std::path::{Path, PathBuf};

use crate::error::MediaError;

/// Permanent binary storage for uploaded screenshots and derived renders.
///
/// Paths are store-relative strings (a leading `/` is tolerated). The
/// production deployment backs this with a remote object store; tests and
/// single-host setups use [`FsObjectStore`].
pub trait ObjectStore: Send + Sync {
    /// Fetch an object's bytes.
    fn get(&self, path: &str) -> Result<Vec<u8>, MediaError>;

    /// Upload a staged local file to `remote`.
    fn put(&self, local: &Path, remote: &str) -> Result<(), MediaError>;
}

/// Filesystem-rooted object store.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl ObjectStore for FsObjectStore {
    fn get(&self, path: &str) -> Result<Vec<u8>, MediaError> {
        Ok(std::fs::read(self.resolve(path))?)
    }

    fn put(&self, local: &Path, remote: &str) -> Result<(), MediaError> {
        let dest = self.resolve(remote);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(local, dest)?;
        Ok(())
    }
}
