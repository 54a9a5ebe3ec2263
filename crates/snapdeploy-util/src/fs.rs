//! Scoped scratch directories.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::errors::DeployError;

/// An ephemeral directory owned by exactly one scope.
///
/// The directory is removed by [`ScopedTempDir::close`]. If the value is
/// dropped without being closed (early return, panic), the inner
/// [`TempDir`] guard still removes it.
#[derive(Debug)]
pub struct ScopedTempDir {
    dir: TempDir,
}

impl ScopedTempDir {
    /// Create a new uniquely named, empty directory.
    ///
    /// With `parent = None` the directory lands in the system temp directory.
    pub fn new(parent: Option<&Path>, prefix: &str) -> Result<Self, DeployError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);
        let dir = match parent {
            Some(p) => builder.tempdir_in(p)?,
            None => builder.tempdir()?,
        };
        tracing::debug!("Created scratch directory {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory recursively.
    ///
    /// Removal failures are logged and swallowed.
    pub fn close(self) {
        let path: PathBuf = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => tracing::debug!("Removed scratch directory {}", path.display()),
            Err(e) => tracing::warn!("Failed to remove scratch directory {}: {e}", path.display()),
        }
    }
}

/// Run `body` inside a fresh scratch directory that is removed afterwards.
///
/// The directory is created before `body` runs; a creation failure aborts
/// without calling `body`. Removal happens on every exit path, and whatever
/// `body` returned (value or error) is passed through unchanged.
pub fn with_scoped_temp_dir<T, F>(parent: Option<&Path>, prefix: &str, body: F) -> miette::Result<T>
where
    F: FnOnce(&Path) -> miette::Result<T>,
{
    let scope = ScopedTempDir::new(parent, prefix)?;
    let result = body(scope.path());
    scope.close();
    result
}
