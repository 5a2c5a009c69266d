use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::{Error, Result};

const PREFIX: &str = "unitypkg-";

/// Private temporary directory owning the expanded archive for one run.
///
/// The directory and everything under it is removed by [`StagingDir::release`]
/// or, if the handle is dropped first, by `Drop`. Removal failures are logged
/// and never returned to the run.
pub struct StagingDir {
    dir:  Option<TempDir>,
    path: PathBuf,
}

impl StagingDir {
    /// Create a staging directory under the platform temp location.
    pub fn acquire() -> Result<Self> {
        Self::acquire_in(std::env::temp_dir())
    }

    /// Create a staging directory under `parent`.
    pub fn acquire_in(parent: impl AsRef<Path>) -> Result<Self> {
        let parent = parent.as_ref();
        let dir = tempfile::Builder::new()
            .prefix(PREFIX)
            .tempdir_in(parent)
            .map_err(|e| Error::StagingUnavailable {
                parent: parent.to_path_buf(),
                source: e,
            })?;
        let path = dir.path().to_path_buf();
        debug!(path = %path.display(), "acquired staging directory");
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Remove the directory now, reporting failure instead of only logging it.
    pub fn try_release(mut self) -> Result<()> {
        match self.dir.take() {
            Some(dir) => dir.close().map_err(|e| Error::Release {
                path: self.path.clone(),
                source: e,
            }),
            None => Ok(()),
        }
    }

    /// Remove the directory now. Failure is logged, not escalated.
    pub fn release(self) {
        if let Err(e) = self.try_release() {
            warn!("{e}");
        }
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => debug!(path = %self.path.display(), "released staging directory"),
                Err(e) => warn!(
                    path = %self.path.display(),
                    "failed to remove staging directory: {e}"
                ),
            }
        }
    }
}
