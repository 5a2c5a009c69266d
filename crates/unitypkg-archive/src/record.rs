use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the pathname descriptor inside a record directory.
pub const PATHNAME_FILE: &str = "pathname";
/// Name of the payload inside a record directory.
pub const ASSET_FILE: &str = "asset";

/// One staged record that carries a relocatable asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveRecord {
    pub id:       String,
    pub pathname: PathBuf,
    pub payload:  PathBuf,
}

impl ArchiveRecord {
    /// Validate a staged record directory.
    ///
    /// Returns `None` unless `dir` holds both a `pathname` file and an `asset`
    /// file. Folder assets and metadata-only records look like this and are
    /// expected, so this is not an error.
    pub fn from_staged(id: impl Into<String>, dir: &Path) -> Option<Self> {
        let pathname = dir.join(PATHNAME_FILE);
        let payload = dir.join(ASSET_FILE);
        if !pathname.is_file() || !payload.is_file() {
            return None;
        }
        Some(Self {
            id: id.into(),
            pathname,
            payload,
        })
    }

    /// Raw descriptor text. Invalid UTF-8 is replaced rather than rejected.
    pub fn read_pathname(&self) -> Result<String> {
        let bytes = std::fs::read(&self.pathname).map_err(|e| Error::DescriptorRead {
            path: self.pathname.clone(),
            source: e,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
