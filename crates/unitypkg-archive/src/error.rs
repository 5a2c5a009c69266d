use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("archive not found: '{path}'")]
    ArchiveNotFound { path: PathBuf },

    #[error("failed to open archive '{path}': {source}")]
    ArchiveOpen { path: PathBuf, source: io::Error },

    #[error("'{path}' is not a gzip or tar container")]
    UnsupportedFormat { path: PathBuf },

    #[error("archive '{path}' is corrupted: {source}")]
    Corrupted { path: PathBuf, source: io::Error },

    #[error("cannot resolve output directory '{path}': {source}")]
    OutputRoot { path: PathBuf, source: io::Error },

    #[error("cannot resolve destination '{path}': {source}")]
    Destination { path: PathBuf, source: io::Error },

    #[error("'{resolved}' is outside of '{root}'")]
    PathEscape { resolved: String, root: PathBuf },

    #[error("failed to read pathname descriptor '{path}': {source}")]
    DescriptorRead { path: PathBuf, source: io::Error },

    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Fs(#[from] unitypkg_fs::Error),
}

impl Error {
    /// Whether this error ends the whole run rather than a single record.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ArchiveNotFound { .. }
                | Self::ArchiveOpen { .. }
                | Self::UnsupportedFormat { .. }
                | Self::Corrupted { .. }
                | Self::OutputRoot { .. }
                | Self::Fs(unitypkg_fs::Error::StagingUnavailable { .. })
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
