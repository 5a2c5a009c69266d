use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("staging directory unavailable under '{parent}': {source}")]
    StagingUnavailable { parent: PathBuf, source: io::Error },

    #[error("failed to remove staging directory '{path}': {source}")]
    Release { path: PathBuf, source: io::Error },

    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot move '{src}' to '{dest}': source and destination are on different devices")]
    CrossDevice { src: PathBuf, dest: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
