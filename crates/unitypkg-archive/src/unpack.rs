//! Container expansion into the staging directory.
//!
//! Packages are gzip-compressed tarballs whose top level holds one directory
//! per record. The container is expanded as-is; deciding which directories are
//! records is left to [`crate::record`].

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::{Component, Path};

use flate2::read::GzDecoder;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Expands a package container into a staging directory.
pub trait ContainerUnpacker {
    /// Expand `archive` into `staging` and return the record ids (top-level
    /// directory names) in the order the container yields them.
    fn unpack(&self, archive: &Path, staging: &Path) -> Result<Vec<String>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerFormat {
    TarGz,
    Tar,
}

/// Identify the container from its leading bytes.
pub fn detect_format(header: &[u8]) -> Option<ContainerFormat> {
    match header {
        [0x1F, 0x8B, ..] => Some(ContainerFormat::TarGz),
        _ if header.len() >= 512 && header[257..262] == *b"ustar" => Some(ContainerFormat::Tar),
        _ => None,
    }
}

/// Default unpacker for gzip-compressed and plain tar packages.
#[derive(Clone, Copy, Debug, Default)]
pub struct TarUnpacker;

impl ContainerUnpacker for TarUnpacker {
    fn unpack(&self, archive: &Path, staging: &Path) -> Result<Vec<String>> {
        let open_err = |e: io::Error| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::ArchiveNotFound {
                    path: archive.to_path_buf(),
                }
            } else {
                Error::ArchiveOpen {
                    path: archive.to_path_buf(),
                    source: e,
                }
            }
        };

        let mut file = File::open(archive).map_err(open_err)?;
        if file.metadata().map_err(open_err)?.is_dir() {
            return Err(Error::ArchiveOpen {
                path: archive.to_path_buf(),
                source: io::Error::other("is a directory"),
            });
        }

        let mut header = Vec::with_capacity(512);
        (&mut file).take(512).read_to_end(&mut header).map_err(open_err)?;
        file.rewind().map_err(open_err)?;

        let reader = BufReader::new(file);
        match detect_format(&header) {
            Some(ContainerFormat::TarGz) => expand(GzDecoder::new(reader), archive, staging),
            Some(ContainerFormat::Tar) => expand(reader, archive, staging),
            None => Err(Error::UnsupportedFormat {
                path: archive.to_path_buf(),
            }),
        }
    }
}

fn expand<R: Read>(reader: R, archive: &Path, staging: &Path) -> Result<Vec<String>> {
    let corrupted = |e: io::Error| Error::Corrupted {
        path: archive.to_path_buf(),
        source: e,
    };

    let mut tar = tar::Archive::new(reader);
    tar.set_preserve_permissions(false);
    tar.set_unpack_xattrs(false);

    let mut ids = Vec::new();
    let mut seen = HashSet::new();

    for entry in tar.entries().map_err(corrupted)? {
        let mut entry = entry.map_err(corrupted)?;
        let path = entry.path().map_err(corrupted)?.into_owned();

        let Some(id) = record_id(&path) else {
            debug!(entry = %path.display(), "skipping entry outside any record");
            continue;
        };

        let kind = entry.header().entry_type();
        if !kind.is_file() && !kind.is_dir() {
            debug!(entry = %path.display(), ?kind, "skipping non-file entry");
            continue;
        }

        match entry.unpack_in(staging) {
            Ok(true) => {}
            Ok(false) => {
                warn!(entry = %path.display(), "skipping archive entry that escapes the staging area");
                continue;
            }
            Err(e) => {
                warn!(entry = %path.display(), "skipping archive entry that could not be unpacked: {e}");
                continue;
            }
        }

        if seen.insert(id.clone()) {
            ids.push(id);
        }
    }

    Ok(ids)
}

/// First normal component of an entry path, ignoring a leading `./`.
fn record_id(path: &Path) -> Option<String> {
    match path.components().find(|c| *c != Component::CurDir)? {
        Component::Normal(id) => Some(id.to_string_lossy().into_owned()),
        _ => None,
    }
}
