//! Containment checks (zip-slip prevention).
//!
//! Paths are made absolute, `.`/`..` are folded lexically, and the deepest
//! ancestor that exists on disk is canonicalized so symlinks already present
//! in the output tree are followed before the comparison. A candidate is
//! accepted only if it starts with the root followed by a separator.

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::sanitize::ResolvedPath;

/// The absolute, pre-resolved output root of one extraction run.
#[derive(Clone, Debug)]
pub struct ExtractionTarget {
    root: PathBuf,
}

impl ExtractionTarget {
    /// Resolve `root` once. It does not need to exist yet.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let resolved = resolve(root).map_err(|e| Error::OutputRoot {
            path: root.to_path_buf(),
            source: e,
        })?;
        Ok(Self { root: resolved })
    }

    pub fn root(&self) -> &Path { &self.root }

    /// Absolute destination for `path`, or [`Error::PathEscape`] if it would
    /// land outside the root. The returned path is the one that was checked.
    /// I/O failures while resolving are [`Error::Destination`], not escapes.
    pub fn contain(&self, path: &ResolvedPath) -> Result<PathBuf> {
        let escape = || Error::PathEscape {
            resolved: path.to_string(),
            root: self.root.clone(),
        };

        let joined = self.root.join(path.to_path_buf());
        let candidate = resolve(&joined).map_err(|e| Error::Destination {
            path: joined.clone(),
            source: e,
        })?;
        if is_within(&self.root, &candidate) {
            Ok(candidate)
        } else {
            Err(escape())
        }
    }
}

/// Whether `candidate`, joined onto `root`, stays strictly inside `root`.
pub fn is_contained(root: impl AsRef<Path>, candidate: impl AsRef<Path>) -> bool {
    let root = root.as_ref();
    let (Ok(resolved_root), Ok(resolved)) = (resolve(root), resolve(&root.join(candidate))) else {
        return false;
    };
    is_within(&resolved_root, &resolved)
}

fn is_within(root: &Path, candidate: &Path) -> bool {
    candidate
        .strip_prefix(root)
        .is_ok_and(|rest| !rest.as_os_str().is_empty())
}

fn resolve(path: &Path) -> io::Result<PathBuf> {
    let normalized = normalize_lexically(&std::path::absolute(path)?);

    let mut existing = normalized.as_path();
    let mut missing: Vec<OsString> = Vec::new();
    loop {
        match std::fs::canonicalize(existing) {
            Ok(mut canonical) => {
                canonical.extend(missing.iter().rev());
                return Ok(canonical);
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                let (Some(name), Some(parent)) = (existing.file_name(), existing.parent()) else {
                    return Ok(normalized);
                };
                missing.push(name.to_os_string());
                existing = parent;
            }
            Err(e) => return Err(e),
        }
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(part) => result.push(part),
            Component::RootDir => result.push(Component::RootDir),
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::CurDir => {}
        }
    }

    result
}
