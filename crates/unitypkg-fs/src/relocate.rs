use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::{Error, Result};

/// What to do when a rename crosses a device boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackStrategy {
    /// Copy to the destination, then delete the source. Not atomic.
    #[default]
    Copy,
    Error,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RelocateOptions {
    pub fallback: FallbackStrategy,
}

impl RelocateOptions {
    pub fn new() -> Self { Self::default() }

    pub fn fallback(mut self, fallback: FallbackStrategy) -> Self {
        self.fallback = fallback;
        self
    }
}

/// How a file reached its destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relocation {
    Renamed,
    Copied,
}

/// Move `src` to `dest`, replacing any existing file at `dest`.
///
/// A plain rename is attempted first. Only a cross-device failure triggers the
/// copy-then-delete fallback; if the process dies between the copy and the
/// delete both files may remain, and a partially written `dest` is possible.
/// Once the copy succeeds the move counts as done even if `src` cannot be
/// removed.
pub fn relocate(
    src: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    options: RelocateOptions,
) -> Result<Relocation> {
    relocate_with(
        src.as_ref(),
        dest.as_ref(),
        options,
        |s, d| std::fs::rename(s, d),
        |s| std::fs::remove_file(s),
    )
}

fn relocate_with<F, D>(
    src: &Path,
    dest: &Path,
    options: RelocateOptions,
    rename: F,
    remove: D,
) -> Result<Relocation>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
    D: FnOnce(&Path) -> io::Result<()>,
{
    match rename(src, dest) {
        Ok(()) => return Ok(Relocation::Renamed),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {}
        Err(e) => {
            return Err(Error::Write {
                path: dest.to_path_buf(),
                source: e,
            });
        }
    }

    if options.fallback == FallbackStrategy::Error {
        return Err(Error::CrossDevice {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        });
    }

    debug!(src = %src.display(), dest = %dest.display(), "rename crossed devices, copying");

    std::fs::copy(src, dest).map_err(|e| Error::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;
    if let Err(e) = remove(src) {
        warn!(src = %src.display(), "copied across devices but could not remove source: {e}");
    }

    Ok(Relocation::Copied)
}
