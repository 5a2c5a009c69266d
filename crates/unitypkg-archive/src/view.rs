use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::extract::acquire_staging;
use crate::options::ExtractOptions;
use crate::record::ArchiveRecord;
use crate::sanitize::{ResolvedPath, resolve_pathname};
use crate::unpack::{ContainerUnpacker, TarUnpacker};

/// Resolved destinations of every asset in `archive`, sorted.
///
/// Nothing is written outside the staging directory, and no containment
/// check is made since no output root is involved.
pub fn list_package(archive: impl AsRef<Path>, options: &ExtractOptions) -> Result<Vec<ResolvedPath>> {
    list_with(&TarUnpacker, archive.as_ref(), options)
}

pub fn list_with<U: ContainerUnpacker + ?Sized>(
    unpacker: &U,
    archive: &Path,
    options: &ExtractOptions,
) -> Result<Vec<ResolvedPath>> {
    let staging = acquire_staging(options)?;
    let ids = unpacker.unpack(archive, staging.path())?;

    let mut paths = Vec::with_capacity(ids.len());
    for id in &ids {
        let Some(record) = ArchiveRecord::from_staged(id.as_str(), &staging.path().join(id)) else {
            debug!(record = %id, "skipping record without pathname or asset");
            continue;
        };
        match record.read_pathname() {
            Ok(raw) => paths.push(resolve_pathname(&raw, options.rules)),
            Err(e) => warn!(record = %id, "{e}"),
        }
    }
    paths.sort();

    staging.release();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::SanitizeRules;
    use crate::testing::StagedRecords;
    use tempfile::tempdir;

    fn rendered(paths: &[ResolvedPath]) -> Vec<&str> { paths.iter().map(ResolvedPath::as_str).collect() }

    #[test]
    fn listing_is_sorted() {
        let dir = tempdir().unwrap();
        let unpacker = StagedRecords::new()
            .asset("1", "Assets/b.txt\n", b"b")
            .asset("2", "Assets/a.txt\n", b"a")
            .asset("3", "Assets/c.txt\n", b"c");
        let options = ExtractOptions::new()
            .rules(SanitizeRules::Unix)
            .staging_parent(dir.path());

        let paths = list_with(&unpacker, Path::new("pkg"), &options).unwrap();
        assert_eq!(rendered(&paths), ["Assets/a.txt", "Assets/b.txt", "Assets/c.txt"]);
    }

    #[test]
    fn listing_skips_incomplete_and_keeps_unsafe() {
        let dir = tempdir().unwrap();
        let unpacker = StagedRecords::new()
            .record("folder", &[("pathname", b"Assets/Folder")])
            .asset("evil", "../../etc/passwd", b"x")
            .asset("ok", "Assets/ok", b"y");
        let options = ExtractOptions::new()
            .rules(SanitizeRules::Unix)
            .staging_parent(dir.path());

        let paths = list_with(&unpacker, Path::new("pkg"), &options).unwrap();
        assert_eq!(rendered(&paths), ["../../etc/passwd", "Assets/ok"]);
    }

    #[test]
    fn listing_is_deterministic_and_cleans_up() {
        let dir = tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        std::fs::create_dir(&scratch).unwrap();
        let unpacker = StagedRecords::new()
            .asset("x", "Z/What?.txt", b"")
            .asset("y", "A/CON", b"");
        let options = ExtractOptions::new()
            .rules(SanitizeRules::Windows)
            .staging_parent(&scratch);

        let first = list_with(&unpacker, Path::new("pkg"), &options).unwrap();
        let second = list_with(&unpacker, Path::new("pkg"), &options).unwrap();

        assert_eq!(first, second);
        assert_eq!(rendered(&first), ["A\\_CON", "Z\\What_.txt"]);
        assert_eq!(std::fs::read_dir(&scratch).unwrap().count(), 0);
    }
}
