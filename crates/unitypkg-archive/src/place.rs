use std::path::Path;

use unitypkg_fs::{RelocateOptions, Relocation, relocate};

use crate::error::{Error, Result};

/// Move a staged payload to a destination that already passed containment.
///
/// Missing parent directories are created first. An existing file at
/// `destination` is replaced where the platform's rename allows it.
pub fn place_payload(payload: &Path, destination: &Path, options: RelocateOptions) -> Result<Relocation> {
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreationFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    Ok(relocate(payload, destination, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_intermediate_directories() {
        let dir = tempdir().unwrap();
        let payload = dir.path().join("asset");
        std::fs::write(&payload, b"0123456789").unwrap();

        let dest = dir.path().join("out/Assets/Textures/Foo.png");
        let how = place_payload(&payload, &dest, RelocateOptions::new()).unwrap();

        assert_eq!(how, Relocation::Renamed);
        assert_eq!(std::fs::read(&dest).unwrap(), b"0123456789");
        assert!(!payload.exists());
    }

    #[test]
    fn existing_directories_are_fine() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("out/Assets")).unwrap();
        let payload = dir.path().join("asset");
        std::fs::write(&payload, b"x").unwrap();

        place_payload(&payload, &dir.path().join("out/Assets/x"), RelocateOptions::new()).unwrap();
        assert!(dir.path().join("out/Assets/x").is_file());
    }

    #[test]
    fn file_blocking_parent_is_directory_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Assets"), b"not a dir").unwrap();
        let payload = dir.path().join("asset");
        std::fs::write(&payload, b"x").unwrap();

        let err = place_payload(&payload, &dir.path().join("Assets/Foo.png"), RelocateOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::DirectoryCreationFailed { .. }));
        assert!(payload.exists());
    }

    #[test]
    fn directory_at_destination_is_fs_error() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("Assets/Foo.png");
        std::fs::create_dir_all(dest.join("child")).unwrap();
        let payload = dir.path().join("asset");
        std::fs::write(&payload, b"x").unwrap();

        let err = place_payload(&payload, &dest, RelocateOptions::new()).unwrap_err();
        assert!(matches!(err, Error::Fs(_)));
        assert!(!err.is_fatal());
    }
}
