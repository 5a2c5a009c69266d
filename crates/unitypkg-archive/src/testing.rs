use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::unpack::ContainerUnpacker;

/// Writes records straight into the staging directory, skipping the container.
#[derive(Default)]
pub(crate) struct StagedRecords {
    records:     Vec<(String, Vec<(String, Vec<u8>)>)>,
    pub staging: RefCell<Option<PathBuf>>,
}

impl StagedRecords {
    pub fn new() -> Self { Self::default() }

    pub fn asset(self, id: &str, pathname: &str, payload: &[u8]) -> Self {
        self.record(id, &[("pathname", pathname.as_bytes()), ("asset", payload)])
    }

    pub fn record(mut self, id: &str, files: &[(&str, &[u8])]) -> Self {
        let files = files
            .iter()
            .map(|(name, data)| (name.to_string(), data.to_vec()))
            .collect();
        self.records.push((id.to_string(), files));
        self
    }
}

impl ContainerUnpacker for StagedRecords {
    fn unpack(&self, _archive: &Path, staging: &Path) -> Result<Vec<String>> {
        self.staging.replace(Some(staging.to_path_buf()));
        for (id, files) in &self.records {
            let dir = staging.join(id);
            std::fs::create_dir_all(&dir).map_err(|e| write_error(&dir, e))?;
            for (name, data) in files {
                let path = dir.join(name);
                std::fs::write(&path, data).map_err(|e| write_error(&path, e))?;
            }
        }
        Ok(self.records.iter().map(|(id, _)| id.clone()).collect())
    }
}

fn write_error(path: &Path, source: std::io::Error) -> crate::Error {
    unitypkg_fs::Error::Write {
        path: path.to_path_buf(),
        source,
    }
    .into()
}
