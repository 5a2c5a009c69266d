//! Extraction pipeline.
//!
//! Records are processed one at a time in the order the container yields
//! them. Each record ends in a [`RecordStatus`]; only failures that make the
//! whole run meaningless (no staging area, unreadable container, unusable
//! output root) are returned as errors.

use std::path::Path;

use tracing::{debug, info, warn};
use unitypkg_fs::StagingDir;

use crate::data::{ExtractionReport, RecordOutcome, RecordStatus};
use crate::error::{Error, Result};
use crate::guard::ExtractionTarget;
use crate::options::ExtractOptions;
use crate::place::place_payload;
use crate::record::ArchiveRecord;
use crate::sanitize::resolve_pathname;
use crate::unpack::{ContainerUnpacker, TarUnpacker};

/// Extract every asset in `archive` under `output`.
pub fn extract_package(
    archive: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ExtractionReport> {
    extract_with(&TarUnpacker, archive.as_ref(), output.as_ref(), options)
}

/// Same as [`extract_package`] with a caller-supplied container reader.
pub fn extract_with<U: ContainerUnpacker + ?Sized>(
    unpacker: &U,
    archive: &Path,
    output: &Path,
    options: &ExtractOptions,
) -> Result<ExtractionReport> {
    let target = ExtractionTarget::new(output)?;
    let staging = acquire_staging(options)?;

    let ids = unpacker.unpack(archive, staging.path())?;
    debug!(archive = %archive.display(), records = ids.len(), "expanded package");

    let mut report = ExtractionReport::default();
    for id in ids {
        let status = process_record(&id, staging.path(), &target, options);
        report.records.push(RecordOutcome { id, status });
    }

    staging.release();
    Ok(report)
}

pub(crate) fn acquire_staging(options: &ExtractOptions) -> Result<StagingDir> {
    let staging = match options.staging_parent_path() {
        Some(parent) => StagingDir::acquire_in(parent)?,
        None => StagingDir::acquire()?,
    };
    Ok(staging)
}

fn process_record(
    id: &str,
    staging: &Path,
    target: &ExtractionTarget,
    options: &ExtractOptions,
) -> RecordStatus {
    let Some(record) = ArchiveRecord::from_staged(id, &staging.join(id)) else {
        debug!(record = id, "skipping record without pathname or asset");
        return RecordStatus::Incomplete;
    };

    match place_record(&record, target, options) {
        Ok(status) => status,
        Err(e) => {
            warn!(record = id, "failed to extract asset: {e}");
            RecordStatus::Failed {
                reason: e.to_string(),
            }
        }
    }
}

fn place_record(
    record: &ArchiveRecord,
    target: &ExtractionTarget,
    options: &ExtractOptions,
) -> Result<RecordStatus> {
    let raw = record.read_pathname()?;
    let resolved = resolve_pathname(&raw, options.rules);

    let destination = match target.contain(&resolved) {
        Ok(destination) => destination,
        Err(e @ Error::PathEscape { .. }) => {
            warn!(record = %record.id, "skipping unsafe path: {e}");
            return Ok(RecordStatus::Unsafe { resolved });
        }
        Err(e) => return Err(e),
    };

    let method = place_payload(&record.payload, &destination, options.relocate_options())?;
    info!("Extracting '{}' as '{resolved}'", record.id);

    Ok(RecordStatus::Placed {
        resolved,
        destination,
        method,
    })
}
