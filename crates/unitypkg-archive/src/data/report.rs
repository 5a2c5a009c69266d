use std::path::PathBuf;

use unitypkg_fs::Relocation;

use crate::sanitize::ResolvedPath;

/// What happened to one staged record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordStatus {
    Placed {
        resolved:    ResolvedPath,
        destination: PathBuf,
        method:      Relocation,
    },
    /// Missing `pathname` or `asset`; not an asset to relocate.
    Incomplete,
    /// Resolved path would land outside the output root.
    Unsafe { resolved: ResolvedPath },
    /// Descriptor could not be read or the payload could not be placed.
    Failed { reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordOutcome {
    pub id:     String,
    pub status: RecordStatus,
}

impl RecordOutcome {
    pub fn is_placed(&self) -> bool { matches!(self.status, RecordStatus::Placed { .. }) }
}

/// Per-record results of one extraction run, in processing order.
#[derive(Clone, Debug, Default)]
pub struct ExtractionReport {
    pub records: Vec<RecordOutcome>,
}

impl ExtractionReport {
    pub fn placed(&self) -> usize { self.count(|s| matches!(s, RecordStatus::Placed { .. })) }

    pub fn incomplete(&self) -> usize { self.count(|s| matches!(s, RecordStatus::Incomplete)) }

    pub fn unsafe_paths(&self) -> usize { self.count(|s| matches!(s, RecordStatus::Unsafe { .. })) }

    pub fn failed(&self) -> usize { self.count(|s| matches!(s, RecordStatus::Failed { .. })) }

    /// Records that carried an asset but were not placed.
    pub fn skipped(&self) -> usize { self.unsafe_paths() + self.failed() }

    /// True when every asset record was placed.
    pub fn is_clean(&self) -> bool { self.skipped() == 0 }

    fn count(&self, pred: impl Fn(&RecordStatus) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.status)).count()
    }
}
