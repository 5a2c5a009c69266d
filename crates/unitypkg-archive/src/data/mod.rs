pub mod report;

pub use report::{ExtractionReport, RecordOutcome, RecordStatus};
