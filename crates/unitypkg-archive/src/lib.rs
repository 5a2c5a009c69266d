//! Asset package extraction with pathname sanitization and containment checks.
//!
//! # Architecture
//!
//! - `unpack.rs` - Container detection and expansion into staging
//! - `record.rs` - Record validation
//! - `sanitize.rs` - Pathname resolution for the destination platform
//! - `guard.rs` - Containment checks (zip-slip prevention)
//! - `place.rs` - Payload placement
//! - `extract.rs` - Extraction pipeline
//! - `view.rs` - Listing without extraction
//! - `data/` - Shared types

pub use data::{ExtractionReport, RecordOutcome, RecordStatus};
pub use error::{Error, Result};
pub use extract::{extract_package, extract_with};
pub use guard::{ExtractionTarget, is_contained};
pub use options::ExtractOptions;
pub use record::ArchiveRecord;
pub use sanitize::{ResolvedPath, SanitizeRules, UnknownRules, resolve_pathname};
pub use unpack::{ContainerFormat, ContainerUnpacker, TarUnpacker, detect_format};
pub use view::{list_package, list_with};

pub mod data;
pub mod options;
pub mod record;
mod error;
mod extract;
mod guard;
mod place;
mod sanitize;
mod unpack;
mod view;

#[cfg(test)]
mod testing;
