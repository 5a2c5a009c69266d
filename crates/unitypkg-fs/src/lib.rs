//! Filesystem primitives for package extraction.
//!
//! - `staging.rs` - Private temporary directory removed on every exit path
//! - `relocate.rs` - Rename with copy-then-delete fallback across devices

mod error;
mod relocate;
mod staging;

pub use error::{Error, Result};
pub use relocate::{FallbackStrategy, Relocation, RelocateOptions, relocate};
pub use staging::StagingDir;
