use std::path::{Path, PathBuf};

use unitypkg_fs::{FallbackStrategy, RelocateOptions};

use crate::sanitize::SanitizeRules;

/// Settings for one extraction or listing run.
#[derive(Clone, Debug, Default)]
pub struct ExtractOptions {
    pub rules:          SanitizeRules,
    pub fallback:       FallbackStrategy,
    pub staging_parent: Option<PathBuf>,
}

impl ExtractOptions {
    pub fn new() -> Self { Self::default() }

    pub fn rules(mut self, rules: SanitizeRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn fallback(mut self, fallback: FallbackStrategy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Create the staging directory under `parent` instead of the platform temp dir.
    pub fn staging_parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.staging_parent = Some(parent.into());
        self
    }

    pub fn staging_parent_path(&self) -> Option<&Path> { self.staging_parent.as_deref() }

    pub(crate) fn relocate_options(&self) -> RelocateOptions {
        RelocateOptions::new().fallback(self.fallback)
    }
}
