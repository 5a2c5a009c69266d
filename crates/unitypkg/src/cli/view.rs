use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use unitypkg_archive::{ExtractOptions, list_package};

#[derive(Debug, clap::Args)]
pub struct View {
    /// Path to the .unitypackage
    pub archive: PathBuf,
}

impl View {
    pub fn run(self, options: &ExtractOptions) -> anyhow::Result<()> {
        let paths = list_package(&self.archive, options)
            .with_context(|| format!("failed to read '{}'", self.archive.display()))?;

        let mut out = io::stdout().lock();
        for path in &paths {
            writeln!(out, "{path}")?;
        }
        Ok(())
    }
}
