use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use unitypkg_archive::{ExtractOptions, extract_package};

#[derive(Debug, clap::Args)]
pub struct Extract {
    /// Path to the .unitypackage
    pub archive: PathBuf,
    /// Output directory (defaults to the current directory)
    pub output: Option<PathBuf>,
}

impl Extract {
    pub fn run(self, options: &ExtractOptions) -> anyhow::Result<()> {
        let start = Instant::now();
        let output = self.output.unwrap_or_else(|| PathBuf::from("."));

        let report = extract_package(&self.archive, &output, options)
            .with_context(|| format!("failed to extract '{}'", self.archive.display()))?;

        println!(
            "{} extracted, {} skipped, {} without asset",
            report.placed(),
            report.skipped(),
            report.incomplete()
        );
        println!("--- Finished in {:.3} seconds ---", start.elapsed().as_secs_f64());
        Ok(())
    }
}
