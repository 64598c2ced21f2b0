use crate::config::ReportConfig;
use crate::plots::plot_coverage;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(
    codon_file: &Path,
    output_file: &Path,
    min_coverage: Option<u64>,
    config: &ReportConfig,
    quiet: bool,
) -> Result<()> {
    let min_coverage = min_coverage.unwrap_or(config.min_coverage);
    let progress = ProgressBarBuilder::new("Plotting coverage...")
        .hidden(quiet)
        .build()?;

    plot_coverage(codon_file, output_file, min_coverage)
        .with_context(|| format!("failed to plot coverage from {}", codon_file.display()))?;

    progress.finish_with_message(format!("Coverage plot written to {}", output_file.display()));
    Ok(())
}
