use super::compile::compile_to;
use crate::config::ReportConfig;
use crate::coordinates::CoordinateMapper;
use crate::plots::{plot_coverage, plot_drms, plot_sdrms};
use crate::report::{InputFile, ReportInputs, ReportManifest};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const ARTIFACTS: [&str; 4] = ["coverage.svg", "drms.svg", "sdrms.svg", "manifest.json"];

/// Removes plots left by an earlier build so an absent plot is never
/// mistaken for a fresh one.
fn clear_stale(workdir: &Path) -> Result<()> {
    for name in ARTIFACTS {
        match fs::remove_file(workdir.join(name)) {
            Ok(()) => tracing::debug!("removed stale {}", name),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e).with_context(|| format!("failed to remove stale {}", name)),
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    fastq1: &Path,
    fastq2: &Path,
    codons: &Path,
    aa: &Path,
    drms: &Path,
    workdir: &Path,
    output_file: &Path,
    min_coverage: Option<u64>,
    config: &ReportConfig,
    quiet: bool,
) -> Result<()> {
    fs::create_dir_all(workdir)
        .with_context(|| format!("failed to create working directory {}", workdir.display()))?;
    let workdir = fs::canonicalize(workdir)?;
    clear_stale(&workdir)?;
    let min_coverage = min_coverage.unwrap_or(config.min_coverage);
    let mapper = CoordinateMapper::default();

    let progress = ProgressBarBuilder::new("Plotting coverage...")
        .hidden(quiet)
        .build()?;
    let coverage_plot = plot_coverage(codons, &workdir.join("coverage.svg"), min_coverage)
        .with_context(|| format!("failed to plot coverage from {}", codons.display()))?;

    progress.set_message("Plotting DRMs...");
    let drm_plot = plot_drms(aa, drms, &mapper, &workdir.join("drms.svg"))
        .with_context(|| format!("failed to plot DRMs from {}", drms.display()))?;

    progress.set_message("Plotting SDRMs...");
    let sdrm_plot = plot_sdrms(aa, drms, &mapper, &workdir.join("sdrms.svg"))
        .with_context(|| format!("failed to plot SDRMs from {}", drms.display()))?;

    let inputs = ReportInputs {
        fastq1: InputFile::stat(fastq1)
            .with_context(|| format!("cannot stat {}", fastq1.display()))?,
        fastq2: InputFile::stat(fastq2)
            .with_context(|| format!("cannot stat {}", fastq2.display()))?,
        coverage_plot,
        drm_plot,
        sdrm_plot,
    };

    progress.set_message("Compiling report...");
    let report = compile_to(&inputs, &workdir, output_file, config)?;

    let manifest_path = workdir.join("manifest.json");
    ReportManifest::new(&inputs, &report)
        .write(&manifest_path)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;

    progress.finish_with_message(format!("Report written to {}", report.output_path.display()));
    Ok(())
}
