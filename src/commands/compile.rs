use crate::config::ReportConfig;
use crate::plots::PlotOutcome;
use crate::report::{compile, CompiledReport, InputFile, ReportInputs};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The typesetter runs inside the working directory, so plot paths are
/// made absolute first.
fn absolute(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("cannot find {}", path.display()))
}

fn outcome(plot: Option<&Path>) -> Result<PlotOutcome> {
    Ok(match plot {
        Some(path) => PlotOutcome::Written(absolute(path)?),
        None => PlotOutcome::NoMutations,
    })
}

/// Job name the typesetter is given: the output file name without `.pdf`.
pub(crate) fn jobname(output_file: &Path) -> Result<String> {
    output_file
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .with_context(|| format!("invalid output file name {}", output_file.display()))
}

/// Compiles in `workdir` and moves the PDF to `output_file`.
pub(crate) fn compile_to(
    inputs: &ReportInputs,
    workdir: &Path,
    output_file: &Path,
    config: &ReportConfig,
) -> Result<CompiledReport> {
    fs::create_dir_all(workdir)
        .with_context(|| format!("failed to create working directory {}", workdir.display()))?;
    let mut report = compile(inputs, workdir, &jobname(output_file)?, config)?;

    if absolute(&report.output_path)? != fs::canonicalize(output_file).unwrap_or_default() {
        fs::copy(&report.output_path, output_file)
            .with_context(|| format!("failed to copy report to {}", output_file.display()))?;
        report.output_path = output_file.to_path_buf();
    }
    Ok(report)
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    fastq1: &Path,
    fastq2: &Path,
    coverage: &Path,
    drm: Option<&Path>,
    sdrm: Option<&Path>,
    workdir: &Path,
    output_file: &Path,
    config: &ReportConfig,
    quiet: bool,
) -> Result<()> {
    let inputs = ReportInputs {
        fastq1: InputFile::stat(fastq1)
            .with_context(|| format!("cannot stat {}", fastq1.display()))?,
        fastq2: InputFile::stat(fastq2)
            .with_context(|| format!("cannot stat {}", fastq2.display()))?,
        coverage_plot: absolute(coverage)?,
        drm_plot: outcome(drm)?,
        sdrm_plot: outcome(sdrm)?,
    };

    let progress = ProgressBarBuilder::new("Compiling report...")
        .hidden(quiet)
        .build()?;
    let report = compile_to(&inputs, workdir, output_file, config)?;
    progress.finish_with_message(format!("Report written to {}", report.output_path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jobname_is_the_output_stem() {
        assert_eq!(jobname(Path::new("out/sample.pdf")).unwrap(), "sample");
        assert_eq!(jobname(Path::new("report")).unwrap(), "report");
        assert_eq!(jobname(Path::new("run.2024.pdf")).unwrap(), "run.2024");
        assert!(jobname(Path::new("/")).is_err());
    }
}
