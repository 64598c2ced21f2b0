mod template;
mod typesetter;

pub use template::{render_source, NONE_FOUND, PLOT_DIRECTIVE};
pub use typesetter::{TypesetRun, Typesetter};

use crate::config::ReportConfig;
use crate::error::Result;
use crate::plots::PlotOutcome;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Size and modification time of a raw input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputFile {
    pub path: PathBuf,
    pub size: u64,
    pub modified: DateTime<Local>,
}

impl InputFile {
    pub fn stat(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
            modified: DateTime::<Local>::from(metadata.modified()?),
        })
    }

    pub fn size_mb(&self) -> f64 {
        self.size as f64 / BYTES_PER_MB
    }

    /// e.g. `Sun Oct 18 12:00:00 2026`
    pub fn modified_display(&self) -> String {
        self.modified.format("%a %b %e %H:%M:%S %Y").to_string()
    }
}

/// Everything the report embeds.
#[derive(Debug, Clone)]
pub struct ReportInputs {
    pub fastq1: InputFile,
    pub fastq2: InputFile,
    pub coverage_plot: PathBuf,
    pub drm_plot: PlotOutcome,
    pub sdrm_plot: PlotOutcome,
}

/// Artifacts of a successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledReport {
    pub source_path: PathBuf,
    pub log_path: PathBuf,
    pub output_path: PathBuf,
}

/// Writes the document source into `workdir` and compiles it exactly once.
///
/// A non-zero exit from the typesetter is returned as
/// [`ReportError::BuildFailure`](crate::error::ReportError::BuildFailure);
/// the log stays in `workdir` regardless.
pub fn compile(
    inputs: &ReportInputs,
    workdir: &Path,
    jobname: &str,
    config: &ReportConfig,
) -> Result<CompiledReport> {
    let source = render_source(inputs);
    let source_path = workdir.join(&config.source_name);
    fs::write(&source_path, source)?;
    tracing::debug!("wrote report source {}", source_path.display());

    let log_path = workdir.join(&config.log_name);
    let typesetter = Typesetter::from_config(&config.typesetter);
    let log_path = typesetter
        .run(workdir, &config.source_name, jobname, &log_path)?
        .into_result()?;

    let output_path = workdir.join(format!("{}.pdf", jobname));
    tracing::info!("compiled report {}", output_path.display());
    Ok(CompiledReport {
        source_path,
        log_path,
        output_path,
    })
}

/// Summary of a report build written alongside the artifacts.
#[derive(Debug, Serialize)]
pub struct ReportManifest<'a> {
    pub inputs: [&'a InputFile; 2],
    pub coverage_plot: &'a Path,
    pub drm_plot: Option<&'a Path>,
    pub sdrm_plot: Option<&'a Path>,
    pub report: &'a CompiledReport,
}

impl<'a> ReportManifest<'a> {
    pub fn new(inputs: &'a ReportInputs, report: &'a CompiledReport) -> Self {
        Self {
            inputs: [&inputs.fastq1, &inputs.fastq2],
            coverage_plot: &inputs.coverage_plot,
            drm_plot: inputs.drm_plot.path(),
            sdrm_plot: inputs.sdrm_plot.path(),
            report,
        }
    }

    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
