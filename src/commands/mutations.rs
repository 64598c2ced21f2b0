use crate::classifier::Mode;
use crate::coordinates::CoordinateMapper;
use crate::plots::{plot_mutations, PlotOutcome};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(aa_file: &Path, drm_file: &Path, output_file: &Path, mode: Mode, quiet: bool) -> Result<()> {
    let label = match mode {
        Mode::Drm => "DRM",
        Mode::Sdrm => "SDRM",
    };
    let progress = ProgressBarBuilder::new(format!("Plotting {}s...", label))
        .hidden(quiet)
        .build()?;

    let mapper = CoordinateMapper::default();
    let outcome = plot_mutations(aa_file, drm_file, mode, &mapper, output_file)
        .with_context(|| format!("failed to plot {}s from {}", label, drm_file.display()))?;

    match outcome {
        PlotOutcome::Written(path) => {
            progress.finish_with_message(format!("{} plot written to {}", label, path.display()))
        }
        PlotOutcome::NoMutations => {
            progress.finish_with_message(format!("No {}s found; no plot written", label))
        }
    }
    Ok(())
}
