mod coverage_plot;
mod mutation_plot;
mod svg;

pub use coverage_plot::{render_coverage_plot, render_coverage_svg, CoverageAxis};
pub use mutation_plot::{MutationPlot, FREQUENCY_CEILING, FREQUENCY_FLOOR, FREQUENCY_TICKS};

use crate::classifier::{classify, Classification, Mode};
use crate::config::GeneLayout;
use crate::coordinates::CoordinateMapper;
use crate::coverage::CoverageSeries;
use crate::error::Result;
use crate::frequency::MappedTable;
use crate::readers::{read_amino_acid_table, read_codon_counts, read_mutation_list};
use std::path::{Path, PathBuf};

/// Result of a mutation plot request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotOutcome {
    Written(PathBuf),
    /// Nothing qualified for the requested mode; no file was created.
    NoMutations,
}

impl PlotOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            PlotOutcome::Written(path) => Some(path.as_path()),
            PlotOutcome::NoMutations => None,
        }
    }
}

/// Coverage plot from a codon count table.
pub fn plot_coverage(codon_file: &Path, outfile: &Path, min_coverage: u64) -> Result<PathBuf> {
    let codons = read_codon_counts(codon_file)?;
    let coverage = CoverageSeries::from_position_counts(&codons);
    render_coverage_plot(&coverage, min_coverage, &GeneLayout::hxb2(), outfile)?;
    Ok(outfile.to_path_buf())
}

/// Mutation plot for `mode`, or [`PlotOutcome::NoMutations`] when the
/// reference list has nothing for that mode.
pub fn plot_mutations(
    aa_file: &Path,
    drm_file: &Path,
    mode: Mode,
    mapper: &CoordinateMapper,
    outfile: &Path,
) -> Result<PlotOutcome> {
    let records = read_mutation_list(drm_file)?;
    let mutations = match classify(&records, mode) {
        Classification::Mutations(mutations) => mutations,
        Classification::NoMutations => {
            tracing::info!("no {:?} mutations found; skipping plot", mode);
            return Ok(PlotOutcome::NoMutations);
        }
    };

    let table = MappedTable::new(read_amino_acid_table(aa_file)?, mapper)?;
    MutationPlot::new(mapper, &table, &mutations)?.write(outfile)?;
    Ok(PlotOutcome::Written(outfile.to_path_buf()))
}

pub fn plot_drms(
    aa_file: &Path,
    drm_file: &Path,
    mapper: &CoordinateMapper,
    outfile: &Path,
) -> Result<PlotOutcome> {
    plot_mutations(aa_file, drm_file, Mode::Drm, mapper, outfile)
}

pub fn plot_sdrms(
    aa_file: &Path,
    drm_file: &Path,
    mapper: &CoordinateMapper,
    outfile: &Path,
) -> Result<PlotOutcome> {
    plot_mutations(aa_file, drm_file, Mode::Sdrm, mapper, outfile)
}
