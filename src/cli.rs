use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "drm_report=debug"
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Hide progress spinners
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plot coverage per HXB2 position from a codon count table
    Coverage {
        /// Codon count table (hxb2, codon, count)
        codon_file: PathBuf,
        /// Output SVG
        #[arg(short = 'o', long = "output", default_value = "coverage.svg")]
        output_file: PathBuf,
        /// Minimum coverage line (overrides config)
        #[arg(long)]
        min_coverage: Option<u64>,
    },

    /// Plot IAS-USA and Stanford drug-resistance mutations
    Drms {
        /// Amino-acid count table
        aa_file: PathBuf,
        /// Candidate mutation list
        drm_file: PathBuf,
        /// Output SVG
        #[arg(short = 'o', long = "output", default_value = "drms.svg")]
        output_file: PathBuf,
    },

    /// Plot surveillance drug-resistance mutations
    Sdrms {
        /// Amino-acid count table
        aa_file: PathBuf,
        /// Candidate mutation list
        drm_file: PathBuf,
        /// Output SVG
        #[arg(short = 'o', long = "output", default_value = "sdrms.svg")]
        output_file: PathBuf,
    },

    /// Compile the PDF report from existing plots
    Compile {
        fastq1: PathBuf,
        fastq2: PathBuf,
        /// Coverage plot
        #[arg(long)]
        coverage: PathBuf,
        /// DRM plot; omit when none were found
        #[arg(long)]
        drm: Option<PathBuf>,
        /// SDRM plot; omit when none were found
        #[arg(long)]
        sdrm: Option<PathBuf>,
        /// Working directory for the LaTeX source and log
        #[arg(short = 'w', long = "workdir", default_value = ".")]
        workdir: PathBuf,
        /// Output PDF
        #[arg(short = 'o', long = "output", default_value = "report.pdf")]
        output_file: PathBuf,
    },

    /// Build every plot and compile the report in one go
    Report {
        fastq1: PathBuf,
        fastq2: PathBuf,
        /// Codon count table
        #[arg(long)]
        codons: PathBuf,
        /// Amino-acid count table
        #[arg(long)]
        aa: PathBuf,
        /// Candidate mutation list
        #[arg(long)]
        drms: PathBuf,
        /// Working directory for plots, LaTeX source and log
        #[arg(short = 'w', long = "workdir")]
        workdir: PathBuf,
        /// Output PDF
        #[arg(short = 'o', long = "output", default_value = "report.pdf")]
        output_file: PathBuf,
        /// Minimum coverage line (overrides config)
        #[arg(long)]
        min_coverage: Option<u64>,
    },

    /// Write the active configuration to a TOML file
    InitConfig {
        /// Destination (defaults to the user config directory)
        #[arg(short = 'o', long = "output")]
        output_file: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
