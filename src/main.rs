mod cli;

use clap::Parser;
use drm_report::classifier::Mode;
use drm_report::commands;
use drm_report::config::ReportConfig;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => match ReportConfig::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        },
        None => ReportConfig::load(),
    };
    let quiet = args.quiet;

    let result = match args.command {
        cli::Commands::Coverage {
            codon_file,
            output_file,
            min_coverage,
        } => commands::coverage::run(&codon_file, &output_file, min_coverage, &config, quiet),
        cli::Commands::Drms {
            aa_file,
            drm_file,
            output_file,
        } => commands::mutations::run(&aa_file, &drm_file, &output_file, Mode::Drm, quiet),
        cli::Commands::Sdrms {
            aa_file,
            drm_file,
            output_file,
        } => commands::mutations::run(&aa_file, &drm_file, &output_file, Mode::Sdrm, quiet),
        cli::Commands::Compile {
            fastq1,
            fastq2,
            coverage,
            drm,
            sdrm,
            workdir,
            output_file,
        } => commands::compile::run(
            &fastq1,
            &fastq2,
            &coverage,
            drm.as_deref(),
            sdrm.as_deref(),
            &workdir,
            &output_file,
            &config,
            quiet,
        ),
        cli::Commands::Report {
            fastq1,
            fastq2,
            codons,
            aa,
            drms,
            workdir,
            output_file,
            min_coverage,
        } => commands::report::run(
            &fastq1,
            &fastq2,
            &codons,
            &aa,
            &drms,
            &workdir,
            &output_file,
            min_coverage,
            &config,
            quiet,
        ),
        cli::Commands::InitConfig { output_file, force } => {
            commands::init_config::run(&config, output_file.as_deref(), force).map(|path| {
                println!("{}", path.display());
            })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
