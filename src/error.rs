use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unknown region '{0}'")]
    InvalidRegion(String),

    #[error("position {position} is outside region {region} (valid: 1..={length})")]
    InvalidPosition {
        region: String,
        position: u32,
        length: u32,
    },

    #[error("invalid region layout: {0}")]
    InvalidLayout(String),

    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}: line {line}: {message}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("coverage at position {0} is zero")]
    ZeroCoverage(u32),

    #[error("no coverage recorded at position {0}")]
    UndefinedCoverage(u32),

    #[error("typesetter exited with {status}; see log {}", .log_path.display())]
    BuildFailure {
        status: ExitStatus,
        log_path: PathBuf,
    },

    #[error("failed to launch typesetter '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
