pub mod classifier;
pub mod commands;
pub mod config;
pub mod coordinates;
pub mod coverage;
pub mod error;
pub mod frequency;
pub mod plots;
pub mod readers;
pub mod report;
pub mod types;
mod utils;

pub use error::{ReportError, Result};
