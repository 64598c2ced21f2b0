#[allow(clippy::module_inception)]
mod config;
mod layout;

pub use config::{ReportConfig, TypesetterConfig};
pub use layout::{GeneLayout, RegionLayout, RegionSpan, HXB2_END, HXB2_GENES, POL_REGIONS};
