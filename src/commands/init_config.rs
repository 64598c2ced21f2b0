use crate::config::ReportConfig;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Writes `config` to `output`, or to the user config directory when no
/// path is given. An existing file is kept unless `force` is set.
pub fn run(config: &ReportConfig, output: Option<&Path>, force: bool) -> Result<PathBuf> {
    if let Some(path) = output {
        if path.exists() && !force {
            bail!("{} already exists; pass --force to overwrite", path.display());
        }
        config.save_to(path)?;
        tracing::info!("wrote config {}", path.display());
        return Ok(path.to_path_buf());
    }

    if let Some(existing) = ReportConfig::user_config_path().filter(|p| p.exists()) {
        if !force {
            bail!("{} already exists; pass --force to overwrite", existing.display());
        }
    }
    let path = config.save()?;
    tracing::info!("wrote config {}", path.display());
    Ok(path)
}
