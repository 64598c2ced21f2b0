use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypesetterConfig {
    #[serde(default = "default_program")]
    pub program: String,
    /// Arguments passed to the program. `{jobname}` and `{source}` are
    /// substituted before launch.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

fn default_program() -> String {
    "pdflatex".to_string()
}

fn default_args() -> Vec<String> {
    vec![
        "-interaction=nonstopmode".to_string(),
        "-shell-escape".to_string(),
        "-jobname={jobname}".to_string(),
        "{source}".to_string(),
    ]
}

impl Default for TypesetterConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_min_coverage")]
    pub min_coverage: u64,
    #[serde(default)]
    pub typesetter: TypesetterConfig,
    #[serde(default = "default_source_name")]
    pub source_name: String,
    #[serde(default = "default_log_name")]
    pub log_name: String,
}

fn default_min_coverage() -> u64 {
    10
}

fn default_source_name() -> String {
    "report.tex".to_string()
}

fn default_log_name() -> String {
    "pdflatex.log".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_coverage: default_min_coverage(),
            typesetter: TypesetterConfig::default(),
            source_name: default_source_name(),
            log_name: default_log_name(),
        }
    }
}

fn project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "drm-report", "drm-report")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl ReportConfig {
    /// Loads the user's config file if one exists, otherwise the defaults.
    pub fn load() -> Self {
        if let Some(config_path) = project_config_path() {
            if config_path.exists() {
                if let Ok(content) = fs::read_to_string(&config_path) {
                    match toml::from_str(&content) {
                        Ok(config) => return config,
                        Err(e) => tracing::warn!(
                            "ignoring unreadable config {}: {}",
                            config_path.display(),
                            e
                        ),
                    }
                }
            }
        }
        ReportConfig::default()
    }

    /// Loads an explicitly named config file. Unlike [`ReportConfig::load`],
    /// a missing or malformed file is an error.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Location of the per-user config file, if the platform has one.
    pub fn user_config_path() -> Option<PathBuf> {
        project_config_path()
    }

    /// Writes the config to the user config directory and returns the path.
    pub fn save(&self) -> Result<PathBuf> {
        let config_path =
            project_config_path().context("no user config directory is available")?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(config_dir) = path.parent() {
            fs::create_dir_all(config_dir)
                .with_context(|| format!("failed to create {}", config_dir.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        Ok(())
    }
}
