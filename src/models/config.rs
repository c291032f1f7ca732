//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scanner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Sort directory entries by file name before classifying them.
    ///
    /// Listing order drives the positional season and episode fallbacks, so
    /// turning this off makes those numbers depend on the platform.
    pub sort_entries: bool,
    /// Subdirectory names (case-insensitive) treated as bonus content.
    pub extras_names: Vec<String>,
    /// Scan library roots on separate workers.
    pub parallel: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            sort_entries: true,
            extras_names: vec!["extra".to_string(), "extras".to_string()],
            parallel: true,
        }
    }
}

impl ScanConfig {
    /// Check if a directory name is an extras folder.
    pub fn is_extras_name(&self, name: &str) -> bool {
        self.extras_names
            .iter()
            .any(|extras| extras.eq_ignore_ascii_case(name))
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("libman")
}

/// Load configuration from the user config directory.
///
/// Falls back to defaults when the file is missing or malformed.
pub fn load_config() -> ScanConfig {
    let config_path = dirs_config_path().join("config.toml");

    if config_path.exists() {
        match load_config_from(&config_path) {
            Ok(config) => return config,
            Err(e) => tracing::warn!("Ignoring {}: {}", config_path.display(), e),
        }
    }

    ScanConfig::default()
}

/// Load configuration from an explicit file.
pub fn load_config_from(path: &Path) -> crate::Result<ScanConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))
}
