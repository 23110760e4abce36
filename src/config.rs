//! Path configuration for the workshop files.
//!
//! Configuration sources (highest priority first):
//! 1. CLI flags / environment variables (`CORG_WORKSHOP`, `CORG_ORDER`,
//!    `CORG_CATEGORIES`), handled by the CLI layer
//! 2. Config file (`corg.yaml`)
//! 3. Defaults derived from the workshop directory
//!
//! Config file discovery searches the current directory and its parents for
//! `corg.yaml`, then falls back to `<user config dir>/corg/config.yaml`.
//! Paths in the file are relative to the file's parent directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Raw config file schema (matches the YAML structure).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Workshop file locations, all optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Workshop directory the order file's entries are relative to
    pub workshop: Option<String>,

    /// Order file (`order.roa`)
    pub order: Option<String>,

    /// Categories file (`categories.roa`)
    pub categories: Option<String>,
}

/// Resolved configuration with absolute paths.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    /// Workshop directory, if configured
    pub workshop: Option<PathBuf>,

    /// Order file path, if configured or derivable
    pub order: Option<PathBuf>,

    /// Categories file path, if configured or derivable
    pub categories: Option<PathBuf>,

    /// The config file the values came from, if one was found
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Load and resolve configuration. A missing config file is not an
    /// error; an unreadable or malformed one is.
    pub fn load() -> Result<Self> {
        let Some(config_path) = find_config_file() else {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

        let base = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let workshop = file.paths.workshop.as_deref().map(|p| resolve(&base, p));
        let order = file
            .paths
            .order
            .as_deref()
            .map(|p| resolve(&base, p))
            .or_else(|| workshop.as_ref().map(|w| w.join("order.roa")));
        let categories = file
            .paths
            .categories
            .as_deref()
            .map(|p| resolve(&base, p))
            .or_else(|| workshop.as_ref().map(|w| w.join("categories.roa")));

        debug!(config = %config_path.display(), "Loaded config file");

        Ok(Self {
            workshop,
            order,
            categories,
            config_file: Some(config_path),
        })
    }
}

/// Absolute path for `p`, treating relative paths as relative to `base`.
fn resolve(base: &Path, p: &str) -> PathBuf {
    let path = Path::new(p);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Find `corg.yaml` in the current directory or its parents, else the user
/// config directory.
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let candidate = current.join("corg.yaml");
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                break;
            }
        }
    }

    let fallback = dirs::config_dir()?.join("corg").join("config.yaml");
    fallback.exists().then_some(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_against_base() {
        let base = Path::new("/data/game");
        assert_eq!(
            resolve(base, "workshop"),
            PathBuf::from("/data/game/workshop")
        );
        assert_eq!(resolve(base, "/abs/path"), PathBuf::from("/abs/path"));
    }

    #[test]
    fn test_paths_section_parses() {
        let file: ConfigFile =
            serde_yaml::from_str("paths:\n  workshop: /w\n  order: custom/order.roa\n").unwrap();
        assert_eq!(file.paths.workshop.as_deref(), Some("/w"));
        assert_eq!(file.paths.order.as_deref(), Some("custom/order.roa"));
        assert!(file.paths.categories.is_none());
    }

    #[test]
    fn test_empty_config_parses() {
        let file: ConfigFile = serde_yaml::from_str("{}").unwrap();
        assert!(file.paths.workshop.is_none());
    }
}
