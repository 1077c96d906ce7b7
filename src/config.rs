//! Configuration for medal-clips paths.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (`--catalog`, `--dest`) and MEDAL_CLIPS_CATALOG
//! 2. Config file (.medal-clips/config.yaml)
//! 3. Defaults (%APPDATA%/Medal/store/clips.json)
//!
//! Config file discovery:
//! - Searches current directory and parents for .medal-clips/config.yaml
//! - Falls back to ~/.medal-clips/config.yaml
//! - Paths in config file are relative to the directory containing .medal-clips/

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub mod paths;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Catalog file (relative to the project root)
    pub catalog: Option<String>,
    /// Default copy destination (relative to the project root)
    pub destination: Option<String>,
}

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Catalog file to load
    pub catalog: PathBuf,
    /// Destination used when none is given on the command line
    pub destination: Option<PathBuf>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the environment and any discovered config file.
    ///
    /// `catalog_override` is the explicit catalog path from the command line
    /// or MEDAL_CLIPS_CATALOG.
    pub fn load(catalog_override: Option<PathBuf>) -> Result<Self> {
        let config_file = std::env::current_dir()
            .ok()
            .and_then(|cwd| find_config_file(&cwd))
            .or_else(home_config_file);

        let config = match config_file {
            Some(path) => {
                let parsed = load_config_file(&path)?;
                Some((path, parsed))
            }
            None => None,
        };

        Ok(Self::resolve(
            catalog_override,
            config,
            paths::app_data_dir().as_deref(),
        ))
    }

    /// Combine the configuration sources without touching the environment
    pub fn resolve(
        catalog_override: Option<PathBuf>,
        config: Option<(PathBuf, ConfigFile)>,
        app_data: Option<&Path>,
    ) -> Self {
        let default_catalog = paths::default_catalog_path(app_data);

        let Some((config_path, config)) = config else {
            return Self {
                catalog: catalog_override.unwrap_or(default_catalog),
                destination: None,
                config_file: None,
            };
        };

        // Base directory is the parent of .medal-clips/
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        let catalog = catalog_override
            .or_else(|| {
                config
                    .paths
                    .catalog
                    .as_deref()
                    .map(|p| resolve_path(base_dir, p))
            })
            .unwrap_or(default_catalog);

        let destination = config
            .paths
            .destination
            .as_deref()
            .map(|p| resolve_path(base_dir, p));

        Self {
            catalog,
            destination,
            config_file: Some(config_path),
        }
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(paths::config_file_in)
        .find(|candidate| candidate.exists())
}

/// Config file in the user's home directory, if present
fn home_config_file() -> Option<PathBuf> {
    let path = paths::config_file_in(&dirs::home_dir()?);
    path.exists().then_some(path)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}
