//! Canonical paths for medal-clips.
//!
//! Single source of truth - import this instead of hardcoding paths.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medal_clips::config::paths;
//!
//! let catalog = paths::default_catalog_path(paths::app_data_dir().as_deref());
//! ```

use std::path::{Path, PathBuf};

/// Environment variable holding the platform application-data directory
pub const APP_DATA_VAR: &str = "APPDATA";

/// Environment variable overriding the catalog path
pub const CATALOG_ENV: &str = "MEDAL_CLIPS_CATALOG";

/// Directory holding the config file
pub const CONFIG_DIR: &str = ".medal-clips";

/// Config file name inside `CONFIG_DIR`
pub const CONFIG_FILE: &str = "config.yaml";

/// Get the application-data directory, if the variable is set and non-empty
pub fn app_data_dir() -> Option<PathBuf> {
    std::env::var_os(APP_DATA_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Medal's catalog location under an application-data directory.
///
/// Without one the path is relative (`Medal/store/clips.json`).
pub fn default_catalog_path(app_data: Option<&Path>) -> PathBuf {
    app_data
        .unwrap_or_else(|| Path::new(""))
        .join("Medal")
        .join("store")
        .join("clips.json")
}

/// Config file location for a project directory
pub fn config_file_in(dir: &Path) -> PathBuf {
    dir.join(CONFIG_DIR).join(CONFIG_FILE)
}

// ============================================================================
// Tests
// ============================================================================
