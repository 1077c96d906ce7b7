//! Catalog of every clip Medal knows about.
//!
//! Loaded once per run from `clips.json` and never written back.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::debug;

use super::clip::Clip;

/// Errors that can occur while loading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// In-memory catalog keyed by the exporter's opaque clip key.
///
/// Iteration follows key order, so every derived view is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    clips: BTreeMap<String, Clip>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalog from disk
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;

        let catalog = Self::from_json(&content).map_err(|source| CatalogError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), clips = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Parse a catalog document held in memory
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        // A top-level `null` is an export with no clips; a `null` entry is a
        // clip with every field absent
        let clips: Option<BTreeMap<String, Option<Clip>>> = serde_json::from_str(content)?;
        Ok(clips
            .unwrap_or_default()
            .into_iter()
            .map(|(key, clip)| (key, clip.unwrap_or_default()))
            .collect())
    }

    /// Insert or replace a clip under `key`
    pub fn insert(&mut self, key: impl Into<String>, clip: Clip) -> Option<Clip> {
        self.clips.insert(key.into(), clip)
    }

    /// Get a clip by key
    pub fn get(&self, key: &str) -> Option<&Clip> {
        self.clips.get(key)
    }

    /// Iterate over `(key, clip)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Clip)> {
        self.clips.iter().map(|(key, clip)| (key.as_str(), clip))
    }

    /// Iterate over clips in key order
    pub fn clips(&self) -> impl Iterator<Item = &Clip> {
        self.clips.values()
    }

    /// Get the number of clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

impl FromIterator<(String, Clip)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, Clip)>>(iter: I) -> Self {
        Self {
            clips: iter.into_iter().collect(),
        }
    }
}
