//! Clip records as exported by Medal in `clips.json`.
//!
//! Field names follow the exporter exactly and are case-sensitive. Every
//! field is optional on the wire: missing or `null` values fall back to
//! their empty defaults so a sparse record never fails the whole load.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

/// Open metadata bag attached to each clip. Not interpreted here.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// A single recorded clip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Unique identifier
    #[serde(rename = "uuid", default, deserialize_with = "null_as_default")]
    pub uuid: String,

    /// Short clip code
    #[serde(rename = "clipID", default, deserialize_with = "null_as_default")]
    pub clip_id: String,

    /// Upload/processing status as reported by Medal
    #[serde(rename = "Status", default, deserialize_with = "null_as_default")]
    pub status: String,

    /// Absolute path of the media file on disk
    #[serde(rename = "FilePath", default, deserialize_with = "null_as_default")]
    pub file_path: String,

    /// Display title
    #[serde(rename = "GameTitle", default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(rename = "Content", default, deserialize_with = "null_as_default")]
    pub content: Content,

    #[serde(rename = "metadata", default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

impl Clip {
    /// Create a clip pointing at a media file
    pub fn new(file_path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the category (game) name
    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.content.category.name = name.into();
        self
    }

    /// Add a collection membership
    pub fn with_collection(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.content.collections.push(ContentCollection {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    /// Category (game) name, empty when the clip has none
    pub fn category(&self) -> &str {
        &self.content.category.name
    }

    /// Collections this clip belongs to
    pub fn collections(&self) -> &[ContentCollection] {
        &self.content.collections
    }

    /// Base name of the media file, if the path has one
    pub fn file_name(&self) -> Option<&str> {
        Path::new(&self.file_path)
            .file_name()
            .and_then(|name| name.to_str())
    }
}

/// Nested content block of a clip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(
        rename = "contentCollections",
        default,
        deserialize_with = "null_as_default"
    )]
    pub collections: Vec<ContentCollection>,

    #[serde(rename = "category", default, deserialize_with = "null_as_default")]
    pub category: Category,
}

/// Membership of a clip in a named collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCollection {
    #[serde(rename = "collectionId", default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "categoryName", default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
