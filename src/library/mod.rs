//! Medal clip library: the exported catalog and the views derived from it.
//!
//! # Catalog Layout
//!
//! ```text
//! %APPDATA%/Medal/store/clips.json
//! {
//!   "<key>": {
//!     "uuid", "clipID", "Status", "FilePath", "GameTitle",
//!     "Content": {
//!       "contentCollections": [{ "collectionId", "name" }],
//!       "category": { "categoryName" }
//!     },
//!     "metadata": { ... }
//!   }
//! }
//! ```

pub mod catalog;
pub mod clip;
pub mod collections;
pub mod filter;

pub use catalog::{Catalog, CatalogError};
pub use clip::{Category, Clip, Content, ContentCollection, Metadata};
pub use collections::{all_collections, search_collections, CollectionInfo};
pub use filter::{filter_clips, FilterOptions};
