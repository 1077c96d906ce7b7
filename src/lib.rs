//! medal-clips - Filter Medal clips and copy them out of the library
//!
//! Reads the `clips.json` catalog Medal keeps on disk, selects clips by
//! path, title, game or collection, and copies the matching recordings into
//! a directory together with a plain-text log of the run.
//!
//! # Modules
//!
//! - `library`: Catalog loading, collection index and filters
//! - `core`: Copy executor and report writer
//! - `config`: Catalog/destination path resolution
//! - `cli`: Command-line interface and interactive mode
//!
//! # Usage
//!
//! ```bash
//! # Copy every clip from one collection
//! medal-clips copy --copy-dir ./backup --collection-name "best of"
//!
//! # Find a collection id
//! medal-clips collections ranked
//!
//! # Preview a selection
//! medal-clips list --game valorant
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod library;

// Re-export main types at crate root for convenience
pub use crate::config::Settings;
pub use crate::core::{copy_clips, write_report, CopyError, CopyResult, FileCopyError};
pub use crate::library::{
    all_collections, filter_clips, search_collections, Catalog, CatalogError, Clip,
    CollectionInfo, FilterOptions,
};
