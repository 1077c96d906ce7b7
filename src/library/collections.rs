//! Index of the collections referenced across the catalog.

use std::collections::BTreeMap;
use std::fmt;

use super::catalog::Catalog;

/// A distinct collection observed in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    pub id: String,
    pub name: String,
}

impl fmt::Display for CollectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {}, Name: {}", self.id, self.name)
    }
}

/// Collect every distinct collection, deduplicated by id and ordered by id.
///
/// Memberships with an empty id or name are skipped. When two clips report
/// different names for the same id, the clip with the smallest key wins.
pub fn all_collections(catalog: &Catalog) -> Vec<CollectionInfo> {
    let mut by_id: BTreeMap<&str, &str> = BTreeMap::new();

    for clip in catalog.clips() {
        for collection in clip.collections() {
            if collection.id.is_empty() || collection.name.is_empty() {
                continue;
            }
            by_id
                .entry(collection.id.as_str())
                .or_insert(collection.name.as_str());
        }
    }

    by_id
        .into_iter()
        .map(|(id, name)| CollectionInfo {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

/// Search collections by name (case-insensitive substring match)
pub fn search_collections(collections: &[CollectionInfo], term: &str) -> Vec<CollectionInfo> {
    let term_lower = term.to_lowercase();

    collections
        .iter()
        .filter(|collection| collection.name.to_lowercase().contains(&term_lower))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Clip;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(
            "a",
            Clip::new("/x/1.mp4", "One")
                .with_collection("c1", "Best Of")
                .with_collection("c2", "Funny"),
        );
        catalog.insert(
            "b",
            Clip::new("/x/2.mp4", "Two")
                .with_collection("c1", "Best Of")
                .with_collection("c3", "Ranked Highlights"),
        );
        catalog.insert("c", Clip::new("/x/3.mp4", "Three"));
        catalog
    }

    #[test]
    fn test_all_collections_deduplicates_by_id() {
        let collections = all_collections(&sample_catalog());

        let ids: Vec<_> = collections.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_name_collision_smallest_key_wins() {
        let mut catalog = Catalog::new();
        catalog.insert("z", Clip::new("/x/z.mp4", "").with_collection("c1", "Renamed"));
        catalog.insert("a", Clip::new("/x/a.mp4", "").with_collection("c1", "Original"));

        let collections = all_collections(&catalog);
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].name, "Original");
    }

    #[test]
    fn test_incomplete_memberships_are_skipped() {
        let mut catalog = Catalog::new();
        catalog.insert(
            "a",
            Clip::new("/x/a.mp4", "")
                .with_collection("", "No id")
                .with_collection("c9", ""),
        );

        assert!(all_collections(&catalog).is_empty());
    }

    #[test]
    fn test_search_collections() {
        let collections = all_collections(&sample_catalog());

        // Case insensitive
        let results = search_collections(&collections, "best");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "c1");

        // Substring in the middle of the name
        let results = search_collections(&collections, "HIGH");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "c3");

        // Empty term matches everything
        assert_eq!(search_collections(&collections, "").len(), 3);

        // No match
        assert!(search_collections(&collections, "speedrun").is_empty());
    }
}
