//! Attribute filters over the catalog.
//!
//! Every criterion is optional. Empty criteria never exclude a clip; the
//! non-empty ones must all match.

use super::catalog::Catalog;
use super::clip::Clip;

/// Criteria for selecting clips
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Substring of the media file path
    pub path_search: String,

    /// Substring of the clip title
    pub title: String,

    /// Substring of the category (game) name
    pub game: String,

    /// Exact collection id
    pub collection_id: String,

    /// Substring of a collection name
    pub collection_name: String,
}

impl FilterOptions {
    /// Check if no criterion is set
    pub fn is_empty(&self) -> bool {
        self.path_search.is_empty()
            && self.title.is_empty()
            && self.game.is_empty()
            && self.collection_id.is_empty()
            && self.collection_name.is_empty()
    }

    /// Check whether a single clip satisfies every non-empty criterion
    pub fn matches(&self, clip: &Clip) -> bool {
        contains_ignore_case(&clip.file_path, &self.path_search)
            && contains_ignore_case(&clip.title, &self.title)
            && contains_ignore_case(clip.category(), &self.game)
            && self.matches_collection(clip)
    }

    /// A clip passes if any of its collections matches the id exactly or
    /// contains the name. Vacuously true when both are empty.
    fn matches_collection(&self, clip: &Clip) -> bool {
        if self.collection_id.is_empty() && self.collection_name.is_empty() {
            return true;
        }

        let name_lower = self.collection_name.to_lowercase();
        clip.collections().iter().any(|collection| {
            (!self.collection_id.is_empty() && collection.id == self.collection_id)
                || (!self.collection_name.is_empty()
                    && collection.name.to_lowercase().contains(&name_lower))
        })
    }
}

/// Case-insensitive substring match; an empty needle always matches
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Select the clips matching `options`, in catalog order
pub fn filter_clips<'a>(catalog: &'a Catalog, options: &FilterOptions) -> Vec<&'a Clip> {
    catalog
        .clips()
        .filter(|clip| options.matches(clip))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(
            "a",
            Clip::new("C:/Medal/Clips/Valorant/ace.mp4", "Ace on Bind")
                .with_category("Valorant")
                .with_collection("c1", "Best Of"),
        );
        catalog.insert(
            "b",
            Clip::new("C:/Medal/Clips/Apex/squad.mp4", "Squad wipe")
                .with_category("Apex Legends")
                .with_collection("c2", "Funny Moments"),
        );
        catalog.insert("c", Clip::new("C:/Medal/Clips/misc.mp4", "Untitled"));
        catalog
    }

    #[test]
    fn test_empty_options_return_everything() {
        let catalog = sample_catalog();
        let options = FilterOptions::default();

        assert!(options.is_empty());
        assert_eq!(filter_clips(&catalog, &options).len(), 3);
    }

    #[test]
    fn test_path_and_title_are_case_insensitive() {
        let catalog = sample_catalog();

        let options = FilterOptions {
            path_search: "valorant".to_string(),
            ..Default::default()
        };
        let results = filter_clips(&catalog, &options);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Ace on Bind");

        let options = FilterOptions {
            title: "SQUAD".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_clips(&catalog, &options).len(), 1);
    }

    #[test]
    fn test_game_filter_excludes_uncategorised() {
        let catalog = sample_catalog();
        let options = FilterOptions {
            game: "apex".to_string(),
            ..Default::default()
        };

        let results = filter_clips(&catalog, &options);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].category(), "Apex Legends");
    }

    #[test]
    fn test_collection_id_or_name() {
        let catalog = sample_catalog();

        // id OR name: c1 by id, "funny" by name
        let options = FilterOptions {
            collection_id: "c1".to_string(),
            collection_name: "funny".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_clips(&catalog, &options).len(), 2);

        // id is an exact match, not a substring
        let options = FilterOptions {
            collection_id: "c".to_string(),
            ..Default::default()
        };
        assert!(filter_clips(&catalog, &options).is_empty());
    }

    #[test]
    fn test_criteria_are_anded() {
        let catalog = sample_catalog();
        let options = FilterOptions {
            title: "ace".to_string(),
            collection_name: "funny".to_string(),
            ..Default::default()
        };

        assert!(filter_clips(&catalog, &options).is_empty());
    }
}
