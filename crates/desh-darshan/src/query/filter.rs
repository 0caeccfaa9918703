//! Per-place predicates. All three must hold for a place to be included.

use desh_darshan_catalog::Place;

use super::state::{CategoryFilter, RegionFilter};

/// Lowercased, trimmed form of the search text used for matching.
#[must_use]
pub fn normalize_search(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Case-insensitive substring match on name, description, city and state.
///
/// `needle` must already be normalized; an empty needle matches everything.
#[must_use]
pub fn matches_search(place: &Place, needle: &str) -> bool {
    needle.is_empty()
        || [
            &place.name,
            &place.description,
            &place.city,
            &place.state,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[must_use]
pub fn matches_category(place: &Place, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Only(category) => place.category.as_ref() == Some(category),
    }
}

/// Exact match against the place's trimmed state.
#[must_use]
pub fn matches_region(place: &Place, filter: &RegionFilter) -> bool {
    match filter {
        RegionFilter::All => true,
        RegionFilter::Only(label) => place.trimmed_state() == label.trim(),
    }
}

#[cfg(test)]
mod tests {
    use desh_darshan_catalog::Category;
    use serde_json::json;

    use super::*;

    fn place(record: serde_json::Value) -> Place {
        Place::from_raw(&record).unwrap()
    }

    #[test]
    fn test_search_fields() {
        let p = place(json!({
            "id": 1,
            "name": "Hawa Mahal",
            "city": "Jaipur",
            "state": "Rajasthan",
            "description": "Palace of Winds"
        }));
        for needle in ["mahal", "jaipur", "rajasthan", "winds", "a"] {
            assert!(matches_search(&p, needle), "{needle} should match");
        }
        assert!(matches_search(&p, ""));
        assert!(!matches_search(&p, "kerala"));
        assert_eq!(normalize_search("  MaHaL "), "mahal");
        assert!(matches_search(&p, &normalize_search("  PALACE ")));
    }

    #[test]
    fn test_search_ignores_other_fields() {
        let p = place(json!({"id": 1, "name": "Fort", "tips": "bring water", "category": "Historical"}));
        assert!(!matches_search(&p, "water"));
        assert!(!matches_search(&p, "historical"));
    }

    #[test]
    fn test_category_is_exact() {
        let nature = place(json!({"id": 1, "name": "Lake", "category": "Nature"}));
        let unclassified = place(json!({"id": 2, "name": "Somewhere"}));

        assert!(matches_category(&nature, &CategoryFilter::All));
        assert!(matches_category(&nature, &CategoryFilter::Only(Category::Nature)));
        assert!(!matches_category(&nature, &CategoryFilter::Only(Category::Historical)));
        assert!(!matches_category(
            &nature,
            &CategoryFilter::Only(Category::Other("nature".into()))
        ));
        assert!(matches_category(&unclassified, &CategoryFilter::All));
        assert!(!matches_category(&unclassified, &CategoryFilter::Only(Category::Nature)));
    }

    #[test]
    fn test_region_trims_both_sides() {
        let p = place(json!({"id": 1, "name": "Backwaters", "state": " Kerala "}));
        assert!(matches_region(&p, &RegionFilter::only("Kerala")));
        assert!(matches_region(&p, &RegionFilter::Only(" Kerala".to_string())));
        assert!(!matches_region(&p, &RegionFilter::only("kerala")));
        assert!(matches_region(&p, &RegionFilter::All));
    }
}
