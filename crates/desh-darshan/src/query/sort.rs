//! Stable orderings for query results.

use std::cmp::Ordering;

use desh_darshan_catalog::Place;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use super::state::SortKey;

/// Locale-style name collation.
///
/// Names compare ignoring accents and case first, so "Éllora" sorts among
/// the E's. Ties fall back to accents (plain before accented), then case
/// (lowercase first), the way a locale collator does. Ordering between
/// scripts stays by code point.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[must_use]
pub fn compare_places(a: &Place, b: &Place, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_names(&a.name, &b.name),
        SortKey::Rating => b.rating.total_cmp(&a.rating),
        SortKey::Reviews => b.reviews.cmp(&a.reviews),
    }
}

/// Stable sort: places that compare equal keep their catalog order.
pub fn sort_places(places: &mut [&Place], key: SortKey) {
    places.sort_by(|a, b| compare_places(a, b, key));
}

#[cfg(test)]
mod tests {
    use desh_darshan_catalog::PlaceId;
    use serde_json::json;

    use super::*;

    fn places(records: &[serde_json::Value]) -> Vec<Place> {
        records
            .iter()
            .map(|r| Place::from_raw(r).unwrap())
            .collect()
    }

    fn ids(sorted: &[&Place]) -> Vec<i64> {
        sorted
            .iter()
            .map(|p| match p.id {
                PlaceId::Number(n) => n,
                PlaceId::Text(_) => -1,
            })
            .collect()
    }

    #[test]
    fn test_name_collation() {
        assert_eq!(compare_names("agra fort", "Amber Fort"), Ordering::Less);
        assert_eq!(compare_names("Zoo", "aquarium"), Ordering::Greater);
        assert_eq!(compare_names("taj", "Taj"), Ordering::Less);
        assert_eq!(compare_names("Taj", "Taj"), Ordering::Equal);
    }

    #[test]
    fn test_accented_names_sort_with_base_letter() {
        assert_eq!(compare_names("Éllora Caves", "Zanskar"), Ordering::Less);
        assert_eq!(compare_names("Éllora Caves", "Elephanta"), Ordering::Greater);
        assert_eq!(compare_names("Ellora", "Éllora"), Ordering::Less);
        assert_eq!(compare_names("éllora", "Éllora"), Ordering::Less);

        let data = places(&[
            json!({"id": 1, "name": "Zanskar"}),
            json!({"id": 2, "name": "Éllora Caves"}),
            json!({"id": 3, "name": "Ajanta"}),
        ]);
        let mut refs: Vec<&Place> = data.iter().collect();
        sort_places(&mut refs, SortKey::Name);
        assert_eq!(ids(&refs), vec![3, 2, 1]);
    }

    #[test]
    fn test_rating_descending_and_stable() {
        let data = places(&[
            json!({"id": 1, "name": "A", "rating": 4.5}),
            json!({"id": 2, "name": "B", "rating": 4.9}),
            json!({"id": 3, "name": "C"}),
            json!({"id": 4, "name": "D", "rating": 4.5}),
            json!({"id": 5, "name": "E", "rating": "n/a"}),
        ]);
        let mut refs: Vec<&Place> = data.iter().collect();
        sort_places(&mut refs, SortKey::Rating);
        assert_eq!(ids(&refs), vec![2, 1, 4, 3, 5]);
    }

    #[test]
    fn test_reviews_descending_and_stable() {
        let data = places(&[
            json!({"id": 1, "name": "A", "reviews": 10}),
            json!({"id": 2, "name": "B"}),
            json!({"id": 3, "name": "C", "reviews": 300}),
            json!({"id": 4, "name": "D", "reviews": 10}),
        ]);
        let mut refs: Vec<&Place> = data.iter().collect();
        sort_places(&mut refs, SortKey::Reviews);
        assert_eq!(ids(&refs), vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_name_ascending_and_stable() {
        let data = places(&[
            json!({"id": 1, "name": "Qutub Minar"}),
            json!({"id": 2, "name": "amber fort"}),
            json!({"id": 3, "name": "Hampi"}),
            json!({"id": 4, "name": "Hampi"}),
        ]);
        let mut refs: Vec<&Place> = data.iter().collect();
        sort_places(&mut refs, SortKey::Name);
        assert_eq!(ids(&refs), vec![2, 3, 4, 1]);
    }
}
