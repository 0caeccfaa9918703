//! Type-ahead suggestions.
//!
//! [`suggest`] is the pure lookup. [`SuggestionEngine`] puts a
//! [`Debouncer`] in front of it so a burst of keystrokes produces a single
//! computation, for the last text typed.

mod debounce;
mod panel;

use std::time::{Duration, Instant};

use desh_darshan_catalog::{Place, PlaceId};
pub use debounce::Debouncer;
pub use panel::{PanelKey, SuggestionPanel};
use tracing::debug;

use crate::{
    catalog::Catalog,
    query::{matches_search, normalize_search},
};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Up to `limit` places matching `text`, in catalog order.
///
/// Uses the search predicate only; category and region filters do not
/// apply. Empty text gives no suggestions; whitespace-only text matches
/// like any other search and so suggests the first places.
#[must_use]
pub fn suggest<'a>(places: &'a [Place], text: &str, limit: usize) -> Vec<&'a Place> {
    suggest_indices(places, text, limit)
        .into_iter()
        .map(|i| &places[i])
        .collect()
}

fn suggest_indices(places: &[Place], text: &str, limit: usize) -> Vec<usize> {
    if text.is_empty() {
        return Vec::new();
    }
    let needle = normalize_search(text);
    places
        .iter()
        .enumerate()
        .filter(|(_, place)| matches_search(place, &needle))
        .map(|(i, _)| i)
        .take(limit)
        .collect()
}

/// Debounced suggestion state for one search box.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    catalog: Catalog,
    limit: usize,
    debouncer: Debouncer<String>,
    /// Positions in the catalog, so records sharing an id stay distinct.
    current: Vec<usize>,
}

impl SuggestionEngine {
    pub fn new(catalog: Catalog, limit: usize, quiet: Duration) -> Self {
        Self {
            catalog,
            limit,
            debouncer: Debouncer::new(quiet),
            current: Vec::new(),
        }
    }

    /// Record new search text.
    ///
    /// Empty text clears the suggestions at once and cancels any pending
    /// computation. Anything else (re)schedules a computation for
    /// `now + quiet`; earlier pending text is discarded.
    pub fn on_input(&mut self, text: &str, now: Instant) {
        if text.is_empty() {
            self.clear();
            return;
        }
        if self.debouncer.schedule(text.to_string(), now) {
            debug!(text, "Superseded pending suggestion lookup");
        }
    }

    /// Run the pending computation if its deadline has passed. Returns
    /// `true` when the suggestions were recomputed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(text) = self.debouncer.poll(now) else {
            return false;
        };
        self.current = suggest_indices(self.catalog.places(), &text, self.limit);
        debug!(text, suggestions = self.current.len(), "Computed suggestions");
        true
    }

    /// Whether a computation is scheduled but has not run yet.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.debouncer.is_pending()
    }

    #[must_use]
    pub fn suggestion_ids(&self) -> Vec<PlaceId> {
        self.suggestions()
            .into_iter()
            .map(|place| place.id.clone())
            .collect()
    }

    /// The current suggestions, in catalog order.
    #[must_use]
    pub fn suggestions(&self) -> Vec<&Place> {
        self.current
            .iter()
            .filter_map(|&i| self.catalog.places().get(i))
            .collect()
    }

    /// The suggestion at row `index` of the current list.
    #[must_use]
    pub fn suggestion(&self, index: usize) -> Option<&Place> {
        self.current
            .get(index)
            .and_then(|&i| self.catalog.places().get(i))
    }

    /// Drop current suggestions and any pending computation.
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.current.clear();
    }

    /// Drop the pending computation only, keeping what is shown.
    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use desh_darshan_catalog::{RawCatalog, TestDataConfig, create_test_records};
    use serde_json::json;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_raw(&RawCatalog::from_records(create_test_records(
            &TestDataConfig::sample(),
        )))
    }

    #[test]
    fn test_suggest_caps_and_keeps_catalog_order() {
        let places: Vec<Place> = (1..=8)
            .map(|i| {
                Place::from_raw(&json!({"id": i, "name": format!("Fort {i}")})).unwrap()
            })
            .collect();

        let found = suggest(&places, "fort", DEFAULT_SUGGESTION_LIMIT);
        let ids: Vec<i64> = found
            .iter()
            .filter_map(|p| match p.id {
                PlaceId::Number(n) => Some(n),
                PlaceId::Text(_) => None,
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_suggest_empty_text() {
        let catalog = catalog();
        assert!(suggest(catalog.places(), "", 5).is_empty());

        // Whitespace is trimmed by the search predicate, so it matches everything.
        let blank = suggest(catalog.places(), "   ", 5);
        assert_eq!(blank.len(), 5);
        assert_eq!(blank[0].id, catalog.places()[0].id);
    }

    #[test]
    fn test_duplicate_ids_resolve_to_matching_record() {
        let places: Vec<Place> = [
            json!({"id": 7, "name": "Amber Fort"}),
            json!({"id": 7, "name": "Hawa Mahal"}),
        ]
        .iter()
        .map(|raw| Place::from_raw(raw).unwrap())
        .collect();
        let catalog = Catalog::from_places(places);

        let start = Instant::now();
        let mut engine = SuggestionEngine::new(catalog, 5, DEFAULT_DEBOUNCE);
        engine.on_input("hawa", start);
        assert!(engine.poll(start + DEFAULT_DEBOUNCE));

        let names: Vec<&str> = engine.suggestions().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Hawa Mahal"]);
        assert_eq!(engine.suggestion(0).map(|p| p.name.as_str()), Some("Hawa Mahal"));
        assert_eq!(engine.suggestion_ids(), vec![PlaceId::Number(7)]);
    }

    #[test]
    fn test_only_last_text_in_burst_is_computed() {
        let start = Instant::now();
        let mut engine = SuggestionEngine::new(catalog(), 5, DEFAULT_DEBOUNCE);

        engine.on_input("x", start);
        engine.on_input("taj", start + Duration::from_millis(100));
        assert!(engine.is_loading());
        assert!(!engine.poll(start + Duration::from_millis(300)));

        assert!(engine.poll(start + Duration::from_millis(400)));
        assert!(!engine.is_loading());
        assert!(!engine.suggestions().is_empty());
        assert!(
            engine
                .suggestions()
                .iter()
                .all(|p| p.name.to_lowercase().contains("taj"))
        );
    }

    #[test]
    fn test_empty_input_clears_immediately() {
        let start = Instant::now();
        let mut engine = SuggestionEngine::new(catalog(), 5, DEFAULT_DEBOUNCE);
        engine.on_input("a", start);
        engine.poll(start + DEFAULT_DEBOUNCE);
        assert!(!engine.suggestion_ids().is_empty());

        engine.on_input("ab", start + Duration::from_secs(1));
        engine.on_input("", start + Duration::from_secs(1));
        assert!(engine.suggestion_ids().is_empty());
        assert!(!engine.is_loading());
        assert!(!engine.poll(start + Duration::from_secs(5)));
    }
}
