//! Filter + sort over the safe catalog, with a single-entry memo.

use std::sync::Arc;

use desh_darshan_catalog::{Place, PlaceId};
use tracing::{debug, instrument};

use super::{
    filter::{matches_category, matches_region, matches_search, normalize_search},
    sort::compare_places,
    state::{CategoryFilter, QueryState, RegionFilter, SortKey},
};
use crate::catalog::Catalog;

/// Indices into `places` of the matching places, in result order.
fn query_indices(places: &[Place], state: &QueryState) -> Vec<usize> {
    let needle = normalize_search(&state.search_text);

    let mut indices: Vec<usize> = places
        .iter()
        .enumerate()
        .filter(|(_, place)| {
            matches_search(place, &needle)
                && matches_category(place, &state.category)
                && matches_region(place, &state.region)
        })
        .map(|(index, _)| index)
        .collect();

    indices.sort_by(|&a, &b| compare_places(&places[a], &places[b], state.sort));
    indices
}

/// Run a query without memoization. Pure: same inputs, same output.
pub fn run_query<'a>(places: &'a [Place], state: &QueryState) -> Vec<&'a Place> {
    query_indices(places, state)
        .into_iter()
        .map(|index| &places[index])
        .collect()
}

/// The inputs that determine a query result. View mode is not one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryKey {
    search_text: String,
    category: CategoryFilter,
    region: RegionFilter,
    sort: SortKey,
}

impl From<&QueryState> for QueryKey {
    fn from(state: &QueryState) -> Self {
        Self {
            search_text: state.search_text.clone(),
            category: state.category.clone(),
            region: state.region.clone(),
            sort: state.sort,
        }
    }
}

/// Query pipeline over one catalog.
///
/// Remembers the last inputs and their output; asking again with equal
/// inputs returns the remembered output without recomputing.
#[derive(Debug, Clone)]
pub struct QueryPipeline {
    catalog: Catalog,
    memo: Option<(QueryKey, Arc<[usize]>)>,
    recomputes: usize,
}

impl QueryPipeline {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            memo: None,
            recomputes: 0,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// How many times results were actually computed.
    #[must_use]
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }

    #[instrument(name = "Query places", skip_all, level = "debug")]
    pub fn results(&mut self, state: &QueryState) -> QueryResults<'_> {
        let key = QueryKey::from(state);
        let cached = self
            .memo
            .as_ref()
            .filter(|(last, _)| *last == key)
            .map(|(_, indices)| Arc::clone(indices));
        let indices = match cached {
            Some(indices) => indices,
            None => {
                let indices: Arc<[usize]> = query_indices(self.catalog.places(), state).into();
                self.recomputes += 1;
                debug!(
                    matches = indices.len(),
                    recomputes = self.recomputes,
                    "Recomputed query results"
                );
                self.memo = Some((key, Arc::clone(&indices)));
                indices
            }
        };

        QueryResults {
            places: self.catalog.places(),
            indices,
        }
    }
}

/// Ordered query output borrowing the catalog.
#[derive(Debug, Clone)]
pub struct QueryResults<'a> {
    places: &'a [Place],
    indices: Arc<[usize]>,
}

impl<'a> QueryResults<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&'a Place> {
        self.indices.get(position).map(|&index| &self.places[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Place> + '_ {
        self.indices.iter().map(|&index| &self.places[index])
    }

    #[must_use]
    pub fn ids(&self) -> Vec<PlaceId> {
        self.iter().map(|place| place.id.clone()).collect()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<&'a Place> {
        self.iter().collect()
    }

    /// Whether both results come from the same memoized computation.
    #[must_use]
    pub fn shares_output_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.indices, &other.indices)
    }
}

#[cfg(test)]
mod tests {
    use desh_darshan_catalog::{Category, RawCatalog};
    use serde_json::json;

    use super::*;
    use crate::query::state::ViewMode;

    fn catalog() -> Catalog {
        Catalog::from_raw(&RawCatalog::from_records(vec![
            json!({"id": 1, "name": "Taj Mahal", "city": "Agra", "state": "Uttar Pradesh", "category": "Historical", "rating": 4.8}),
            json!({"id": 2, "name": "Gateway of India", "city": "Mumbai", "state": "Maharashtra", "category": "Historical", "rating": 4.5}),
        ]))
    }

    #[test]
    fn test_reference_scenarios() {
        let catalog = catalog();

        let by_search = run_query(
            catalog.places(),
            &QueryState::new().with_search("mahal").with_sort(SortKey::Name),
        );
        assert_eq!(
            by_search.iter().map(|p| p.id.clone()).collect::<Vec<_>>(),
            vec![PlaceId::Number(1)]
        );

        let by_category = run_query(
            catalog.places(),
            &QueryState::new()
                .with_category(Category::Historical)
                .with_sort(SortKey::Rating),
        );
        assert_eq!(
            by_category.iter().map(|p| p.id.clone()).collect::<Vec<_>>(),
            vec![PlaceId::Number(1), PlaceId::Number(2)]
        );
    }

    #[test]
    fn test_memo_hits_on_equal_inputs() {
        let mut pipeline = QueryPipeline::new(catalog());
        let state = QueryState::new().with_search("a");

        let first = pipeline.results(&state).ids();
        assert_eq!(pipeline.recompute_count(), 1);

        let again = pipeline.results(&state.clone()).ids();
        assert_eq!(first, again);
        assert_eq!(pipeline.recompute_count(), 1);

        // View mode is presentation only.
        pipeline.results(&state.clone().with_view(ViewMode::List));
        assert_eq!(pipeline.recompute_count(), 1);

        pipeline.results(&state.clone().with_sort(SortKey::Rating));
        assert_eq!(pipeline.recompute_count(), 2);

        // Only the last inputs are remembered.
        pipeline.results(&state);
        assert_eq!(pipeline.recompute_count(), 3);
    }

    #[test]
    fn test_results_accessors() {
        let mut pipeline = QueryPipeline::new(catalog());
        let results = pipeline.results(&QueryState::new().with_sort(SortKey::Name));
        assert_eq!(results.len(), 2);
        assert_eq!(results.get(0).unwrap().name, "Gateway of India");
        assert_eq!(results.get(1).unwrap().name, "Taj Mahal");
        assert!(results.get(2).is_none());
        assert_eq!(results.to_vec().len(), 2);
    }

    #[test]
    fn test_empty_catalog() {
        let mut pipeline = QueryPipeline::new(Catalog::default());
        assert!(pipeline.results(&QueryState::new().with_search("taj")).is_empty());
    }
}
