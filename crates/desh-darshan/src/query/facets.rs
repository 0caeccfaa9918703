//! Filter choices with counts, for category tabs and the state dropdown.

use ahash::AHashMap as HashMap;
use desh_darshan_catalog::{Category, Place};
use itertools::Itertools;
use serde::Serialize;

use super::state::{CategoryFilter, RegionFilter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFacet {
    #[serde(skip)]
    pub filter: CategoryFilter,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionFacet {
    #[serde(skip)]
    pub filter: RegionFilter,
    pub label: String,
    pub count: usize,
}

/// `All Places` followed by the known categories, each with its count over
/// `places`. Categories outside the known set only count towards `All Places`.
#[must_use]
pub fn category_facets(places: &[Place]) -> Vec<CategoryFacet> {
    let mut counts: HashMap<&Category, usize> = HashMap::new();
    for category in places.iter().filter_map(Place::category) {
        *counts.entry(category).or_default() += 1;
    }

    std::iter::once(CategoryFacet {
        filter: CategoryFilter::All,
        label: "All Places".to_string(),
        count: places.len(),
    })
    .chain(Category::KNOWN.into_iter().map(|category| CategoryFacet {
        label: category.to_string(),
        count: counts.get(&category).copied().unwrap_or_default(),
        filter: CategoryFilter::Only(category),
    }))
    .collect()
}

/// `all` followed by every distinct non-empty trimmed state, sorted.
#[must_use]
pub fn region_facets(places: &[Place]) -> Vec<RegionFacet> {
    let states = places
        .iter()
        .map(Place::trimmed_state)
        .filter(|state| !state.is_empty())
        .sorted()
        .dedup_with_count()
        .map(|(count, state)| RegionFacet {
            filter: RegionFilter::Only(state.to_string()),
            label: state.to_string(),
            count,
        });

    std::iter::once(RegionFacet {
        filter: RegionFilter::All,
        label: "all".to_string(),
        count: places.len(),
    })
    .chain(states)
    .collect()
}
