//! Search, filter and sort over the catalog.
//!
//! [`run_query`] is the pure function; [`QueryPipeline`] wraps it with a
//! one-entry memo so repeated renders with unchanged inputs are free.

mod facets;
mod filter;
mod pipeline;
mod sort;
mod state;

pub use facets::{CategoryFacet, RegionFacet, category_facets, region_facets};
pub use filter::{matches_category, matches_region, matches_search, normalize_search};
pub use pipeline::{QueryPipeline, QueryResults, run_query};
pub use sort::{compare_names, compare_places, sort_places};
pub use state::{CategoryFilter, ParseQueryError, QueryState, RegionFilter, SortKey, ViewMode};
