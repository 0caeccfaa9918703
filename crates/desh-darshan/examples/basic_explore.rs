// examples/basic_explore.rs
use std::time::{Duration, Instant};

use desh_darshan::{Category, DeshDarshanError, Explorer, RegionFilter, SortKey};
use tracing::Level;

fn main() -> Result<(), DeshDarshanError> {
    // Initialize logging
    desh_darshan::init_logging(Level::INFO)?;

    let mut explorer = Explorer::builder().memory_storage().build()?;
    println!("Loaded {} places", explorer.catalog().len());

    // 1. Browse by category
    println!("\nCategories:");
    for facet in explorer.category_facets() {
        println!("   {:<12} {}", facet.label, facet.count);
    }

    // 2. Top rated historical places
    explorer.set_category(Category::Historical);
    explorer.set_sort(SortKey::Rating);
    println!("\nTop rated historical places:");
    for place in explorer.results().iter().take(5) {
        println!("   {:.1}  {} ({})", place.rating, place.name, place.city);
    }

    // 3. Narrow down to one state
    explorer.set_region(RegionFilter::only("Rajasthan"));
    println!("\nHistorical places in Rajasthan: {}", explorer.results().len());

    // 4. Free text search with suggestions
    explorer.clear_filters();
    let start = Instant::now();
    explorer.set_search_text_at("temple", start);
    explorer.poll_suggestions_at(start + explorer.config().debounce + Duration::from_millis(1));

    println!("\nSuggestions for 'temple':");
    for place in explorer.suggestions() {
        println!("   {} - {}", place.name, place.trimmed_state());
    }

    let results = explorer.results();
    println!("Search results for 'temple': {}", results.len());

    Ok(())
}
