// examples/configuration.rs
use std::time::{Duration, Instant};

use desh_darshan::{DeshDarshanError, Explorer, ExplorerConfigBuilder, PanelKey};
use tracing::Level;

fn main() -> Result<(), DeshDarshanError> {
    // Initialize logging
    desh_darshan::init_logging(Level::INFO)?;

    // 1. Presets
    let responsive = ExplorerConfigBuilder::responsive().build()?;
    let relaxed = ExplorerConfigBuilder::relaxed().build()?;
    println!("Responsive: {responsive:?}");
    println!("Relaxed:    {relaxed:?}");

    // 2. Custom settings on top of a preset
    let config = ExplorerConfigBuilder::responsive()
        .suggestion_limit(3)
        .favorites_key("demo_favorites")
        .bookmarks_key("demo_bookmarks")
        .build()?;

    // 3. Invalid settings are rejected
    if let Err(err) = ExplorerConfigBuilder::new().suggestion_limit(0).build() {
        println!("Rejected: {err}");
    }

    let mut explorer = Explorer::builder()
        .memory_storage()
        .config(config)
        .build()?;

    // 4. Type, wait for the quiet period, then pick with the keyboard
    let start = Instant::now();
    explorer.set_search_text_at("m", start);
    explorer.set_search_text_at("mu", start + Duration::from_millis(50));
    explorer.set_search_text_at("mus", start + Duration::from_millis(100));
    explorer.poll_suggestions_at(start + Duration::from_millis(250));

    println!("\nSuggestions for 'mus' (limit 3):");
    for place in explorer.suggestions() {
        println!("   {}", place.name);
    }

    explorer.handle_panel_key(PanelKey::ArrowDown);
    explorer.handle_panel_key(PanelKey::ArrowDown);
    if let Some(place) = explorer.handle_panel_key(PanelKey::Enter) {
        println!("Picked: {}", place.name);
    }
    println!("Search text is now {:?}", explorer.state().search_text);

    Ok(())
}
