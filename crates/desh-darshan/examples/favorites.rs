// examples/favorites.rs
use std::sync::Arc;

use desh_darshan::{
    DeshDarshanError, Explorer, FavoritesStore, FileStorage, KeyValueStore, PlaceId,
    SharedFavorites,
};
use tracing::Level;

fn main() -> Result<(), DeshDarshanError> {
    // Initialize logging
    desh_darshan::init_logging(Level::INFO)?;

    // Keep this run's data out of the real data directory
    let dir = tempfile::tempdir()?;
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStorage::open(dir.path())?);

    // 1. Save a few favorites
    {
        let mut explorer = Explorer::builder().storage(Arc::clone(&storage)).build()?;
        for id in [1, 13, 21] {
            let saved = explorer.toggle_favorite(PlaceId::Number(id))?;
            if let Some(err) = &saved.persist_error {
                println!("⚠️  Could not save favorite {id}: {err}");
            }
        }
        explorer.toggle_bookmark("Explore", "/explore")?;
    }

    // 2. A new session sees them
    let explorer = Explorer::builder().storage(Arc::clone(&storage)).build()?;
    println!("Favorites after restart:");
    for place in explorer.favorite_places() {
        println!("   ❤️  {} ({})", place.name, place.trimmed_state());
    }

    let summary = explorer.favorites_summary();
    println!(
        "Saved: {}, states covered: {}, categories: {}",
        summary.saved, summary.states_covered, summary.categories
    );
    println!("Bookmarks: {}", explorer.bookmarks().len());

    // 3. Directions for a favorite
    if let Some(place) = explorer.favorite_places().first() {
        match explorer.directions(&place.id) {
            Ok(url) => println!("Directions to {}: {url}", place.name),
            Err(err) => println!("No directions for {}: {err}", place.name),
        }
    }

    // 4. Live updates between two views sharing one store
    let shared = SharedFavorites::new(FavoritesStore::load(Arc::clone(&storage), "favorites"));
    let map_view = shared.clone();
    map_view.subscribe(|set| println!("Map view now shows {} favorites", set.len()));
    shared.toggle(PlaceId::Number(5))?;

    Ok(())
}
