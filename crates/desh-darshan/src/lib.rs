//! Desh Darshan - discover tourist places across India
//!
//! Desh Darshan is the data pipeline behind a travel guide: a validated
//! place catalog, search with category and state filters, type-ahead
//! suggestions that wait for the user to stop typing, and favorites and
//! bookmarks that survive restarts.
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::{Duration, Instant};
//!
//! use desh_darshan::{Category, Explorer, PlaceId, SortKey};
//!
//! // In-memory storage keeps this example from touching the disk
//! let mut explorer = Explorer::builder().memory_storage().build()?;
//!
//! // Filter and sort
//! explorer.set_category(Category::Historical);
//! explorer.set_sort(SortKey::Rating);
//! for place in explorer.results().iter().take(3) {
//!     println!("{} ({}) - {}", place.name, place.trimmed_state(), place.rating);
//! }
//!
//! // Suggestions appear once the text has been stable for the debounce period
//! let start = Instant::now();
//! explorer.set_search_text_at("taj", start);
//! explorer.poll_suggestions_at(start + Duration::from_millis(300));
//! assert!(!explorer.suggestions().is_empty());
//!
//! // Favorites are persisted after every toggle
//! explorer.toggle_favorite(PlaceId::Number(1))?;
//! assert!(explorer.is_favorite(&PlaceId::Number(1)));
//! # Ok::<(), desh_darshan::error::DeshDarshanError>(())
//! ```
//!
//! # Data
//!
//! A curated catalog of places ships inside `desh-darshan-catalog`, so the
//! library works without any setup. Other catalogs can be loaded from a
//! file or a JSON string; records without an id or name are skipped.
//!
//! Favorites and bookmarks are stored as JSON arrays in a key-value
//! backend. [`FileStorage`] writes them under [`DATA_DIR`]
//! (`$DESH_DARSHAN_DATA_DIR` overrides it).
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

pub mod bookmarks;
mod catalog;
mod config;
mod core;
pub mod directions;
pub mod error;
pub mod favorites;
pub mod query;
pub mod storage;
pub mod suggest;

pub use crate::core::{Explorer, ExplorerBuilder};

pub use bookmarks::{Bookmark, BookmarkTime, BookmarkToggle, BookmarksError, BookmarksStore};
pub use catalog::Catalog;
pub use config::{ExplorerConfig, ExplorerConfigBuilder};
pub use desh_darshan_catalog as data;
pub use desh_darshan_catalog::{Category, CatalogSource, Coordinates, Place, PlaceId};
pub use directions::{DirectionsError, directions_url};
pub use error::DeshDarshanError;
pub use favorites::{
    FavoriteSet, FavoritesError, FavoritesStore, FavoritesSummary, SharedFavorites,
    SubscriptionId,
};
pub use query::{
    CategoryFacet, CategoryFilter, QueryPipeline, QueryResults, QueryState, RegionFacet,
    RegionFilter, SortKey, ViewMode, run_query,
};
pub use storage::{
    DATA_DIR, FileStorage, KeyValueStore, MemoryStorage, Persisted, StorageError,
};
pub use suggest::{PanelKey, SuggestionEngine, SuggestionPanel, suggest};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Desh Darshan library.
///
/// Sets up a `tracing` subscriber writing to stderr. `RUST_LOG` takes
/// precedence over `level` when it is set. Calling this more than once is
/// harmless; only the first call installs the subscriber.
///
/// # Examples
///
/// ```rust
/// use desh_darshan::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), desh_darshan::error::DeshDarshanError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::DeshDarshanError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?;

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}
