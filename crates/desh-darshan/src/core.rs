//! The [`Explorer`]: one browsing session over the catalog.
//!
//! It ties the query pipeline, the suggestion engine and the two persisted
//! stores to the actions a user can take on the explore, map and favorites
//! views.
//!
//! ```rust
//! use desh_darshan::{Explorer, SortKey};
//!
//! let mut explorer = Explorer::builder().memory_storage().build()?;
//! explorer.set_sort(SortKey::Rating);
//! let best = explorer.results().get(0).map(|place| place.name.clone());
//! assert!(best.is_some());
//! # Ok::<(), desh_darshan::error::DeshDarshanError>(())
//! ```

use std::{sync::Arc, time::Instant};

use desh_darshan_catalog::{CatalogSource, Place, PlaceId};
use tracing::{debug, info, instrument};

use crate::{
    bookmarks::{Bookmark, BookmarkToggle, BookmarksStore},
    catalog::Catalog,
    config::ExplorerConfig,
    directions::directions_url,
    error::{DeshDarshanError, Result},
    favorites::{FavoriteSet, FavoritesStore, FavoritesSummary},
    query::{
        CategoryFacet, CategoryFilter, QueryPipeline, QueryResults, QueryState, RegionFacet,
        RegionFilter, SortKey, ViewMode, category_facets, region_facets,
    },
    storage::{FileStorage, KeyValueStore, MemoryStorage, Persisted},
    suggest::{PanelKey, SuggestionEngine, SuggestionPanel},
};

#[derive(Debug)]
pub struct Explorer {
    catalog: Catalog,
    config: ExplorerConfig,
    state: QueryState,
    pipeline: QueryPipeline,
    suggestions: SuggestionEngine,
    panel: SuggestionPanel,
    favorites: FavoritesStore,
    bookmarks: BookmarksStore,
}

impl Explorer {
    /// Embedded catalog, file storage in the default data directory.
    #[instrument(name = "Create Explorer with Embedded Data", level = "info")]
    pub fn new_embedded() -> Result<Self> {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> ExplorerBuilder {
        ExplorerBuilder::new()
    }

    fn from_parts(catalog: Catalog, storage: Arc<dyn KeyValueStore>, config: ExplorerConfig) -> Self {
        let favorites = FavoritesStore::load(Arc::clone(&storage), &config.favorites_key);
        let bookmarks = BookmarksStore::load(storage, &config.bookmarks_key);
        info!(
            places = catalog.len(),
            favorites = favorites.set().len(),
            bookmarks = bookmarks.len(),
            "Explorer ready"
        );
        Self {
            pipeline: QueryPipeline::new(catalog.clone()),
            suggestions: SuggestionEngine::new(
                catalog.clone(),
                config.suggestion_limit,
                config.debounce,
            ),
            catalog,
            config,
            state: QueryState::default(),
            panel: SuggestionPanel::new(),
            favorites,
            bookmarks,
        }
    }

    // === Catalog ===

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    #[must_use]
    pub fn place(&self, id: &PlaceId) -> Option<&Place> {
        self.catalog.get(id)
    }

    // === Query state ===

    #[must_use]
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.set_search_text_at(text, Instant::now());
    }

    /// Update the search text. Results follow immediately; suggestions are
    /// recomputed once the text has been stable for the debounce period.
    pub fn set_search_text_at(&mut self, text: &str, now: Instant) {
        text.clone_into(&mut self.state.search_text);
        self.suggestions.on_input(text, now);
        if text.is_empty() {
            self.panel.clear();
        }
    }

    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.state.category = category.into();
    }

    pub fn set_region(&mut self, region: RegionFilter) {
        self.state.region = region;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.state.sort = sort;
    }

    pub fn set_view_mode(&mut self, view: ViewMode) {
        self.state.view = view;
    }

    /// Back to default filters, with no suggestions showing.
    pub fn clear_filters(&mut self) {
        self.state.reset();
        self.suggestions.clear();
        self.panel.clear();
        debug!("Cleared filters");
    }

    // === Results ===

    pub fn results(&mut self) -> QueryResults<'_> {
        self.pipeline.results(&self.state)
    }

    #[must_use]
    pub fn recompute_count(&self) -> usize {
        self.pipeline.recompute_count()
    }

    #[must_use]
    pub fn category_facets(&self) -> Vec<CategoryFacet> {
        category_facets(self.catalog.places())
    }

    #[must_use]
    pub fn region_facets(&self) -> Vec<RegionFacet> {
        region_facets(self.catalog.places())
    }

    // === Suggestions ===

    pub fn poll_suggestions(&mut self) -> bool {
        self.poll_suggestions_at(Instant::now())
    }

    /// Run a due suggestion computation and show its output in the panel.
    pub fn poll_suggestions_at(&mut self, now: Instant) -> bool {
        if !self.suggestions.poll(now) {
            return false;
        }
        self.panel.show(self.suggestions.suggestion_ids());
        true
    }

    #[must_use]
    pub fn suggestions(&self) -> Vec<&Place> {
        self.suggestions.suggestions()
    }

    #[must_use]
    pub fn suggestions_loading(&self) -> bool {
        self.suggestions.is_loading()
    }

    #[must_use]
    pub fn suggestion_panel(&self) -> &SuggestionPanel {
        &self.panel
    }

    /// Pick a suggestion: the search text becomes the place name and the
    /// panel closes.
    pub fn choose_suggestion(&mut self, id: &PlaceId) -> Result<&Place> {
        let place = self
            .catalog
            .get(id)
            .ok_or_else(|| DeshDarshanError::UnknownPlace(id.clone()))?;
        place.name.clone_into(&mut self.state.search_text);
        self.suggestions.cancel();
        self.panel.hide();
        Ok(place)
    }

    /// Forward a key press to the open panel. `Enter` on a highlighted row
    /// chooses it.
    pub fn handle_panel_key(&mut self, key: PanelKey) -> Option<&Place> {
        self.panel.handle_key(key)?;
        let row = self.panel.selected_index()?;
        self.choose_row(row)
    }

    /// Form submit: choose the highlighted suggestion, else the first one.
    pub fn submit_search(&mut self) -> Option<&Place> {
        if !self.panel.is_visible() {
            return None;
        }
        self.panel.submit()?;
        let row = self.panel.selected_index().unwrap_or(0);
        self.choose_row(row)
    }

    /// Choose by panel row, so records sharing an id stay distinct.
    fn choose_row(&mut self, row: usize) -> Option<&Place> {
        let name = self.suggestions.suggestion(row)?.name.clone();
        self.apply_choice(name);
        self.suggestions.suggestion(row)
    }

    fn apply_choice(&mut self, name: String) {
        self.state.search_text = name;
        self.suggestions.cancel();
        self.panel.hide();
    }

    // === Favorites ===

    pub fn toggle_favorite(&mut self, id: PlaceId) -> Result<Persisted<FavoriteSet>> {
        Ok(self.favorites.toggle(id)?)
    }

    #[must_use]
    pub fn is_favorite(&self, id: &PlaceId) -> bool {
        self.favorites.contains(id)
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoriteSet {
        self.favorites.set()
    }

    #[must_use]
    pub fn favorite_places(&self) -> Vec<&Place> {
        self.favorites.favorite_places(&self.catalog)
    }

    #[must_use]
    pub fn favorites_summary(&self) -> FavoritesSummary {
        self.favorites.summary(&self.catalog)
    }

    pub fn clear_favorites(&mut self) -> Persisted<FavoriteSet> {
        self.favorites.clear()
    }

    /// Pick up favorites written by another store over the same storage.
    pub fn reload_favorites(&mut self) -> &FavoriteSet {
        self.favorites.reload()
    }

    // === Bookmarks ===

    pub fn toggle_bookmark(&mut self, title: &str, url: &str) -> Result<Persisted<BookmarkToggle>> {
        Ok(self.bookmarks.toggle(title, url)?)
    }

    #[must_use]
    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.bookmarks.contains(url)
    }

    #[must_use]
    pub fn bookmarks(&self) -> &[Bookmark] {
        self.bookmarks.list()
    }

    // === Directions ===

    pub fn directions(&self, id: &PlaceId) -> Result<String> {
        let place = self
            .place(id)
            .ok_or_else(|| DeshDarshanError::UnknownPlace(id.clone()))?;
        Ok(directions_url(place)?)
    }
}

/// Builder for creating an [`Explorer`] with custom sources and storage.
pub struct ExplorerBuilder {
    source: CatalogSource,
    catalog: Option<Catalog>,
    strict_catalog: bool,
    storage: Option<Arc<dyn KeyValueStore>>,
    config: ExplorerConfig,
}

impl std::fmt::Debug for ExplorerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerBuilder")
            .field("source", &self.source)
            .field("catalog", &self.catalog.as_ref().map(Catalog::len))
            .field("strict_catalog", &self.strict_catalog)
            .field("storage", &self.storage.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl ExplorerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: CatalogSource::default(),
            catalog: None,
            strict_catalog: false,
            storage: None,
            config: ExplorerConfig::default(),
        }
    }

    /// Where to load places from.
    #[must_use]
    pub fn catalog_source(mut self, source: CatalogSource) -> Self {
        self.source = source;
        self
    }

    /// Use an already loaded catalog instead of loading one.
    #[must_use]
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Fail the build when the source cannot be read, instead of starting
    /// with an empty catalog.
    #[must_use]
    pub fn strict_catalog(mut self, strict: bool) -> Self {
        self.strict_catalog = strict;
        self
    }

    #[must_use]
    pub fn storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Keep favorites and bookmarks in memory only.
    #[must_use]
    pub fn memory_storage(self) -> Self {
        self.storage(Arc::new(MemoryStorage::new()))
    }

    #[must_use]
    pub fn config(mut self, config: ExplorerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the explorer. Without explicit storage, favorites and
    /// bookmarks go to [`FileStorage::open_default`].
    pub fn build(self) -> Result<Explorer> {
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None if self.strict_catalog => Catalog::try_load(&self.source)?,
            None => Catalog::load(&self.source),
        };
        let storage = match self.storage {
            Some(storage) => storage,
            None => Arc::new(FileStorage::open_default()?),
        };
        Ok(Explorer::from_parts(catalog, storage, self.config))
    }
}

impl Default for ExplorerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
