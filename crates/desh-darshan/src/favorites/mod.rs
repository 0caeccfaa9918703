//! Durable set of favorited place ids.
//!
//! Each [`FavoritesStore`] owns an in-memory copy of the set and writes it
//! back after every mutation. Two stores over the same key only see each
//! other's changes after [`FavoritesStore::reload`]; use
//! [`SharedFavorites`] when several consumers need one live set.

mod shared;

use std::sync::Arc;

use desh_darshan_catalog::{Place, PlaceId};
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
pub use shared::{SharedFavorites, SubscriptionId};
use tracing::{debug, info, instrument};

use crate::{
    catalog::Catalog,
    storage::{JsonArraySlot, KeyValueStore, Persisted},
};

pub const FAVORITES_KEY: &str = "favorites";

/// Ordered set of ids: insertion order is kept, duplicates never are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: Vec<PlaceId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now
    /// in the set.
    pub fn toggle(&mut self, id: PlaceId) -> bool {
        if self.remove(&id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn remove(&mut self, id: &PlaceId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    #[must_use]
    pub fn contains(&self, id: &PlaceId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlaceId> {
        self.ids.iter()
    }

    #[must_use]
    pub fn ids(&self) -> &[PlaceId] {
        &self.ids
    }

    /// The stored form: a JSON array of ids.
    #[must_use]
    pub fn to_json(&self) -> Vec<Value> {
        self.ids.iter().map(PlaceId::to_json).collect()
    }

    fn clear(&mut self) {
        self.ids.clear();
    }
}

impl FromIterator<PlaceId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = PlaceId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().unique().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FavoriteSet {
    type Item = &'a PlaceId;
    type IntoIter = std::slice::Iter<'a, PlaceId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Counts shown on the favorites page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FavoritesSummary {
    pub saved: usize,
    pub states_covered: usize,
    pub categories: usize,
}

impl FavoriteSet {
    /// Favorited places in catalog order. Ids missing from the catalog are
    /// skipped.
    #[must_use]
    pub fn places<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Place> {
        catalog
            .iter()
            .filter(|place| self.contains(&place.id))
            .collect()
    }

    #[must_use]
    pub fn summary(&self, catalog: &Catalog) -> FavoritesSummary {
        let places = self.places(catalog);
        FavoritesSummary {
            saved: self.len(),
            states_covered: places
                .iter()
                .map(|place| place.trimmed_state())
                .filter(|state| !state.is_empty())
                .unique()
                .count(),
            categories: places
                .iter()
                .filter_map(|place| place.category())
                .unique()
                .count(),
        }
    }
}

mod error {
    use desh_darshan_catalog::PlaceId;
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum FavoritesError {
        #[error("Cannot favorite a place without an id (got {0:?})")]
        InvalidId(PlaceId),
    }
}

pub use error::FavoritesError;

/// A favorite set bound to one storage key.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    slot: JsonArraySlot,
    set: FavoriteSet,
}

impl FavoritesStore {
    /// Read the set from `key`. Never fails: a missing or malformed value is
    /// an empty set, and a malformed one is reset to `[]` in storage.
    #[instrument(name = "Load favorites", skip(storage), level = "info")]
    pub fn load(storage: Arc<dyn KeyValueStore>, key: &str) -> Self {
        let slot = JsonArraySlot::new(storage, key);
        let set = read_set(&slot);
        info!(favorites = set.len(), "Favorites loaded");
        Self { slot, set }
    }

    /// Re-read storage, dropping the in-memory copy.
    pub fn reload(&mut self) -> &FavoriteSet {
        self.set = read_set(&self.slot);
        &self.set
    }

    /// Add `id` if absent, remove it if present, then persist.
    ///
    /// An invalid id (`0` or `""`) is rejected and nothing changes.
    pub fn toggle(&mut self, id: PlaceId) -> Result<Persisted<FavoriteSet>, FavoritesError> {
        if !id.is_valid() {
            return Err(FavoritesError::InvalidId(id));
        }
        let added = self.set.toggle(id.clone());
        debug!(%id, added, "Toggled favorite");
        Ok(self.persist())
    }

    /// Remove `id` if present. Persists only when something changed.
    pub fn remove(&mut self, id: &PlaceId) -> Persisted<bool> {
        if self.set.remove(id) {
            self.persist().map(|_| true)
        } else {
            Persisted::new(false, Ok(()))
        }
    }

    /// Empty the set and persist `[]`.
    pub fn clear(&mut self) -> Persisted<FavoriteSet> {
        self.set.clear();
        info!("Cleared favorites");
        self.persist()
    }

    #[must_use]
    pub fn contains(&self, id: &PlaceId) -> bool {
        self.set.contains(id)
    }

    #[must_use]
    pub fn set(&self) -> &FavoriteSet {
        &self.set
    }

    #[must_use]
    pub fn key(&self) -> &str {
        self.slot.key()
    }

    #[must_use]
    pub fn favorite_places<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Place> {
        self.set.places(catalog)
    }

    #[must_use]
    pub fn summary(&self, catalog: &Catalog) -> FavoritesSummary {
        self.set.summary(catalog)
    }

    fn persist(&self) -> Persisted<FavoriteSet> {
        Persisted::new(self.set.clone(), self.slot.write(&self.set.to_json()))
    }
}

/// Every element must be a usable id; otherwise the whole value is treated
/// as corrupted.
fn read_set(slot: &JsonArraySlot) -> FavoriteSet {
    let items = slot.read();
    let ids: Option<Vec<PlaceId>> = items
        .iter()
        .map(|item| PlaceId::from_json(item).filter(PlaceId::is_valid))
        .collect();

    match ids {
        Some(ids) => ids.into_iter().collect(),
        None => {
            slot.reset_corrupted("stored favorites contain values that are not place ids");
            FavoriteSet::new()
        }
    }
}
