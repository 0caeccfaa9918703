//! The safe catalog: validated places, loaded once and shared read-only.

use std::sync::Arc;

use ahash::AHashMap as HashMap;
use desh_darshan_catalog::{CatalogSource, Place, PlaceId, RawCatalog, sanitize};
use tracing::{info, instrument, warn};

use crate::error::Result;

/// Validated, immutable places in catalog order.
///
/// Cloning is cheap; clones share the same places. Sanitization happens
/// exactly once, when the catalog is built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    places: Arc<[Place]>,
    by_id: Arc<HashMap<PlaceId, usize>>,
}

impl Catalog {
    /// Load and sanitize a catalog. An unusable source gives an empty catalog.
    #[instrument(name = "Load catalog", level = "info")]
    pub fn load(source: &CatalogSource) -> Self {
        Self::from_raw(&RawCatalog::load(source))
    }

    /// Like [`Catalog::load`], but a missing or malformed source is an error.
    pub fn try_load(source: &CatalogSource) -> Result<Self> {
        Ok(Self::from_raw(&RawCatalog::read(source)?))
    }

    /// The dataset bundled with the catalog crate.
    pub fn embedded() -> Self {
        Self::load(&CatalogSource::Embedded)
    }

    pub fn from_raw(raw: &RawCatalog) -> Self {
        Self::from_places(sanitize(raw))
    }

    pub fn from_places(places: Vec<Place>) -> Self {
        let mut by_id = HashMap::with_capacity(places.len());
        for (index, place) in places.iter().enumerate() {
            if by_id.contains_key(&place.id) {
                warn!(id = %place.id, "Duplicate place id, lookups resolve to the first entry");
                continue;
            }
            by_id.insert(place.id.clone(), index);
        }
        info!(places = places.len(), "Catalog ready");
        Self {
            places: places.into(),
            by_id: Arc::new(by_id),
        }
    }

    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    #[must_use]
    pub fn get(&self, id: &PlaceId) -> Option<&Place> {
        self.by_id.get(id).map(|&index| &self.places[index])
    }

    #[must_use]
    pub fn contains(&self, id: &PlaceId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Whether both handles share the same loaded places.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.places, &other.places)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
