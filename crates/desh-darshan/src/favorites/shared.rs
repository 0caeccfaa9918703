use std::sync::{Arc, PoisonError, RwLock};

use desh_darshan_catalog::PlaceId;
use tracing::debug;

use super::{FavoriteSet, FavoritesError, FavoritesStore};
use crate::storage::Persisted;

type Listener = Arc<dyn Fn(&FavoriteSet) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Inner {
    store: FavoritesStore,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

/// One favorites store shared by several consumers.
///
/// Every mutation is pushed to all subscribers, so a toggle on one surface
/// is visible on the others without re-reading storage. Clones share the
/// same store.
#[derive(Clone)]
pub struct SharedFavorites {
    inner: Arc<RwLock<Inner>>,
}

impl std::fmt::Debug for SharedFavorites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("SharedFavorites")
            .field("store", &inner.store)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl SharedFavorites {
    pub fn new(store: FavoritesStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                store,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Call `listener` with the new set after every change.
    pub fn subscribe(&self, listener: impl Fn(&FavoriteSet) + Send + Sync + 'static) -> SubscriptionId {
        let mut inner = self.write();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.write();
        let before = inner.listeners.len();
        inner.listeners.retain(|(existing, _)| *existing != id);
        inner.listeners.len() != before
    }

    #[must_use]
    pub fn snapshot(&self) -> FavoriteSet {
        self.read().store.set().clone()
    }

    #[must_use]
    pub fn contains(&self, id: &PlaceId) -> bool {
        self.read().store.contains(id)
    }

    pub fn toggle(&self, id: PlaceId) -> Result<Persisted<FavoriteSet>, FavoritesError> {
        let (result, listeners) = {
            let mut inner = self.write();
            let result = inner.store.toggle(id)?;
            (result, inner.listeners_snapshot())
        };
        notify(&listeners, &result.value);
        Ok(result)
    }

    pub fn clear(&self) -> Persisted<FavoriteSet> {
        let (result, listeners) = {
            let mut inner = self.write();
            let result = inner.store.clear();
            (result, inner.listeners_snapshot())
        };
        notify(&listeners, &result.value);
        result
    }

    /// Re-read storage and push the result to subscribers.
    pub fn reload(&self) -> FavoriteSet {
        let (set, listeners) = {
            let mut inner = self.write();
            let set = inner.store.reload().clone();
            (set, inner.listeners_snapshot())
        };
        notify(&listeners, &set);
        set
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn listeners_snapshot(&self) -> Vec<Listener> {
        self.listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

/// Runs outside the lock so listeners may call back into the hub.
fn notify(listeners: &[Listener], set: &FavoriteSet) {
    debug!(listeners = listeners.len(), favorites = set.len(), "Notifying favorites subscribers");
    for listener in listeners {
        listener(set);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{
        favorites::FAVORITES_KEY,
        storage::{KeyValueStore, MemoryStorage},
    };

    fn shared() -> (Arc<MemoryStorage>, SharedFavorites) {
        let storage = Arc::new(MemoryStorage::new());
        let store = FavoritesStore::load(storage.clone(), FAVORITES_KEY);
        (storage, SharedFavorites::new(store))
    }

    #[test]
    fn test_clones_see_each_others_toggles() {
        let (storage, explore) = shared();
        let map = explore.clone();

        explore.toggle(PlaceId::Number(1)).unwrap();
        assert!(map.contains(&PlaceId::Number(1)));
        assert_eq!(storage.get(FAVORITES_KEY).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_subscribers_are_notified() {
        let (_storage, hub) = shared();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let id = hub.subscribe(move |set| sink.lock().unwrap().push(set.len()));

        hub.toggle(PlaceId::Number(1)).unwrap();
        hub.toggle(PlaceId::Number(2)).unwrap();
        hub.clear();
        assert!(hub.unsubscribe(id));
        hub.toggle(PlaceId::Number(3)).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 0]);
        assert!(!hub.unsubscribe(id));
    }

    #[test]
    fn test_listener_can_read_hub() {
        let (_storage, hub) = shared();
        let observed = Arc::new(Mutex::new(None));

        let reader = hub.clone();
        let sink = Arc::clone(&observed);
        hub.subscribe(move |_| {
            *sink.lock().unwrap() = Some(reader.contains(&PlaceId::Number(5)));
        });

        hub.toggle(PlaceId::Number(5)).unwrap();
        assert_eq!(*observed.lock().unwrap(), Some(true));
    }

    #[test]
    fn test_invalid_toggle_does_not_notify() {
        let (_storage, hub) = shared();
        let calls = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&calls);
        hub.subscribe(move |_| *sink.lock().unwrap() += 1);

        assert!(hub.toggle(PlaceId::from("")).is_err());
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_reload_picks_up_external_writes() {
        let (storage, hub) = shared();
        storage.set(FAVORITES_KEY, "[\"taj\"]").unwrap();
        assert!(hub.snapshot().is_empty());
        assert!(hub.reload().contains(&PlaceId::from("taj")));
    }
}
