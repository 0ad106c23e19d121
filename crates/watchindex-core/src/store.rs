use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};
use watchindex_models::{FavoriteItem, MediaFilter, MediaType};
use crate::mirror::FavoritesPersistence;
use crate::query::{count_by_type, filter_by_media_type, FavoriteCounts};


/// Handle returned by [`FavoritesStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&[FavoriteItem])>;

/// Owner of the favorites collection
///
/// The store loads from its persistence exactly once, in [`FavoritesStore::open`].
/// After that every mutation runs to completion in the caller's turn:
/// update memory, save the whole collection, notify subscribers.
/// Persistence failures are logged and never reach the caller; the in-memory
/// list stays authoritative until the next successful save.
pub struct FavoritesStore<P: FavoritesPersistence> {
    items: Vec<FavoriteItem>,
    persistence: P,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<P: FavoritesPersistence> FavoritesStore<P> {
    pub fn open(mut persistence: P) -> Self {
        let loaded = persistence.load();
        let items = dedupe(loaded);
        info!("Favorites store ready with {} items", items.len());
        Self {
            items,
            persistence,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Append `item` unless its `(id, media_type)` is already present.
    /// Returns whether the item was added; an existing snapshot is never overwritten.
    pub fn add(&mut self, item: FavoriteItem) -> bool {
        let added = if self.is_favorite(item.id, item.media_type) {
            debug!("{} {} is already a favorite", item.media_type, item.id);
            false
        } else {
            debug!("Adding {} {} to favorites", item.media_type, item.id);
            self.items.push(item);
            true
        };
        self.commit();
        added
    }

    /// Returns whether anything was removed
    pub fn remove(&mut self, id: u32, media_type: MediaType) -> bool {
        let before = self.items.len();
        self.items.retain(|fav| !fav.matches(id, media_type));
        let removed = self.items.len() != before;
        if removed {
            debug!("Removed {} {} from favorites", media_type, id);
        }
        self.commit();
        removed
    }

    /// Returns how many favorites were dropped
    pub fn clear(&mut self) -> usize {
        let cleared = self.items.len();
        self.items.clear();
        debug!("Cleared {} favorites", cleared);
        self.commit();
        cleared
    }

    pub fn is_favorite(&self, id: u32, media_type: MediaType) -> bool {
        self.items.iter().any(|fav| fav.matches(id, media_type))
    }

    pub fn get(&self, id: u32, media_type: MediaType) -> Option<&FavoriteItem> {
        self.items.iter().find(|fav| fav.matches(id, media_type))
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All favorites in the order they were added
    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    pub fn filtered(&self, filter: MediaFilter) -> Vec<&FavoriteItem> {
        filter_by_media_type(&self.items, filter)
    }

    pub fn counts(&self) -> FavoriteCounts {
        count_by_type(&self.items)
    }

    /// Register a callback that receives the collection after every mutation
    pub fn subscribe(&mut self, callback: impl FnMut(&[FavoriteItem]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Tear the store down, handing back its persistence
    pub fn into_persistence(self) -> P {
        self.persistence
    }

    fn commit(&mut self) {
        if let Err(e) = self.persistence.save(&self.items) {
            warn!("Failed to save favorites: {}. Keeping in-memory state.", e);
        }
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.items);
        }
    }
}

impl<P: FavoritesPersistence> fmt::Debug for FavoritesStore<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Keep the first snapshot of each `(id, media_type)` from hand-edited or merged data
fn dedupe(items: Vec<FavoriteItem>) -> Vec<FavoriteItem> {
    let total = items.len();
    let mut seen = HashSet::new();
    let unique: Vec<FavoriteItem> = items
        .into_iter()
        .filter(|item| seen.insert(item.key()))
        .collect();
    if unique.len() != total {
        warn!(
            "Dropped {} duplicate favorites from stored data",
            total - unique.len()
        );
    }
    unique
}
