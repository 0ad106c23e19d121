pub mod backend;
pub mod error;
pub mod factory;
pub mod mirror;
pub mod query;
pub mod store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use error::StorageError;
pub use factory::{open_persistence, open_store};
pub use mirror::{FavoritesMirror, FavoritesPersistence, NoopPersistence, FORMAT_VERSION};
pub use query::{count_by_type, describe_count, filter_by_media_type, FavoriteCounts};
pub use store::{FavoritesStore, SubscriptionId};
