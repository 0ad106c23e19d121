use watchindex_core::{FavoritesPersistence, FavoritesStore};

pub mod clear;
pub mod config;
pub mod favorites;
pub mod prompts;

/// Store as built from configuration: the backend is picked at runtime
pub type Store = FavoritesStore<Box<dyn FavoritesPersistence>>;
