pub mod favorite;
pub mod genre;
pub mod media;

pub use favorite::{FavoriteItem, FavoriteKey};
pub use genre::Genre;
pub use media::{MediaFilter, MediaType, ParseMediaTypeError};
