use serde::{Deserialize, Serialize};
use crate::genre::Genre;
use crate::media::MediaType;

/// Composite identity of a favorite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FavoriteKey {
    pub id: u32,
    pub media_type: MediaType,
}

impl FavoriteKey {
    pub fn new(id: u32, media_type: MediaType) -> Self {
        Self { id, media_type }
    }
}

/// Snapshot of a movie or show taken when the user favorited it
///
/// Field names follow the TMDB response shape so that data written by the
/// browser client loads unchanged. Movies carry `title`/`release_date`,
/// shows carry `name`/`first_air_date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteItem {
    pub id: u32,
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Genre>>,
}

impl FavoriteItem {
    /// Create a bare snapshot with only the identity set
    pub fn new(id: u32, media_type: MediaType) -> Self {
        Self {
            id,
            media_type,
            title: None,
            name: None,
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            first_air_date: None,
            vote_average: 0.0,
            overview: String::new(),
            genre_ids: None,
            genres: None,
        }
    }

    pub fn movie(id: u32, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::new(id, MediaType::Movie)
        }
    }

    pub fn show(id: u32, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(id, MediaType::Tv)
        }
    }

    pub fn key(&self) -> FavoriteKey {
        FavoriteKey::new(self.id, self.media_type)
    }

    pub fn matches(&self, id: u32, media_type: MediaType) -> bool {
        self.id == id && self.media_type == media_type
    }

    /// Name to show in listings: shows prefer `name`, movies prefer `title`
    pub fn display_title(&self) -> Option<&str> {
        let (preferred, fallback) = match self.media_type {
            MediaType::Movie => (&self.title, &self.name),
            MediaType::Tv => (&self.name, &self.title),
        };
        preferred.as_deref().or(fallback.as_deref())
    }

    /// Date to show in listings: first air date for shows, release date for movies
    pub fn display_date(&self) -> Option<&str> {
        let (preferred, fallback) = match self.media_type {
            MediaType::Movie => (&self.release_date, &self.first_air_date),
            MediaType::Tv => (&self.first_air_date, &self.release_date),
        };
        preferred.as_deref().or(fallback.as_deref())
    }

    /// Four-digit year taken from the display date, if it has one
    pub fn year(&self) -> Option<u32> {
        self.display_date()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_browser_client_shape() {
        let json = r#"{
            "id": 550,
            "title": "Fight Club",
            "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "backdrop_path": null,
            "release_date": "1999-10-15",
            "vote_average": 8.4,
            "overview": "A ticking-time-bomb insomniac...",
            "media_type": "movie",
            "genre_ids": [18, 53]
        }"#;
        let item: FavoriteItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.key(), FavoriteKey::new(550, MediaType::Movie));
        assert_eq!(item.display_title(), Some("Fight Club"));
        assert_eq!(item.backdrop_path, None);
        assert_eq!(item.genre_ids, Some(vec![18, 53]));
        assert_eq!(item.year(), Some(1999));
    }

    #[test]
    fn test_missing_identity_is_rejected() {
        let json = r#"{"title": "No id", "media_type": "movie"}"#;
        assert!(serde_json::from_str::<FavoriteItem>(json).is_err());
    }

    #[test]
    fn test_display_fields_for_show() {
        let mut show = FavoriteItem::show(1399, "Game of Thrones");
        show.first_air_date = Some("2011-04-17".to_string());
        show.title = Some("ignored".to_string());
        assert_eq!(show.display_title(), Some("Game of Thrones"));
        assert_eq!(show.display_date(), Some("2011-04-17"));

        let mut untitled = FavoriteItem::new(1, MediaType::Tv);
        untitled.title = Some("Fallback".to_string());
        assert_eq!(untitled.display_title(), Some("Fallback"));
        assert_eq!(untitled.year(), None);
    }

    #[test]
    fn test_same_id_different_type_is_different_key() {
        let movie = FavoriteItem::movie(550, "Fight Club");
        let show = FavoriteItem::show(550, "Some Show");
        assert_ne!(movie.key(), show.key());
        assert!(movie.matches(550, MediaType::Movie));
        assert!(!movie.matches(550, MediaType::Tv));
    }
}
