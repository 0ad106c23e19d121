use serde::Serialize;
use watchindex_models::{FavoriteItem, MediaFilter, MediaType};

/// Tab counts for the favorites view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FavoriteCounts {
    pub total: usize,
    pub movies: usize,
    pub tv: usize,
}

impl FavoriteCounts {
    pub fn for_filter(&self, filter: MediaFilter) -> usize {
        match filter {
            MediaFilter::All => self.total,
            MediaFilter::Movie => self.movies,
            MediaFilter::Tv => self.tv,
        }
    }
}

pub fn filter_by_media_type(items: &[FavoriteItem], filter: MediaFilter) -> Vec<&FavoriteItem> {
    items
        .iter()
        .filter(|item| filter.matches(item.media_type))
        .collect()
}

pub fn count_by_type(items: &[FavoriteItem]) -> FavoriteCounts {
    let movies = items
        .iter()
        .filter(|item| item.media_type == MediaType::Movie)
        .count();
    FavoriteCounts {
        total: items.len(),
        movies,
        tv: items.len() - movies,
    }
}

/// Header line shown above the favorites list
pub fn describe_count(count: usize) -> String {
    match count {
        0 => "No favorites yet. Start adding movies and TV shows you love!".to_string(),
        1 => "1 item in your favorites".to_string(),
        n => format!("{} items in your favorites", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<FavoriteItem> {
        vec![
            FavoriteItem::movie(1, "A"),
            FavoriteItem::show(2, "B"),
            FavoriteItem::movie(3, "C"),
        ]
    }

    #[test]
    fn test_filter_keeps_insertion_order() {
        let items = items();
        let movies = filter_by_media_type(&items, MediaFilter::Movie);
        assert_eq!(movies.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 3]);

        let shows = filter_by_media_type(&items, MediaFilter::Tv);
        assert_eq!(shows.len(), 1);
        assert_eq!(shows[0].id, 2);

        assert_eq!(filter_by_media_type(&items, MediaFilter::All).len(), 3);
    }

    #[test]
    fn test_count_by_type() {
        let counts = count_by_type(&items());
        assert_eq!(counts, FavoriteCounts { total: 3, movies: 2, tv: 1 });
        assert_eq!(counts.for_filter(MediaFilter::Tv), 1);
        assert_eq!(count_by_type(&[]), FavoriteCounts::default());
    }

    #[test]
    fn test_describe_count() {
        assert!(describe_count(0).starts_with("No favorites yet"));
        assert_eq!(describe_count(1), "1 item in your favorites");
        assert_eq!(describe_count(4), "4 items in your favorites");
    }
}
