use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of TMDB entity. Together with the numeric id it forms a favorite's identity,
/// since a movie and a show can share the same id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMediaTypeError {
    input: String,
}

impl fmt::Display for ParseMediaTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid media type: {}. Use 'movie' or 'tv' ('all' where a filter is expected)", self.input)
    }
}

impl std::error::Error for ParseMediaTypeError {}

impl FromStr for MediaType {
    type Err = ParseMediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaType::Movie),
            "tv" | "show" | "shows" => Ok(MediaType::Tv),
            _ => Err(ParseMediaTypeError { input: s.to_string() }),
        }
    }
}

/// Filter tabs of the favorites view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaFilter {
    #[default]
    All,
    Movie,
    Tv,
}

impl MediaFilter {
    pub fn matches(&self, media_type: MediaType) -> bool {
        match self {
            MediaFilter::All => true,
            MediaFilter::Movie => media_type == MediaType::Movie,
            MediaFilter::Tv => media_type == MediaType::Tv,
        }
    }
}

impl FromStr for MediaFilter {
    type Err = ParseMediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(MediaFilter::All);
        }
        s.parse::<MediaType>().map(MediaFilter::from)
    }
}

impl fmt::Display for MediaFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaFilter::All => f.write_str("all"),
            MediaFilter::Movie => f.write_str("movie"),
            MediaFilter::Tv => f.write_str("tv"),
        }
    }
}

impl From<MediaType> for MediaFilter {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Movie => MediaFilter::Movie,
            MediaType::Tv => MediaFilter::Tv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MediaType::Movie).unwrap(), "\"movie\"");
        assert_eq!(serde_json::to_string(&MediaType::Tv).unwrap(), "\"tv\"");
        let parsed: MediaType = serde_json::from_str("\"tv\"").unwrap();
        assert_eq!(parsed, MediaType::Tv);
    }

    #[test]
    fn test_media_type_from_str() {
        assert_eq!("Movie".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!("show".parse::<MediaType>().unwrap(), MediaType::Tv);
        assert!("episode".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_media_filter_matches() {
        assert!(MediaFilter::All.matches(MediaType::Movie));
        assert!(MediaFilter::All.matches(MediaType::Tv));
        assert!(MediaFilter::Movie.matches(MediaType::Movie));
        assert!(!MediaFilter::Movie.matches(MediaType::Tv));
        assert!(!MediaFilter::Tv.matches(MediaType::Movie));
    }

    #[test]
    fn test_media_filter_from_str() {
        assert_eq!("ALL".parse::<MediaFilter>().unwrap(), MediaFilter::All);
        assert_eq!("tv".parse::<MediaFilter>().unwrap(), MediaFilter::Tv);
        assert!("music".parse::<MediaFilter>().is_err());
    }
}
