use serde::{Deserialize, Serialize};

/// TMDB genre as embedded in detail responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}
