use serde::{Deserialize, Serialize};

/// One search/find hit from the primary catalog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrimaryMovie {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    /// Numeric genre codes (search results)
    pub genre_ids: Vec<u32>,
    /// Named genres (detail-style payloads); preferred over `genre_ids` when present
    pub genres: Vec<PrimaryGenre>,
    pub overview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryGenre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Credits {
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub job: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub video_type: String,
    /// Hosting platform; not every listing carries it
    pub site: Option<String>,
}

/// Normalized secondary-catalog record. `"N/A"` values arrive here as `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SecondaryRecord {
    pub title: Option<String>,
    pub year: Option<String>,
    pub plot: Option<String>,
    pub poster: Option<String>,
    pub cross_ref_id: Option<String>,
    pub rating: Option<String>,
    pub genres: Vec<String>,
    pub director: Option<String>,
}

/// Outcome of a secondary lookup that reached the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum SecondaryLookup {
    Found(SecondaryRecord),
    NotFound,
}
