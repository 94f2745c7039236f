use serde::{Deserialize, Serialize};
use std::fmt;
use crate::links::MovieLinks;

/// Placeholder for a field neither catalog could supply
pub const UNAVAILABLE: &str = "unavailable";

/// Placeholder for a release year that cannot be derived
pub const UNKNOWN_YEAR: &str = "unknown";

pub fn is_available(value: &str) -> bool {
    value != UNAVAILABLE
}

/// The reconciled movie record handed back to the command layer.
///
/// Built once per command and never mutated afterwards. Missing data is
/// carried as [`UNAVAILABLE`] (text fields) or `None` (optional identifiers),
/// never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMovie {
    pub title: String,
    pub release_year: ReleaseYear,
    pub genres: Vec<String>,
    pub synopsis: String,
    pub poster_url: String,
    /// `tt`-prefixed identifier shared by both catalogs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_ref_id: Option<String>,
    /// Numeric id in the primary catalog, when it was consulted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_id: Option<u64>,
    pub directors: String,
    /// Top-N cast excerpt, only filled when the caller asks for one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    pub trailer_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_rating: Option<String>,
    pub links: MovieLinks,
}

/// Year segment of a release date.
///
/// Derived by splitting on `-` and keeping the first segment, so `"1999"`
/// stays `"1999"` and a malformed date keeps whatever text precedes the first
/// hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReleaseYear {
    Known(String),
    Unknown,
}

impl ReleaseYear {
    pub fn from_date(date: &str) -> Self {
        match date.split('-').next() {
            Some(year) if !year.trim().is_empty() => ReleaseYear::Known(year.to_string()),
            _ => ReleaseYear::Unknown,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReleaseYear::Known(year) => year,
            ReleaseYear::Unknown => UNKNOWN_YEAR,
        }
    }

    /// Numeric value when the segment is a plain year
    pub fn as_number(&self) -> Option<u32> {
        match self {
            ReleaseYear::Known(year) => year.parse().ok(),
            ReleaseYear::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, ReleaseYear::Known(_))
    }
}

impl From<String> for ReleaseYear {
    fn from(value: String) -> Self {
        if value == UNKNOWN_YEAR {
            ReleaseYear::Unknown
        } else {
            ReleaseYear::from_date(&value)
        }
    }
}

impl From<ReleaseYear> for String {
    fn from(value: ReleaseYear) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ReleaseYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
