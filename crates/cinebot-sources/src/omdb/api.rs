use crate::error::CatalogError;
use crate::http::get_json;
use crate::types::{SecondaryLookup, SecondaryRecord};
use reqwest::Client;
use serde::Deserialize;

pub(crate) const CATALOG: &str = "omdb";

/// Marker the catalog uses for fields it has no value for
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbResponse {
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != NOT_AVAILABLE)
}

/// Map a raw response to a lookup outcome.
///
/// `Response: "False"` with a "not found" message is an explicit miss;
/// any other `False` (bad key, request limit) is an API error.
pub(crate) fn interpret(response: OmdbResponse) -> Result<SecondaryLookup, CatalogError> {
    if !response.response.eq_ignore_ascii_case("true") {
        let message = response.error.unwrap_or_else(|| "unknown error".to_string());
        if message.to_lowercase().contains("not found") {
            return Ok(SecondaryLookup::NotFound);
        }
        return Err(CatalogError::Api {
            catalog: CATALOG,
            message,
        });
    }

    let genres = present(response.genre)
        .map(|g| {
            g.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Ok(SecondaryLookup::Found(SecondaryRecord {
        title: present(response.title),
        year: present(response.year),
        plot: present(response.plot),
        poster: present(response.poster),
        cross_ref_id: present(response.imdb_id),
        rating: present(response.imdb_rating),
        genres,
        director: present(response.director),
    }))
}

pub(crate) fn title_url(base_url: &str, api_key: &str, title: &str, year: Option<u32>) -> String {
    let mut url = format!(
        "{}?apikey={}&t={}&type=movie&plot=short",
        base_url,
        api_key,
        urlencoding::encode(title)
    );
    if let Some(year) = year {
        url.push_str(&format!("&y={}", year));
    }
    url
}

pub(crate) fn id_url(base_url: &str, api_key: &str, cross_ref_id: &str) -> String {
    format!(
        "{}?apikey={}&i={}&plot=short",
        base_url,
        api_key,
        urlencoding::encode(cross_ref_id)
    )
}

/// Exact-title lookup, optionally narrowed by year
pub async fn lookup_by_title(
    client: &Client,
    base_url: &str,
    api_key: &str,
    title: &str,
    year: Option<u32>,
) -> Result<SecondaryLookup, CatalogError> {
    let response: OmdbResponse = get_json(client, CATALOG, &title_url(base_url, api_key, title, year)).await?;
    interpret(response)
}

/// Lookup by IMDb-style cross-reference id
pub async fn lookup_by_imdb_id(
    client: &Client,
    base_url: &str,
    api_key: &str,
    cross_ref_id: &str,
) -> Result<SecondaryLookup, CatalogError> {
    let response: OmdbResponse = get_json(client, CATALOG, &id_url(base_url, api_key, cross_ref_id)).await?;
    interpret(response)
}
