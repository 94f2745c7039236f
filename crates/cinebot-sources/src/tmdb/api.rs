use crate::error::CatalogError;
use crate::http::get_json;
use crate::types::{CastMember, Credits, CrewMember, PrimaryGenre, PrimaryMovie, Video};
use reqwest::Client;
use serde::Deserialize;

pub(crate) const CATALOG: &str = "tmdb";

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbFindResponse {
    #[serde(default)]
    pub movie_results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbGenre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbCastMember {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbCrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbVideosResponse {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbVideo {
    pub key: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub site: Option<String>,
}

impl From<TmdbMovie> for PrimaryMovie {
    fn from(movie: TmdbMovie) -> Self {
        let title = movie
            .title
            .or(movie.original_title)
            .unwrap_or_default();

        PrimaryMovie {
            id: movie.id,
            title,
            release_date: movie.release_date.filter(|d| !d.is_empty()),
            poster_path: movie.poster_path.filter(|p| !p.is_empty()),
            genre_ids: movie.genre_ids,
            genres: movie
                .genres
                .into_iter()
                .map(|g| PrimaryGenre { id: g.id, name: g.name })
                .collect(),
            overview: movie.overview.filter(|o| !o.trim().is_empty()),
        }
    }
}

impl From<TmdbCredits> for Credits {
    fn from(credits: TmdbCredits) -> Self {
        Credits {
            cast: credits
                .cast
                .into_iter()
                .map(|c| CastMember { name: c.name })
                .collect(),
            crew: credits
                .crew
                .into_iter()
                .map(|c| CrewMember { name: c.name, job: c.job })
                .collect(),
        }
    }
}

impl From<TmdbVideo> for Video {
    fn from(video: TmdbVideo) -> Self {
        Video {
            key: video.key,
            video_type: video.video_type,
            site: video.site.filter(|s| !s.is_empty()),
        }
    }
}

pub(crate) fn search_url(base_url: &str, api_key: &str, query: &str) -> String {
    format!(
        "{}/search/movie?api_key={}&query={}",
        base_url.trim_end_matches('/'),
        api_key,
        urlencoding::encode(query)
    )
}

pub(crate) fn credits_url(base_url: &str, api_key: &str, id: u64) -> String {
    format!("{}/movie/{}/credits?api_key={}", base_url.trim_end_matches('/'), id, api_key)
}

pub(crate) fn videos_url(base_url: &str, api_key: &str, id: u64) -> String {
    format!("{}/movie/{}/videos?api_key={}", base_url.trim_end_matches('/'), id, api_key)
}

pub(crate) fn find_url(base_url: &str, api_key: &str, cross_ref_id: &str) -> String {
    format!(
        "{}/find/{}?api_key={}&external_source=imdb_id",
        base_url.trim_end_matches('/'),
        urlencoding::encode(cross_ref_id),
        api_key
    )
}

/// Search movies by title
pub async fn search_movies(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<PrimaryMovie>, CatalogError> {
    let response: TmdbSearchResponse = get_json(client, CATALOG, &search_url(base_url, api_key, query)).await?;
    Ok(response.results.into_iter().map(PrimaryMovie::from).collect())
}

/// Get cast and crew for a movie
pub async fn get_credits(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: u64,
) -> Result<Credits, CatalogError> {
    let response: TmdbCredits = get_json(client, CATALOG, &credits_url(base_url, api_key, id)).await?;
    Ok(response.into())
}

/// Get trailers, teasers and clips for a movie
pub async fn get_videos(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: u64,
) -> Result<Vec<Video>, CatalogError> {
    let response: TmdbVideosResponse = get_json(client, CATALOG, &videos_url(base_url, api_key, id)).await?;
    Ok(response.results.into_iter().map(Video::from).collect())
}

/// Find movies by IMDb-style cross-reference id
pub async fn find_by_imdb_id(
    client: &Client,
    base_url: &str,
    api_key: &str,
    cross_ref_id: &str,
) -> Result<Vec<PrimaryMovie>, CatalogError> {
    let response: TmdbFindResponse = get_json(client, CATALOG, &find_url(base_url, api_key, cross_ref_id)).await?;
    Ok(response.movie_results.into_iter().map(PrimaryMovie::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_escapes_query() {
        let url = search_url("https://api.themoviedb.org/3/", "k", "Amélie & Nino");
        assert_eq!(
            url,
            "https://api.themoviedb.org/3/search/movie?api_key=k&query=Am%C3%A9lie%20%26%20Nino"
        );
    }

    #[test]
    fn test_find_url() {
        let url = find_url("https://api.themoviedb.org/3", "k", "tt1375666");
        assert_eq!(url, "https://api.themoviedb.org/3/find/tt1375666?api_key=k&external_source=imdb_id");
    }

    #[test]
    fn test_decode_search_response() {
        let body = r#"{
            "page": 1,
            "results": [
                {"id": 27205, "title": "Inception", "release_date": "2010-07-15",
                 "poster_path": "/inception.jpg", "genre_ids": [28, 878, 12],
                 "overview": "A thief who steals corporate secrets."},
                {"id": 1, "title": "Inception: The Cobol Job", "release_date": "",
                 "poster_path": null, "genre_ids": []}
            ]
        }"#;

        let response: TmdbSearchResponse = serde_json::from_str(body).unwrap();
        let movies: Vec<PrimaryMovie> = response.results.into_iter().map(PrimaryMovie::from).collect();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, 27205);
        assert_eq!(movies[0].genre_ids, vec![28, 878, 12]);
        assert_eq!(movies[0].poster_path.as_deref(), Some("/inception.jpg"));
        assert_eq!(movies[1].release_date, None);
        assert_eq!(movies[1].poster_path, None);
        assert_eq!(movies[1].overview, None);
    }

    #[test]
    fn test_decode_credits_and_videos() {
        let credits: TmdbCredits = serde_json::from_str(
            r#"{"id": 27205,
                "cast": [{"name": "Leonardo DiCaprio", "character": "Cobb"}],
                "crew": [{"name": "Christopher Nolan", "job": "Director", "department": "Directing"},
                         {"name": "Hans Zimmer", "job": "Original Music Composer"}]}"#,
        )
        .unwrap();
        let credits: Credits = credits.into();
        assert_eq!(credits.cast[0].name, "Leonardo DiCaprio");
        assert_eq!(credits.crew[0].job, "Director");

        let videos: TmdbVideosResponse = serde_json::from_str(
            r#"{"results": [{"key": "YoutubeKey123", "type": "Trailer", "site": "YouTube", "name": "Official"}]}"#,
        )
        .unwrap();
        let video: Video = videos.results.into_iter().next().unwrap().into();
        assert_eq!(video.video_type, "Trailer");
        assert_eq!(video.site.as_deref(), Some("YouTube"));
    }
}
