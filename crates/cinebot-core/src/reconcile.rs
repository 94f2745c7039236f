//! Field-level reconciliation of the two catalogs' records.

use cinebot_config::Precedence;
use cinebot_models::{is_cross_ref_id, map_genre_ids, ReleaseYear, UNAVAILABLE};
use cinebot_sources::{Credits, PrimaryMovie, SecondaryRecord, Video};
use tracing::warn;

const DIRECTOR_JOB: &str = "Director";
const TRAILER_TYPE: &str = "Trailer";
const YOUTUBE_SITE: &str = "YouTube";
const VIMEO_SITE: &str = "Vimeo";

/// Fields filled from the primary catalog's credits and videos calls.
/// `None` means the call failed or had nothing usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Supplement {
    pub directors: Option<String>,
    pub cast: Option<String>,
    pub trailer_url: Option<String>,
}

/// Record fields before links are attached
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub title: String,
    pub release_year: ReleaseYear,
    pub genres: Vec<String>,
    pub synopsis: String,
    pub poster_url: String,
    pub cross_ref_id: Option<String>,
    pub primary_id: Option<u64>,
    pub directors: String,
    pub cast: Option<String>,
    pub trailer_url: String,
    pub external_rating: Option<String>,
}

/// Names of crew members whose job is exactly "Director", in listing order
pub fn directors(credits: &Credits) -> Option<String> {
    let names: Vec<&str> = credits
        .crew
        .iter()
        .filter(|member| member.job == DIRECTOR_JOB)
        .map(|member| member.name.as_str())
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// First `limit` cast names, joined like directors
pub fn cast_excerpt(credits: &Credits, limit: usize) -> Option<String> {
    let names: Vec<&str> = credits
        .cast
        .iter()
        .take(limit)
        .map(|member| member.name.as_str())
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// First YouTube-hosted trailer, else the first trailer on any site
pub fn pick_trailer(videos: &[Video]) -> Option<&Video> {
    let mut trailers = videos.iter().filter(|video| video.video_type == TRAILER_TYPE);
    let first = trailers.next()?;
    if first.site.as_deref() == Some(YOUTUBE_SITE) {
        return Some(first);
    }
    trailers
        .find(|video| video.site.as_deref() == Some(YOUTUBE_SITE))
        .or(Some(first))
}

pub fn trailer_url(video: &Video) -> String {
    match video.site.as_deref() {
        Some(VIMEO_SITE) => format!("https://vimeo.com/{}", video.key),
        _ => format!("https://www.youtube.com/watch?v={}", video.key),
    }
}

pub fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    format!(
        "{}/{}",
        image_base_url.trim_end_matches('/'),
        poster_path.trim_start_matches('/')
    )
}

/// Genre labels from the primary record.
///
/// Named genres are used when the payload has them, otherwise the numeric
/// codes go through the static table. Either way entries are deduplicated by
/// the catalog's genre id.
pub fn primary_genres(movie: &PrimaryMovie) -> Vec<String> {
    if movie.genres.is_empty() {
        return map_genre_ids(&movie.genre_ids);
    }

    let mut seen = Vec::with_capacity(movie.genres.len());
    let mut labels = Vec::with_capacity(movie.genres.len());
    for genre in &movie.genres {
        if seen.contains(&genre.id) {
            continue;
        }
        seen.push(genre.id);
        labels.push(genre.name.clone());
    }
    labels
}

fn overlay<T>(primary: Option<T>, secondary: Option<T>, precedence: Precedence) -> Option<T> {
    match precedence {
        Precedence::PreferSecondary => secondary.or(primary),
        Precedence::PreferPrimary => primary.or(secondary),
    }
}

/// Merge both records into the canonical field set.
///
/// Title, year, plot and poster follow `precedence`; the rating only ever
/// comes from the secondary record; genres, directors and trailer come from
/// the primary side with the secondary record filling gaps. `fallback_title`
/// is used when neither record carries a title.
pub fn reconcile(
    primary: Option<&PrimaryMovie>,
    secondary: Option<&SecondaryRecord>,
    supplement: Supplement,
    precedence: Precedence,
    image_base_url: &str,
    fallback_title: &str,
) -> Reconciled {
    let title = overlay(
        primary.map(|p| p.title.trim()).filter(|t| !t.is_empty()),
        secondary.and_then(|s| s.title.as_deref()),
        precedence,
    )
    .unwrap_or(fallback_title)
    .to_string();

    let release_year = overlay(
        primary.and_then(|p| p.release_date.as_deref()),
        secondary.and_then(|s| s.year.as_deref()),
        precedence,
    )
    .map(ReleaseYear::from_date)
    .unwrap_or(ReleaseYear::Unknown);

    let synopsis = overlay(
        primary.and_then(|p| p.overview.clone()),
        secondary.and_then(|s| s.plot.clone()),
        precedence,
    )
    .unwrap_or_else(|| UNAVAILABLE.to_string());

    let poster_url = overlay(
        primary
            .and_then(|p| p.poster_path.as_deref())
            .map(|path| poster_url(image_base_url, path)),
        secondary.and_then(|s| s.poster.clone()),
        precedence,
    )
    .unwrap_or_else(|| UNAVAILABLE.to_string());

    let mut genres = primary.map(primary_genres).unwrap_or_default();
    if genres.is_empty() {
        genres = secondary.map(|s| s.genres.clone()).unwrap_or_default();
    }

    let cross_ref_id = secondary
        .and_then(|s| s.cross_ref_id.as_deref())
        .and_then(|id| {
            if is_cross_ref_id(id) {
                Some(id.to_string())
            } else {
                warn!("Ignoring malformed cross-reference id {:?} for '{}'", id, title);
                None
            }
        });

    let directors = supplement
        .directors
        .or_else(|| secondary.and_then(|s| s.director.clone()))
        .unwrap_or_else(|| UNAVAILABLE.to_string());

    Reconciled {
        release_year,
        genres,
        synopsis,
        poster_url,
        cross_ref_id,
        primary_id: primary.map(|p| p.id),
        directors,
        cast: supplement.cast,
        trailer_url: supplement.trailer_url.unwrap_or_else(|| UNAVAILABLE.to_string()),
        external_rating: secondary.and_then(|s| s.rating.clone()),
        title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinebot_sources::{CastMember, CrewMember, PrimaryGenre};

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn video(key: &str, video_type: &str, site: Option<&str>) -> Video {
        Video {
            key: key.to_string(),
            video_type: video_type.to_string(),
            site: site.map(str::to_string),
        }
    }

    fn crew(name: &str, job: &str) -> CrewMember {
        CrewMember {
            name: name.to_string(),
            job: job.to_string(),
        }
    }

    fn primary_heat() -> PrimaryMovie {
        PrimaryMovie {
            id: 949,
            title: "Heat".to_string(),
            release_date: Some("1995-12-15".to_string()),
            poster_path: Some("/heat.jpg".to_string()),
            genre_ids: vec![28, 80, 18],
            genres: Vec::new(),
            overview: Some("Primary overview".to_string()),
        }
    }

    fn secondary_heat() -> SecondaryRecord {
        SecondaryRecord {
            title: Some("Heat (1995)".to_string()),
            year: Some("1995".to_string()),
            plot: Some("Secondary plot".to_string()),
            poster: Some("https://posters.test/heat.jpg".to_string()),
            cross_ref_id: Some("tt0113277".to_string()),
            rating: Some("8.3".to_string()),
            genres: vec!["Action".to_string()],
            director: Some("Michael Mann".to_string()),
        }
    }

    #[test]
    fn test_directors_exact_job_match_in_order() {
        let credits = Credits {
            cast: Vec::new(),
            crew: vec![
                crew("Lana Wachowski", "Director"),
                crew("Joel Silver", "Producer"),
                crew("Someone", "director"),
                crew("Lilly Wachowski", "Director"),
                crew("Other", "Assistant Director"),
            ],
        };
        assert_eq!(directors(&credits).as_deref(), Some("Lana Wachowski, Lilly Wachowski"));
        assert_eq!(directors(&Credits::default()), None);
    }

    #[test]
    fn test_cast_excerpt() {
        let credits = Credits {
            cast: ["A", "B", "C", "D"]
                .iter()
                .map(|n| CastMember { name: n.to_string() })
                .collect(),
            crew: Vec::new(),
        };
        assert_eq!(cast_excerpt(&credits, 3).as_deref(), Some("A, B, C"));
        assert_eq!(cast_excerpt(&credits, 10).as_deref(), Some("A, B, C, D"));
        assert_eq!(cast_excerpt(&Credits::default(), 3), None);
    }

    #[test]
    fn test_pick_trailer_prefers_youtube() {
        let videos = vec![
            video("teaser", "Teaser", Some("YouTube")),
            video("vimeo-trailer", "Trailer", Some("Vimeo")),
            video("yt-trailer", "Trailer", Some("YouTube")),
        ];
        assert_eq!(pick_trailer(&videos).map(|v| v.key.as_str()), Some("yt-trailer"));
    }

    #[test]
    fn test_pick_trailer_without_site_takes_first() {
        let videos = vec![
            video("clip", "Clip", None),
            video("first", "Trailer", None),
            video("second", "Trailer", None),
        ];
        assert_eq!(pick_trailer(&videos).map(|v| v.key.as_str()), Some("first"));
        assert!(pick_trailer(&[video("clip", "Clip", Some("YouTube"))]).is_none());
    }

    #[test]
    fn test_trailer_url_by_site() {
        assert_eq!(
            trailer_url(&video("YoutubeKey123", "Trailer", Some("YouTube"))),
            "https://www.youtube.com/watch?v=YoutubeKey123"
        );
        assert_eq!(trailer_url(&video("42", "Trailer", Some("Vimeo"))), "https://vimeo.com/42");
    }

    #[test]
    fn test_poster_url_joins_single_slash() {
        assert_eq!(poster_url("https://image.tmdb.org/t/p/w500/", "/x.jpg"), "https://image.tmdb.org/t/p/w500/x.jpg");
        assert_eq!(poster_url(IMAGE_BASE, "x.jpg"), "https://image.tmdb.org/t/p/w500/x.jpg");
    }

    #[test]
    fn test_named_genres_dedup_by_id() {
        let mut movie = primary_heat();
        movie.genres = vec![
            PrimaryGenre { id: 80, name: "Crime".to_string() },
            PrimaryGenre { id: 80, name: "Crime".to_string() },
            PrimaryGenre { id: 53, name: "Thriller".to_string() },
        ];
        assert_eq!(primary_genres(&movie), vec!["Crime", "Thriller"]);
    }

    #[test]
    fn test_secondary_wins_by_default() {
        let primary = primary_heat();
        let secondary = secondary_heat();
        let merged = reconcile(
            Some(&primary),
            Some(&secondary),
            Supplement::default(),
            Precedence::PreferSecondary,
            IMAGE_BASE,
            "heat",
        );

        assert_eq!(merged.title, "Heat (1995)");
        assert_eq!(merged.synopsis, "Secondary plot");
        assert_eq!(merged.poster_url, "https://posters.test/heat.jpg");
        assert_eq!(merged.genres, vec!["Action", "Crime", "Drama"]);
        assert_eq!(merged.external_rating.as_deref(), Some("8.3"));
        assert_eq!(merged.cross_ref_id.as_deref(), Some("tt0113277"));
        assert_eq!(merged.directors, "Michael Mann");
        assert_eq!(merged.trailer_url, UNAVAILABLE);
        assert_eq!(merged.primary_id, Some(949));
    }

    #[test]
    fn test_primary_precedence() {
        let primary = primary_heat();
        let secondary = secondary_heat();
        let merged = reconcile(
            Some(&primary),
            Some(&secondary),
            Supplement::default(),
            Precedence::PreferPrimary,
            IMAGE_BASE,
            "heat",
        );

        assert_eq!(merged.title, "Heat");
        assert_eq!(merged.release_year, ReleaseYear::Known("1995".to_string()));
        assert_eq!(merged.synopsis, "Primary overview");
        assert_eq!(merged.poster_url, "https://image.tmdb.org/t/p/w500/heat.jpg");
        assert_eq!(merged.external_rating.as_deref(), Some("8.3"));
    }

    #[test]
    fn test_primary_fills_gaps_in_secondary() {
        let primary = primary_heat();
        let secondary = SecondaryRecord {
            cross_ref_id: Some("tt0113277".to_string()),
            ..SecondaryRecord::default()
        };
        let merged = reconcile(
            Some(&primary),
            Some(&secondary),
            Supplement::default(),
            Precedence::PreferSecondary,
            IMAGE_BASE,
            "heat",
        );

        assert_eq!(merged.title, "Heat");
        assert_eq!(merged.synopsis, "Primary overview");
        assert_eq!(merged.external_rating, None);
        assert_eq!(merged.directors, UNAVAILABLE);
    }

    #[test]
    fn test_supplement_directors_win_over_secondary() {
        let primary = primary_heat();
        let secondary = secondary_heat();
        let supplement = Supplement {
            directors: Some("M. Mann".to_string()),
            cast: Some("Al Pacino, Robert De Niro".to_string()),
            trailer_url: Some("https://www.youtube.com/watch?v=abc".to_string()),
        };
        let merged = reconcile(
            Some(&primary),
            Some(&secondary),
            supplement,
            Precedence::PreferSecondary,
            IMAGE_BASE,
            "heat",
        );

        assert_eq!(merged.directors, "M. Mann");
        assert_eq!(merged.cast.as_deref(), Some("Al Pacino, Robert De Niro"));
        assert_eq!(merged.trailer_url, "https://www.youtube.com/watch?v=abc");
    }

    #[test]
    fn test_empty_sources_yield_sentinels() {
        let primary = PrimaryMovie {
            id: 1,
            title: String::new(),
            ..PrimaryMovie::default()
        };
        let merged = reconcile(Some(&primary), None, Supplement::default(), Precedence::PreferSecondary, IMAGE_BASE, "query text");

        assert_eq!(merged.title, "query text");
        assert_eq!(merged.release_year, ReleaseYear::Unknown);
        assert_eq!(merged.synopsis, UNAVAILABLE);
        assert_eq!(merged.poster_url, UNAVAILABLE);
        assert!(merged.genres.is_empty());
        assert_eq!(merged.cross_ref_id, None);
    }

    #[test]
    fn test_malformed_cross_ref_is_dropped() {
        let secondary = SecondaryRecord {
            cross_ref_id: Some("0113277".to_string()),
            ..secondary_heat()
        };
        let merged = reconcile(None, Some(&secondary), Supplement::default(), Precedence::PreferSecondary, IMAGE_BASE, "heat");
        assert_eq!(merged.cross_ref_id, None);
        assert_eq!(merged.primary_id, None);
    }
}
