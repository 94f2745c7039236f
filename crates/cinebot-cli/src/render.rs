//! Plain-text and JSON renderings of movies and chat replies.

use cinebot_core::dispatch::{ADD_WATCHLIST_USAGE, INFO_USAGE, LINKS_USAGE, RANK_USAGE};
use cinebot_core::Reply;
use cinebot_models::{is_available, CanonicalMovie, MovieLinks};
use serde_json::{json, Value};

pub const NO_INFORMATION: &str = "No information found for";

pub fn help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        format!("  {}", INFO_USAGE),
        format!("  {}", LINKS_USAGE),
        format!("  {}", ADD_WATCHLIST_USAGE),
        "  /watchlist".to_string(),
        "  /clearwatchlist".to_string(),
        format!("  {}", RANK_USAGE),
        "  /myranks".to_string(),
        "  /leaderboard".to_string(),
        "  /help".to_string(),
    ]
}

/// Heading followed by one line per field; unavailable optional fields are skipped
pub fn movie_lines(movie: &CanonicalMovie) -> Vec<String> {
    let heading = if movie.release_year.is_known() {
        format!("{} ({})", movie.title, movie.release_year)
    } else {
        movie.title.clone()
    };
    let mut lines = vec![heading];

    if !movie.genres.is_empty() {
        lines.push(format!("Genres: {}", movie.genres.join(", ")));
    }
    lines.push(format!("Director: {}", movie.directors));
    if let Some(cast) = &movie.cast {
        lines.push(format!("Cast: {}", cast));
    }
    if let Some(rating) = &movie.external_rating {
        lines.push(format!("Rating: {}", rating));
    }
    lines.push(format!("Synopsis: {}", movie.synopsis));
    if is_available(&movie.poster_url) {
        lines.push(format!("Poster: {}", movie.poster_url));
    }
    lines.push(format!("Trailer: {}", movie.trailer_url));
    lines.extend(link_lines(&movie.links));
    lines
}

pub fn link_lines(links: &MovieLinks) -> Vec<String> {
    vec![
        format!("Letterboxd: {}", links.catalog),
        format!("Watch: {}", links.streaming),
    ]
}

pub fn movie_json(movie: &CanonicalMovie) -> Value {
    serde_json::to_value(movie).unwrap_or(Value::Null)
}

pub fn reply_text(reply: &Reply) -> String {
    match reply {
        Reply::Movie(movie) => movie_lines(movie).join("\n"),
        Reply::NotFound { query } => format!("{} \"{}\"", NO_INFORMATION, query),
        Reply::TimedOut { query } => format!("Looking up \"{}\" took too long, try again later", query),
        Reply::Busy => "Still answering the previous command in this channel".to_string(),
        Reply::Links { title, links } => {
            let mut lines = vec![title.clone()];
            lines.extend(link_lines(links));
            lines.join("\n")
        }
        Reply::Usage(usage) => format!("Usage: {}", usage),
        Reply::Help => help_lines().join("\n"),
        Reply::WatchlistAdded { title } => format!("Added \"{}\" to the watchlist", title),
        Reply::WatchlistDuplicate { title } => format!("\"{}\" is already on the watchlist", title),
        Reply::Watchlist(titles) if titles.is_empty() => "The watchlist is empty".to_string(),
        Reply::Watchlist(titles) => titles
            .iter()
            .enumerate()
            .map(|(i, title)| format!("{}. {}", i + 1, title))
            .collect::<Vec<_>>()
            .join("\n"),
        Reply::WatchlistCleared(count) => format!("Removed {} title(s) from the watchlist", count),
        Reply::Ranked { title, score, previous: Some(previous) } => {
            format!("Ranked \"{}\" {}/10 (was {}/10)", title, score, previous)
        }
        Reply::Ranked { title, score, previous: None } => format!("Ranked \"{}\" {}/10", title, score),
        Reply::Rejected(reason) => reason.clone(),
        Reply::UserRankings(ranks) if ranks.is_empty() => "You have not ranked anything yet".to_string(),
        Reply::UserRankings(ranks) => ranks
            .iter()
            .map(|(title, score)| format!("{}/10  {}", score, title))
            .collect::<Vec<_>>()
            .join("\n"),
        Reply::Leaderboard(entries) if entries.is_empty() => "No rankings yet".to_string(),
        Reply::Leaderboard(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "{}. {}  {:.1} ({} vote{})",
                    i + 1,
                    entry.title,
                    entry.average,
                    entry.votes,
                    if entry.votes == 1 { "" } else { "s" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn reply_json(reply: &Reply) -> Value {
    match reply {
        Reply::Movie(movie) => json!({ "type": "movie", "movie": movie_json(movie) }),
        Reply::NotFound { query } => json!({ "type": "not_found", "query": query }),
        Reply::TimedOut { query } => json!({ "type": "timed_out", "query": query }),
        Reply::Busy => json!({ "type": "busy" }),
        Reply::Links { title, links } => json!({ "type": "links", "title": title, "links": links }),
        Reply::Usage(usage) => json!({ "type": "usage", "usage": usage }),
        Reply::Help => json!({ "type": "help", "lines": help_lines() }),
        Reply::WatchlistAdded { title } => json!({ "type": "watchlist_added", "title": title }),
        Reply::WatchlistDuplicate { title } => json!({ "type": "watchlist_duplicate", "title": title }),
        Reply::Watchlist(titles) => json!({ "type": "watchlist", "titles": titles }),
        Reply::WatchlistCleared(count) => json!({ "type": "watchlist_cleared", "removed": count }),
        Reply::Ranked { title, score, previous } => {
            json!({ "type": "ranked", "title": title, "score": score, "previous": previous })
        }
        Reply::Rejected(reason) => json!({ "type": "rejected", "message": reason }),
        Reply::UserRankings(ranks) => json!({
            "type": "user_rankings",
            "rankings": ranks
                .iter()
                .map(|(title, score)| json!({ "title": title, "score": score }))
                .collect::<Vec<_>>(),
        }),
        Reply::Leaderboard(entries) => json!({
            "type": "leaderboard",
            "entries": entries
                .iter()
                .map(|e| json!({ "title": e.title, "average": e.average, "votes": e.votes }))
                .collect::<Vec<_>>(),
        }),
    }
}
