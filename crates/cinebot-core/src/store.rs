use crate::error::StoreError;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub title: String,
    pub average: f64,
    pub votes: usize,
}

/// Outcome of [`MovieStore::rank`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranking {
    pub score: u8,
    /// Score this user had given the title before, if any
    pub previous: Option<u8>,
}

/// Process-lifetime watchlist and per-user rankings.
///
/// Owned by the dispatcher and handed to command handlers by reference;
/// nothing here is persisted.
#[derive(Debug, Default)]
pub struct MovieStore {
    watchlist: Vec<String>,
    /// user id → title → score
    rankings: HashMap<String, HashMap<String, u8>>,
}

impl MovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a title; returns `false` when it is already listed
    pub fn add_to_watchlist(&mut self, title: &str) -> Result<bool, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        if self.watchlist.iter().any(|t| t == title) {
            return Ok(false);
        }
        self.watchlist.push(title.to_string());
        Ok(true)
    }

    pub fn watchlist(&self) -> &[String] {
        &self.watchlist
    }

    /// Empty the watchlist, returning how many titles were removed
    pub fn clear_watchlist(&mut self) -> usize {
        let removed = self.watchlist.len();
        self.watchlist.clear();
        removed
    }

    /// Record `user`'s score for `title`
    pub fn rank(&mut self, user: &str, title: &str, score: i64) -> Result<Ranking, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let score = u8::try_from(score)
            .ok()
            .filter(|s| (MIN_SCORE..=MAX_SCORE).contains(s))
            .ok_or(StoreError::ScoreOutOfRange {
                score,
                min: MIN_SCORE,
                max: MAX_SCORE,
            })?;

        let previous = self
            .rankings
            .entry(user.to_string())
            .or_default()
            .insert(title.to_string(), score);
        Ok(Ranking { score, previous })
    }

    /// One user's scores, highest first, ties by title
    pub fn rankings_for(&self, user: &str) -> Vec<(String, u8)> {
        let mut ranked: Vec<(String, u8)> = self
            .rankings
            .get(user)
            .map(|scores| scores.iter().map(|(t, s)| (t.clone(), *s)).collect())
            .unwrap_or_default();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }

    /// Average score per title across users, best first
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut totals: HashMap<&str, (u32, usize)> = HashMap::new();
        for scores in self.rankings.values() {
            for (title, score) in scores {
                let entry = totals.entry(title.as_str()).or_insert((0, 0));
                entry.0 += u32::from(*score);
                entry.1 += 1;
            }
        }

        let mut board: Vec<LeaderboardEntry> = totals
            .into_iter()
            .map(|(title, (sum, votes))| LeaderboardEntry {
                title: title.to_string(),
                average: f64::from(sum) / votes as f64,
                votes,
            })
            .collect();

        board.sort_by(|a, b| {
            b.average
                .partial_cmp(&a.average)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.votes.cmp(&a.votes))
                .then_with(|| a.title.cmp(&b.title))
        });
        board
    }
}
