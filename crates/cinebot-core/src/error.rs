use std::fmt;
use thiserror::Error;

/// A title could not be resolved to a record.
///
/// This is the only failure `Resolver::resolve` reports; transport and decode
/// errors from required lookups are folded into it after being logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no information found for \"{query}\" ({reason})")]
pub struct NotFound {
    pub query: String,
    pub reason: NotFoundReason,
}

impl NotFound {
    pub fn new(query: &str, reason: NotFoundReason) -> Self {
        Self {
            query: query.to_string(),
            reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// Primary search returned no results
    NoPrimaryMatch,
    /// Primary search failed in transport or decoding
    PrimaryUnavailable,
    /// Secondary catalog answered with an explicit miss
    NoSecondaryMatch,
    /// Secondary catalog failed or is not configured
    SecondaryUnavailable,
    /// A cross-reference id was required but none was obtained
    MissingCrossRef,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NotFoundReason::NoPrimaryMatch => "no primary catalog match",
            NotFoundReason::PrimaryUnavailable => "primary catalog unavailable",
            NotFoundReason::NoSecondaryMatch => "no secondary catalog match",
            NotFoundReason::SecondaryUnavailable => "secondary catalog unavailable",
            NotFoundReason::MissingCrossRef => "no cross-reference id",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("no cross-reference id available")]
    MissingCrossRef,
    #[error("malformed cross-reference id: {0:?}")]
    MalformedCrossRef(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("score must be between {min} and {max}, got {score}")]
    ScoreOutOfRange { score: i64, min: u8, max: u8 },
}
