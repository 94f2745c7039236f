use serde::{Deserialize, Serialize};
use std::fmt;

/// Text shown in place of a link that could not be built
pub const LINK_UNAVAILABLE: &str = "link unavailable";

/// External deep links derived from a reconciled record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieLinks {
    pub catalog: Link,
    pub streaming: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "url", rename_all = "snake_case")]
pub enum Link {
    Available(String),
    Unavailable,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Available(url) => f.write_str(url),
            Link::Unavailable => f.write_str(LINK_UNAVAILABLE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_link_displays_placeholder() {
        assert_eq!(Link::Unavailable.to_string(), LINK_UNAVAILABLE);
        assert_eq!(Link::Available("https://a/b".to_string()).to_string(), "https://a/b");
    }
}
