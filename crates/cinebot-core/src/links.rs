//! Deep links derived from a reconciled title and cross-reference id.
//!
//! Everything here is pure: the same `(title, cross_ref_id)` always yields the
//! same links, and nothing touches the network.

use crate::error::LinkError;
use cinebot_config::LinkConfig;
use cinebot_models::{is_cross_ref_id, Link, MovieLinks, CROSS_REF_PREFIX};

const SLUG_PLACEHOLDER: &str = "{slug}";
const ID_PLACEHOLDER: &str = "{id}";

/// URL templates the derived values are spliced into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplates {
    pub catalog: String,
    pub streaming: String,
}

impl From<&LinkConfig> for LinkTemplates {
    fn from(config: &LinkConfig) -> Self {
        Self {
            catalog: config.catalog_template.clone(),
            streaming: config.streaming_template.clone(),
        }
    }
}

impl Default for LinkTemplates {
    fn default() -> Self {
        Self::from(&LinkConfig::default())
    }
}

/// Lower-case the title, drop everything except ASCII word characters and
/// whitespace, then join the remaining words with single hyphens.
///
/// `"Spider-Man: Into the Spider-Verse!"` becomes
/// `"spiderman-into-the-spiderverse"`.
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Catalog deep link, unavailable when nothing of the title survives slugging
pub fn catalog_link(title: &str, templates: &LinkTemplates) -> Link {
    let slug = slugify(title);
    if slug.is_empty() {
        return Link::Unavailable;
    }
    Link::Available(templates.catalog.replace(SLUG_PLACEHOLDER, &slug))
}

/// Numeric part of a cross-reference id.
///
/// Only the leading `tt` is removed. Ids without that prefix, or with
/// anything but digits after it, are rejected rather than guessed at.
pub fn streaming_suffix(cross_ref_id: Option<&str>) -> Result<&str, LinkError> {
    let id = cross_ref_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(LinkError::MissingCrossRef)?;

    if !is_cross_ref_id(id) {
        return Err(LinkError::MalformedCrossRef(id.to_string()));
    }

    id.strip_prefix(CROSS_REF_PREFIX)
        .ok_or_else(|| LinkError::MalformedCrossRef(id.to_string()))
}

pub fn streaming_link(cross_ref_id: Option<&str>, templates: &LinkTemplates) -> Result<String, LinkError> {
    let suffix = streaming_suffix(cross_ref_id)?;
    Ok(templates.streaming.replace(ID_PLACEHOLDER, suffix))
}

/// Build both links; a missing or malformed id yields [`Link::Unavailable`]
pub fn derive_links(title: &str, cross_ref_id: Option<&str>, templates: &LinkTemplates) -> MovieLinks {
    let streaming = match streaming_link(cross_ref_id, templates) {
        Ok(url) => Link::Available(url),
        Err(e) => {
            tracing::debug!("Streaming link for '{}' unavailable: {}", title, e);
            Link::Unavailable
        }
    };

    MovieLinks {
        catalog: catalog_link(title, templates),
        streaming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> LinkTemplates {
        LinkTemplates {
            catalog: "https://catalog.test/film/{slug}/".to_string(),
            streaming: "https://stream.test/watch/{id}".to_string(),
        }
    }

    #[test]
    fn test_slug_strips_punctuation() {
        let slug = slugify("Spider-Man: Into the Spider-Verse!");
        assert_eq!(slug, "spiderman-into-the-spiderverse");
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
        assert!(!slug.contains("--"));
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
    }

    #[test]
    fn test_slug_collapses_whitespace() {
        assert_eq!(slugify("  The   Good,\tthe Bad \n and_the Ugly  "), "the-good-the-bad-and_the-ugly");
    }

    #[test]
    fn test_slug_drops_accented_characters() {
        assert_eq!(slugify("Amélie"), "amlie");
        assert_eq!(slugify("Léon: The Professional"), "lon-the-professional");
        assert_eq!(slugify("2001: A Space Odyssey"), "2001-a-space-odyssey");
    }

    #[test]
    fn test_catalog_link_unavailable_for_empty_slug() {
        assert_eq!(catalog_link("!!!", &templates()), Link::Unavailable);
        assert_eq!(catalog_link("東京物語", &templates()), Link::Unavailable);
    }

    #[test]
    fn test_streaming_suffix_strips_leading_prefix_only() {
        assert_eq!(streaming_suffix(Some("tt0111161")), Ok("0111161"));
        assert_eq!(streaming_suffix(Some(" tt1375666 ")), Ok("1375666"));
    }

    #[test]
    fn test_streaming_suffix_rejects_malformed_ids() {
        assert_eq!(
            streaming_suffix(Some("1375666")),
            Err(LinkError::MalformedCrossRef("1375666".to_string()))
        );
        assert_eq!(
            streaming_suffix(Some("nm0634240")),
            Err(LinkError::MalformedCrossRef("nm0634240".to_string()))
        );
        assert_eq!(
            streaming_suffix(Some("tt12tt34")),
            Err(LinkError::MalformedCrossRef("tt12tt34".to_string()))
        );
    }

    #[test]
    fn test_streaming_suffix_missing_id() {
        assert_eq!(streaming_suffix(None), Err(LinkError::MissingCrossRef));
        assert_eq!(streaming_suffix(Some("   ")), Err(LinkError::MissingCrossRef));
    }

    #[test]
    fn test_derive_links() {
        let links = derive_links("Inception", Some("tt1375666"), &templates());
        assert_eq!(links.catalog, Link::Available("https://catalog.test/film/inception/".to_string()));
        assert_eq!(links.streaming, Link::Available("https://stream.test/watch/1375666".to_string()));
    }

    #[test]
    fn test_derive_links_without_cross_ref() {
        let links = derive_links("Inception", None, &templates());
        assert!(matches!(links.catalog, Link::Available(_)));
        assert_eq!(links.streaming, Link::Unavailable);

        let links = derive_links("Inception", Some("1375666"), &templates());
        assert_eq!(links.streaming, Link::Unavailable);
    }

    #[test]
    fn test_derive_links_is_pure() {
        let first = derive_links("Spider-Man: Into the Spider-Verse!", Some("tt4633694"), &templates());
        let second = derive_links("Spider-Man: Into the Spider-Verse!", Some("tt4633694"), &templates());
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_templates_carry_placeholders() {
        let defaults = LinkTemplates::default();
        assert!(defaults.catalog.contains(SLUG_PLACEHOLDER));
        assert!(defaults.streaming.contains(ID_PLACEHOLDER));
    }
}
