use thiserror::Error;

/// Failure talking to one of the catalogs.
///
/// The resolver never lets these escape; it logs them and turns them into
/// "not found" or a sentinel field depending on which call failed.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request to {catalog} failed: {source}")]
    Transport {
        catalog: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{catalog} returned HTTP {status}: {body}")]
    Status {
        catalog: &'static str,
        status: u16,
        body: String,
    },

    #[error("could not decode {catalog} response: {source}")]
    Decode {
        catalog: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{catalog} rejected the request: {message}")]
    Api { catalog: &'static str, message: String },

    #[error("{catalog} has no API key configured")]
    MissingApiKey { catalog: &'static str },
}

impl CatalogError {
    pub fn catalog(&self) -> &'static str {
        match self {
            CatalogError::Transport { catalog, .. }
            | CatalogError::Status { catalog, .. }
            | CatalogError::Decode { catalog, .. }
            | CatalogError::Api { catalog, .. }
            | CatalogError::MissingApiKey { catalog } => catalog,
        }
    }
}
