//! Build catalog clients from configuration and stored credentials.

use crate::error::CatalogError;
use crate::omdb::{api as omdb_api, OmdbClient};
use crate::tmdb::{api as tmdb_api, TmdbClient};
use crate::traits::{PrimaryCatalog, SecondaryCatalog};
use anyhow::Result;
use cinebot_config::{Config, CredentialStore};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("cinebot/", env!("CARGO_PKG_VERSION"));

/// The catalogs one deployment resolves against
#[derive(Clone)]
pub struct CatalogSet {
    pub primary: Arc<dyn PrimaryCatalog>,
    /// `None` when the secondary catalog is disabled or the strategy never consults it
    pub secondary: Option<Arc<dyn SecondaryCatalog>>,
}

impl CatalogSet {
    pub fn new(primary: Arc<dyn PrimaryCatalog>, secondary: Option<Arc<dyn SecondaryCatalog>>) -> Self {
        Self { primary, secondary }
    }

    pub fn from_config(config: &Config, credentials: &CredentialStore) -> Result<Self> {
        let client = Arc::new(Client::builder().user_agent(USER_AGENT).build()?);

        let tmdb_key = credentials
            .tmdb_api_key()
            .ok_or(CatalogError::MissingApiKey { catalog: tmdb_api::CATALOG })?;
        let primary: Arc<dyn PrimaryCatalog> = Arc::new(TmdbClient::new(
            client.clone(),
            config.primary.base_url.clone(),
            tmdb_key,
        ));
        debug!("Primary catalog configured at {}", config.primary.base_url);

        let secondary: Option<Arc<dyn SecondaryCatalog>> = if config.uses_secondary() {
            let omdb_key = credentials
                .omdb_api_key()
                .ok_or(CatalogError::MissingApiKey { catalog: omdb_api::CATALOG })?;
            debug!("Secondary catalog configured at {}", config.secondary.base_url);
            Some(Arc::new(OmdbClient::new(
                client,
                config.secondary.base_url.clone(),
                omdb_key,
            )))
        } else {
            info!("Secondary catalog not in use; records will carry no cross-reference id");
            None
        };

        Ok(Self { primary, secondary })
    }
}
