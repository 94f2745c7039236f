use crate::error::CatalogError;
use crate::omdb::api;
use crate::traits::SecondaryCatalog;
use crate::types::SecondaryLookup;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(client: Arc<Client>, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl SecondaryCatalog for OmdbClient {
    fn catalog_name(&self) -> &'static str {
        api::CATALOG
    }

    async fn lookup_by_title(&self, title: &str, year: Option<u32>) -> Result<SecondaryLookup, CatalogError> {
        api::lookup_by_title(&self.client, &self.base_url, &self.api_key, title, year).await
    }

    async fn lookup_by_external_id(&self, cross_ref_id: &str) -> Result<SecondaryLookup, CatalogError> {
        api::lookup_by_imdb_id(&self.client, &self.base_url, &self.api_key, cross_ref_id).await
    }
}
