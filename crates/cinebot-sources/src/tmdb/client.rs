use crate::error::CatalogError;
use crate::tmdb::api;
use crate::traits::PrimaryCatalog;
use crate::types::{Credits, PrimaryMovie, Video};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(client: Arc<Client>, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl PrimaryCatalog for TmdbClient {
    fn catalog_name(&self) -> &'static str {
        api::CATALOG
    }

    async fn search(&self, query: &str) -> Result<Vec<PrimaryMovie>, CatalogError> {
        api::search_movies(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn credits(&self, id: u64) -> Result<Credits, CatalogError> {
        api::get_credits(&self.client, &self.base_url, &self.api_key, id).await
    }

    async fn videos(&self, id: u64) -> Result<Vec<Video>, CatalogError> {
        api::get_videos(&self.client, &self.base_url, &self.api_key, id).await
    }

    async fn find_by_external_id(&self, cross_ref_id: &str) -> Result<Vec<PrimaryMovie>, CatalogError> {
        api::find_by_imdb_id(&self.client, &self.base_url, &self.api_key, cross_ref_id).await
    }
}
