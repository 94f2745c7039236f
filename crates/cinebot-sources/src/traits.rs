use async_trait::async_trait;
use crate::error::CatalogError;
use crate::types::{Credits, PrimaryMovie, SecondaryLookup, Video};

/// Movie database keyed by internal numeric ids, with full-text search
#[async_trait]
pub trait PrimaryCatalog: Send + Sync {
    fn catalog_name(&self) -> &'static str;

    /// Search by free-text title; results keep the catalog's own ranking
    async fn search(&self, query: &str) -> Result<Vec<PrimaryMovie>, CatalogError>;

    async fn credits(&self, id: u64) -> Result<Credits, CatalogError>;

    async fn videos(&self, id: u64) -> Result<Vec<Video>, CatalogError>;

    /// Movies matching a `tt`-prefixed cross-reference id
    async fn find_by_external_id(&self, cross_ref_id: &str) -> Result<Vec<PrimaryMovie>, CatalogError>;
}

/// Ratings/plot database keyed by cross-reference ids
#[async_trait]
pub trait SecondaryCatalog: Send + Sync {
    fn catalog_name(&self) -> &'static str;

    /// Exact title lookup, narrowed by year when one is known
    async fn lookup_by_title(&self, title: &str, year: Option<u32>) -> Result<SecondaryLookup, CatalogError>;

    async fn lookup_by_external_id(&self, cross_ref_id: &str) -> Result<SecondaryLookup, CatalogError>;
}
