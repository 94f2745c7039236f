//! Title → canonical record resolution across the primary and secondary catalogs.
//!
//! One call to [`Resolver::resolve`] is a linear pipeline: the lookup that
//! produces an id runs first, then the calls that need that id. Required
//! stages short-circuit into [`NotFound`]; supplemental stages degrade to
//! sentinel fields. Nothing is retried and no timeout is applied here; the
//! command layer bounds each resolution.

use crate::error::{NotFound, NotFoundReason};
use crate::links::{derive_links, LinkTemplates};
use crate::reconcile::{self, Supplement};
use cinebot_config::{Config, Precedence, ResolutionStrategy};
use cinebot_models::{is_cross_ref_id, CanonicalMovie, ReleaseYear, UNAVAILABLE};
use cinebot_sources::{CatalogSet, PrimaryMovie, SecondaryLookup, SecondaryRecord};
use tracing::{debug, info, warn};


/// Knobs for one resolver instance
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    pub strategy: ResolutionStrategy,
    pub precedence: Precedence,
    /// Fail the whole resolution when no cross-reference id can be obtained
    pub require_cross_ref: bool,
    pub cast_limit: Option<usize>,
    pub image_base_url: String,
    pub links: LinkTemplates,
}

impl ResolverOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            strategy: config.resolution.strategy,
            precedence: config.resolution.precedence,
            require_cross_ref: config.resolution.require_cross_ref,
            cast_limit: config.resolution.cast_limit,
            image_base_url: config.primary.image_base_url.clone(),
            links: LinkTemplates::from(&config.links),
        }
    }
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Resolves free-text titles into [`CanonicalMovie`] records.
///
/// Holds no mutable state, so one instance can serve concurrent commands.
pub struct Resolver {
    catalogs: CatalogSet,
    options: ResolverOptions,
}

impl Resolver {
    pub fn new(catalogs: CatalogSet, options: ResolverOptions) -> Self {
        Self { catalogs, options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve a non-empty title.
    ///
    /// Blank input is the caller's responsibility; it is still answered with
    /// [`NotFound`] rather than sent to a catalog.
    pub async fn resolve(&self, title: &str) -> Result<CanonicalMovie, NotFound> {
        let query = title.trim();
        if query.is_empty() {
            return Err(NotFound::new(title, NotFoundReason::NoPrimaryMatch));
        }

        debug!("Resolving '{}' with strategy {:?}", query, self.options.strategy);

        let (primary, secondary) = if is_cross_ref_id(query) {
            self.lookup_cross_ref(query).await?
        } else {
            match self.options.strategy {
                ResolutionStrategy::PrimaryOnly => {
                    if self.options.require_cross_ref {
                        return Err(NotFound::new(query, NotFoundReason::MissingCrossRef));
                    }
                    (self.search_primary(query).await?, None)
                }
                ResolutionStrategy::PrimaryFirst => {
                    let primary = self.search_primary(query).await?;
                    let secondary = self.cross_reference(query, &primary).await?;
                    (primary, secondary)
                }
                ResolutionStrategy::SecondaryFirst => {
                    let secondary = self.lookup_secondary_first(query).await?;
                    let primary = self.primary_for_cross_ref(query, &secondary).await?;
                    (primary, Some(secondary))
                }
            }
        };

        let supplement = self.supplement(primary.id).await;

        let mut merged = reconcile::reconcile(
            Some(&primary),
            secondary.as_ref(),
            supplement,
            self.options.precedence,
            &self.options.image_base_url,
            query,
        );

        // The id the user typed is authoritative when no catalog echoed one back
        if merged.cross_ref_id.is_none() && is_cross_ref_id(query) {
            merged.cross_ref_id = Some(query.to_string());
        }

        if self.options.require_cross_ref && merged.cross_ref_id.is_none() {
            warn!("'{}' resolved without a usable cross-reference id", query);
            return Err(NotFound::new(query, NotFoundReason::MissingCrossRef));
        }

        let links = derive_links(&merged.title, merged.cross_ref_id.as_deref(), &self.options.links);

        info!(
            "Resolved '{}' to '{}' ({}), cross_ref={:?}",
            query, merged.title, merged.release_year, merged.cross_ref_id
        );

        Ok(CanonicalMovie {
            title: merged.title,
            release_year: merged.release_year,
            genres: merged.genres,
            synopsis: merged.synopsis,
            poster_url: merged.poster_url,
            cross_ref_id: merged.cross_ref_id,
            primary_id: merged.primary_id,
            directors: merged.directors,
            cast: merged.cast,
            trailer_url: merged.trailer_url,
            external_rating: merged.external_rating,
            links,
        })
    }

    /// Primary search; the first result wins
    async fn search_primary(&self, query: &str) -> Result<PrimaryMovie, NotFound> {
        let results = self.catalogs.primary.search(query).await.map_err(|e| {
            warn!("Search for '{}' on {} failed: {}", query, e.catalog(), e);
            NotFound::new(query, NotFoundReason::PrimaryUnavailable)
        })?;

        debug!("Primary search for '{}' returned {} result(s)", query, results.len());

        results
            .into_iter()
            .next()
            .ok_or_else(|| NotFound::new(query, NotFoundReason::NoPrimaryMatch))
    }

    /// Secondary title + year lookup for a primary hit.
    ///
    /// Any miss is fatal only when a cross-reference id is required.
    async fn cross_reference(
        &self,
        query: &str,
        primary: &PrimaryMovie,
    ) -> Result<Option<SecondaryRecord>, NotFound> {
        let required = self.options.require_cross_ref;

        let Some(secondary) = self.catalogs.secondary.as_ref() else {
            if required {
                return Err(NotFound::new(query, NotFoundReason::SecondaryUnavailable));
            }
            return Ok(None);
        };

        let year = primary
            .release_date
            .as_deref()
            .map(ReleaseYear::from_date)
            .and_then(|y| y.as_number());

        match secondary.lookup_by_title(&primary.title, year).await {
            Ok(SecondaryLookup::Found(record)) => Ok(Some(record)),
            Ok(SecondaryLookup::NotFound) => {
                if required {
                    info!("Secondary catalog has no '{}' ({:?}); cross-reference required", primary.title, year);
                    return Err(NotFound::new(query, NotFoundReason::NoSecondaryMatch));
                }
                debug!("Secondary catalog has no '{}' ({:?}); using primary data only", primary.title, year);
                Ok(None)
            }
            Err(e) => {
                warn!("Secondary lookup for '{}' failed: {}", primary.title, e);
                if required {
                    return Err(NotFound::new(query, NotFoundReason::SecondaryUnavailable));
                }
                Ok(None)
            }
        }
    }

    /// Secondary title lookup used as the first stage; always required
    async fn lookup_secondary_first(&self, query: &str) -> Result<SecondaryRecord, NotFound> {
        let secondary = self.catalogs.secondary.as_ref().ok_or_else(|| {
            warn!("Strategy secondary-first without a secondary catalog");
            NotFound::new(query, NotFoundReason::SecondaryUnavailable)
        })?;

        match secondary.lookup_by_title(query, None).await {
            Ok(SecondaryLookup::Found(record)) => Ok(record),
            Ok(SecondaryLookup::NotFound) => Err(NotFound::new(query, NotFoundReason::NoSecondaryMatch)),
            Err(e) => {
                warn!("Secondary lookup for '{}' failed: {}", query, e);
                Err(NotFound::new(query, NotFoundReason::SecondaryUnavailable))
            }
        }
    }

    /// Both catalogs keyed by a cross-reference id typed in place of a title.
    ///
    /// The primary entry is required; the secondary record is optional.
    async fn lookup_cross_ref(
        &self,
        cross_ref_id: &str,
    ) -> Result<(PrimaryMovie, Option<SecondaryRecord>), NotFound> {
        let secondary = match self.catalogs.secondary.as_ref() {
            Some(catalog) => match catalog.lookup_by_external_id(cross_ref_id).await {
                Ok(SecondaryLookup::Found(record)) => Some(record),
                Ok(SecondaryLookup::NotFound) => {
                    debug!("Secondary catalog has no entry for {}", cross_ref_id);
                    None
                }
                Err(e) => {
                    warn!("Secondary lookup of {} failed: {}", cross_ref_id, e);
                    None
                }
            },
            None => None,
        };

        let primary = self.find_primary(cross_ref_id, cross_ref_id).await?;
        Ok((primary, secondary))
    }

    /// Primary entry matching the secondary record's cross-reference id
    async fn primary_for_cross_ref(&self, query: &str, secondary: &SecondaryRecord) -> Result<PrimaryMovie, NotFound> {
        let Some(cross_ref_id) = secondary.cross_ref_id.as_deref().filter(|id| is_cross_ref_id(id)) else {
            info!("Secondary record for '{}' has no usable cross-reference id", query);
            return Err(NotFound::new(query, NotFoundReason::MissingCrossRef));
        };
        self.find_primary(query, cross_ref_id).await
    }

    /// First primary entry for a cross-reference id; a miss or failure is fatal
    async fn find_primary(&self, query: &str, cross_ref_id: &str) -> Result<PrimaryMovie, NotFound> {
        let matches = self.catalogs.primary.find_by_external_id(cross_ref_id).await.map_err(|e| {
            warn!("Primary lookup of {} for '{}' failed: {}", cross_ref_id, query, e);
            NotFound::new(query, NotFoundReason::PrimaryUnavailable)
        })?;

        matches.into_iter().next().ok_or_else(|| {
            debug!("Primary catalog has no entry for {} ('{}')", cross_ref_id, query);
            NotFound::new(query, NotFoundReason::NoPrimaryMatch)
        })
    }

    /// Credits and videos for a primary id, both best-effort and sequential
    async fn supplement(&self, id: u64) -> Supplement {
        let mut supplement = Supplement::default();

        match self.catalogs.primary.credits(id).await {
            Ok(credits) => {
                supplement.directors = reconcile::directors(&credits);
                supplement.cast = self
                    .options
                    .cast_limit
                    .map(|limit| reconcile::cast_excerpt(&credits, limit).unwrap_or_else(|| UNAVAILABLE.to_string()));
            }
            Err(e) => {
                warn!("Credits for {} id {} unavailable: {}", e.catalog(), id, e);
                supplement.cast = self.options.cast_limit.map(|_| UNAVAILABLE.to_string());
            }
        }

        match self.catalogs.primary.videos(id).await {
            Ok(videos) => {
                supplement.trailer_url = reconcile::pick_trailer(&videos).map(reconcile::trailer_url);
                if supplement.trailer_url.is_none() {
                    debug!("No trailer among {} video(s) for primary id {}", videos.len(), id);
                }
            }
            Err(e) => warn!("Videos for {} id {} unavailable: {}", e.catalog(), id, e),
        }

        supplement
    }
}
