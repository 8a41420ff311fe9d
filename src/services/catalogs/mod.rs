/// Upstream catalog client abstractions
///
/// Two external catalogs feed the recommendation engine: a general
/// video-search catalog and a structured media-metadata catalog. Both are
/// wrapped behind traits so strategy code can be exercised against mocks and
/// so every fallback branch is driven by an explicit `Result`, not a blanket
/// catch.
///
/// Failure contract: clients return `Err` for network errors, non-2xx
/// statuses and error payloads embedded in a 200 body; absent data is
/// `Ok(None)` or an empty list. No retries — a single miss is definitive for
/// the request.
use crate::{
    error::AppResult,
    models::{CatalogEntry, ContentItem, MediaKind, PlatformAvailability, SourceDetails},
};

pub mod tmdb;
pub mod youtube;

pub use tmdb::TmdbCatalog;
pub use youtube::YouTubeCatalog;

/// Options for one search-catalog query
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub max_results: u32,
    /// Restrict to short-duration videos ordered by view count
    pub short_form: bool,
}

impl SearchOptions {
    pub fn standard(max_results: u32) -> Self {
        Self {
            max_results,
            short_form: false,
        }
    }

    pub fn short_form(max_results: u32) -> Self {
        Self {
            max_results,
            short_form: true,
        }
    }
}

/// General video-search catalog
#[async_trait::async_trait]
pub trait SearchCatalog: Send + Sync {
    /// Search for videos, tagged with the given platform tag.
    async fn search(
        &self,
        query: &str,
        region: &str,
        platform: &str,
        opts: SearchOptions,
    ) -> AppResult<Vec<ContentItem>>;
}

/// Structured media-metadata catalog
#[async_trait::async_trait]
pub trait MediaCatalog: Send + Sync {
    /// Resolve a free-text query to the best-matching catalog entry.
    async fn find_first(&self, query: &str, kind: MediaKind) -> AppResult<Option<CatalogEntry>>;

    /// Full details for one entry; `Ok(None)` when the catalog has no record.
    async fn details(&self, id: u64, kind: MediaKind) -> AppResult<Option<SourceDetails>>;

    /// The catalog's own "similar items" list for an entry.
    async fn similar(&self, id: u64, kind: MediaKind) -> AppResult<Vec<CatalogEntry>>;

    /// Popularity-ordered discovery by genre names, pre-filtered to entries
    /// with a minimum vote count.
    async fn discover_by_genres(
        &self,
        genres: &[String],
        kind: MediaKind,
    ) -> AppResult<Vec<CatalogEntry>>;

    /// Region-specific platform availability, already mapped to the closed
    /// platform set. Empty means the entry is not watchable anywhere we know.
    async fn watch_platforms(
        &self,
        id: u64,
        kind: MediaKind,
        title: &str,
        region: &str,
    ) -> AppResult<Vec<PlatformAvailability>>;
}
