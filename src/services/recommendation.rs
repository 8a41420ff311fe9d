/// Recommendation-assembly engine
///
/// A request enters through the result cache; on a miss, category dispatch
/// selects a strategy pipeline (search-only, multi-strategy with similarity
/// scoring, or ranking-only), the full result list is written back to the
/// cache, and the response is truncated to the requested limit.
///
/// Upstream failures never reach the caller: every strategy converts its
/// failures into the next fallback, bottoming out at the static fallback
/// catalog.
use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::{
    cache::{CacheKey, RecommendationCache},
    error::AppResult,
    models::{Category, CatalogEntry, ContentItem, MediaKind, PlatformAvailability, SourceDetails},
    services::{
        availability,
        catalogs::{MediaCatalog, SearchCatalog, SearchOptions},
        fallback, ranking, scoring,
    },
};

/// Output cap for simple-category merges and the structured pipeline
const RESULT_CAP: usize = 15;
/// Candidates below this popularity are not pooled
const POPULARITY_FLOOR: f64 = 10.0;
/// Top-K of the similar-items strategy after popularity sorting
const SIMILAR_POOL_CAP: usize = 20;
/// How many genre-discovery entries are considered per request
const DISCOVERY_POOL_CAP: usize = 15;
/// Total candidate pool size across strategies
const CANDIDATE_POOL_CAP: usize = 30;
/// How many scored candidates are checked for availability before giving up
const AVAILABILITY_SCAN_CAP: usize = 30;
/// Concurrent availability lookups per batch
const AVAILABILITY_BATCH: usize = 5;
/// Result count for the unstructured "similar to" fallback search
const FALLBACK_SEARCH_LIMIT: u32 = 5;
/// Per-variant result count for short-form search strategies
const SHORT_FORM_VARIANT_RESULTS: u32 = 10;
/// Overview text is clipped to this many characters in output cards
const DESCRIPTION_CHAR_CAP: usize = 200;

struct ScoredCandidate {
    entry: CatalogEntry,
    details: SourceDetails,
    score: f64,
}

pub struct RecommendationService {
    search_catalog: Arc<dyn SearchCatalog>,
    media_catalog: Arc<dyn MediaCatalog>,
    cache: RecommendationCache,
    max_search_results: u32,
}

impl RecommendationService {
    pub fn new(
        search_catalog: Arc<dyn SearchCatalog>,
        media_catalog: Arc<dyn MediaCatalog>,
        cache: RecommendationCache,
        max_search_results: u32,
    ) -> Self {
        Self {
            search_catalog,
            media_catalog,
            cache,
            max_search_results,
        }
    }

    /// Returns at most `limit` recommendations for the query.
    ///
    /// Never fails: upstream trouble degrades to fallback content instead.
    /// The cache stores the full pre-truncation list, so repeated requests
    /// with different limits slice the same stored result.
    pub async fn get_recommendations(
        &self,
        category: Category,
        query: &str,
        region: &str,
        limit: usize,
    ) -> Vec<ContentItem> {
        let key = CacheKey::new(category, query, region);
        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(key = %key, "Result cache hit");
            return cached.iter().take(limit).cloned().collect();
        }
        tracing::debug!(key = %key, "Result cache miss");

        let results = if let Some(kind) = category.media_kind() {
            self.structured_media_results(category, kind, query, region)
                .await
        } else if category == Category::Shorts {
            self.short_form_results(query, region).await
        } else {
            self.general_video_results(query, region).await
        };

        self.cache.insert(&key, results.clone()).await;
        results.into_iter().take(limit).collect()
    }

    /// Single relevance search against the video-search catalog, then the
    /// recency/diversity ranking pass.
    async fn general_video_results(&self, query: &str, region: &str) -> Vec<ContentItem> {
        let items = match self
            .search_catalog
            .search(
                query,
                region,
                Category::Youtube.as_str(),
                SearchOptions::standard(self.max_search_results),
            )
            .await
        {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => fallback::results_for(Category::Youtube, query),
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Video search failed");
                fallback::results_for(Category::Youtube, query)
            }
        };

        ranking::rank_by_recency(items)
    }

    /// Two short-form search variants merged by id (first seen wins), then
    /// the recency/diversity ranking pass.
    async fn short_form_results(&self, query: &str, region: &str) -> Vec<ContentItem> {
        let variants = [
            format!("{} tiktok viral", query),
            format!("{} #shorts", query),
        ];

        let mut merged: Vec<ContentItem> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for variant in &variants {
            match self
                .search_catalog
                .search(
                    variant,
                    region,
                    Category::Shorts.as_str(),
                    SearchOptions::short_form(SHORT_FORM_VARIANT_RESULTS),
                )
                .await
            {
                Ok(items) => {
                    for item in items {
                        if seen.insert(item.id.clone()) {
                            merged.push(item);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(variant = %variant, error = %e, "Short-form search variant failed");
                    continue;
                }
            }
        }

        merged.truncate(RESULT_CAP);
        let items = if merged.is_empty() {
            fallback::results_for(Category::Shorts, query)
        } else {
            merged
        };

        ranking::rank_by_recency(items)
    }

    async fn structured_media_results(
        &self,
        category: Category,
        kind: MediaKind,
        query: &str,
        region: &str,
    ) -> Vec<ContentItem> {
        match self.similar_media_pipeline(kind, query, region).await {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => {
                tracing::info!(category = %category, query = %query, "Structured pipeline yielded nothing");
                self.unstructured_fallback(category, query, region).await
            }
            Err(e) => {
                tracing::warn!(category = %category, query = %query, error = %e, "Structured pipeline failed");
                self.unstructured_fallback(category, query, region).await
            }
        }
    }

    /// The five-stage structured pipeline: resolve seed, fetch its details,
    /// pool candidates from independent strategies, score, and emit only
    /// candidates with resolvable availability.
    ///
    /// An empty result (including an unresolvable seed) tells the caller to
    /// fall back; errors from the seed stages do the same via `?`.
    async fn similar_media_pipeline(
        &self,
        kind: MediaKind,
        query: &str,
        region: &str,
    ) -> AppResult<Vec<ContentItem>> {
        let Some(seed) = self.media_catalog.find_first(query, kind).await? else {
            return Ok(vec![]);
        };

        let Some(source) = self.media_catalog.details(seed.id, kind).await? else {
            return Ok(vec![]);
        };

        let pool = self.build_candidate_pool(&seed, &source, kind).await;
        let scored = self.score_candidates(&source, pool, kind).await;
        Ok(self.resolve_availability(scored, kind, region).await)
    }

    /// Merges the similar-items and genre-discovery strategies into one
    /// deduplicated pool. First-seen wins, so similar-items results take
    /// precedence over discovery results. A failed strategy contributes
    /// nothing rather than aborting the pipeline.
    async fn build_candidate_pool(
        &self,
        seed: &CatalogEntry,
        source: &SourceDetails,
        kind: MediaKind,
    ) -> Vec<CatalogEntry> {
        let mut pool: Vec<CatalogEntry> = Vec::new();
        let mut seen: HashSet<u64> = HashSet::new();

        match self.media_catalog.similar(seed.id, kind).await {
            Ok(entries) => {
                let mut similar: Vec<CatalogEntry> = entries
                    .into_iter()
                    .filter(|entry| entry.popularity > POPULARITY_FLOOR)
                    .collect();
                similar.sort_by(|a, b| {
                    b.popularity
                        .partial_cmp(&a.popularity)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                for entry in similar.into_iter().take(SIMILAR_POOL_CAP) {
                    if seen.insert(entry.id) {
                        pool.push(entry);
                    }
                }
            }
            Err(e) => tracing::warn!(seed_id = seed.id, error = %e, "Similar-items strategy failed"),
        }

        if !source.genres.is_empty() {
            match self
                .media_catalog
                .discover_by_genres(&source.genres, kind)
                .await
            {
                Ok(entries) => {
                    for entry in entries.into_iter().take(DISCOVERY_POOL_CAP) {
                        if entry.id == seed.id || entry.popularity <= POPULARITY_FLOOR {
                            continue;
                        }
                        if seen.insert(entry.id) {
                            pool.push(entry);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(seed_id = seed.id, error = %e, "Genre-discovery strategy failed")
                }
            }
        }

        pool.truncate(CANDIDATE_POOL_CAP);
        pool
    }

    /// Fetches details for each pooled candidate and scores it against the
    /// source. Candidates with no resolvable details are skipped, not
    /// zero-scored. The sort is stable, so ties keep pool order.
    async fn score_candidates(
        &self,
        source: &SourceDetails,
        pool: Vec<CatalogEntry>,
        kind: MediaKind,
    ) -> Vec<ScoredCandidate> {
        let mut scored = Vec::with_capacity(pool.len());

        for entry in pool {
            if entry.id == source.id {
                continue;
            }
            let details = match self.media_catalog.details(entry.id, kind).await {
                Ok(Some(details)) => details,
                Ok(None) => continue,
                Err(e) => {
                    tracing::debug!(media_id = entry.id, error = %e, "Candidate details unavailable");
                    continue;
                }
            };
            let score = scoring::similarity_score(source, &details);
            scored.push(ScoredCandidate {
                entry,
                details,
                score,
            });
        }

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored
    }

    /// Walks the scored candidates in order, resolving availability in small
    /// concurrent batches but keeping score order when deciding which to
    /// emit. Candidates with no mapped platform are excluded outright; the
    /// walk stops after the output cap or the scan cap, whichever first.
    async fn resolve_availability(
        &self,
        scored: Vec<ScoredCandidate>,
        kind: MediaKind,
        region: &str,
    ) -> Vec<ContentItem> {
        let mut results: Vec<ContentItem> = Vec::new();
        let scan = &scored[..scored.len().min(AVAILABILITY_SCAN_CAP)];

        for chunk in scan.chunks(AVAILABILITY_BATCH) {
            let mut handles = Vec::with_capacity(chunk.len());
            for candidate in chunk {
                let catalog = Arc::clone(&self.media_catalog);
                let id = candidate.entry.id;
                let title = candidate.entry.title.clone();
                let region = region.to_string();
                handles.push(tokio::spawn(async move {
                    catalog.watch_platforms(id, kind, &title, &region).await
                }));
            }

            for (candidate, handle) in chunk.iter().zip(handles) {
                let platforms = match handle.await {
                    Ok(Ok(platforms)) => platforms,
                    Ok(Err(e)) => {
                        tracing::debug!(media_id = candidate.entry.id, error = %e, "Availability lookup failed");
                        continue;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Availability task join error");
                        continue;
                    }
                };

                // Hard filter: nothing watchable, nothing emitted
                let Some(primary) = availability::primary_platform(&platforms) else {
                    continue;
                };

                results.push(build_media_item(candidate, primary, &platforms));
                if results.len() >= RESULT_CAP {
                    return results;
                }
            }
        }

        results
    }

    /// "similar to" phrasing against the search catalog; if that also fails
    /// or returns nothing, the static fallback catalog is the last resort.
    async fn unstructured_fallback(
        &self,
        category: Category,
        query: &str,
        region: &str,
    ) -> Vec<ContentItem> {
        let phrased = format!("{} similar to {}", category.as_str(), query);
        match self
            .search_catalog
            .search(
                &phrased,
                region,
                Category::Youtube.as_str(),
                SearchOptions::standard(FALLBACK_SEARCH_LIMIT),
            )
            .await
        {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => fallback::results_for(category, query),
            Err(e) => {
                tracing::warn!(query = %phrased, error = %e, "Unstructured fallback search failed");
                fallback::results_for(category, query)
            }
        }
    }
}

fn build_media_item(
    candidate: &ScoredCandidate,
    primary: &PlatformAvailability,
    platforms: &[PlatformAvailability],
) -> ContentItem {
    let description: String = candidate
        .entry
        .overview
        .chars()
        .take(DESCRIPTION_CHAR_CAP)
        .collect();
    let published_at = if candidate.entry.release_date.is_empty() {
        Utc::now().to_rfc3339()
    } else {
        candidate.entry.release_date.clone()
    };

    ContentItem {
        id: candidate.entry.id.to_string(),
        title: candidate.entry.title.clone(),
        description,
        thumbnail: candidate.entry.poster_url.clone(),
        channel: primary.platform.as_str().to_uppercase(),
        published_at,
        platform: primary.platform.as_str().to_string(),
        url: primary.url.clone(),
        all_platforms: Some(
            platforms
                .iter()
                .map(|p| p.platform.as_str().to_string())
                .collect(),
        ),
        rating: Some((candidate.details.rating * 10.0).round() / 10.0),
        year: candidate.details.release_year.map(|year| year.to_string()),
    }
}
