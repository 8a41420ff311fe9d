use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::models::{Category, ContentItem};

/// Composite key for one cached result list.
///
/// The key is the raw concatenation of category, query and region; queries
/// differing only in case or inner whitespace are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    category: Category,
    query: String,
    region: String,
}

impl CacheKey {
    pub fn new(category: Category, query: &str, region: &str) -> Self {
        Self {
            category,
            query: query.to_string(),
            region: region.to_string(),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.category, self.query, self.region)
    }
}

/// Bounded, time-expiring cache for full (pre-truncation) result lists.
///
/// Expiry is passive: entries past the TTL simply stop being returned.
/// Eviction beyond capacity and per-key write synchronization are handled
/// by the underlying cache.
#[derive(Clone)]
pub struct RecommendationCache {
    inner: MokaCache<String, Arc<Vec<ContentItem>>>,
}

impl RecommendationCache {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let inner = MokaCache::builder()
            .time_to_live(ttl)
            .max_capacity(max_entries)
            .build();
        Self { inner }
    }

    /// Returns the full stored list for the key, if present and unexpired.
    pub async fn get(&self, key: &CacheKey) -> Option<Arc<Vec<ContentItem>>> {
        self.inner.get(&key.to_string()).await
    }

    /// Stores the full result list for the key.
    pub async fn insert(&self, key: &CacheKey, results: Vec<ContentItem>) {
        self.inner.insert(key.to_string(), Arc::new(results)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            title: format!("Video {}", id),
            description: String::new(),
            thumbnail: String::new(),
            channel: "Channel".to_string(),
            published_at: "2024-01-15T12:00:00Z".to_string(),
            platform: "youtube".to_string(),
            url: format!("https://www.youtube.com/watch?v={}", id),
            all_platforms: None,
            rating: None,
            year: None,
        }
    }

    #[test]
    fn test_cache_key_display_raw_composition() {
        let key = CacheKey::new(Category::Movies, "batman", "US");
        assert_eq!(format!("{}", key), "movies:batman:US");
    }

    #[test]
    fn test_cache_key_preserves_case_and_whitespace() {
        let lower = CacheKey::new(Category::Movies, "batman", "US");
        let upper = CacheKey::new(Category::Movies, "Batman", "US");
        let padded = CacheKey::new(Category::Movies, " batman", "US");
        assert_ne!(format!("{}", lower), format!("{}", upper));
        assert_ne!(format!("{}", lower), format!("{}", padded));
    }

    #[tokio::test]
    async fn test_insert_and_get_full_list() {
        let cache = RecommendationCache::new(Duration::from_secs(60), 10);
        let key = CacheKey::new(Category::Youtube, "cats", "US");

        assert!(cache.get(&key).await.is_none());

        cache.insert(&key, vec![item("a"), item("b")]).await;
        let stored = cache.get(&key).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, "a");
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let cache = RecommendationCache::new(Duration::from_millis(20), 10);
        let key = CacheKey::new(Category::Youtube, "cats", "US");

        cache.insert(&key, vec![item("a")]).await;
        assert!(cache.get(&key).await.is_some());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_distinct_regions_are_distinct_entries() {
        let cache = RecommendationCache::new(Duration::from_secs(60), 10);
        let us = CacheKey::new(Category::Tv, "office", "US");
        let gb = CacheKey::new(Category::Tv, "office", "GB");

        cache.insert(&us, vec![item("us")]).await;
        assert!(cache.get(&gb).await.is_none());
        assert_eq!(cache.get(&us).await.unwrap()[0].id, "us");
    }
}
