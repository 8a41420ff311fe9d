/// Structured media-metadata catalog client (TMDB API)
///
/// One thin method per upstream endpoint: search, details (with credits and
/// keywords appended), similar items, genre discovery and watch providers.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{
        CatalogEntry, MediaDetailsResponse, MediaKind, MediaListResponse, PlatformAvailability,
        SourceDetails, WatchProvidersResponse,
    },
    services::availability,
    services::catalogs::MediaCatalog,
};

/// Genre name to catalog genre id
const GENRE_IDS: &[(&str, u64)] = &[
    ("Action", 28),
    ("Adventure", 12),
    ("Animation", 16),
    ("Comedy", 35),
    ("Crime", 80),
    ("Documentary", 99),
    ("Drama", 18),
    ("Family", 10751),
    ("Fantasy", 14),
    ("History", 36),
    ("Horror", 27),
    ("Music", 10402),
    ("Mystery", 9648),
    ("Romance", 10749),
    ("Science Fiction", 878),
    ("TV Movie", 10770),
    ("Thriller", 53),
    ("War", 10752),
    ("Western", 37),
];

/// Minimum vote count for genre-discovery results
const DISCOVER_MIN_VOTES: &str = "100";

pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbCatalog {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self.http_client.get(url).query(params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, url = %url, "Metadata catalog returned error status");
            return Err(AppError::Upstream(format!(
                "Metadata catalog returned status {}",
                status
            )));
        }

        Ok(response.json().await?)
    }

    fn genre_ids(genres: &[String]) -> Vec<u64> {
        genres
            .iter()
            .filter_map(|name| {
                GENRE_IDS
                    .iter()
                    .find(|(known, _)| known == name)
                    .map(|(_, id)| *id)
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl MediaCatalog for TmdbCatalog {
    async fn find_first(&self, query: &str, kind: MediaKind) -> AppResult<Option<CatalogEntry>> {
        let url = format!("{}/search/{}", self.api_url, kind.path_segment());
        let body: MediaListResponse = self
            .get_json(
                &url,
                &[
                    ("api_key", self.api_key.as_str()),
                    ("query", query),
                    ("language", "en-US"),
                    ("page", "1"),
                ],
            )
            .await?;

        Ok(body
            .results
            .into_iter()
            .next()
            .map(|item| item.into_catalog_entry(kind)))
    }

    async fn details(&self, id: u64, kind: MediaKind) -> AppResult<Option<SourceDetails>> {
        let url = format!("{}/{}/{}", self.api_url, kind.path_segment(), id);
        let result: AppResult<MediaDetailsResponse> = self
            .get_json(
                &url,
                &[
                    ("api_key", self.api_key.as_str()),
                    ("append_to_response", "credits,keywords"),
                ],
            )
            .await;

        match result {
            Ok(body) => Ok(Some(body.into_source_details(kind))),
            // A missing entry is absence, not an upstream failure
            Err(AppError::Upstream(msg)) if msg.contains("404") => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn similar(&self, id: u64, kind: MediaKind) -> AppResult<Vec<CatalogEntry>> {
        let url = format!("{}/{}/{}/similar", self.api_url, kind.path_segment(), id);
        let body: MediaListResponse = self
            .get_json(
                &url,
                &[
                    ("api_key", self.api_key.as_str()),
                    ("language", "en-US"),
                    ("page", "1"),
                ],
            )
            .await?;

        Ok(body
            .results
            .into_iter()
            .map(|item| item.into_catalog_entry(kind))
            .collect())
    }

    async fn discover_by_genres(
        &self,
        genres: &[String],
        kind: MediaKind,
    ) -> AppResult<Vec<CatalogEntry>> {
        let ids = Self::genre_ids(genres);
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let with_genres = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let url = format!("{}/discover/{}", self.api_url, kind.path_segment());
        let body: MediaListResponse = self
            .get_json(
                &url,
                &[
                    ("api_key", self.api_key.as_str()),
                    ("with_genres", with_genres.as_str()),
                    ("sort_by", "popularity.desc"),
                    ("vote_count.gte", DISCOVER_MIN_VOTES),
                    ("page", "1"),
                ],
            )
            .await?;

        Ok(body
            .results
            .into_iter()
            .map(|item| item.into_catalog_entry(kind))
            .collect())
    }

    async fn watch_platforms(
        &self,
        id: u64,
        kind: MediaKind,
        title: &str,
        region: &str,
    ) -> AppResult<Vec<PlatformAvailability>> {
        let url = format!(
            "{}/{}/{}/watch/providers",
            self.api_url,
            kind.path_segment(),
            id
        );
        let body: WatchProvidersResponse = self
            .get_json(&url, &[("api_key", self.api_key.as_str())])
            .await?;

        let platforms = body
            .results
            .get(region)
            .map(|offers| availability::map_offers(offers, title))
            .unwrap_or_default();

        tracing::debug!(
            media_id = id,
            region = %region,
            platforms = platforms.len(),
            catalog = "tmdb",
            "Watch providers resolved"
        );

        Ok(platforms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_ids_known_names() {
        let genres = vec![
            "Action".to_string(),
            "Science Fiction".to_string(),
            "Polka".to_string(),
        ];
        assert_eq!(TmdbCatalog::genre_ids(&genres), vec![28, 878]);
    }

    #[test]
    fn test_genre_ids_empty_for_unknown() {
        let genres = vec!["Polka".to_string()];
        assert!(TmdbCatalog::genre_ids(&genres).is_empty());
    }

    #[test]
    fn test_watch_providers_response_parses_region_offers() {
        let json = r#"{
            "results": {
                "US": {
                    "flatrate": [{"provider_id": 8, "provider_name": "Netflix"}],
                    "buy": [{"provider_id": 9, "provider_name": "Amazon"}]
                },
                "GB": {
                    "flatrate": [{"provider_id": 337, "provider_name": "Disney Plus"}]
                }
            }
        }"#;

        let body: WatchProvidersResponse = serde_json::from_str(json).unwrap();
        let us = body.results.get("US").unwrap();
        assert_eq!(us.flatrate.len(), 1);
        assert_eq!(us.flatrate[0].provider_id, 8);
        assert_eq!(us.buy[0].provider_id, 9);
        assert!(body.results.get("DE").is_none());
    }
}
