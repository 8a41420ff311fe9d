/// General video-search catalog client (YouTube Data API)
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{ContentItem, VideoSearchResponse},
    services::catalogs::{SearchCatalog, SearchOptions},
};

pub struct YouTubeCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl YouTubeCatalog {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }
}

#[async_trait::async_trait]
impl SearchCatalog for YouTubeCatalog {
    async fn search(
        &self,
        query: &str,
        region: &str,
        platform: &str,
        opts: SearchOptions,
    ) -> AppResult<Vec<ContentItem>> {
        let url = format!("{}/search", self.api_url);
        let max_results = opts.max_results.to_string();

        let mut params: Vec<(&str, &str)> = vec![
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("regionCode", region),
            ("maxResults", &max_results),
            ("key", &self.api_key),
        ];
        if opts.short_form {
            params.push(("videoDuration", "short"));
            params.push(("order", "viewCount"));
        } else {
            params.push(("relevanceLanguage", "en"));
            params.push(("safeSearch", "moderate"));
            params.push(("order", "relevance"));
        }

        let response = self.http_client.get(&url).query(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, query = %query, "Search catalog returned error status");
            return Err(AppError::Upstream(format!(
                "Search catalog returned status {}",
                status
            )));
        }

        let body: VideoSearchResponse = response.json().await?;

        // The API reports quota and key errors inside a 200 body.
        if let Some(error) = body.error {
            let message = error.message.unwrap_or_else(|| "unknown error".to_string());
            tracing::warn!(query = %query, error = %message, "Search catalog error payload");
            return Err(AppError::Upstream(message));
        }

        let items: Vec<ContentItem> = body
            .items
            .into_iter()
            .filter_map(|item| item.into_content_item(platform))
            .collect();

        tracing::debug!(
            query = %query,
            results = items.len(),
            catalog = "youtube",
            "Video search completed"
        );

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_with_error_payload_parses() {
        let json = r#"{"error": {"message": "quotaExceeded", "code": 403}}"#;
        let body: VideoSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.error.unwrap().message.as_deref(), Some("quotaExceeded"));
        assert!(body.items.is_empty());
    }

    #[test]
    fn test_response_items_parse() {
        let json = r#"{
            "items": [
                {
                    "id": { "videoId": "abc123" },
                    "snippet": {
                        "title": "First",
                        "description": "d",
                        "thumbnails": { "high": { "url": "https://i.ytimg.com/vi/abc123/hqdefault.jpg" } },
                        "channelTitle": "Channel",
                        "publishedAt": "2024-01-15T12:00:00Z"
                    }
                },
                {
                    "id": { "playlistId": "PL1" },
                    "snippet": {
                        "title": "A playlist",
                        "thumbnails": {},
                        "channelTitle": "Channel",
                        "publishedAt": "2024-01-15T12:00:00Z"
                    }
                }
            ]
        }"#;

        let body: VideoSearchResponse = serde_json::from_str(json).unwrap();
        let items: Vec<ContentItem> = body
            .items
            .into_iter()
            .filter_map(|item| item.into_content_item("shorts"))
            .collect();

        // Playlist entry has no video id and is dropped
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "abc123");
        assert_eq!(items[0].platform, "shorts");
    }

    #[test]
    fn test_search_options() {
        let standard = SearchOptions::standard(50);
        assert!(!standard.short_form);
        assert_eq!(standard.max_results, 50);

        let shorts = SearchOptions::short_form(10);
        assert!(shorts.short_form);
        assert_eq!(shorts.max_results, 10);
    }
}
