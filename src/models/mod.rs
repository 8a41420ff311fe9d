use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

const POSTER_PLACEHOLDER: &str =
    "https://via.placeholder.com/500x750/831010/ffffff?text=No+Poster";

/// Content category requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Movies,
    Tv,
    Youtube,
    Shorts,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movies => "movies",
            Category::Tv => "tv",
            Category::Youtube => "youtube",
            Category::Shorts => "shorts",
        }
    }

    /// The metadata-catalog media kind this category maps to, if any.
    /// General video and short-form categories have no structured counterpart.
    pub fn media_kind(&self) -> Option<MediaKind> {
        match self {
            Category::Movies => Some(MediaKind::Movie),
            Category::Tv => Some(MediaKind::Tv),
            Category::Youtube | Category::Shorts => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movies" => Ok(Category::Movies),
            "tv" => Ok(Category::Tv),
            "youtube" => Ok(Category::Youtube),
            "shorts" => Ok(Category::Shorts),
            other => Err(format!(
                "Invalid category '{}'. Must be one of: movies, tv, youtube, shorts",
                other
            )),
        }
    }
}

/// Media kind used when talking to the structured metadata catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Path segment used by the metadata catalog ("movie" or "tv")
    pub fn path_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

/// A single recommendation returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub channel: String,
    pub published_at: String,
    /// Source platform tag ("youtube", "shorts", or a streaming platform)
    pub platform: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_platforms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

/// Enriched metadata for a catalog entry, used as the similarity baseline
/// for the seed item and as the comparison side for each candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDetails {
    pub id: u64,
    pub director: Option<String>,
    pub cast: Vec<String>,
    pub genres: Vec<String>,
    pub keywords: Vec<String>,
    pub companies: Vec<String>,
    pub budget: u64,
    pub revenue: u64,
    pub runtime_minutes: u32,
    pub rating: f64,
    pub release_year: Option<i32>,
    pub collection: Option<String>,
}

/// A search / similar / discovery result from the metadata catalog,
/// before scoring and availability filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub poster_url: String,
    pub release_date: String,
    pub popularity: f64,
}

/// Closed set of distribution platforms the availability filter recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Netflix,
    Disney,
    Prime,
    Hulu,
    Hbo,
    Apple,
    Peacock,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Netflix => "netflix",
            Platform::Disney => "disney",
            Platform::Prime => "prime",
            Platform::Hulu => "hulu",
            Platform::Hbo => "hbo",
            Platform::Apple => "apple",
            Platform::Peacock => "peacock",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One platform carrying a candidate in the requested region
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformAvailability {
    pub platform: Platform,
    pub url: String,
}

// ============================================================================
// Video-search catalog (YouTube API) payload types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct VideoSearchResponse {
    #[serde(default)]
    pub error: Option<VideoSearchError>,
    #[serde(default)]
    pub items: Vec<VideoSearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoSearchError {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoSearchItem {
    pub id: VideoSearchId,
    pub snippet: VideoSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSearchId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub thumbnails: VideoThumbnails,
    pub channel_title: String,
    pub published_at: String,
}

#[derive(Debug, Deserialize)]
pub struct VideoThumbnails {
    #[serde(default)]
    pub high: Option<VideoThumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct VideoThumbnail {
    pub url: String,
}

impl VideoSearchItem {
    /// Converts a raw search item into a ContentItem.
    /// Items without a video id (channels, playlists) are dropped.
    pub fn into_content_item(self, platform: &str) -> Option<ContentItem> {
        let video_id = self.id.video_id?;
        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        Some(ContentItem {
            id: video_id,
            title: self.snippet.title,
            description: self.snippet.description,
            thumbnail: self
                .snippet
                .thumbnails
                .high
                .map(|t| t.url)
                .unwrap_or_default(),
            channel: self.snippet.channel_title,
            published_at: self.snippet.published_at,
            platform: platform.to_string(),
            url,
            all_platforms: None,
            rating: None,
            year: None,
        })
    }
}

// ============================================================================
// Metadata catalog (TMDB API) payload types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct MediaListResponse {
    #[serde(default)]
    pub results: Vec<MediaListItem>,
}

#[derive(Debug, Deserialize)]
pub struct MediaListItem {
    pub id: u64,
    /// Movie responses use `title`, TV responses use `name`
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

impl MediaListItem {
    pub fn into_catalog_entry(self, kind: MediaKind) -> CatalogEntry {
        let title = match kind {
            MediaKind::Movie => self.title.or(self.name),
            MediaKind::Tv => self.name.or(self.title),
        }
        .unwrap_or_default();
        let release_date = match kind {
            MediaKind::Movie => self.release_date.or(self.first_air_date),
            MediaKind::Tv => self.first_air_date.or(self.release_date),
        }
        .unwrap_or_default();

        CatalogEntry {
            id: self.id,
            title,
            overview: self.overview.unwrap_or_default(),
            poster_url: build_poster_url(self.poster_path.as_deref()),
            release_date,
            popularity: self.popularity.unwrap_or(0.0),
        }
    }
}

/// Leading four-digit year of a catalog date. `get` keeps the slice on char
/// boundaries, so malformed or non-ASCII dates yield `None` instead of
/// panicking.
fn year_from_date(date: &str) -> Option<i32> {
    date.get(..4).and_then(|year| year.parse().ok())
}

pub fn build_poster_url(poster_path: Option<&str>) -> String {
    match poster_path {
        Some(path) if !path.is_empty() => format!("https://image.tmdb.org/t/p/w500{}", path),
        _ => POSTER_PLACEHOLDER.to_string(),
    }
}

#[derive(Debug, Deserialize)]
pub struct MediaDetailsResponse {
    pub id: u64,
    #[serde(default)]
    pub credits: Option<MediaCredits>,
    #[serde(default)]
    pub keywords: Option<MediaKeywords>,
    #[serde(default)]
    pub genres: Vec<NamedEntity>,
    #[serde(default)]
    pub production_companies: Vec<NamedEntity>,
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub revenue: Option<u64>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Option<Vec<u32>>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub belongs_to_collection: Option<NamedEntity>,
}

#[derive(Debug, Deserialize)]
pub struct MediaCredits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Deserialize)]
pub struct CastMember {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

/// Keyword payloads differ between kinds: movies nest under `keywords`,
/// TV shows under `results`.
#[derive(Debug, Deserialize)]
pub struct MediaKeywords {
    #[serde(default)]
    pub keywords: Option<Vec<NamedEntity>>,
    #[serde(default)]
    pub results: Option<Vec<NamedEntity>>,
}

#[derive(Debug, Deserialize)]
pub struct NamedEntity {
    pub name: String,
}

const CAST_LIMIT: usize = 10;
const KEYWORD_LIMIT: usize = 15;
const COMPANY_LIMIT: usize = 5;

impl MediaDetailsResponse {
    pub fn into_source_details(self, kind: MediaKind) -> SourceDetails {
        let director = match (kind, &self.credits) {
            (MediaKind::Movie, Some(credits)) => credits
                .crew
                .iter()
                .find(|member| member.job.as_deref() == Some("Director"))
                .map(|member| member.name.clone()),
            _ => None,
        };

        let cast = self
            .credits
            .as_ref()
            .map(|credits| {
                credits
                    .cast
                    .iter()
                    .take(CAST_LIMIT)
                    .map(|member| member.name.clone())
                    .collect()
            })
            .unwrap_or_default();

        let keywords = self
            .keywords
            .map(|kw| {
                let entries = match kind {
                    MediaKind::Movie => kw.keywords,
                    MediaKind::Tv => kw.results,
                };
                entries
                    .unwrap_or_default()
                    .into_iter()
                    .take(KEYWORD_LIMIT)
                    .map(|entity| entity.name)
                    .collect()
            })
            .unwrap_or_default();

        let runtime_minutes = match kind {
            MediaKind::Movie => self.runtime.unwrap_or(0),
            MediaKind::Tv => self
                .episode_run_time
                .as_ref()
                .and_then(|times| times.first().copied())
                .unwrap_or(0),
        };

        let release_year = self
            .release_date
            .as_deref()
            .and_then(year_from_date)
            .or_else(|| self.first_air_date.as_deref().and_then(year_from_date));

        let (budget, revenue, collection) = match kind {
            MediaKind::Movie => (
                self.budget.unwrap_or(0),
                self.revenue.unwrap_or(0),
                self.belongs_to_collection.map(|entity| entity.name),
            ),
            MediaKind::Tv => (0, 0, None),
        };

        SourceDetails {
            id: self.id,
            director,
            cast,
            genres: self.genres.into_iter().map(|entity| entity.name).collect(),
            keywords,
            companies: self
                .production_companies
                .into_iter()
                .take(COMPANY_LIMIT)
                .map(|entity| entity.name)
                .collect(),
            budget,
            revenue,
            runtime_minutes,
            rating: self.vote_average.unwrap_or(0.0),
            release_year,
            collection,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WatchProvidersResponse {
    #[serde(default)]
    pub results: HashMap<String, RegionOffers>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegionOffers {
    #[serde(default)]
    pub flatrate: Vec<ProviderOffer>,
    #[serde(default)]
    pub buy: Vec<ProviderOffer>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderOffer {
    pub provider_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for (text, category) in [
            ("movies", Category::Movies),
            ("tv", Category::Tv),
            ("youtube", Category::Youtube),
            ("shorts", Category::Shorts),
        ] {
            assert_eq!(text.parse::<Category>().unwrap(), category);
            assert_eq!(category.as_str(), text);
        }
    }

    #[test]
    fn test_category_invalid() {
        let err = "podcasts".parse::<Category>().unwrap_err();
        assert!(err.contains("Invalid category"));
    }

    #[test]
    fn test_category_media_kind() {
        assert_eq!(Category::Movies.media_kind(), Some(MediaKind::Movie));
        assert_eq!(Category::Tv.media_kind(), Some(MediaKind::Tv));
        assert_eq!(Category::Youtube.media_kind(), None);
        assert_eq!(Category::Shorts.media_kind(), None);
    }

    #[test]
    fn test_video_search_item_conversion() {
        let json = r#"{
            "id": { "videoId": "dQw4w9WgXcQ" },
            "snippet": {
                "title": "Test Video",
                "description": "A test",
                "thumbnails": { "high": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg" } },
                "channelTitle": "Test Channel",
                "publishedAt": "2024-01-15T12:00:00Z"
            }
        }"#;

        let item: VideoSearchItem = serde_json::from_str(json).unwrap();
        let content = item.into_content_item("youtube").unwrap();
        assert_eq!(content.id, "dQw4w9WgXcQ");
        assert_eq!(content.platform, "youtube");
        assert_eq!(content.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(content.channel, "Test Channel");
        assert_eq!(content.rating, None);
    }

    #[test]
    fn test_video_search_item_without_video_id_dropped() {
        let json = r#"{
            "id": { "channelId": "UC123" },
            "snippet": {
                "title": "A Channel",
                "thumbnails": {},
                "channelTitle": "Someone",
                "publishedAt": "2024-01-15T12:00:00Z"
            }
        }"#;

        let item: VideoSearchItem = serde_json::from_str(json).unwrap();
        assert!(item.into_content_item("youtube").is_none());
    }

    #[test]
    fn test_media_list_item_movie_entry() {
        let item = MediaListItem {
            id: 27205,
            title: Some("Inception".to_string()),
            name: None,
            overview: Some("A thief who steals corporate secrets".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            release_date: Some("2010-07-16".to_string()),
            first_air_date: None,
            popularity: Some(92.5),
        };

        let entry = item.into_catalog_entry(MediaKind::Movie);
        assert_eq!(entry.id, 27205);
        assert_eq!(entry.title, "Inception");
        assert_eq!(entry.release_date, "2010-07-16");
        assert_eq!(entry.poster_url, "https://image.tmdb.org/t/p/w500/poster.jpg");
        assert_eq!(entry.popularity, 92.5);
    }

    #[test]
    fn test_media_list_item_tv_uses_name_and_first_air_date() {
        let item = MediaListItem {
            id: 1396,
            title: None,
            name: Some("Breaking Bad".to_string()),
            overview: None,
            poster_path: None,
            release_date: None,
            first_air_date: Some("2008-01-20".to_string()),
            popularity: None,
        };

        let entry = item.into_catalog_entry(MediaKind::Tv);
        assert_eq!(entry.title, "Breaking Bad");
        assert_eq!(entry.release_date, "2008-01-20");
        assert_eq!(entry.popularity, 0.0);
        assert!(entry.poster_url.contains("placeholder"));
    }

    #[test]
    fn test_details_movie_extraction() {
        let json = r#"{
            "id": 27205,
            "credits": {
                "cast": [
                    {"name": "Leonardo DiCaprio"},
                    {"name": "Joseph Gordon-Levitt"}
                ],
                "crew": [
                    {"name": "Emma Thomas", "job": "Producer"},
                    {"name": "Christopher Nolan", "job": "Director"}
                ]
            },
            "keywords": { "keywords": [{"name": "dream"}, {"name": "heist"}] },
            "genres": [{"name": "Action"}, {"name": "Science Fiction"}],
            "production_companies": [{"name": "Syncopy"}],
            "budget": 160000000,
            "revenue": 825532764,
            "runtime": 148,
            "vote_average": 8.37,
            "release_date": "2010-07-16",
            "belongs_to_collection": null
        }"#;

        let response: MediaDetailsResponse = serde_json::from_str(json).unwrap();
        let details = response.into_source_details(MediaKind::Movie);

        assert_eq!(details.director.as_deref(), Some("Christopher Nolan"));
        assert_eq!(details.cast.len(), 2);
        assert_eq!(details.keywords, vec!["dream", "heist"]);
        assert_eq!(details.runtime_minutes, 148);
        assert_eq!(details.release_year, Some(2010));
        assert_eq!(details.collection, None);
        assert_eq!(details.budget, 160000000);
    }

    #[test]
    fn test_details_tv_extraction() {
        let json = r#"{
            "id": 1396,
            "credits": { "cast": [{"name": "Bryan Cranston"}], "crew": [{"name": "Vince Gilligan", "job": "Director"}] },
            "keywords": { "results": [{"name": "drug cartel"}] },
            "genres": [{"name": "Drama"}],
            "production_companies": [],
            "episode_run_time": [45, 47],
            "vote_average": 8.9,
            "first_air_date": "2008-01-20"
        }"#;

        let response: MediaDetailsResponse = serde_json::from_str(json).unwrap();
        let details = response.into_source_details(MediaKind::Tv);

        // Director only applies to movies
        assert_eq!(details.director, None);
        assert_eq!(details.keywords, vec!["drug cartel"]);
        assert_eq!(details.runtime_minutes, 45);
        assert_eq!(details.release_year, Some(2008));
        assert_eq!(details.budget, 0);
        assert_eq!(details.collection, None);
    }

    #[test]
    fn test_details_non_ascii_release_date_yields_no_year() {
        // Fullwidth digits: the first four bytes end inside a character
        let json = r#"{"id": 27205, "release_date": "２０10-07-16"}"#;
        let response: MediaDetailsResponse = serde_json::from_str(json).unwrap();
        let details = response.into_source_details(MediaKind::Movie);
        assert_eq!(details.release_year, None);
    }

    #[test]
    fn test_details_short_release_date_yields_no_year() {
        let json = r#"{"id": 27205, "release_date": "20", "first_air_date": "2011-05-01"}"#;
        let response: MediaDetailsResponse = serde_json::from_str(json).unwrap();
        let details = response.into_source_details(MediaKind::Movie);
        // An unusable release date falls through to the air date
        assert_eq!(details.release_year, Some(2011));
    }

    #[test]
    fn test_build_poster_url() {
        assert_eq!(
            build_poster_url(Some("/abc.jpg")),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert!(build_poster_url(None).contains("placeholder"));
        assert!(build_poster_url(Some("")).contains("placeholder"));
    }

    #[test]
    fn test_content_item_optional_fields_not_serialized() {
        let item = ContentItem {
            id: "abc".to_string(),
            title: "Video".to_string(),
            description: String::new(),
            thumbnail: String::new(),
            channel: "Channel".to_string(),
            published_at: "2024-01-15T12:00:00Z".to_string(),
            platform: "youtube".to_string(),
            url: "https://www.youtube.com/watch?v=abc".to_string(),
            all_platforms: None,
            rating: None,
            year: None,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("rating").is_none());
        assert!(json.get("all_platforms").is_none());
        assert!(json.get("year").is_none());
    }
}
