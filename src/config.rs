use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// YouTube Data API key (general video-search catalog)
    pub youtube_api_key: String,

    /// TMDB API key (structured media-metadata catalog)
    pub tmdb_api_key: String,

    /// SQLite database URL for the interaction log
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_youtube_api_url")]
    pub youtube_api_url: String,

    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Per-call timeout for upstream catalog requests, in seconds
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,

    /// Result cache time-to-live, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Result cache capacity (entries beyond this are evicted)
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: u64,

    /// Maximum results requested from the search catalog per query
    #[serde(default = "default_max_results_per_query")]
    pub max_results_per_query: u32,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_database_url() -> String {
    "sqlite://reelcast.db".to_string()
}

fn default_youtube_api_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_api_timeout_secs() -> u64 {
    10
}

fn default_cache_ttl_secs() -> u64 {
    180
}

fn default_cache_max_entries() -> u64 {
    1000
}

fn default_max_results_per_query() -> u32 {
    50
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
