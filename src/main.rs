use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reelcast_api::{
    cache::RecommendationCache,
    config::Config,
    db::{self, InteractionStore},
    routes::{create_router, AppState},
    services::{
        catalogs::{TmdbCatalog, YouTubeCatalog},
        RecommendationService,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "reelcast_api=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let timeout = Duration::from_secs(config.api_timeout_secs);

    let pool = db::create_pool(&config.database_url).await?;
    let interactions = InteractionStore::new(pool);
    interactions.init().await?;

    let search_catalog = YouTubeCatalog::new(
        config.youtube_api_key.clone(),
        config.youtube_api_url.clone(),
        timeout,
    )?;
    let media_catalog = TmdbCatalog::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        timeout,
    )?;

    let cache = RecommendationCache::new(
        Duration::from_secs(config.cache_ttl_secs),
        config.cache_max_entries,
    );

    let recommendations = Arc::new(RecommendationService::new(
        Arc::new(search_catalog),
        Arc::new(media_catalog),
        cache,
        config.max_results_per_query,
    ));

    let app = create_router(AppState {
        recommendations,
        interactions,
    });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
