use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Category, ContentItem},
    routes::AppState,
};

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 50;
const MAX_QUERY_CHARS: usize = 200;
const DEFAULT_REGION: &str = "US";

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub category: String,
    /// Accepted as either `query` or the legacy `searchQuery` field name
    #[serde(alias = "searchQuery")]
    pub query: String,
    pub region: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub count: usize,
    pub results: Vec<ContentItem>,
    /// The trimmed query the results were generated for
    pub search_query: String,
}

/// Handler for the recommendations endpoint.
///
/// Validation failures are the only client-visible errors; once input is
/// accepted, degraded upstreams produce fallback content, never a 5xx.
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let category: Category = request.category.parse().map_err(AppError::InvalidInput)?;

    let query = request.query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Query must not be empty".to_string(),
        ));
    }
    if query.chars().count() > MAX_QUERY_CHARS {
        return Err(AppError::InvalidInput(format!(
            "Query must be at most {} characters",
            MAX_QUERY_CHARS
        )));
    }

    let limit = request.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 || limit > MAX_LIMIT {
        return Err(AppError::InvalidInput(format!(
            "Limit must be between 1 and {}",
            MAX_LIMIT
        )));
    }

    let region = request.region.as_deref().unwrap_or(DEFAULT_REGION);

    let results = state
        .recommendations
        .get_recommendations(category, query, region, limit)
        .await;

    Ok(Json(RecommendationResponse {
        success: true,
        count: results.len(),
        results,
        search_query: query.to_string(),
    }))
}
