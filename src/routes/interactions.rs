use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    db::{NewInteraction, StatsSummary},
    error::AppResult,
    routes::AppState,
};

/// Handler for logging one interaction.
///
/// Analytics writes are best-effort: a failed insert is logged server-side
/// and reported as `success: false`, never as an error status.
pub async fn log(
    State(state): State<AppState>,
    Json(interaction): Json<NewInteraction>,
) -> Json<Value> {
    match state.interactions.log_interaction(&interaction).await {
        Ok(()) => Json(json!({ "success": true })),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to log interaction");
            Json(json!({ "success": false }))
        }
    }
}

/// Handler for the aggregate stats endpoint
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<StatsSummary>> {
    let summary = state.interactions.stats().await?;
    Ok(Json(summary))
}
