/// Interaction log backed by SQLite
///
/// Search/click interactions are append-only analytics data; losing a write
/// must never fail a user request, so callers decide how to handle errors.
use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use crate::error::{AppError, AppResult};

/// Creates a SQLite connection pool, creating the database file if absent.
pub async fn create_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// One logged interaction: a search and, optionally, the result clicked.
#[derive(Debug, Deserialize)]
pub struct NewInteraction {
    pub query: String,
    pub category: String,
    #[serde(default)]
    pub region: Option<String>,
    /// Ids of the results shown to the user, in display order
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Id of the result the user clicked, if any
    #[serde(default)]
    pub clicked_id: Option<String>,
    /// Zero-based position of the clicked result in the shown list
    #[serde(default)]
    pub clicked_position: Option<i64>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Aggregate interaction stats
#[derive(Debug, Serialize)]
pub struct StatsSummary {
    pub total_interactions: i64,
    pub total_clicks: i64,
    /// Percentage, rounded to two decimals
    pub click_through_rate: f64,
    /// Interaction counts keyed by category tag
    pub category_breakdown: HashMap<String, i64>,
}

#[derive(Clone)]
pub struct InteractionStore {
    pool: SqlitePool,
}

impl InteractionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the interactions table if it does not exist.
    pub async fn init(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS interactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                query TEXT NOT NULL,
                category TEXT NOT NULL,
                region TEXT,
                recommendations TEXT NOT NULL,
                clicked_id TEXT,
                clicked_position INTEGER,
                session_id TEXT,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Appends one interaction. The shown-result ids are stored as JSON text.
    pub async fn log_interaction(&self, interaction: &NewInteraction) -> AppResult<()> {
        let recommendations = serde_json::to_string(&interaction.recommendations)
            .map_err(|e| AppError::Internal(format!("Failed to encode recommendations: {}", e)))?;

        sqlx::query(
            "INSERT INTO interactions \
             (query, category, region, recommendations, clicked_id, clicked_position, session_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&interaction.query)
        .bind(&interaction.category)
        .bind(&interaction.region)
        .bind(&recommendations)
        .bind(&interaction.clicked_id)
        .bind(interaction.clicked_position)
        .bind(&interaction.session_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Totals and click-through rate across all logged interactions.
    pub async fn stats(&self) -> AppResult<StatsSummary> {
        let total_interactions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM interactions")
            .fetch_one(&self.pool)
            .await?;

        let total_clicks: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM interactions WHERE clicked_id IS NOT NULL")
                .fetch_one(&self.pool)
                .await?;

        let click_through_rate = if total_interactions > 0 {
            let rate = total_clicks as f64 / total_interactions as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        } else {
            0.0
        };

        let rows =
            sqlx::query("SELECT category, COUNT(*) AS count FROM interactions GROUP BY category")
                .fetch_all(&self.pool)
                .await?;
        let category_breakdown = rows
            .into_iter()
            .map(|row| (row.get("category"), row.get("count")))
            .collect();

        Ok(StatsSummary {
            total_interactions,
            total_clicks,
            click_through_rate,
            category_breakdown,
        })
    }
}
