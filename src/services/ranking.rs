/// Ranking/diversity pass for simple-category results
///
/// Structured-media results are already ordered by similarity score and skip
/// this pass entirely.
use chrono::{DateTime, Utc};
use rand::Rng;

const RECENCY_WEIGHT: f64 = 0.7;
const DIVERSITY_WEIGHT: f64 = 0.3;
const RECENCY_DECAY_DAYS: f64 = 365.0;

/// Recency score in [0, 1]: full for content published now, decaying to zero
/// over a year. Unparseable timestamps score zero.
fn recency_score(published_at: &str, now: DateTime<Utc>) -> f64 {
    DateTime::parse_from_rfc3339(published_at)
        .map(|published| {
            let days = (now - published.with_timezone(&Utc)).num_days() as f64;
            (1.0 - days / RECENCY_DECAY_DAYS).max(0.0)
        })
        .unwrap_or(0.0)
}

/// Stable-sorts items by recency plus bounded randomness, descending.
/// The per-item score is internal and never leaks into the output.
pub fn rank_by_recency(items: Vec<crate::models::ContentItem>) -> Vec<crate::models::ContentItem> {
    if items.is_empty() {
        return items;
    }

    let now = Utc::now();
    let mut rng = rand::thread_rng();

    let mut scored: Vec<(f64, crate::models::ContentItem)> = items
        .into_iter()
        .map(|item| {
            let score = recency_score(&item.published_at, now) * RECENCY_WEIGHT
                + rng.gen::<f64>() * DIVERSITY_WEIGHT;
            (score, item)
        })
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(_, item)| item).collect()
}
