/// Similarity scorer
///
/// Pure additive score between a source item and a candidate. Each factor is
/// capped at a declared maximum so no single factor dominates; the theoretical
/// maximum is 180 points.
use std::collections::HashSet;

use crate::models::SourceDetails;

pub const FRANCHISE_POINTS: f64 = 50.0;
pub const DIRECTOR_POINTS: f64 = 30.0;
pub const CAST_POINTS_EACH: f64 = 5.0;
pub const CAST_POINTS_MAX: f64 = 25.0;
pub const GENRE_POINTS_EACH: f64 = 10.0;
pub const GENRE_POINTS_MAX: f64 = 20.0;
pub const KEYWORD_POINTS_EACH: f64 = 2.0;
pub const KEYWORD_POINTS_MAX: f64 = 15.0;
pub const COMPANY_POINTS_EACH: f64 = 7.5;
pub const COMPANY_POINTS_MAX: f64 = 15.0;
pub const BUDGET_TIER_POINTS: f64 = 10.0;
pub const RUNTIME_POINTS: f64 = 5.0;
pub const RATING_POINTS: f64 = 5.0;
pub const YEAR_POINTS: f64 = 5.0;

const BUDGET_TIER_RATIO: f64 = 0.5;
const RUNTIME_WINDOW_MINUTES: u32 = 30;
const RATING_WINDOW: f64 = 1.5;
const YEAR_WINDOW: i32 = 5;

fn overlap(a: &[String], b: &[String]) -> usize {
    let left: HashSet<&str> = a.iter().map(String::as_str).collect();
    b.iter().filter(|name| left.contains(name.as_str())).count()
}

/// Computes the similarity score between a source item and a candidate.
pub fn similarity_score(source: &SourceDetails, candidate: &SourceDetails) -> f64 {
    let mut score = 0.0;

    // Shared franchise/collection
    if let (Some(a), Some(b)) = (&source.collection, &candidate.collection) {
        if a == b {
            score += FRANCHISE_POINTS;
        }
    }

    // Shared director
    if let (Some(a), Some(b)) = (&source.director, &candidate.director) {
        if a == b {
            score += DIRECTOR_POINTS;
        }
    }

    score += (overlap(&source.cast, &candidate.cast) as f64 * CAST_POINTS_EACH)
        .min(CAST_POINTS_MAX);
    score += (overlap(&source.genres, &candidate.genres) as f64 * GENRE_POINTS_EACH)
        .min(GENRE_POINTS_MAX);
    score += (overlap(&source.keywords, &candidate.keywords) as f64 * KEYWORD_POINTS_EACH)
        .min(KEYWORD_POINTS_MAX);
    score += (overlap(&source.companies, &candidate.companies) as f64 * COMPANY_POINTS_EACH)
        .min(COMPANY_POINTS_MAX);

    // Budget-tier proximity: min/max ratio above the tier threshold
    if source.budget > 0 && candidate.budget > 0 {
        let ratio = source.budget.min(candidate.budget) as f64
            / source.budget.max(candidate.budget) as f64;
        if ratio > BUDGET_TIER_RATIO {
            score += BUDGET_TIER_POINTS;
        }
    }

    if source.runtime_minutes > 0 && candidate.runtime_minutes > 0 {
        let diff = source.runtime_minutes.abs_diff(candidate.runtime_minutes);
        if diff < RUNTIME_WINDOW_MINUTES {
            score += RUNTIME_POINTS;
        }
    }

    if source.rating > 0.0 && candidate.rating > 0.0 {
        if (source.rating - candidate.rating).abs() < RATING_WINDOW {
            score += RATING_POINTS;
        }
    }

    if let (Some(a), Some(b)) = (source.release_year, candidate.release_year) {
        if (a - b).abs() <= YEAR_WINDOW {
            score += YEAR_POINTS;
        }
    }

    score
}
