pub mod availability;
pub mod catalogs;
pub mod fallback;
pub mod ranking;
pub mod recommendation;
pub mod scoring;

pub use recommendation::RecommendationService;
