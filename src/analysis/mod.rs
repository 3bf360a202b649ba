pub mod analyzer;
pub mod languages;
pub mod metrics;
pub mod narrative;
pub mod quality;
pub mod scores;

pub use analyzer::{merge_with_existing, TierAnalyzer};
pub use scores::ScoreEngine;
