pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod taxonomy;
pub mod scoring;
pub mod analysis;
pub mod storage;

pub use config::{AnalyzerConfig, Config};
pub use error::{Error, Result};
pub use github::{GitHubClient, ProfileProvider};
pub use analysis::{merge_with_existing, TierAnalyzer};
pub use scoring::{calculate_github_score, calculate_github_score_at, estimate_active_days};
pub use storage::{AnalysisStore, SqliteStore};
