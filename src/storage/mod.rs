pub mod sqlite;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::TierAnalysis;

pub use sqlite::SqliteStore;

#[derive(Debug, Clone, PartialEq)]
pub struct CachedAnalysis {
    pub analysis: TierAnalysis,
    pub saved_at: DateTime<Utc>,
}

/// Remembers a user's last analysis between runs. Lookups are
/// case-insensitive on the username.
pub trait AnalysisStore {
    fn load(&self, username: &str) -> Result<Option<CachedAnalysis>>;
    fn save(&self, analysis: &TierAnalysis) -> Result<()>;
    /// Returns whether anything was removed.
    fn remove(&self, username: &str) -> Result<bool>;
}
