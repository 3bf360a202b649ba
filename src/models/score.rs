use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tier::Tier;

/// Raw statistics fed to the badge calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub repo_count: u32,
    pub follower_count: u32,
    pub account_created_at: DateTime<Utc>,
    pub annual_active_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub repo_score: u32,
    pub follower_score: u32,
    pub age_score: u32,
    pub activity_score: u32,
    pub total_score: u32,
    pub tier: Tier,
}
