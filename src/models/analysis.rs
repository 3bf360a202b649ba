use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::ScoreBreakdown;
use super::tier::Tier;

/// Aggregates derived once per analysis from the fetched provider data.
/// Counts refer to own (non-fork) repositories unless named otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    /// Everything the provider returned, forks included.
    pub fetched_repos: u32,
    pub total_repos: u32,
    pub own_repos: u32,
    pub total_stars: u32,
    pub total_forks: u32,
    pub languages: u32,
    pub recent_activity_count: u32,
    pub repos_with_description: u32,
    pub repos_with_topics: u32,
    pub avg_stars_per_repo: f64,
    pub avg_forks_per_repo: f64,
    pub account_age_in_days: i64,
    pub repos_per_year: f64,
    pub followers: u32,
    pub following: u32,
    pub public_gists: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiScores {
    pub code_quality: u8,
    pub activity_level: u8,
    pub community_impact: u8,
    pub project_diversity: u8,
    pub overall_score: u8,
    pub confidence: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnalysis {
    pub code_quality: u8,
    pub activity_level: u8,
    pub community_impact: u8,
    pub project_diversity: u8,
}

impl From<&AiScores> for DetailedAnalysis {
    fn from(scores: &AiScores) -> Self {
        Self {
            code_quality: scores.code_quality,
            activity_level: scores.activity_level,
            community_impact: scores.community_impact,
            project_diversity: scores.project_diversity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageBreakdown {
    pub name: String,
    pub percentage: u32,
    pub repo_count: u32,
    pub stars: u32,
}

/// Documentation and popularity signals over own repositories. The `has_*`
/// fields are rounded percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuality {
    pub has_readme: u32,
    pub has_description: u32,
    pub has_topics: u32,
    pub has_license: u32,
    pub avg_stars: f64,
    pub quality_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperType {
    pub name: String,
    pub emoji: String,
}

impl DeveloperType {
    pub fn new(name: &str, emoji: &str) -> Self {
        Self {
            name: name.to_string(),
            emoji: emoji.to_string(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierAnalysis {
    pub username: String,
    pub tier: Tier,
    pub overall_score: u8,
    pub confidence: u8,
    pub reasoning: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub detailed_analysis: DetailedAnalysis,
    pub languages: Vec<LanguageBreakdown>,
    pub developer_type: String,
    pub developer_type_emoji: String,
    pub project_quality: ProjectQuality,
    pub expertise: Vec<String>,
    pub metrics: DerivedMetrics,
    pub analyzed_at: DateTime<Utc>,
}

/// A tier computed earlier by some other means, typically the badge
/// calculator during sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingProfile {
    pub username: String,
    pub tier: Tier,
    pub ipa_score: u32,
}

impl ExistingProfile {
    pub fn from_breakdown(username: &str, breakdown: &ScoreBreakdown) -> Self {
        Self {
            username: username.to_string(),
            tier: breakdown.tier,
            ipa_score: breakdown.total_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierSource {
    Ai,
    Existing,
}

impl std::fmt::Display for TierSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TierSource::Ai => write!(f, "AI analysis"),
            TierSource::Existing => write!(f, "existing badge"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedAnalysis {
    #[serde(flatten)]
    pub analysis: TierAnalysis,
    pub ipa_score: u32,
    pub recommended_tier: Tier,
    pub tier_source: TierSource,
}
