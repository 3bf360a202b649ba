use crate::models::{AiScores, DerivedMetrics};

pub struct ScoreEngine {
    weights: OverallWeights,
}

/// Share of each sub-score in the overall score.
#[derive(Debug, Clone)]
pub struct OverallWeights {
    pub code_quality: f64,
    pub activity_level: f64,
    pub community_impact: f64,
    pub project_diversity: f64,
}

impl Default for OverallWeights {
    fn default() -> Self {
        Self {
            code_quality: 0.35,
            activity_level: 0.30,
            community_impact: 0.25,
            project_diversity: 0.10,
        }
    }
}

/// `value` as a percentage of `target`, saturating at 100.
fn progress(value: f64, target: f64) -> f64 {
    (value / target * 100.0).min(100.0)
}

/// `part` as a percentage of `whole`, with `whole` floored at 1.
fn share(part: u32, whole: u32) -> f64 {
    part as f64 / whole.max(1) as f64 * 100.0
}

fn to_score(weighted: f64) -> u8 {
    weighted.round().clamp(0.0, 100.0) as u8
}

impl ScoreEngine {
    pub fn new() -> Self {
        Self {
            weights: OverallWeights::default(),
        }
    }

    pub fn with_weights(weights: OverallWeights) -> Self {
        Self { weights }
    }

    pub fn calculate(&self, metrics: &DerivedMetrics) -> AiScores {
        let code_quality = self.code_quality(metrics);
        let activity_level = self.activity_level(metrics);
        let community_impact = self.community_impact(metrics);
        let project_diversity = self.project_diversity(metrics);

        let overall_score = to_score(
            code_quality as f64 * self.weights.code_quality
                + activity_level as f64 * self.weights.activity_level
                + community_impact as f64 * self.weights.community_impact
                + project_diversity as f64 * self.weights.project_diversity,
        );

        AiScores {
            code_quality,
            activity_level,
            community_impact,
            project_diversity,
            overall_score,
            confidence: self.confidence(metrics),
        }
    }

    fn code_quality(&self, m: &DerivedMetrics) -> u8 {
        to_score(
            progress(m.avg_stars_per_repo, 50.0) * 0.30
                + progress(m.avg_forks_per_repo, 10.0) * 0.20
                + share(m.repos_with_description, m.total_repos) * 0.25
                + share(m.repos_with_topics, m.total_repos) * 0.25,
        )
    }

    fn activity_level(&self, m: &DerivedMetrics) -> u8 {
        to_score(
            progress(m.recent_activity_count as f64, 50.0) * 0.40
                + progress(m.repos_per_year, 5.0) * 0.30
                + progress(m.own_repos as f64, 20.0) * 0.30,
        )
    }

    fn community_impact(&self, m: &DerivedMetrics) -> u8 {
        to_score(
            progress(m.followers as f64, 500.0) * 0.40
                + progress(m.total_stars as f64, 1000.0) * 0.35
                + progress(m.total_forks as f64, 200.0) * 0.25,
        )
    }

    fn project_diversity(&self, m: &DerivedMetrics) -> u8 {
        to_score(
            progress(m.languages as f64, 5.0) * 0.50
                + progress(m.own_repos as f64, 15.0) * 0.30
                + progress(m.public_gists as f64, 10.0) * 0.20,
        )
    }

    /// Fraction of the expected data signals that are present.
    fn confidence(&self, m: &DerivedMetrics) -> u8 {
        let present = [
            m.total_repos > 0,
            m.recent_activity_count > 0,
            m.followers > 0,
            m.account_age_in_days > 30,
        ]
        .iter()
        .filter(|p| **p)
        .count();

        to_score(present as f64 / 4.0 * 100.0)
    }
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new()
    }
}
