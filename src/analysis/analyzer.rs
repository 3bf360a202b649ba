use chrono::{DateTime, Utc};

use crate::analysis::languages::{analyze_languages, detect_developer_type};
use crate::analysis::metrics::own_repos;
use crate::analysis::narrative::{self, NarrativeInput};
use crate::analysis::quality::{analyze_project_quality, identify_expertise};
use crate::analysis::scores::ScoreEngine;
use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::github::ProfileProvider;
use crate::models::{
    DerivedMetrics, DetailedAnalysis, EnhancedAnalysis, ExistingProfile, GitHubUser, PublicEvent,
    Repository, Tier, TierAnalysis, TierSource,
};

/// Heuristic profile analyzer. Holds no per-analysis state, so one instance
/// can serve concurrent calls.
pub struct TierAnalyzer<P> {
    provider: P,
    score_engine: ScoreEngine,
    config: AnalyzerConfig,
}

impl<P: ProfileProvider> TierAnalyzer<P> {
    pub fn new(provider: P, config: AnalyzerConfig) -> Self {
        Self {
            provider,
            score_engine: ScoreEngine::new(),
            config,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn analyze_profile(&self, username: &str) -> Result<TierAnalysis> {
        self.analyze_profile_at(username, Utc::now()).await
    }

    /// Fetches user, repositories and events concurrently. A failed user or
    /// repository fetch aborts the analysis; a failed event fetch is
    /// treated as no recent activity.
    pub async fn analyze_profile_at(&self, username: &str, now: DateTime<Utc>) -> Result<TierAnalysis> {
        tracing::info!("Analyzing GitHub profile: {}", username);

        let (user, repos, events) = futures::join!(
            self.provider.fetch_user(username),
            self.provider.fetch_repos(username),
            self.provider.fetch_events(username),
        );

        let user = user.map_err(|e| {
            tracing::error!("Could not fetch user {}: {}", username, e);
            Error::analysis_failed(username, e)
        })?;
        let repos = repos.map_err(|e| {
            tracing::error!("Could not fetch repositories for {}: {}", username, e);
            Error::analysis_failed(username, e)
        })?;
        let events = events.unwrap_or_else(|e| {
            tracing::warn!("Could not fetch events for {}: {}", username, e);
            Vec::new()
        });

        tracing::debug!(
            "Fetched {} repositories and {} events for {}",
            repos.len(),
            events.len(),
            username
        );

        let analysis = self.analyze_data(&user, &repos, &events, now);
        tracing::info!(
            "{} classified as {} (score {}, confidence {}%)",
            username,
            analysis.tier,
            analysis.overall_score,
            analysis.confidence
        );
        Ok(analysis)
    }

    /// Runs the analysis and merges it with a previously computed tier.
    pub async fn enhanced_analysis(
        &self,
        username: &str,
        existing: &ExistingProfile,
    ) -> Result<EnhancedAnalysis> {
        let analysis = self.analyze_profile(username).await?;
        Ok(merge_with_existing(analysis, existing))
    }
}

impl<P> TierAnalyzer<P> {
    /// Scores already-fetched provider data.
    pub fn analyze_data(
        &self,
        user: &GitHubUser,
        repos: &[Repository],
        events: &[PublicEvent],
        now: DateTime<Utc>,
    ) -> TierAnalysis {
        let own = own_repos(repos);
        let metrics = DerivedMetrics::derive(user, repos, events, now, self.config.recent_window_days);
        let scores = self.score_engine.calculate(&metrics);
        let tier = Tier::from_overall_score(scores.overall_score);

        let languages = analyze_languages(&own);
        let developer_type = detect_developer_type(&languages);
        let project_quality = analyze_project_quality(&own);
        let expertise = identify_expertise(&languages, &own);

        let input = NarrativeInput {
            metrics: &metrics,
            scores: &scores,
            languages: &languages,
            project_quality: &project_quality,
            developer_type: &developer_type,
            tier,
        };
        let reasoning = narrative::generate_reasoning(&input);
        let strengths = narrative::identify_strengths(&input);
        let improvements = narrative::suggest_improvements(&input);

        TierAnalysis {
            username: user.login.clone(),
            tier,
            overall_score: scores.overall_score,
            confidence: scores.confidence,
            reasoning,
            strengths,
            improvements,
            detailed_analysis: DetailedAnalysis::from(&scores),
            languages,
            developer_type: developer_type.name,
            developer_type_emoji: developer_type.emoji,
            project_quality,
            expertise,
            metrics,
            analyzed_at: now,
        }
    }
}

/// Recommends the higher of the two tiers; an equal rank keeps the
/// existing one.
pub fn merge_with_existing(analysis: TierAnalysis, existing: &ExistingProfile) -> EnhancedAnalysis {
    let (recommended_tier, tier_source) = if analysis.tier > existing.tier {
        (analysis.tier, TierSource::Ai)
    } else {
        (existing.tier, TierSource::Existing)
    };

    EnhancedAnalysis {
        analysis,
        ipa_score: existing.ipa_score,
        recommended_tier,
        tier_source,
    }
}
