use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use crate::models::{DerivedMetrics, GitHubUser, PublicEvent, Repository};

/// Repositories that are not forks of someone else's work.
pub fn own_repos(repos: &[Repository]) -> Vec<&Repository> {
    repos.iter().filter(|r| !r.fork).collect()
}

/// Start of the recent-activity window. A negative window is empty; one
/// reaching past chrono's date range has no start at all.
fn recent_cutoff(now: DateTime<Utc>, window_days: i64) -> Option<DateTime<Utc>> {
    Duration::try_days(window_days.max(0)).and_then(|window| now.checked_sub_signed(window))
}

impl DerivedMetrics {
    /// Aggregates over own repositories; forks only show up in
    /// `fetched_repos`. Events count as recent when strictly newer than
    /// `now - recent_window_days`.
    pub fn derive(
        user: &GitHubUser,
        repos: &[Repository],
        events: &[PublicEvent],
        now: DateTime<Utc>,
        recent_window_days: i64,
    ) -> Self {
        let own = own_repos(repos);
        let own_count = own.len() as u32;

        let total_stars: u32 = own.iter().map(|r| r.stargazers_count).sum();
        let total_forks: u32 = own.iter().map(|r| r.forks_count).sum();
        let languages: HashSet<&str> = own.iter().filter_map(|r| r.language()).collect();

        let recent_activity_count = match recent_cutoff(now, recent_window_days) {
            Some(cutoff) => events.iter().filter(|e| e.created_at > cutoff).count(),
            None => events.len(),
        } as u32;

        let account_age_in_days = (now - user.created_at).num_days();
        let repos_per_year = if account_age_in_days > 0 {
            own_count as f64 / account_age_in_days as f64 * 365.0
        } else {
            0.0
        };

        let (avg_stars_per_repo, avg_forks_per_repo) = if own_count > 0 {
            (
                total_stars as f64 / own_count as f64,
                total_forks as f64 / own_count as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            fetched_repos: repos.len() as u32,
            total_repos: own_count,
            own_repos: own_count,
            total_stars,
            total_forks,
            languages: languages.len() as u32,
            recent_activity_count,
            repos_with_description: own.iter().filter(|r| r.has_description()).count() as u32,
            repos_with_topics: own.iter().filter(|r| r.has_topics()).count() as u32,
            avg_stars_per_repo,
            avg_forks_per_repo,
            account_age_in_days,
            repos_per_year,
            followers: user.followers,
            following: user.following,
            public_gists: user.public_gists,
        }
    }
}
