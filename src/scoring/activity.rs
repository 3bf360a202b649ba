use chrono::{DateTime, Duration, Months, Utc};
use std::collections::HashSet;

use crate::models::{GitHubUser, ProfileStats, PublicEvent};

/// The public events feed only reaches back about 90 days, so each active
/// day seen there stands in for four over the year.
const DAYS_PER_OBSERVED_DAY: u32 = 4;
const DAYS_PER_YEAR: u32 = 365;

/// Rough count of days with public activity over the last twelve months.
pub fn estimate_active_days(events: &[PublicEvent], now: DateTime<Utc>) -> u32 {
    let one_year_ago = now
        .checked_sub_months(Months::new(12))
        .unwrap_or_else(|| now - Duration::days(365));

    let active_days: HashSet<_> = events
        .iter()
        .filter(|e| e.created_at > one_year_ago)
        .map(|e| e.created_at.date_naive())
        .collect();

    (active_days.len() as u32)
        .saturating_mul(DAYS_PER_OBSERVED_DAY)
        .min(DAYS_PER_YEAR)
}

impl ProfileStats {
    pub fn from_github(user: &GitHubUser, events: &[PublicEvent], now: DateTime<Utc>) -> Self {
        Self {
            repo_count: user.public_repos,
            follower_count: user.followers,
            account_created_at: user.created_at,
            annual_active_days: estimate_active_days(events, now),
        }
    }
}
