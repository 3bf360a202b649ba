//! Point-based developer badge. Every factor is a step function of one
//! statistic; the highest qualifying band wins.

use chrono::{DateTime, Utc};

use crate::models::{ProfileStats, ScoreBreakdown, Tier};

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// `(minimum, points)` pairs, highest band first.
const REPO_BANDS: [(u32, u32); 4] = [(90, 50), (60, 30), (30, 20), (10, 10)];
const FOLLOWER_BANDS: [(u32, u32); 3] = [(1000, 80), (200, 50), (100, 20)];
const AGE_BANDS: [(f64, u32); 3] = [(8.0, 60), (4.0, 40), (2.0, 20)];
const ACTIVITY_BANDS: [(u32, u32); 3] = [(250, 60), (200, 50), (50, 40)];

/// Accounts with little recorded activity still get a base score.
const ACTIVITY_FLOOR: u32 = 30;

fn band_points<T: PartialOrd + Copy>(value: T, bands: &[(T, u32)], floor: u32) -> u32 {
    bands
        .iter()
        .find(|(min, _)| value >= *min)
        .map(|(_, points)| *points)
        .unwrap_or(floor)
}

pub fn repo_score(repo_count: u32) -> u32 {
    band_points(repo_count, &REPO_BANDS, 0)
}

pub fn follower_score(follower_count: u32) -> u32 {
    band_points(follower_count, &FOLLOWER_BANDS, 0)
}

pub fn age_score(years: f64) -> u32 {
    band_points(years, &AGE_BANDS, 0)
}

pub fn activity_score(annual_active_days: u32) -> u32 {
    band_points(annual_active_days, &ACTIVITY_BANDS, ACTIVITY_FLOOR)
}

/// Account age in 365-day years. Creation times in the future count as zero.
pub fn account_age_years(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    ((now - created_at).num_seconds() as f64 / SECONDS_PER_YEAR).max(0.0)
}

pub fn calculate_github_score(stats: &ProfileStats) -> ScoreBreakdown {
    calculate_github_score_at(stats, Utc::now())
}

pub fn calculate_github_score_at(stats: &ProfileStats, now: DateTime<Utc>) -> ScoreBreakdown {
    let repo_score = repo_score(stats.repo_count);
    let follower_score = follower_score(stats.follower_count);
    let age_score = age_score(account_age_years(stats.account_created_at, now));
    let activity_score = activity_score(stats.annual_active_days);

    let total_score = repo_score + follower_score + age_score + activity_score;

    ScoreBreakdown {
        repo_score,
        follower_score,
        age_score,
        activity_score,
        total_score,
        tier: Tier::from_badge_points(total_score),
    }
}
