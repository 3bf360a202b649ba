use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Upper bound for `RECENT_ACTIVITY_DAYS`, ten years.
pub const MAX_RECENT_WINDOW_DAYS: i64 = 3650;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_base_url: String,
    pub database_path: String,
    pub recent_window_days: i64,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.trim().is_empty());

        let api_base_url = env::var("GITHUB_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let database_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "devtier.db".to_string());

        let recent_window_days = match env::var("RECENT_ACTIVITY_DAYS") {
            Ok(v) => parse_recent_window(&v)?,
            Err(_) => 90,
        };

        let http_timeout_secs = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(v) => parse_timeout(&v)?,
            Err(_) => 30,
        };

        Ok(Self {
            github_token,
            api_base_url,
            database_path,
            recent_window_days,
            http_timeout_secs,
        })
    }
}

fn parse_recent_window(value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|d| (1..=MAX_RECENT_WINDOW_DAYS).contains(d))
        .ok_or_else(|| {
            Error::Config(format!(
                "RECENT_ACTIVITY_DAYS must be between 1 and {}, got {:?}",
                MAX_RECENT_WINDOW_DAYS, value
            ))
        })
}

fn parse_timeout(value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| {
            Error::Config(format!(
                "HTTP_TIMEOUT_SECS must be a positive integer, got {:?}",
                value
            ))
        })
}

/// Knobs for the heuristic analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Trailing window, in days, for counting recent public events.
    pub recent_window_days: i64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            recent_window_days: 90,
        }
    }
}

impl From<&Config> for AnalyzerConfig {
    fn from(config: &Config) -> Self {
        Self {
            recent_window_days: config.recent_window_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_window_bounds() {
        assert_eq!(parse_recent_window("90").unwrap(), 90);
        assert_eq!(parse_recent_window(" 3650 ").unwrap(), 3650);
        assert!(parse_recent_window("0").is_err());
        assert!(parse_recent_window("-7").is_err());
        assert!(parse_recent_window("3651").is_err());
        assert!(parse_recent_window("1000000000").is_err());
        assert!(parse_recent_window("quarter").is_err());
    }

    #[test]
    fn test_timeout_rejects_invalid_values() {
        assert_eq!(parse_timeout("45").unwrap(), 45);
        assert!(matches!(parse_timeout("0"), Err(Error::Config(_))));
        assert!(matches!(parse_timeout("soon"), Err(Error::Config(_))));
        assert!(parse_timeout("-5").is_err());
    }
}
