use async_trait::async_trait;
use reqwest::header::{self, HeaderMap};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::{Config, DEFAULT_API_URL};
use crate::error::{Error, Result};
use crate::github::provider::ProfileProvider;
use crate::github::rate_limiter::{Quota, RateLimiter};
use crate::models::{GitHubUser, PublicEvent, Repository};

const PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_URL, Duration::from_secs(30))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(
            config.github_token.as_deref(),
            &config.api_base_url,
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    pub fn with_base_url(token: Option<&str>, base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("devtier/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        tracing::info!("Fetching user: {}", username);
        let url = format!("{}/users/{}", self.base_url, username);
        self.fetch(&url, &format!("user {}", username), Some(username)).await
    }

    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        tracing::info!("Fetching repositories for: {}", username);
        let url = format!(
            "{}/users/{}/repos?per_page={}&sort=updated&direction=desc",
            self.base_url, username, PER_PAGE
        );
        self.fetch(&url, &format!("repositories of {}", username), None).await
    }

    pub async fn get_user_events(&self, username: &str) -> Result<Vec<PublicEvent>> {
        tracing::debug!("Fetching public events for: {}", username);
        let url = format!(
            "{}/users/{}/events/public?per_page={}",
            self.base_url, username, PER_PAGE
        );
        self.fetch(&url, &format!("events of {}", username), None).await
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str, what: &str, user: Option<&str>) -> Result<T> {
        self.rate_limiter.wait().await;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        self.rate_limiter.observe(response.headers()).await;

        if let Some(err) = classify(response.status(), response.headers(), what, user) {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("GitHub error body for {}: {}", what, body);
            return Err(err);
        }

        Ok(response.json().await?)
    }
}

/// Error for an unsuccessful response, or `None` on success. `user` is set
/// for account lookups, where 404 means the account does not exist.
fn classify(status: StatusCode, headers: &HeaderMap, what: &str, user: Option<&str>) -> Option<Error> {
    if status.is_success() {
        return None;
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(user) = user {
            return Some(Error::UserNotFound(user.to_string()));
        }
    }

    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        if let Some(quota) = Quota::from_headers(headers).filter(|q| q.remaining == 0) {
            return Some(Error::RateLimited(quota.seconds_until_reset().unwrap_or(60)));
        }
    }

    Some(Error::GitHubApi(format!("Failed to fetch {}: {}", what, status)))
}

#[async_trait]
impl ProfileProvider for GitHubClient {
    async fn fetch_user(&self, username: &str) -> Result<GitHubUser> {
        self.get_user(username).await
    }

    async fn fetch_repos(&self, username: &str) -> Result<Vec<Repository>> {
        self.get_user_repos(username).await
    }

    async fn fetch_events(&self, username: &str) -> Result<Vec<PublicEvent>> {
        self.get_user_events(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn quota_headers(remaining: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static(remaining));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));
        headers
    }

    #[test]
    fn test_success_is_not_an_error() {
        assert!(classify(StatusCode::OK, &quota_headers("0"), "user octocat", Some("octocat")).is_none());
    }

    #[test]
    fn test_missing_user() {
        let err = classify(StatusCode::NOT_FOUND, &HeaderMap::new(), "user ghost", Some("ghost"));
        assert!(matches!(err, Some(Error::UserNotFound(ref u)) if u == "ghost"));

        // Only account lookups treat 404 as a missing user.
        let err = classify(StatusCode::NOT_FOUND, &HeaderMap::new(), "events of ghost", None);
        assert!(matches!(err, Some(Error::GitHubApi(_))));
    }

    #[test]
    fn test_exhausted_quota_is_rate_limited() {
        let err = classify(StatusCode::FORBIDDEN, &quota_headers("0"), "repositories of octocat", None);
        // Reset time already passed, so the default wait applies.
        assert!(matches!(err, Some(Error::RateLimited(60))));

        let err = classify(StatusCode::TOO_MANY_REQUESTS, &quota_headers("0"), "user octocat", Some("octocat"));
        assert!(matches!(err, Some(Error::RateLimited(_))));
    }

    #[test]
    fn test_forbidden_with_quota_left() {
        let err = classify(StatusCode::FORBIDDEN, &quota_headers("12"), "user octocat", Some("octocat"));
        match err {
            Some(Error::GitHubApi(msg)) => assert_eq!(msg, "Failed to fetch user octocat: 403 Forbidden"),
            other => panic!("unexpected: {:?}", other),
        }

        let err = classify(StatusCode::FORBIDDEN, &HeaderMap::new(), "user octocat", Some("octocat"));
        assert!(matches!(err, Some(Error::GitHubApi(_))));
    }
}
