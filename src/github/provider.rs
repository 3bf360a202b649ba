use async_trait::async_trait;

use crate::error::Result;
use crate::models::{GitHubUser, PublicEvent, Repository};

/// Source of the public profile data the scorers consume.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn fetch_user(&self, username: &str) -> Result<GitHubUser>;
    /// Up to 100 repositories, most recently updated first.
    async fn fetch_repos(&self, username: &str) -> Result<Vec<Repository>>;
    /// Up to 100 public events, newest first.
    async fn fetch_events(&self, username: &str) -> Result<Vec<PublicEvent>>;
}
