pub mod client;
pub mod provider;
pub mod rate_limiter;

pub use client::GitHubClient;
pub use provider::ProfileProvider;
pub use rate_limiter::RateLimiter;
