use reqwest::header::HeaderMap;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

/// Keeps requests under GitHub's advertised quota plus a soft per-minute cap.
pub struct RateLimiter {
    per_minute: u32,
    state: Mutex<RateLimitState>,
}

struct RateLimitState {
    remaining: Option<u32>,
    reset_at: Option<Instant>,
    requests_this_minute: u32,
    minute_start: Instant,
}

/// Quota as reported by the `x-ratelimit-*` response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub remaining: u32,
    pub reset_epoch: Option<u64>,
}

impl Quota {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let header_u64 = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
        };

        let remaining = header_u64("x-ratelimit-remaining")?;
        Some(Self {
            remaining: u32::try_from(remaining).unwrap_or(u32::MAX),
            reset_epoch: header_u64("x-ratelimit-reset"),
        })
    }

    /// Seconds until the quota window resets, if it lies in the future.
    pub fn seconds_until_reset(&self) -> Option<u64> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
        self.reset_epoch
            .filter(|reset| *reset > now)
            .map(|reset| reset - now)
    }
}

impl RateLimiter {
    pub fn new(per_minute: u32) -> Self {
        Self {
            per_minute: per_minute.max(1),
            state: Mutex::new(RateLimitState {
                remaining: None,
                reset_at: None,
                requests_this_minute: 0,
                minute_start: Instant::now(),
            }),
        }
    }

    pub async fn wait(&self) {
        let exhausted_for = {
            let state = self.state.lock().await;
            match (state.remaining, state.reset_at) {
                (Some(0), Some(reset_at)) => reset_at.checked_duration_since(Instant::now()),
                _ => None,
            }
        };
        if let Some(duration) = exhausted_for {
            tracing::info!("GitHub quota exhausted, waiting {:?}", duration);
            sleep(duration).await;
        }

        let mut state = self.state.lock().await;
        let elapsed = state.minute_start.elapsed();
        if elapsed >= Duration::from_secs(60) {
            state.requests_this_minute = 0;
            state.minute_start = Instant::now();
        } else if state.requests_this_minute >= self.per_minute {
            let pause = Duration::from_secs(60) - elapsed;
            drop(state);
            tracing::debug!("Soft rate limiting, waiting {:?}", pause);
            sleep(pause).await;
            state = self.state.lock().await;
            state.requests_this_minute = 0;
            state.minute_start = Instant::now();
        }

        state.requests_this_minute += 1;
    }

    pub async fn observe(&self, headers: &HeaderMap) {
        let Some(quota) = Quota::from_headers(headers) else {
            return;
        };

        let mut state = self.state.lock().await;
        state.remaining = Some(quota.remaining);
        state.reset_at = quota
            .seconds_until_reset()
            .map(|secs| Instant::now() + Duration::from_secs(secs));

        if quota.remaining < 10 {
            tracing::warn!("GitHub rate limit nearly exhausted: {} requests left", quota.remaining);
        }
    }

    pub async fn remaining(&self) -> Option<u32> {
        self.state.lock().await.remaining
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(30)
    }
}
