//! GitHub core API rate limit handling.
//!
//! The fixed delay in the replicator keeps us under the secondary (abuse)
//! limits; this module covers the primary hourly quota, which a large
//! repository with many pull requests can still exhaust.

mod info;

pub use info::RateLimitInfo;

use octocrab::Octocrab;
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Checks the current rate limit status for the core API (repos, pulls).
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: core.remaining as u32,
        reset: core.reset,
        limit: core.limit as u32,
    })
}

/// Returns how long to wait before the next call, if at all.
fn wait_duration(info: &RateLimitInfo, now: u64) -> Option<u64> {
    if info.remaining >= MIN_REMAINING_THRESHOLD {
        return None;
    }

    let wait_secs = info.seconds_until_reset(now)?;
    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }
    Some(wait_secs.min(MAX_WAIT_SECS))
}

/// Waits if the rate limit is low, returning true if we waited.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait_secs) = wait_duration(info, now) else {
        return false;
    };

    info!(
        remaining = info.remaining,
        wait_secs, "Rate limit low, waiting for reset"
    );
    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
    true
}

/// Ensures sufficient rate limit before making core API calls.
///
/// # Errors
///
/// Returns an error if the rate limit check fails.
pub async fn ensure_core_rate_limit(octocrab: &Octocrab) -> Result<(), octocrab::Error> {
    let info = check_core_rate_limit(octocrab).await?;
    wait_if_needed(&info).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(remaining: u32, reset: u64) -> RateLimitInfo {
        RateLimitInfo {
            remaining,
            reset,
            limit: 5_000,
        }
    }

    #[test]
    fn no_wait_with_enough_remaining() {
        assert_eq!(wait_duration(&info(100, 2_000), 1_000), None);
    }

    #[test]
    fn waits_until_reset_when_low() {
        assert_eq!(wait_duration(&info(1, 1_060), 1_000), Some(60));
    }

    #[test]
    fn caps_wait_at_one_hour() {
        assert_eq!(wait_duration(&info(0, 100_000), 1_000), Some(MAX_WAIT_SECS));
    }

    #[tokio::test]
    async fn test_wait_if_needed_reset_passed() {
        let waited = wait_if_needed(&info(1, 0)).await;
        assert!(!waited);
    }
}
