//! Spacing between pull request creation calls.

use async_trait::async_trait;
use std::time::Duration;

/// Decides how long to wait before each creation call.
///
/// GitHub's secondary rate limits reject bursts of content-creating requests,
/// so the replicator asks this policy before every call.
#[async_trait]
pub trait PacingPolicy: Send + Sync {
    /// Waits until the next creation call may be made.
    async fn pause(&self);
}

/// Sleeps for a fixed duration before each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    /// Default spacing between creation calls.
    pub const DEFAULT: Duration = Duration::from_secs(5);

    /// Creates a policy sleeping `secs` seconds.
    #[must_use]
    pub fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[async_trait]
impl PacingPolicy for FixedDelay {
    async fn pause(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Never waits. Used in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl PacingPolicy for NoDelay {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_five_seconds() {
        assert_eq!(FixedDelay::default(), FixedDelay(Duration::from_secs(5)));
        assert_eq!(FixedDelay::from_secs(2).0, Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_sleeps_for_its_duration() {
        let start = tokio::time::Instant::now();
        FixedDelay::from_secs(5).pause().await;
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
