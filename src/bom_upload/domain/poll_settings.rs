use crate::shared::Result;
use std::time::Duration;

/// Timing of the completion watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    poll_interval: Duration,
    deadline: Duration,
}

impl PollSettings {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
    pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

    pub fn new(poll_interval: Duration, deadline: Duration) -> Result<Self> {
        if poll_interval.is_zero() {
            anyhow::bail!("Poll interval must be greater than zero");
        }
        if deadline.is_zero() {
            anyhow::bail!("Timeout must be greater than zero");
        }
        Ok(Self {
            poll_interval,
            deadline,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Number of status queries that fit before the deadline fires
    pub fn max_ticks(&self) -> usize {
        let ticks = self.deadline.as_nanos() / self.poll_interval.as_nanos();
        usize::try_from(ticks).unwrap_or(usize::MAX).max(1)
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            deadline: Self::DEFAULT_DEADLINE,
        }
    }
}
