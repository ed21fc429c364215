//! Retry policies for transient failures.
//!
//! Used in three places: node execution in the graph run loop, transport
//! failures in the tool registry, and upstream model calls made by agents.

use std::time::Duration;

/// How many times and with what delays to retry a failed operation.
#[derive(Debug, Clone)]
pub enum RetryPolicy {
    /// Fail immediately on error.
    None,
    /// Retry with a constant delay between attempts.
    Fixed {
        /// Maximum number of retry attempts.
        max_attempts: usize,
        /// Fixed interval between retries.
        interval: Duration,
    },
    /// Retry with exponentially increasing delays.
    Exponential {
        /// Maximum number of retry attempts.
        max_attempts: usize,
        /// Interval before the first retry.
        initial_interval: Duration,
        /// Cap on the computed interval.
        max_interval: Duration,
        /// Backoff multiplier (2.0 doubles each time).
        multiplier: f64,
    },
}

impl RetryPolicy {
    /// No retries.
    pub fn none() -> Self {
        RetryPolicy::None
    }

    /// Fixed interval retry.
    pub fn fixed(max_attempts: usize, interval: Duration) -> Self {
        RetryPolicy::Fixed {
            max_attempts,
            interval,
        }
    }

    /// Exponential backoff retry.
    pub fn exponential(
        max_attempts: usize,
        initial_interval: Duration,
        max_interval: Duration,
        multiplier: f64,
    ) -> Self {
        RetryPolicy::Exponential {
            max_attempts,
            initial_interval,
            max_interval,
            multiplier,
        }
    }

    /// True when another retry is allowed for the given attempt number
    /// (0-based: attempt 0 is the first retry after the initial failure).
    pub fn should_retry(&self, attempt: usize) -> bool {
        match self {
            RetryPolicy::None => false,
            RetryPolicy::Fixed { max_attempts, .. } => attempt < *max_attempts,
            RetryPolicy::Exponential { max_attempts, .. } => attempt < *max_attempts,
        }
    }

    /// The delay before the given retry attempt.
    pub fn delay(&self, attempt: usize) -> Duration {
        match self {
            RetryPolicy::None => Duration::ZERO,
            RetryPolicy::Fixed { interval, .. } => *interval,
            RetryPolicy::Exponential {
                initial_interval,
                max_interval,
                multiplier,
                ..
            } => {
                let delay_secs = initial_interval.as_secs_f64() * multiplier.powi(attempt as i32);
                Duration::from_secs_f64(delay_secs).min(*max_interval)
            }
        }
    }

    /// Maximum number of retry attempts for this policy.
    pub fn max_attempts(&self) -> usize {
        match self {
            RetryPolicy::None => 0,
            RetryPolicy::Fixed { max_attempts, .. } => *max_attempts,
            RetryPolicy::Exponential { max_attempts, .. } => *max_attempts,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::None
    }
}
