use std::time::Duration;

use crate::config::RetryConfig;

/// High-level classification of a fetch failure for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request timed out.
    Timeout,
    /// Server asked us to slow down (429, 503).
    Throttled,
    /// Network-level failure (connection reset, DNS, TLS).
    Connection,
    /// Other 5xx.
    Http5xx(u16),
    /// Not retried (4xx, empty body).
    Other,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    NoRetry,
    RetryAfter(Duration),
}

/// Exponential backoff with a cap and an attempt limit.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first). 1 = single-shot.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(cfg: &RetryConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(cfg.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(cfg.max_delay_secs),
        }
    }

    /// `attempt` is 1-based. Delay doubles per attempt and is capped at `max_delay`.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        match kind {
            ErrorKind::Other => RetryDecision::NoRetry,
            ErrorKind::Timeout
            | ErrorKind::Connection
            | ErrorKind::Throttled
            | ErrorKind::Http5xx(_) => {
                let factor = 1u32 << attempt.saturating_sub(1).min(8);
                let delay = self.base_delay.saturating_mul(factor).min(self.max_delay);
                RetryDecision::RetryAfter(delay)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(1),
        }
    }

    #[test]
    fn other_is_never_retried() {
        assert_eq!(policy(5).decide(1, ErrorKind::Other), RetryDecision::NoRetry);
    }

    #[test]
    fn backoff_doubles_then_caps() {
        let p = policy(20);
        assert_eq!(
            p.decide(1, ErrorKind::Timeout),
            RetryDecision::RetryAfter(Duration::from_millis(100))
        );
        assert_eq!(
            p.decide(2, ErrorKind::Connection),
            RetryDecision::RetryAfter(Duration::from_millis(200))
        );
        assert_eq!(
            p.decide(9, ErrorKind::Http5xx(500)),
            RetryDecision::RetryAfter(Duration::from_secs(1))
        );
    }

    #[test]
    fn stops_at_max_attempts() {
        let p = policy(2);
        assert!(matches!(p.decide(1, ErrorKind::Throttled), RetryDecision::RetryAfter(_)));
        assert_eq!(p.decide(2, ErrorKind::Throttled), RetryDecision::NoRetry);
    }

    #[test]
    fn zero_attempts_in_config_means_single_shot() {
        let p = RetryPolicy::from_config(&RetryConfig {
            max_attempts: 0,
            base_delay_secs: 0.1,
            max_delay_secs: 1,
        });
        assert_eq!(p.max_attempts, 1);
        assert_eq!(p.decide(1, ErrorKind::Timeout), RetryDecision::NoRetry);
    }
}
