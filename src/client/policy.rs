use std::time::Duration;

/// Decision for how to proceed after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// What went wrong on one attempt, as seen by the retry policy.
#[derive(Debug, Clone, Copy)]
pub(crate) enum AttemptFailure {
    Status {
        status: u16,
        retry_after: Option<Duration>,
    },
    /// Connection refused/reset or per-request timeout inside the transport.
    Network,
}

/// Retry configuration applied by the transport.
///
/// Disabled by default; turned on via `enable_retries` or the
/// `ENABLE_RETRIES` / `MAX_RETRIES` / `RETRY_INTERVAL` properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub enabled: bool,
    pub max_retries: u32,
    /// Upper bound for a single back-off delay.
    pub max_interval: Duration,
    pub min_delay: Duration,
}

pub const DEFAULT_MAX_RETRIES: u32 = 4;
pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(30);

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            max_retries: DEFAULT_MAX_RETRIES,
            max_interval: DEFAULT_MAX_INTERVAL,
            min_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Enabled policy; zero values fall back to the defaults.
    pub fn enabled(max_retries: u32, max_interval: Duration) -> Self {
        Self {
            enabled: true,
            max_retries: if max_retries == 0 {
                DEFAULT_MAX_RETRIES
            } else {
                max_retries
            },
            max_interval: if max_interval.is_zero() {
                DEFAULT_MAX_INTERVAL
            } else {
                max_interval
            },
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub(crate) fn is_retryable_status(status: u16) -> bool {
        status == 429 || ((500..=599).contains(&status) && status != 501)
    }

    fn backoff_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(ra) = retry_after {
            return ra.min(self.max_interval);
        }
        // exponential backoff: min_delay * 2^attempt
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.min_delay
            .checked_mul(factor)
            .unwrap_or(self.max_interval)
            .min(self.max_interval)
    }

    /// Decide what to do after an attempt failed.
    ///
    /// `attempt` is 0-based (first failure => attempt=0).
    pub(crate) fn decide(&self, failure: AttemptFailure, attempt: u32) -> Decision {
        if !self.enabled || attempt >= self.max_retries {
            return Decision::Fail;
        }
        match failure {
            AttemptFailure::Status {
                status,
                retry_after,
            } if Self::is_retryable_status(status) => Decision::Retry {
                delay: self.backoff_delay(attempt, retry_after),
            },
            AttemptFailure::Network => Decision::Retry {
                delay: self.backoff_delay(attempt, None),
            },
            _ => Decision::Fail,
        }
    }
}

/// Best-effort parsing of `Retry-After: <seconds>`.
pub(crate) fn parse_retry_after(raw: &str) -> Option<Duration> {
    raw.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(s: u16) -> AttemptFailure {
        AttemptFailure::Status {
            status: s,
            retry_after: None,
        }
    }

    #[test]
    fn disabled_policy_never_retries() {
        let p = RetryPolicy::disabled();
        assert_eq!(p.decide(status(503), 0), Decision::Fail);
        assert_eq!(p.decide(AttemptFailure::Network, 0), Decision::Fail);
    }

    #[test]
    fn retryable_statuses() {
        assert!(RetryPolicy::is_retryable_status(429));
        assert!(RetryPolicy::is_retryable_status(500));
        assert!(RetryPolicy::is_retryable_status(503));
        assert!(!RetryPolicy::is_retryable_status(501));
        assert!(!RetryPolicy::is_retryable_status(404));
        assert!(!RetryPolicy::is_retryable_status(400));
    }

    #[test]
    fn exponential_delay_is_capped() {
        let p = RetryPolicy::enabled(10, Duration::from_secs(5));
        assert_eq!(
            p.decide(status(500), 0),
            Decision::Retry {
                delay: Duration::from_secs(1)
            }
        );
        assert_eq!(
            p.decide(status(500), 2),
            Decision::Retry {
                delay: Duration::from_secs(4)
            }
        );
        assert_eq!(
            p.decide(status(500), 3),
            Decision::Retry {
                delay: Duration::from_secs(5)
            }
        );
        assert_eq!(
            p.decide(status(500), 31),
            Decision::Retry {
                delay: Duration::from_secs(5)
            }
        );
    }

    #[test]
    fn retry_after_wins_but_is_capped() {
        let p = RetryPolicy::enabled(3, Duration::from_secs(10));
        let f = AttemptFailure::Status {
            status: 429,
            retry_after: Some(Duration::from_secs(2)),
        };
        assert_eq!(
            p.decide(f, 0),
            Decision::Retry {
                delay: Duration::from_secs(2)
            }
        );
        let f = AttemptFailure::Status {
            status: 429,
            retry_after: Some(Duration::from_secs(60)),
        };
        assert_eq!(
            p.decide(f, 0),
            Decision::Retry {
                delay: Duration::from_secs(10)
            }
        );
    }

    #[test]
    fn attempts_are_bounded() {
        let p = RetryPolicy::enabled(2, Duration::from_secs(1));
        assert!(matches!(p.decide(status(502), 1), Decision::Retry { .. }));
        assert_eq!(p.decide(status(502), 2), Decision::Fail);
    }

    #[test]
    fn zero_values_use_defaults() {
        let p = RetryPolicy::enabled(0, Duration::ZERO);
        assert_eq!(p.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(p.max_interval, DEFAULT_MAX_INTERVAL);
    }

    #[test]
    fn retry_after_parsing() {
        assert_eq!(parse_retry_after(" 3 "), Some(Duration::from_secs(3)));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }
}
