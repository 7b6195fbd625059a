//! Per-call deadline and cancellation.

use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Caller-supplied bounds for a single operation call.
///
/// The deadline covers every attempt, including retry back-off sleeps.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

impl RequestContext {
    /// No deadline, no cancellation; the transport's own timeout still applies.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            timeout: Some(timeout),
            cancellation: None,
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        let timeout = deadline.saturating_duration_since(Instant::now());
        Self {
            deadline: Some(deadline),
            timeout: Some(timeout),
            cancellation: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .map(|t| t.is_cancelled())
            .unwrap_or(false)
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Run `work` under this context: it is abandoned with `DeadlineExceeded`
    /// once the deadline passes, or with `Cancelled` once the token fires.
    pub async fn bound<T, F>(&self, work: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let deadline_error = || Error::DeadlineExceeded(self.timeout.unwrap_or_default());

        let bounded = async move {
            match self.remaining() {
                Some(remaining) if remaining.is_zero() => Err(deadline_error()),
                Some(remaining) => tokio::time::timeout(remaining, work)
                    .await
                    .map_err(|_| deadline_error())?,
                None => work.await,
            }
        };

        match &self.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(Error::Cancelled),
                    result = bounded => result,
                }
            }
            None => bounded.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_has_no_bounds() {
        let ctx = RequestContext::background();
        assert!(ctx.deadline().is_none());
        assert!(ctx.remaining().is_none());
        assert!(!ctx.is_cancelled());
    }

    #[tokio::test]
    async fn timeout_sets_deadline() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(5));
        let remaining = ctx.remaining().unwrap();
        assert!(remaining <= Duration::from_secs(5));
        assert!(remaining > Duration::from_secs(4));
    }

    #[tokio::test]
    async fn bound_abandons_slow_work_at_the_deadline() {
        let ctx = RequestContext::with_timeout(Duration::from_millis(20));
        let started = std::time::Instant::now();
        let err = ctx
            .bound(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DeadlineExceeded(d) if d == Duration::from_millis(20)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn bound_stops_when_cancelled_mid_flight() {
        let token = CancellationToken::new();
        let ctx = RequestContext::background().with_cancellation(token.clone());
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });
        let err = ctx
            .bound(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        canceller.await.unwrap();
    }

    #[tokio::test]
    async fn bound_passes_through_results() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(5));
        assert_eq!(ctx.bound(async { Ok(7) }).await.unwrap(), 7);
        let err = ctx
            .bound(async { Err::<(), _>(Error::configuration("boom")) })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn cancellation_is_observed() {
        let token = CancellationToken::new();
        let ctx = RequestContext::background().with_cancellation(token.clone());
        assert!(!ctx.is_cancelled());
        token.cancel();
        assert!(ctx.is_cancelled());
    }
}
