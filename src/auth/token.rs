//! In-memory cache for fetched access tokens.

use crate::Result;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Fraction of the token lifetime after which a refresh is triggered.
const REFRESH_FRACTION: f64 = 0.8;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    refresh_at: Instant,
}

/// Holds at most one token; concurrent callers wait on the same refresh.
#[derive(Debug, Default)]
pub(crate) struct TokenCache {
    inner: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, or run `fetch` and cache its `(token, lifetime)`.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(String, Duration)>>,
    {
        let mut guard = self.inner.lock().await;
        if let Some(cached) = guard.as_ref() {
            if Instant::now() < cached.refresh_at {
                return Ok(cached.token.clone());
            }
        }
        let (token, lifetime) = fetch().await?;
        *guard = Some(CachedToken {
            token: token.clone(),
            refresh_at: Instant::now() + lifetime.mul_f64(REFRESH_FRACTION),
        });
        Ok(token)
    }

    pub async fn clear(&self) {
        *self.inner.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn reuses_token_until_refresh_point() {
        let cache = TokenCache::new();
        let calls = AtomicU32::new(0);
        for _ in 0..3 {
            let t = cache
                .get_or_fetch(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(("tok".to_string(), Duration::from_secs(3600)))
                })
                .await
                .unwrap();
            assert_eq!(t, "tok");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_token_is_refetched() {
        let cache = TokenCache::new();
        let calls = AtomicU32::new(0);
        for _ in 0..2 {
            cache
                .get_or_fetch(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(("tok".to_string(), Duration::ZERO))
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_cache_empty() {
        let cache = TokenCache::new();
        let err = cache
            .get_or_fetch(|| async { Err(crate::Error::configuration("boom")) })
            .await;
        assert!(err.is_err());
        cache.clear().await;
        assert!(cache.inner.lock().await.is_none());
    }
}
