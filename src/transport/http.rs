use crate::client::context::RequestContext;
use crate::client::policy::{parse_retry_after, AttemptFailure, Decision, RetryPolicy};
use crate::client::request::RequestBody;
use crate::client::response::RawResponse;
use crate::transport::TransportError;
use crate::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::{Method, Proxy};
use std::env;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const PROXY_URL_ENV: &str = "DISCOVERY_PROXY_URL";

/// A fully resolved request, ready to be sent (possibly several times).
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
    pub operation_id: &'static str,
}

/// reqwest-backed transport with optional retries.
///
/// Cloning yields a distinct transport value; the inner `reqwest::Client`
/// keeps sharing its connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    retry: RetryPolicy,
    timeout: Duration,
    ssl_verification_disabled: bool,
    caller_client: bool,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        // Minimal production-friendly defaults (env-overridable).
        let timeout_secs = env::var("DISCOVERY_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let timeout = Duration::from_secs(timeout_secs);
        let client = Self::build_client(timeout, false)?;
        Ok(Self {
            client,
            retry: RetryPolicy::disabled(),
            timeout,
            ssl_verification_disabled: false,
            caller_client: false,
        })
    }

    fn build_client(timeout: Duration, disable_ssl: bool) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if disable_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Ok(proxy_url) = env::var(PROXY_URL_ENV) {
            match Proxy::all(&proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => warn!(
                    proxy_url = proxy_url.as_str(),
                    error = %e,
                    "ignoring invalid {}",
                    PROXY_URL_ENV
                ),
            }
        }

        builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))
    }

    /// Replace the underlying HTTP client (custom TLS roots, proxies, ...).
    ///
    /// TLS settings of a supplied client are its own: afterwards
    /// [`disable_ssl_verification`](Self::disable_ssl_verification) is refused.
    pub fn set_client(&mut self, client: reqwest::Client) {
        self.client = client;
        self.caller_client = true;
        self.ssl_verification_disabled = false;
    }

    /// Rebuild the default client so it accepts any server certificate.
    pub fn disable_ssl_verification(&mut self) -> Result<()> {
        if self.caller_client {
            return Err(Error::configuration(
                "cannot disable SSL verification on a caller-supplied HTTP client; \
                 configure danger_accept_invalid_certs on that client instead",
            ));
        }
        self.client = Self::build_client(self.timeout, true)?;
        self.ssl_verification_disabled = true;
        Ok(())
    }

    pub fn ssl_verification_disabled(&self) -> bool {
        self.ssl_verification_disabled
    }

    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.retry = RetryPolicy::enabled(max_retries, max_interval);
    }

    pub fn disable_retries(&mut self) {
        self.retry = RetryPolicy::disabled();
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Send `request`, honouring the context's deadline and cancellation token.
    ///
    /// Non-2xx responses are returned as data; interpreting them is up to the caller.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        request: &PreparedRequest,
    ) -> Result<RawResponse> {
        ctx.bound(self.execute_with_retries(request)).await
    }

    pub(crate) async fn execute_with_retries(&self, request: &PreparedRequest) -> Result<RawResponse> {
        let request_id = Uuid::new_v4().to_string();
        let mut attempt = 0u32;
        loop {
            let start = Instant::now();
            debug!(
                method = %request.method,
                url = %request.url,
                operation = request.operation_id,
                request_id = request_id.as_str(),
                attempt,
                "discovery request"
            );
            let delay = match self.send_once(request).await {
                Ok(raw) => {
                    debug!(
                        status = raw.status_code,
                        operation = request.operation_id,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "discovery response"
                    );
                    if raw.is_success() {
                        return Ok(raw);
                    }
                    info!(
                        http_status = raw.status_code,
                        operation = request.operation_id,
                        request_id = request_id.as_str(),
                        duration_ms = start.elapsed().as_millis() as u64,
                        "discovery request failed"
                    );
                    let retry_after = raw
                        .header_first(&["retry-after"])
                        .and_then(|v| parse_retry_after(&v));
                    let failure = AttemptFailure::Status {
                        status: raw.status_code,
                        retry_after,
                    };
                    match self.retry.decide(failure, attempt) {
                        Decision::Retry { delay } => delay,
                        Decision::Fail => return Ok(raw),
                    }
                }
                Err(Error::Transport(e)) if e.is_network() => {
                    match self.retry.decide(AttemptFailure::Network, attempt) {
                        Decision::Retry { delay } => delay,
                        Decision::Fail => return Err(Error::Transport(e)),
                    }
                }
                Err(e) => return Err(e),
            };
            warn!(
                operation = request.operation_id,
                request_id = request_id.as_str(),
                attempt,
                delay_ms = delay.as_millis() as u64,
                "retrying discovery request"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn send_once(&self, request: &PreparedRequest) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(RequestBody::to_form(parts)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        let status_code = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        Ok(RawResponse {
            status_code,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssl_toggle_rebuilds_default_client() {
        let mut transport = HttpTransport::new().unwrap();
        assert!(!transport.ssl_verification_disabled());
        transport.disable_ssl_verification().unwrap();
        assert!(transport.ssl_verification_disabled());
    }

    #[test]
    fn caller_supplied_client_is_not_replaced() {
        let mut transport = HttpTransport::new().unwrap();
        transport.disable_ssl_verification().unwrap();
        transport.set_client(reqwest::Client::new());
        assert!(!transport.ssl_verification_disabled());

        let err = transport.disable_ssl_verification().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("caller-supplied"));
        assert!(!transport.ssl_verification_disabled());
    }

    #[test]
    fn invalid_proxy_url_does_not_break_construction() {
        std::env::set_var(PROXY_URL_ENV, "http://[not a host");
        let built = HttpTransport::build_client(Duration::from_secs(1), false);
        std::env::remove_var(PROXY_URL_ENV);
        assert!(built.is_ok());
    }
}
