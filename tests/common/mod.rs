//! Mock HTTP server setup for integration tests

#![allow(dead_code)]

use discovery_sdk::auth::NoAuthAuthenticator;
use discovery_sdk::v1::{DiscoveryV1, DiscoveryV1Options};
use discovery_sdk::v2::{DiscoveryV2, DiscoveryV2Options};
use discovery_sdk::{Authenticator, Error, RequestContext};
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const V1_VERSION: &str = "2019-04-30";
pub const V2_VERSION: &str = "2020-08-30";

/// Route SDK logs to the test output; `RUST_LOG=discovery_sdk=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        init_tracing();
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    /// v2 client pointed at the mock server, no authentication
    pub fn v2_client(&self) -> DiscoveryV2 {
        self.v2_client_with(Arc::new(NoAuthAuthenticator::new()))
    }

    pub fn v2_client_with(&self, authenticator: Arc<dyn Authenticator>) -> DiscoveryV2 {
        DiscoveryV2::new(DiscoveryV2Options {
            version: V2_VERSION.into(),
            service_url: Some(self.base_url.clone()),
            authenticator: Some(authenticator),
            service_name: Some("mock-discovery".into()),
        })
        .expect("v2 client")
    }

    pub fn v1_client(&self) -> DiscoveryV1 {
        self.v1_client_with(Arc::new(NoAuthAuthenticator::new()))
    }

    pub fn v1_client_with(&self, authenticator: Arc<dyn Authenticator>) -> DiscoveryV1 {
        DiscoveryV1::new(DiscoveryV1Options {
            version: V1_VERSION.into(),
            service_url: Some(self.base_url.clone()),
            authenticator: Some(authenticator),
            service_name: Some("mock-discovery".into()),
        })
        .expect("v1 client")
    }

    /// Start a mock for `path`; any query string is accepted.
    ///
    /// Callers add matchers and responses, then `create_async`.
    pub async fn mock(&self, method: &str, path: &str) -> Mock {
        let mut server = self.server.lock().await;
        server.mock(method, path).match_query(Matcher::Any)
    }

    /// Create a mock for a JSON response
    pub async fn mock_json_response(
        &self,
        method: &str,
        path: &str,
        status: usize,
        body: &str,
    ) -> Mock {
        self.mock(method, path)
            .await
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Create a mock for an error response
    pub async fn mock_error_response(&self, method: &str, path: &str, status: usize, error_body: &str) -> Mock {
        self.mock_json_response(method, path, status, error_body).await
    }

    /// Create a mock that answers with `body` only after `delay`
    pub async fn mock_slow_body(
        &self,
        method: &str,
        path: &str,
        delay: std::time::Duration,
        body: &'static str,
    ) -> Mock {
        self.mock(method, path)
            .await
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |_| {
                std::thread::sleep(delay);
                body.as_bytes().to_vec()
            })
            .create_async()
            .await
    }

    /// Slow mock answering with a minimal collection
    pub async fn mock_slow_response(&self, method: &str, path: &str, delay: std::time::Duration) -> Mock {
        self.mock_slow_body(method, path, delay, r#"{"collection_id":"late"}"#)
            .await
    }
}

/// Status code and whether a result was decoded.
pub type CallFuture = Pin<Box<dyn Future<Output = discovery_sdk::Result<(u16, bool)>>>>;

/// One operation, called with fixed valid options against a concrete path.
pub struct OperationCase<C> {
    pub name: &'static str,
    pub method: &'static str,
    pub path: &'static str,
    /// The operation has no response model.
    pub no_content: bool,
    pub call: Box<dyn Fn(C, RequestContext) -> CallFuture>,
}

impl<C: Clone> OperationCase<C> {
    pub async fn run(&self, client: &C, ctx: RequestContext) -> discovery_sdk::Result<(u16, bool)> {
        (self.call)(client.clone(), ctx).await
    }
}

/// `operation_case!(Client, "GET", "/path", no_content, |client, ctx| call)`
/// where `call` evaluates to a future of `Result<DetailedResponse<_>>`.
#[allow(unused_macros)]
macro_rules! operation_case {
    ($client:ty, $method:literal, $path:literal, $no_content:literal, |$c:ident, $ctx:ident| $call:expr) => {
        common::OperationCase {
            name: stringify!($call),
            method: $method,
            path: $path,
            no_content: $no_content,
            call: Box::new(|$c: $client, $ctx: RequestContext| -> common::CallFuture {
                Box::pin(async move {
                    let response = $call.await?;
                    Ok::<_, discovery_sdk::Error>((response.status_code, response.result().is_some()))
                })
            }),
        }
    };
}

impl MockServerFixture {
    /// Each case hits its route exactly once with the `version` query, and an
    /// empty 200 body decodes to no result.
    pub async fn assert_routes<C: Clone>(&self, client: &C, version: &str, cases: &[OperationCase<C>]) {
        for case in cases {
            let mock = self
                .mock(case.method, case.path)
                .await
                .match_query(Matcher::UrlEncoded("version".into(), version.into()))
                .with_status(200)
                .expect(1)
                .create_async()
                .await;

            let (status, has_result) = case
                .run(client, RequestContext::background())
                .await
                .unwrap_or_else(|e| panic!("{}: {:?}", case.name, e));
            assert_eq!(status, 200, "{}", case.name);
            assert!(!has_result, "{}", case.name);

            mock.assert_async().await;
            mock.remove_async().await;
        }
    }

    /// A 200 with an unparsable body is a decode error carrying the raw body,
    /// except for operations that decode nothing.
    pub async fn assert_malformed_json_handling<C: Clone>(&self, client: &C, cases: &[OperationCase<C>]) {
        for case in cases {
            let mock = self
                .mock_json_response(case.method, case.path, 200, "{not json")
                .await;

            let outcome = case.run(client, RequestContext::background()).await;
            if case.no_content {
                assert!(outcome.is_ok(), "{}: {:?}", case.name, outcome);
            } else {
                match outcome {
                    Err(err @ Error::Decode { .. }) => {
                        assert_eq!(err.raw_response().map(|r| r.text()), Some("{not json".to_string()), "{}", case.name)
                    }
                    other => panic!("{}: expected a decode error, got {:?}", case.name, other),
                }
            }

            mock.remove_async().await;
        }
    }

    /// An already-expired deadline fails every case without a request.
    pub async fn assert_expired_deadline_sends_nothing<C: Clone>(&self, client: &C, cases: &[OperationCase<C>]) {
        for case in cases {
            let mock = self
                .mock(case.method, case.path)
                .await
                .expect(0)
                .create_async()
                .await;

            let err = case
                .run(client, RequestContext::with_timeout(Duration::ZERO))
                .await
                .unwrap_err();
            assert!(err.is_deadline_exceeded(), "{}: {:?}", case.name, err);

            mock.assert_async().await;
            mock.remove_async().await;
        }
    }
}

/// With no service URL every case fails locally.
pub async fn assert_missing_service_url<C: Clone>(client: &C, cases: &[OperationCase<C>]) {
    for case in cases {
        let err = case
            .run(client, RequestContext::background())
            .await
            .unwrap_err();
        assert!(
            err.to_string().contains("missing service URL"),
            "{}: {:?}",
            case.name,
            err
        );
    }
}
