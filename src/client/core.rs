use crate::auth::Authenticator;
use crate::client::context::RequestContext;
use crate::client::request::RequestBuilder;
use crate::client::response::{error_message_from_body, DetailedResponse, RawResponse};
use crate::config::ServiceProperties;
use crate::transport::{HttpTransport, PreparedRequest};
use crate::{Error, ErrorContext, Result};
use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const SDK_NAME: &str = "discovery-sdk-rust";
pub const ANALYTICS_HEADER: &str = "X-IBMCloud-SDK-Analytics";

static SDK_USER_AGENT: Lazy<String> =
    Lazy::new(|| format!("{}/{}", SDK_NAME, env!("CARGO_PKG_VERSION")));

/// `User-Agent` value sent with every request.
pub fn user_agent() -> &'static str {
    SDK_USER_AGENT.as_str()
}

/// Analytics header value identifying the calling operation.
pub fn analytics_header(service_version: &str, operation_id: &str) -> String {
    format!(
        "service_name=discovery;service_version={};operation_id={}",
        service_version, operation_id
    )
}

/// Connection state shared by every operation of one service client.
///
/// Cloning produces an independent service: its own transport and URL,
/// sharing the same authenticator.
#[derive(Debug, Clone)]
pub struct BaseService {
    transport: HttpTransport,
    service_url: String,
    authenticator: Arc<dyn Authenticator>,
    default_headers: HashMap<String, String>,
    service_version: &'static str,
}

impl BaseService {
    pub fn new(
        service_url: &str,
        authenticator: Arc<dyn Authenticator>,
        service_version: &'static str,
    ) -> Result<Self> {
        authenticator.validate()?;
        let mut service = Self {
            transport: HttpTransport::new()?,
            service_url: String::new(),
            authenticator,
            default_headers: HashMap::new(),
            service_version,
        };
        service.set_service_url(service_url)?;
        Ok(service)
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Change the base URL. An empty URL is accepted here and rejected per call.
    pub fn set_service_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            self.service_url.clear();
            return Ok(());
        }
        let parsed = Url::parse(url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid service URL '{}': {}", url, e),
                ErrorContext::new().with_field_path("URL"),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                format!("invalid service URL '{}': scheme must be http or https", url),
                ErrorContext::new().with_field_path("URL"),
            ));
        }
        self.service_url = url.trim_end_matches('/').to_string();
        Ok(())
    }

    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.transport.enable_retries(max_retries, max_interval);
    }

    pub fn disable_retries(&mut self) {
        self.transport.disable_retries();
    }

    pub fn disable_ssl_verification(&mut self) -> Result<()> {
        self.transport.disable_ssl_verification()
    }

    pub fn set_default_headers(&mut self, headers: HashMap<String, String>) {
        self.default_headers = headers;
    }

    pub fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    pub fn set_http_client(&mut self, client: reqwest::Client) {
        self.transport.set_client(client);
    }

    /// Apply `URL`, `DISABLE_SSL` and retry settings from external configuration.
    pub(crate) fn configure(&mut self, props: &ServiceProperties) -> Result<()> {
        if let Some(url) = props.get("URL") {
            self.set_service_url(url)?;
        }
        if props.get_bool("DISABLE_SSL") {
            self.disable_ssl_verification()?;
        }
        if props.get_bool("ENABLE_RETRIES") {
            self.enable_retries(
                props.get_u32("MAX_RETRIES").unwrap_or(0),
                props.get_secs("RETRY_INTERVAL").unwrap_or(Duration::ZERO),
            );
        }
        Ok(())
    }

    /// Send a request and decode its JSON body into `T`.
    pub async fn send<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: RequestBuilder,
    ) -> Result<DetailedResponse<T>> {
        let raw = self.dispatch(ctx, request).await?;
        DetailedResponse::from_raw(raw)
    }

    /// Send a request whose response body, if any, is not interpreted.
    pub async fn send_no_content(
        &self,
        ctx: &RequestContext,
        request: RequestBuilder,
    ) -> Result<DetailedResponse<()>> {
        let raw = self.dispatch(ctx, request).await?;
        Ok(DetailedResponse {
            status_code: raw.status_code,
            headers: raw.headers,
            result: None,
            raw_body: raw.body,
        })
    }

    /// Resolve the builder into a request without sending it.
    pub async fn prepare(&self, request: RequestBuilder) -> Result<PreparedRequest> {
        let url = request.build_url(&self.service_url)?;
        let operation_id = request.operation_id();

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(user_agent()));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(value) =
            HeaderValue::from_str(&analytics_header(self.service_version, operation_id))
        {
            headers.insert(HeaderName::from_static("x-ibmcloud-sdk-analytics"), value);
        }
        for (name, value) in &self.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                Error::configuration(format!("invalid default header '{}': {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                Error::configuration(format!("invalid default header value: {}", e))
            })?;
            headers.insert(name, value);
        }
        headers.extend(request.build_headers()?);
        self.authenticator.authenticate(&mut headers).await?;

        Ok(PreparedRequest {
            method: request.method().clone(),
            url,
            headers,
            operation_id,
            body: request.into_body(),
        })
    }

    /// Authenticate and send under one context bound, so a slow token
    /// endpoint counts against the caller's deadline too.
    async fn dispatch(&self, ctx: &RequestContext, request: RequestBuilder) -> Result<RawResponse> {
        let operation_id = request.operation_id();
        let raw = ctx
            .bound(async {
                let prepared = self.prepare(request).await?;
                self.transport.execute_with_retries(&prepared).await
            })
            .await?;
        if raw.is_success() {
            return Ok(raw);
        }
        let message = error_message_from_body(&raw.body).unwrap_or_else(|| {
            StatusCode::from_u16(raw.status_code)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("unexpected HTTP status")
                .to_string()
        });
        debug!(
            status = raw.status_code,
            operation = operation_id,
            message = message.as_str(),
            "service returned an error"
        );
        Err(Error::Remote {
            status: raw.status_code,
            message,
            response: Box::new(raw),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{BasicAuthenticator, NoAuthAuthenticator};
    use reqwest::Method;

    fn service(url: &str) -> BaseService {
        BaseService::new(url, Arc::new(NoAuthAuthenticator::new()), "V2").unwrap()
    }

    #[test]
    fn service_url_is_normalized() {
        let mut s = service("https://api.example.com/instances/1/");
        assert_eq!(s.service_url(), "https://api.example.com/instances/1");
        s.set_service_url("").unwrap();
        assert_eq!(s.service_url(), "");
        assert!(s.set_service_url("ftp://nope").is_err());
        assert!(s.set_service_url("not a url").is_err());
    }

    #[test]
    fn clone_shares_authenticator_only() {
        let s = service("https://a.example.com");
        let mut c = s.clone();
        assert!(Arc::ptr_eq(s.authenticator(), c.authenticator()));
        c.set_service_url("https://b.example.com").unwrap();
        assert_eq!(s.service_url(), "https://a.example.com");
    }

    #[tokio::test]
    async fn prepared_request_carries_sdk_headers() {
        let mut s = BaseService::new(
            "https://api.example.com",
            Arc::new(BasicAuthenticator::new("user", "pass").unwrap()),
            "V2",
        )
        .unwrap();
        s.set_default_headers(HashMap::from([
            ("X-Default".to_string(), "d".to_string()),
            ("X-Override".to_string(), "default".to_string()),
        ]));
        let req = RequestBuilder::new(Method::GET, "/v2/projects", "ListProjects")
            .query("version", "2020-08-30")
            .header("X-Override", "call");
        let prepared = s.prepare(req).await.unwrap();

        assert_eq!(
            prepared.url.as_str(),
            "https://api.example.com/v2/projects?version=2020-08-30"
        );
        let h = &prepared.headers;
        assert!(h["user-agent"].to_str().unwrap().starts_with("discovery-sdk-rust/"));
        assert_eq!(
            h["x-ibmcloud-sdk-analytics"],
            "service_name=discovery;service_version=V2;operation_id=ListProjects"
        );
        assert_eq!(h["x-default"], "d");
        assert_eq!(h["x-override"], "call");
        assert!(h["authorization"].to_str().unwrap().starts_with("Basic "));
    }

    #[tokio::test]
    async fn empty_url_fails_before_sending() {
        let s = service("");
        let req = RequestBuilder::new(Method::GET, "/v2/projects", "ListProjects");
        let err = s
            .send::<serde_json::Value>(&RequestContext::background(), req)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing service URL"));
    }

    #[test]
    fn external_configuration_is_applied() {
        let mut s = service("https://a.example.com");
        let props = ServiceProperties::from_map(
            "discovery",
            HashMap::from([
                ("URL".to_string(), "https://b.example.com/".to_string()),
                ("ENABLE_RETRIES".to_string(), "true".to_string()),
                ("MAX_RETRIES".to_string(), "2".to_string()),
                ("RETRY_INTERVAL".to_string(), "5".to_string()),
            ]),
        );
        s.configure(&props).unwrap();
        assert_eq!(s.service_url(), "https://b.example.com");
        let policy = s.transport().retry_policy();
        assert!(policy.enabled);
        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.max_interval, Duration::from_secs(5));
    }
}
