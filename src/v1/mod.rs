//! Discovery v1: environments, configurations, collections, queries and
//! relevancy training.
//!
//! ```no_run
//! use discovery_sdk::auth::IamAuthenticator;
//! use discovery_sdk::v1::{DiscoveryV1, DiscoveryV1Options, ListEnvironmentsOptions};
//! use std::sync::Arc;
//!
//! # async fn run() -> discovery_sdk::Result<()> {
//! let discovery = DiscoveryV1::new(DiscoveryV1Options {
//!     version: "2019-04-30".into(),
//!     authenticator: Some(Arc::new(IamAuthenticator::new("my-apikey")?)),
//!     ..Default::default()
//! })?;
//!
//! let environments = discovery
//!     .list_environments(&ListEnvironmentsOptions::new())
//!     .await?;
//! println!("{:?}", environments.result);
//! # Ok(())
//! # }
//! ```

mod collections;
mod configurations;
mod credentials;
mod documents;
mod environments;
mod events;
pub mod models;
mod queries;
mod training;

pub use collections::*;
pub use configurations::*;
pub use credentials::*;
pub use documents::*;
pub use environments::*;
pub use events::*;
pub use models::*;
pub use queries::*;
pub use training::*;

use crate::auth::Authenticator;
use crate::client::{BaseService, BaseServiceBuilder, RequestBuilder};
use crate::Result;
use reqwest::Method;
use serde::Serializer;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub use crate::client::builder::{service_url_for_region, DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL};

/// Construction parameters for [`DiscoveryV1`].
#[derive(Debug, Clone, Default)]
pub struct DiscoveryV1Options {
    /// API version date in `YYYY-MM-DD` form. Required.
    pub version: String,
    pub service_url: Option<String>,
    pub authenticator: Option<Arc<dyn Authenticator>>,
    pub service_name: Option<String>,
}

/// Client for the Discovery v1 API.
#[derive(Debug, Clone)]
pub struct DiscoveryV1 {
    service: BaseService,
    version: String,
}

impl DiscoveryV1 {
    pub fn new(options: DiscoveryV1Options) -> Result<Self> {
        let mut builder = BaseServiceBuilder::new("V1").version(options.version);
        if let Some(name) = options.service_name {
            builder = builder.service_name(name);
        }
        if let Some(url) = options.service_url {
            builder = builder.service_url(url);
        }
        if let Some(authenticator) = options.authenticator {
            builder = builder.authenticator(authenticator);
        }
        let (service, version) = builder.build()?;
        Ok(Self { service, version })
    }

    pub fn get_service_url_for_region(region: &str) -> Result<&'static str> {
        service_url_for_region(region)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn service_url(&self) -> &str {
        self.service.service_url()
    }

    pub fn set_service_url(&mut self, url: &str) -> Result<()> {
        self.service.set_service_url(url)
    }

    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.service.enable_retries(max_retries, max_interval);
    }

    pub fn disable_retries(&mut self) {
        self.service.disable_retries();
    }

    pub fn disable_ssl_verification(&mut self) -> Result<()> {
        self.service.disable_ssl_verification()
    }

    pub fn set_default_headers(&mut self, headers: HashMap<String, String>) {
        self.service.set_default_headers(headers);
    }

    /// Use a caller-built HTTP client. Its TLS settings are kept as they are, so
    /// [`disable_ssl_verification`](Self::disable_ssl_verification) fails afterwards.
    pub fn set_http_client(&mut self, client: reqwest::Client) {
        self.service.set_http_client(client);
    }

    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        self.service.authenticator()
    }

    pub fn service(&self) -> &BaseService {
        &self.service
    }

    fn request(
        &self,
        method: Method,
        path: &'static str,
        operation_id: &'static str,
    ) -> RequestBuilder {
        RequestBuilder::new(method, path, operation_id).query("version", &self.version)
    }
}

/// v1 request bodies carry lists as a single comma-separated string.
pub(crate) fn comma_joined<S: Serializer>(values: &[String], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&values.join(","))
}

pub(crate) fn comma_joined_opt<S: Serializer>(
    values: &Option<Vec<String>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match values {
        Some(values) => comma_joined(values, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::BasicAuthenticator;

    #[test]
    fn construction_requires_version() {
        let err = DiscoveryV1::new(DiscoveryV1Options {
            authenticator: Some(Arc::new(BasicAuthenticator::new("user", "pass").unwrap())),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn explicit_url_and_version_are_kept() {
        let discovery = DiscoveryV1::new(DiscoveryV1Options {
            version: "2019-04-30".into(),
            service_url: Some("https://discovery.example.com/api/".into()),
            authenticator: Some(Arc::new(BasicAuthenticator::new("user", "pass").unwrap())),
            service_name: Some("discovery-v1-unit".into()),
        })
        .unwrap();
        assert_eq!(discovery.version(), "2019-04-30");
        assert_eq!(discovery.service_url(), "https://discovery.example.com/api");
    }

    #[test]
    fn requests_carry_version_query() {
        let discovery = DiscoveryV1::new(DiscoveryV1Options {
            version: "2019-04-30".into(),
            service_url: Some("https://discovery.example.com".into()),
            authenticator: Some(Arc::new(BasicAuthenticator::new("user", "pass").unwrap())),
            service_name: None,
        })
        .unwrap();
        let url = discovery
            .request(Method::GET, "/v1/environments", "ListEnvironments")
            .build_url(discovery.service_url())
            .unwrap();
        assert_eq!(url.query(), Some("version=2019-04-30"));
    }
}
