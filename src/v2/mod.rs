//! Discovery v2: projects, collections, documents, queries and enrichments.
//!
//! ```no_run
//! use discovery_sdk::auth::IamAuthenticator;
//! use discovery_sdk::v2::{DiscoveryV2, DiscoveryV2Options, ListCollectionsOptions};
//! use std::sync::Arc;
//!
//! # async fn run() -> discovery_sdk::Result<()> {
//! let discovery = DiscoveryV2::new(DiscoveryV2Options {
//!     version: "2020-08-30".into(),
//!     authenticator: Some(Arc::new(IamAuthenticator::new("my-apikey")?)),
//!     ..Default::default()
//! })?;
//!
//! let collections = discovery
//!     .list_collections(&ListCollectionsOptions::new("my-project"))
//!     .await?;
//! println!("{:?}", collections.result);
//! # Ok(())
//! # }
//! ```

mod analyze;
mod batches;
mod classifiers;
mod collections;
mod documents;
mod enrichments;
pub mod models;
mod projects;
mod queries;
mod training;

pub use analyze::*;
pub use batches::*;
pub use classifiers::*;
pub use collections::*;
pub use documents::*;
pub use enrichments::*;
pub use models::*;
pub use projects::*;
pub use queries::*;
pub use training::*;

use crate::auth::Authenticator;
use crate::client::{BaseService, BaseServiceBuilder, RequestBuilder};
use crate::Result;
use reqwest::Method;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub use crate::client::builder::{service_url_for_region, DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL};

/// Construction parameters for [`DiscoveryV2`].
#[derive(Debug, Clone, Default)]
pub struct DiscoveryV2Options {
    /// API version date in `YYYY-MM-DD` form. Required.
    pub version: String,
    pub service_url: Option<String>,
    /// When absent, credentials are read from the environment, a credentials
    /// file or `VCAP_SERVICES`.
    pub authenticator: Option<Arc<dyn Authenticator>>,
    /// Prefix for external configuration lookup; defaults to `discovery`.
    pub service_name: Option<String>,
}

/// Client for the Discovery v2 API.
#[derive(Debug, Clone)]
pub struct DiscoveryV2 {
    service: BaseService,
    version: String,
}

impl DiscoveryV2 {
    pub fn new(options: DiscoveryV2Options) -> Result<Self> {
        let mut builder = BaseServiceBuilder::new("V2").version(options.version);
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

    /// Endpoint URL for a named region such as `frankfurt`.
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

    /// The underlying connection state.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::NoAuthAuthenticator;

    fn client() -> DiscoveryV2 {
        DiscoveryV2::new(DiscoveryV2Options {
            version: "2020-08-30".into(),
            service_url: Some("https://discovery.example.com/instances/1".into()),
            authenticator: Some(Arc::new(NoAuthAuthenticator::new())),
            service_name: Some("discovery-v2-unit".into()),
        })
        .unwrap()
    }

    #[test]
    fn construction_requires_version() {
        let err = DiscoveryV2::new(DiscoveryV2Options {
            authenticator: Some(Arc::new(NoAuthAuthenticator::new())),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn invalid_url_is_rejected_at_construction() {
        let err = DiscoveryV2::new(DiscoveryV2Options {
            version: "2020-08-30".into(),
            service_url: Some("::not a url::".into()),
            authenticator: Some(Arc::new(NoAuthAuthenticator::new())),
            service_name: None,
        })
        .unwrap_err();
        assert!(matches!(err, crate::Error::Configuration { .. }));
    }

    #[test]
    fn clone_is_independent() {
        let original = client();
        let mut copy = original.clone();
        assert_eq!(copy.service_url(), original.service_url());
        assert!(Arc::ptr_eq(copy.authenticator(), original.authenticator()));

        copy.set_service_url("https://other.example.com").unwrap();
        copy.enable_retries(3, Duration::from_secs(10));
        assert_eq!(
            original.service_url(),
            "https://discovery.example.com/instances/1"
        );
        assert!(!original.service().transport().retry_policy().enabled);
    }

    #[test]
    fn region_urls() {
        assert_eq!(
            DiscoveryV2::get_service_url_for_region("frankfurt").unwrap(),
            "https://api.eu-de.discovery.watson.cloud.ibm.com"
        );
        assert!(DiscoveryV2::get_service_url_for_region("atlantis").is_err());
    }
}
