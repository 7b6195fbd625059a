use crate::auth::{self, Authenticator};
use crate::client::core::BaseService;
use crate::config;
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_SERVICE_NAME: &str = "discovery";
pub const DEFAULT_SERVICE_URL: &str = "https://api.us-south.discovery.watson.cloud.ibm.com";

const REGION_URLS: &[(&str, &str)] = &[
    ("dallas", "https://api.us-south.discovery.watson.cloud.ibm.com"),
    ("washington", "https://api.us-east.discovery.watson.cloud.ibm.com"),
    ("frankfurt", "https://api.eu-de.discovery.watson.cloud.ibm.com"),
    ("sydney", "https://api.au-syd.discovery.watson.cloud.ibm.com"),
    ("tokyo", "https://api.jp-tok.discovery.watson.cloud.ibm.com"),
    ("london", "https://api.eu-gb.discovery.watson.cloud.ibm.com"),
    ("seoul", "https://api.kr-seo.discovery.watson.cloud.ibm.com"),
];

/// Public endpoint for a named region.
pub fn service_url_for_region(region: &str) -> Result<&'static str> {
    REGION_URLS
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, url)| *url)
        .ok_or_else(|| {
            Error::configuration_with_context(
                "service URL for region not found",
                ErrorContext::new()
                    .with_field_path("region")
                    .with_details(format!("got '{}'", region)),
            )
        })
}

/// Builder for the connection state behind a service client.
///
/// Construction order:
/// 1. external properties for `service_name` are read once,
/// 2. without an explicit authenticator, one is built from those properties,
/// 3. external `URL`, `DISABLE_SSL` and retry settings are applied,
/// 4. an explicit service URL overrides everything else.
pub struct BaseServiceBuilder {
    service_version: &'static str,
    version: Option<String>,
    service_name: Option<String>,
    service_url: Option<String>,
    authenticator: Option<Arc<dyn Authenticator>>,
}

impl BaseServiceBuilder {
    pub fn new(service_version: &'static str) -> Self {
        Self {
            service_version,
            version: None,
            service_name: None,
            service_url: None,
            authenticator: None,
        }
    }

    /// API version date, e.g. `2020-08-30`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }

    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Build the service and return it with the validated API version.
    pub fn build(self) -> Result<(BaseService, String)> {
        let version = self
            .version
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "the version parameter is required",
                    ErrorContext::new().with_field_path("version"),
                )
            })?;

        let service_name = self
            .service_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());
        let props = config::read_service_properties(&service_name)?;

        let authenticator = match self.authenticator {
            Some(a) => a,
            None => {
                if props.is_empty() {
                    return Err(Error::configuration_with_context(
                        "no authenticator supplied and no external configuration found",
                        ErrorContext::new().with_details(format!("service name '{}'", service_name)),
                    ));
                }
                auth::from_properties(&props)?
            }
        };

        let mut service =
            BaseService::new(DEFAULT_SERVICE_URL, authenticator, self.service_version)?;
        service.configure(&props)?;
        if let Some(url) = self.service_url.as_deref() {
            service.set_service_url(url)?;
        }
        debug!(
            service_name = service_name.as_str(),
            service_url = service.service_url(),
            auth_type = %service.authenticator().auth_type(),
            "service client configured"
        );
        Ok((service, version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthType, NoAuthAuthenticator};

    fn noauth() -> Arc<dyn Authenticator> {
        Arc::new(NoAuthAuthenticator::new())
    }

    #[test]
    fn version_is_required() {
        let err = BaseServiceBuilder::new("V2")
            .authenticator(noauth())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn defaults_to_public_endpoint() {
        let (service, version) = BaseServiceBuilder::new("V2")
            .service_name("builder-default-test")
            .version("2020-08-30")
            .authenticator(noauth())
            .build()
            .unwrap();
        assert_eq!(service.service_url(), DEFAULT_SERVICE_URL);
        assert_eq!(version, "2020-08-30");
    }

    #[test]
    fn explicit_url_overrides_environment() {
        std::env::set_var("BUILDER_URL_TEST_URL", "https://from-env.example.com");
        let (service, _) = BaseServiceBuilder::new("V1")
            .service_name("builder-url-test")
            .version("2019-04-30")
            .authenticator(noauth())
            .service_url("https://explicit.example.com")
            .build()
            .unwrap();
        assert_eq!(service.service_url(), "https://explicit.example.com");
    }

    #[test]
    fn authenticator_from_environment() {
        std::env::set_var("BUILDER_ENV_TEST_AUTH_TYPE", "noauth");
        std::env::set_var("BUILDER_ENV_TEST_URL", "https://env.example.com/api/");
        let (service, _) = BaseServiceBuilder::new("V2")
            .service_name("builder-env-test")
            .version("2020-08-30")
            .build()
            .unwrap();
        assert_eq!(service.authenticator().auth_type(), AuthType::NoAuth);
        assert_eq!(service.service_url(), "https://env.example.com/api");
    }

    #[test]
    fn unknown_auth_type_fails_construction() {
        std::env::set_var("BUILDER_BAD_AUTH_TEST_AUTH_TYPE", "kerberos");
        let err = BaseServiceBuilder::new("V2")
            .service_name("builder-bad-auth-test")
            .version("2020-08-30")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn missing_configuration_fails_construction() {
        let err = BaseServiceBuilder::new("V2")
            .service_name("builder-nothing-configured-test")
            .version("2020-08-30")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
