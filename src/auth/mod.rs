//! Pluggable credential strategies.
//!
//! Every request passes through [`Authenticator::authenticate`], which adds
//! whatever `Authorization` header the strategy needs. Token-based strategies
//! (IAM, Cloud Pak for Data) fetch and cache tokens on demand.
//!
//! | Type | `AUTH_TYPE` value | Properties |
//! |------|-------------------|------------|
//! | [`NoAuthAuthenticator`] | `noauth` | none |
//! | [`BasicAuthenticator`] | `basic` | `USERNAME`, `PASSWORD` |
//! | [`BearerTokenAuthenticator`] | `bearertoken` | `BEARER_TOKEN` |
//! | [`IamAuthenticator`] | `iam` | `APIKEY`, optional `AUTH_URL`, `CLIENT_ID`, `CLIENT_SECRET`, `SCOPE`, `AUTH_DISABLE_SSL` |
//! | [`CloudPakForDataAuthenticator`] | `cp4d` | `AUTH_URL`, `USERNAME`, `PASSWORD` or `APIKEY`, `AUTH_DISABLE_SSL` |

mod basic;
mod bearer;
mod cp4d;
mod iam;
mod noauth;
mod token;

pub use basic::BasicAuthenticator;
pub use bearer::BearerTokenAuthenticator;
pub use cp4d::CloudPakForDataAuthenticator;
pub use iam::IamAuthenticator;
pub use noauth::NoAuthAuthenticator;

use crate::config::{self, ServiceProperties};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Credential-attachment strategy shared by all clients built from it.
#[async_trait]
pub trait Authenticator: Send + Sync + fmt::Debug {
    fn auth_type(&self) -> AuthType;

    /// Check the configuration without touching the network.
    fn validate(&self) -> Result<()>;

    /// Add authentication headers to an outgoing request.
    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthType {
    NoAuth,
    Basic,
    BearerToken,
    Iam,
    Cp4d,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::NoAuth => "noauth",
            AuthType::Basic => "basic",
            AuthType::BearerToken => "bearertoken",
            AuthType::Iam => "iam",
            AuthType::Cp4d => "cp4d",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "noauth" => Ok(AuthType::NoAuth),
            "basic" => Ok(AuthType::Basic),
            "bearertoken" => Ok(AuthType::BearerToken),
            "iam" => Ok(AuthType::Iam),
            "cp4d" => Ok(AuthType::Cp4d),
            other => Err(Error::configuration_with_context(
                "unrecognized authentication type",
                ErrorContext::new()
                    .with_field_path("AUTH_TYPE")
                    .with_details(format!("got '{}'", other)),
            )),
        }
    }
}

/// Build and validate an authenticator from resolved service properties.
///
/// Without an explicit `AUTH_TYPE`, IAM is assumed.
pub fn from_properties(props: &ServiceProperties) -> Result<Arc<dyn Authenticator>> {
    let auth_type = match props.get("AUTH_TYPE") {
        Some(t) => t.parse::<AuthType>()?,
        None => AuthType::Iam,
    };

    let authenticator: Arc<dyn Authenticator> = match auth_type {
        AuthType::NoAuth => Arc::new(NoAuthAuthenticator::new()),
        AuthType::Basic => Arc::new(BasicAuthenticator::new(
            props.get("USERNAME").unwrap_or_default(),
            props.get("PASSWORD").unwrap_or_default(),
        )?),
        AuthType::BearerToken => Arc::new(BearerTokenAuthenticator::new(
            props.get("BEARER_TOKEN").unwrap_or_default(),
        )?),
        AuthType::Iam => {
            let mut b = IamAuthenticator::builder().apikey(props.get("APIKEY").unwrap_or_default());
            if let Some(url) = props.get("AUTH_URL") {
                b = b.url(url);
            }
            if let (Some(id), Some(secret)) = (props.get("CLIENT_ID"), props.get("CLIENT_SECRET")) {
                b = b.client_credentials(id, secret);
            }
            if let Some(scope) = props.get("SCOPE") {
                b = b.scope(scope);
            }
            b = b.disable_ssl_verification(props.get_bool("AUTH_DISABLE_SSL"));
            Arc::new(b.build()?)
        }
        AuthType::Cp4d => {
            let mut b = CloudPakForDataAuthenticator::builder()
                .url(props.get("AUTH_URL").unwrap_or_default())
                .username(props.get("USERNAME").unwrap_or_default());
            if let Some(password) = props.get("PASSWORD") {
                b = b.password(password);
            }
            if let Some(apikey) = props.get("APIKEY") {
                b = b.apikey(apikey);
            }
            b = b.disable_ssl_verification(props.get_bool("AUTH_DISABLE_SSL"));
            Arc::new(b.build()?)
        }
    };
    Ok(authenticator)
}

/// Resolve service properties from the environment and build the authenticator.
pub fn from_service_name(service_name: &str) -> Result<Arc<dyn Authenticator>> {
    let props = config::read_service_properties(service_name)?;
    if props.is_empty() {
        return Err(Error::configuration_with_context(
            "no configuration found for service",
            ErrorContext::new().with_details(format!("service name '{}'", service_name)),
        ));
    }
    from_properties(&props)
}

/// Credentials wrapped in braces or quotes are almost always copy/paste mistakes.
pub(crate) fn has_bad_first_or_last_char(s: &str) -> bool {
    s.starts_with('{') || s.starts_with('"') || s.ends_with('}') || s.ends_with('"')
}

pub(crate) fn check_credential(field: &str, value: &str, source: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::configuration_with_context(
            format!("the {} property is required", field),
            ErrorContext::new().with_field_path(field).with_source(source),
        ));
    }
    if has_bad_first_or_last_char(value) {
        return Err(Error::configuration_with_context(
            format!(
                "the {} property shouldn't start or end with curly brackets or quotes",
                field
            ),
            ErrorContext::new().with_field_path(field).with_source(source),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn props(pairs: &[(&str, &str)]) -> ServiceProperties {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceProperties::from_map("discovery", map)
    }

    #[test]
    fn auth_type_parsing_is_case_insensitive() {
        assert_eq!("IAM".parse::<AuthType>().unwrap(), AuthType::Iam);
        assert_eq!("noAuth".parse::<AuthType>().unwrap(), AuthType::NoAuth);
        assert_eq!("BearerToken".parse::<AuthType>().unwrap(), AuthType::BearerToken);
        assert_eq!(AuthType::Cp4d.to_string(), "cp4d");
    }

    #[test]
    fn unknown_auth_type_is_a_configuration_error() {
        let err = from_properties(&props(&[("AUTH_TYPE", "kerberos")])).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("kerberos"));
    }

    #[test]
    fn builds_each_recognized_type() {
        let a = from_properties(&props(&[("AUTH_TYPE", "noauth")])).unwrap();
        assert_eq!(a.auth_type(), AuthType::NoAuth);

        let a = from_properties(&props(&[
            ("AUTH_TYPE", "basic"),
            ("USERNAME", "user"),
            ("PASSWORD", "pass"),
        ]))
        .unwrap();
        assert_eq!(a.auth_type(), AuthType::Basic);

        let a = from_properties(&props(&[("AUTH_TYPE", "bearerToken"), ("BEARER_TOKEN", "tok")]))
            .unwrap();
        assert_eq!(a.auth_type(), AuthType::BearerToken);

        let a = from_properties(&props(&[("APIKEY", "my-key")])).unwrap();
        assert_eq!(a.auth_type(), AuthType::Iam);

        let a = from_properties(&props(&[
            ("AUTH_TYPE", "cp4d"),
            ("AUTH_URL", "https://cp4d.example.com/icp4d-api"),
            ("USERNAME", "admin"),
            ("PASSWORD", "secret"),
        ]))
        .unwrap();
        assert_eq!(a.auth_type(), AuthType::Cp4d);
    }

    #[test]
    fn iam_without_apikey_fails() {
        assert!(from_properties(&props(&[("AUTH_TYPE", "iam")])).is_err());
    }

    #[test]
    fn bad_characters_are_rejected() {
        assert!(has_bad_first_or_last_char("{apikey}"));
        assert!(has_bad_first_or_last_char("\"apikey\""));
        assert!(!has_bad_first_or_last_char("api{key"));
        assert!(check_credential("APIKEY", "{x}", "test").is_err());
        assert!(check_credential("APIKEY", "", "test").is_err());
        assert!(check_credential("APIKEY", "ok", "test").is_ok());
    }
}
