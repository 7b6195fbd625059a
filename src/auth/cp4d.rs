use super::token::TokenCache;
use super::{check_credential, AuthType, Authenticator};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const AUTHORIZE_PATH: &str = "/v1/authorize";
const DEFAULT_LIFETIME: Duration = Duration::from_secs(3600);

#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct JwtClaims {
    exp: Option<i64>,
    iat: Option<i64>,
}

/// Token lifetime from the JWT `exp`/`iat` claims, if the token is a readable JWT.
pub(crate) fn jwt_lifetime(token: &str) -> Option<Duration> {
    let payload = token.split('.').nth(1)?;
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: JwtClaims = serde_json::from_slice(&decoded).ok()?;
    let secs = claims.exp? - claims.iat?;
    if secs <= 0 {
        return None;
    }
    Some(Duration::from_secs(secs as u64))
}

/// Cloud Pak for Data: username plus password or API key, exchanged for a JWT.
pub struct CloudPakForDataAuthenticator {
    url: String,
    username: String,
    password: Option<String>,
    apikey: Option<String>,
    http: reqwest::Client,
    cache: TokenCache,
}

impl CloudPakForDataAuthenticator {
    pub fn builder() -> CloudPakForDataAuthenticatorBuilder {
        CloudPakForDataAuthenticatorBuilder::default()
    }

    pub async fn token(&self) -> Result<String> {
        self.cache.get_or_fetch(|| self.request_token()).await
    }

    async fn request_token(&self) -> Result<(String, Duration)> {
        let endpoint = format!("{}{}", self.url.trim_end_matches('/'), AUTHORIZE_PATH);
        let mut body = serde_json::json!({ "username": self.username });
        if let Some(password) = &self.password {
            body["password"] = serde_json::json!(password);
        }
        if let Some(apikey) = &self.apikey {
            body["api_key"] = serde_json::json!(apikey);
        }

        let response = self
            .http
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::authentication_with_context(
                    format!("CP4D token request failed: {}", e),
                    ErrorContext::new().with_source("cp4d_authenticator"),
                )
            })?;
        let status = response.status();
        let text = response.text().await.map_err(|e| {
            Error::authentication_with_context(
                format!("Failed to read CP4D token response: {}", e),
                ErrorContext::new().with_source("cp4d_authenticator"),
            )
        })?;
        if !status.is_success() {
            return Err(Error::authentication_with_context(
                format!("CP4D token request rejected ({}): {}", status, text),
                ErrorContext::new().with_source("cp4d_authenticator"),
            ));
        }
        let parsed: AuthorizeResponse = serde_json::from_str(&text).map_err(|e| {
            Error::authentication_with_context(
                format!("Invalid CP4D token response: {}", e),
                ErrorContext::new().with_source("cp4d_authenticator"),
            )
        })?;
        debug!(endpoint = endpoint.as_str(), "fetched CP4D access token");
        let lifetime = jwt_lifetime(&parsed.token).unwrap_or(DEFAULT_LIFETIME);
        Ok((parsed.token, lifetime))
    }
}

impl std::fmt::Debug for CloudPakForDataAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudPakForDataAuthenticator")
            .field("url", &self.url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for CloudPakForDataAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::Cp4d
    }

    fn validate(&self) -> Result<()> {
        check_credential("AUTH_URL", &self.url, "cp4d_authenticator")?;
        check_credential("USERNAME", &self.username, "cp4d_authenticator")?;
        match (&self.password, &self.apikey) {
            (Some(p), None) => check_credential("PASSWORD", p, "cp4d_authenticator"),
            (None, Some(k)) => check_credential("APIKEY", k, "cp4d_authenticator"),
            _ => Err(Error::configuration_with_context(
                "exactly one of PASSWORD or APIKEY must be specified",
                ErrorContext::new().with_source("cp4d_authenticator"),
            )),
        }
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        let token = self.token().await?;
        let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            Error::authentication_with_context(
                format!("CP4D returned an unusable token: {}", e),
                ErrorContext::new().with_source("cp4d_authenticator"),
            )
        })?;
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

#[derive(Default)]
pub struct CloudPakForDataAuthenticatorBuilder {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    apikey: Option<String>,
    disable_ssl_verification: bool,
}

impl CloudPakForDataAuthenticatorBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
    pub fn apikey(mut self, apikey: impl Into<String>) -> Self {
        self.apikey = Some(apikey.into());
        self
    }
    pub fn disable_ssl_verification(mut self, disable: bool) -> Self {
        self.disable_ssl_verification = disable;
        self
    }

    pub fn build(self) -> Result<CloudPakForDataAuthenticator> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(self.disable_ssl_verification)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        let authenticator = CloudPakForDataAuthenticator {
            url: self.url.unwrap_or_default(),
            username: self.username.unwrap_or_default(),
            password: self.password,
            apikey: self.apikey,
            http,
            cache: TokenCache::new(),
        };
        authenticator.validate()?;
        Ok(authenticator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // {"alg":"none"}.{"iat":1000,"exp":4600}.sig
    const JWT: &str = "eyJhbGciOiJub25lIn0.eyJpYXQiOjEwMDAsImV4cCI6NDYwMH0.c2ln";

    #[test]
    fn lifetime_from_claims() {
        assert_eq!(jwt_lifetime(JWT), Some(Duration::from_secs(3600)));
        assert_eq!(jwt_lifetime("not-a-jwt"), None);
    }

    #[test]
    fn password_xor_apikey() {
        let base = || {
            CloudPakForDataAuthenticator::builder()
                .url("https://cp4d.example.com")
                .username("admin")
        };
        assert!(base().build().is_err());
        assert!(base().password("p").apikey("k").build().is_err());
        assert!(base().password("p").build().is_ok());
        assert!(base().apikey("k").build().is_ok());
    }

    #[tokio::test]
    async fn exchanges_credentials_for_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/icp4d-api/v1/authorize")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "username": "admin",
                "password": "secret"
            })))
            .with_status(200)
            .with_body(format!(r#"{{"token":"{}","_messageCode_":"200"}}"#, JWT))
            .expect(1)
            .create_async()
            .await;

        let auth = CloudPakForDataAuthenticator::builder()
            .url(format!("{}/icp4d-api", server.url()))
            .username("admin")
            .password("secret")
            .build()
            .unwrap();
        let mut headers = HeaderMap::new();
        auth.authenticate(&mut headers).await.unwrap();
        auth.authenticate(&mut headers).await.unwrap();
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            format!("Bearer {}", JWT)
        );
        mock.assert_async().await;
    }
}
