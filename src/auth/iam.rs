use super::token::TokenCache;
use super::{check_credential, AuthType, Authenticator};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";
const TOKEN_PATH: &str = "/identity/token";
const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Exchanges an API key for short-lived IAM access tokens.
pub struct IamAuthenticator {
    apikey: String,
    url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    scope: Option<String>,
    http: reqwest::Client,
    cache: TokenCache,
}

impl IamAuthenticator {
    pub fn builder() -> IamAuthenticatorBuilder {
        IamAuthenticatorBuilder::new()
    }

    pub fn new(apikey: impl Into<String>) -> Result<Self> {
        Self::builder().apikey(apikey).build()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Drop the cached token so the next request fetches a new one.
    pub async fn invalidate_token(&self) {
        self.cache.clear().await;
    }

    /// Current access token, fetching or refreshing it when needed.
    pub async fn token(&self) -> Result<String> {
        self.cache.get_or_fetch(|| self.request_token()).await
    }

    async fn request_token(&self) -> Result<(String, Duration)> {
        let endpoint = format!("{}{}", self.url.trim_end_matches('/'), TOKEN_PATH);
        let mut form = vec![
            ("grant_type", GRANT_TYPE.to_string()),
            ("apikey", self.apikey.clone()),
            ("response_type", "cloud_iam".to_string()),
        ];
        if let Some(scope) = &self.scope {
            form.push(("scope", scope.clone()));
        }

        let mut request = self
            .http
            .post(&endpoint)
            .header(ACCEPT, "application/json")
            .form(&form);
        if let (Some(id), Some(secret)) = (&self.client_id, &self.client_secret) {
            request = request.basic_auth(id, Some(secret));
        }

        let response = request.send().await.map_err(|e| {
            Error::authentication_with_context(
                format!("IAM token request failed: {}", e),
                ErrorContext::new().with_source("iam_authenticator"),
            )
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::authentication_with_context(
                format!("Failed to read IAM token response: {}", e),
                ErrorContext::new().with_source("iam_authenticator"),
            )
        })?;
        if !status.is_success() {
            return Err(Error::authentication_with_context(
                format!("IAM token request rejected ({}): {}", status, body),
                ErrorContext::new().with_source("iam_authenticator"),
            ));
        }
        let parsed: IamTokenResponse = serde_json::from_str(&body).map_err(|e| {
            Error::authentication_with_context(
                format!("Invalid IAM token response: {}", e),
                ErrorContext::new().with_source("iam_authenticator"),
            )
        })?;
        debug!(endpoint = endpoint.as_str(), "fetched IAM access token");
        let lifetime = Duration::from_secs(parsed.expires_in.unwrap_or(3600));
        Ok((parsed.access_token, lifetime))
    }
}

impl std::fmt::Debug for IamAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IamAuthenticator")
            .field("url", &self.url)
            .field("apikey", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("scope", &self.scope)
            .finish()
    }
}

#[async_trait]
impl Authenticator for IamAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::Iam
    }

    fn validate(&self) -> Result<()> {
        check_credential("APIKEY", &self.apikey, "iam_authenticator")?;
        if self.client_id.is_some() != self.client_secret.is_some() {
            return Err(Error::configuration_with_context(
                "CLIENT_ID and CLIENT_SECRET must be set together",
                ErrorContext::new()
                    .with_field_path("CLIENT_ID")
                    .with_source("iam_authenticator"),
            ));
        }
        Ok(())
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        let token = self.token().await?;
        let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            Error::authentication_with_context(
                format!("IAM returned an unusable token: {}", e),
                ErrorContext::new().with_source("iam_authenticator"),
            )
        })?;
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

pub struct IamAuthenticatorBuilder {
    apikey: Option<String>,
    url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    scope: Option<String>,
    disable_ssl_verification: bool,
    timeout_secs: u64,
}

impl IamAuthenticatorBuilder {
    pub fn new() -> Self {
        Self {
            apikey: None,
            url: None,
            client_id: None,
            client_secret: None,
            scope: None,
            disable_ssl_verification: false,
            timeout_secs: 30,
        }
    }
    pub fn apikey(mut self, apikey: impl Into<String>) -> Self {
        self.apikey = Some(apikey.into());
        self
    }
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
    pub fn client_credentials(mut self, id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self.client_secret = Some(secret.into());
        self
    }
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
    pub fn disable_ssl_verification(mut self, disable: bool) -> Self {
        self.disable_ssl_verification = disable;
        self
    }

    pub fn build(self) -> Result<IamAuthenticator> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .danger_accept_invalid_certs(self.disable_ssl_verification)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        let url = self
            .url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IAM_URL.to_string());
        let authenticator = IamAuthenticator {
            apikey: self.apikey.unwrap_or_default(),
            url,
            client_id: self.client_id,
            client_secret: self.client_secret,
            scope: self.scope,
            http,
            cache: TokenCache::new(),
        };
        authenticator.validate()?;
        Ok(authenticator)
    }
}

impl Default for IamAuthenticatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn fetches_and_caches_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/identity/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), GRANT_TYPE.into()),
                Matcher::UrlEncoded("apikey".into(), "my-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"abc123","token_type":"Bearer","expires_in":3600}"#)
            .expect(1)
            .create_async()
            .await;

        let auth = IamAuthenticator::builder()
            .apikey("my-key")
            .url(server.url())
            .build()
            .unwrap();

        for _ in 0..2 {
            let mut headers = HeaderMap::new();
            auth.authenticate(&mut headers).await.unwrap();
            assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc123");
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn client_credentials_are_sent_as_basic_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/identity/token")
            .match_header("authorization", "Basic Yng6Yng=")
            .with_status(200)
            .with_body(r#"{"access_token":"t","expires_in":60}"#)
            .create_async()
            .await;

        let auth = IamAuthenticator::builder()
            .apikey("k")
            .url(server.url())
            .client_credentials("bx", "bx")
            .build()
            .unwrap();
        assert_eq!(auth.token().await.unwrap(), "t");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_token_request_is_an_authentication_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/identity/token")
            .with_status(400)
            .with_body(r#"{"errorMessage":"Provided API key could not be found"}"#)
            .create_async()
            .await;

        let auth = IamAuthenticator::builder()
            .apikey("bad")
            .url(server.url())
            .build()
            .unwrap();
        let err = auth.token().await.unwrap_err();
        assert!(matches!(err, Error::Authentication { .. }));
    }

    #[test]
    fn validation_rules() {
        assert!(IamAuthenticator::new("").is_err());
        assert!(IamAuthenticator::new("{key}").is_err());
        let mut b = IamAuthenticator::builder().apikey("k");
        b.client_id = Some("only-id".into());
        assert!(b.build().is_err());
        let a = IamAuthenticator::new("k").unwrap();
        assert_eq!(a.url(), DEFAULT_IAM_URL);
    }
}
