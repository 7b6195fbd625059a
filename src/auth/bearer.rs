use super::{check_credential, AuthType, Authenticator};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::sync::RwLock;

/// Static bearer token supplied by the caller.
///
/// The token can be swapped with [`set_bearer_token`](Self::set_bearer_token)
/// once it expires; the authenticator never refreshes it on its own.
pub struct BearerTokenAuthenticator {
    token: RwLock<String>,
}

impl BearerTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let a = Self {
            token: RwLock::new(token.into()),
        };
        a.validate()?;
        Ok(a)
    }

    pub fn set_bearer_token(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token.into();
        }
    }

    fn current(&self) -> String {
        self.token.read().map(|t| t.clone()).unwrap_or_default()
    }
}

impl std::fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthenticator")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::BearerToken
    }

    fn validate(&self) -> Result<()> {
        check_credential("BEARER_TOKEN", &self.current(), "bearer_token_authenticator")
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.current()))
            .map_err(|e| Error::configuration(format!("invalid bearer token: {}", e)))?;
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn token_can_be_rotated() {
        let a = BearerTokenAuthenticator::new("first").unwrap();
        let mut headers = HeaderMap::new();
        a.authenticate(&mut headers).await.unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer first");

        a.set_bearer_token("second");
        a.authenticate(&mut headers).await.unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer second");
    }

    #[test]
    fn empty_token_is_invalid() {
        assert!(BearerTokenAuthenticator::new("").is_err());
    }
}
