use super::{check_credential, AuthType, Authenticator};
use crate::{Error, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// HTTP basic authentication.
#[derive(Clone)]
pub struct BasicAuthenticator {
    username: String,
    password: String,
}

impl BasicAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let a = Self {
            username: username.into(),
            password: password.into(),
        };
        a.validate()?;
        Ok(a)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn header_value(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", encoded)
    }
}

impl std::fmt::Debug for BasicAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthenticator")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::Basic
    }

    fn validate(&self) -> Result<()> {
        check_credential("USERNAME", &self.username, "basic_authenticator")?;
        check_credential("PASSWORD", &self.password, "basic_authenticator")
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        let value = HeaderValue::from_str(&self.header_value())
            .map_err(|e| Error::configuration(format!("invalid basic credentials: {}", e)))?;
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sets_basic_header() {
        let a = BasicAuthenticator::new("mookie", "betts").unwrap();
        let mut headers = HeaderMap::new();
        a.authenticate(&mut headers).await.unwrap();
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap(),
            "Basic bW9va2llOmJldHRz"
        );
    }

    #[test]
    fn rejects_missing_or_quoted_values() {
        assert!(BasicAuthenticator::new("", "pass").is_err());
        assert!(BasicAuthenticator::new("user", "").is_err());
        assert!(BasicAuthenticator::new("\"user\"", "pass").is_err());
    }

    #[test]
    fn debug_hides_password() {
        let a = BasicAuthenticator::new("user", "hunter2").unwrap();
        assert!(!format!("{:?}", a).contains("hunter2"));
    }
}
