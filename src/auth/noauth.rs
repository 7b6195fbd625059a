use super::{AuthType, Authenticator};
use crate::Result;
use async_trait::async_trait;
use reqwest::header::HeaderMap;

/// Sends requests without credentials (local or proxied deployments).
#[derive(Debug, Clone, Default)]
pub struct NoAuthAuthenticator;

impl NoAuthAuthenticator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Authenticator for NoAuthAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::NoAuth
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    async fn authenticate(&self, _headers: &mut HeaderMap) -> Result<()> {
        Ok(())
    }
}
