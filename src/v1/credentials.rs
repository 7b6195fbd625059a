//! Source credentials and secure gateways used by crawler configurations.

use super::models::{
    CredentialDetails, Credentials, CredentialsList, DeleteCredentials, Gateway, GatewayDelete,
    GatewayList, StatusDetails,
};
use super::DiscoveryV1;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, RequestContext};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

const CREDENTIALS: &str = "/v1/environments/{environment_id}/credentials";
const CREDENTIAL: &str = "/v1/environments/{environment_id}/credentials/{credential_id}";
const GATEWAYS: &str = "/v1/environments/{environment_id}/gateways";
const GATEWAY: &str = "/v1/environments/{environment_id}/gateways/{gateway_id}";

#[derive(Debug, Clone, Default)]
pub struct EnvironmentOptions {
    pub environment_id: String,
    pub headers: HashMap<String, String>,
}

impl EnvironmentOptions {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            ..Default::default()
        }
    }
}

request_options!(EnvironmentOptions; environment_id);

pub type ListCredentialsOptions = EnvironmentOptions;
pub type ListGatewaysOptions = EnvironmentOptions;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCredentialsOptions {
    #[serde(skip)]
    pub environment_id: String,
    /// `box`, `salesforce`, `sharepoint`, `web_crawl` or `cloud_object_storage`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_details: Option<CredentialDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusDetails>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateCredentialsOptions {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(CreateCredentialsOptions {
    with_source_type => source_type: String,
    with_credential_details => credential_details: CredentialDetails,
    with_status => status: StatusDetails,
});
request_options!(CreateCredentialsOptions; environment_id);

#[derive(Debug, Clone, Default)]
pub struct CredentialOptions {
    pub environment_id: String,
    pub credential_id: String,
    pub headers: HashMap<String, String>,
}

impl CredentialOptions {
    pub fn new(environment_id: impl Into<String>, credential_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            credential_id: credential_id.into(),
            ..Default::default()
        }
    }
}

request_options!(CredentialOptions; environment_id, credential_id);

pub type GetCredentialsOptions = CredentialOptions;
pub type DeleteCredentialsOptions = CredentialOptions;

/// Replaces the stored credentials; secrets must be resent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCredentialsOptions {
    #[serde(skip)]
    pub environment_id: String,
    #[serde(skip)]
    pub credential_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_details: Option<CredentialDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusDetails>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateCredentialsOptions {
    pub fn new(environment_id: impl Into<String>, credential_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            credential_id: credential_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(UpdateCredentialsOptions {
    with_source_type => source_type: String,
    with_credential_details => credential_details: CredentialDetails,
    with_status => status: StatusDetails,
});
request_options!(UpdateCredentialsOptions; environment_id, credential_id);

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateGatewayOptions {
    #[serde(skip)]
    pub environment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateGatewayOptions {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(CreateGatewayOptions { with_name => name: String });
request_options!(CreateGatewayOptions; environment_id);

#[derive(Debug, Clone, Default)]
pub struct GatewayOptions {
    pub environment_id: String,
    pub gateway_id: String,
    pub headers: HashMap<String, String>,
}

impl GatewayOptions {
    pub fn new(environment_id: impl Into<String>, gateway_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            gateway_id: gateway_id.into(),
            ..Default::default()
        }
    }
}

request_options!(GatewayOptions; environment_id, gateway_id);

pub type GetGatewayOptions = GatewayOptions;
pub type DeleteGatewayOptions = GatewayOptions;

impl DiscoveryV1 {
    pub async fn list_credentials(
        &self,
        options: &ListCredentialsOptions,
    ) -> Result<DetailedResponse<CredentialsList>> {
        self.list_credentials_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_credentials_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListCredentialsOptions,
    ) -> Result<DetailedResponse<CredentialsList>> {
        options.validate()?;
        let request = self
            .request(Method::GET, CREDENTIALS, "ListCredentials")
            .path_param("environment_id", &options.environment_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn create_credentials(
        &self,
        options: &CreateCredentialsOptions,
    ) -> Result<DetailedResponse<Credentials>> {
        self.create_credentials_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_credentials_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateCredentialsOptions,
    ) -> Result<DetailedResponse<Credentials>> {
        options.validate()?;
        let request = self
            .request(Method::POST, CREDENTIALS, "CreateCredentials")
            .path_param("environment_id", &options.environment_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    /// Secret fields are never returned.
    pub async fn get_credentials(
        &self,
        options: &GetCredentialsOptions,
    ) -> Result<DetailedResponse<Credentials>> {
        self.get_credentials_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_credentials_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetCredentialsOptions,
    ) -> Result<DetailedResponse<Credentials>> {
        options.validate()?;
        let request = self
            .request(Method::GET, CREDENTIAL, "GetCredentials")
            .path_param("environment_id", &options.environment_id)
            .path_param("credential_id", &options.credential_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn update_credentials(
        &self,
        options: &UpdateCredentialsOptions,
    ) -> Result<DetailedResponse<Credentials>> {
        self.update_credentials_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn update_credentials_with_context(
        &self,
        ctx: &RequestContext,
        options: &UpdateCredentialsOptions,
    ) -> Result<DetailedResponse<Credentials>> {
        options.validate()?;
        let request = self
            .request(Method::PUT, CREDENTIAL, "UpdateCredentials")
            .path_param("environment_id", &options.environment_id)
            .path_param("credential_id", &options.credential_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn delete_credentials(
        &self,
        options: &DeleteCredentialsOptions,
    ) -> Result<DetailedResponse<DeleteCredentials>> {
        self.delete_credentials_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_credentials_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteCredentialsOptions,
    ) -> Result<DetailedResponse<DeleteCredentials>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, CREDENTIAL, "DeleteCredentials")
            .path_param("environment_id", &options.environment_id)
            .path_param("credential_id", &options.credential_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn list_gateways(
        &self,
        options: &ListGatewaysOptions,
    ) -> Result<DetailedResponse<GatewayList>> {
        self.list_gateways_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_gateways_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListGatewaysOptions,
    ) -> Result<DetailedResponse<GatewayList>> {
        options.validate()?;
        let request = self
            .request(Method::GET, GATEWAYS, "ListGateways")
            .path_param("environment_id", &options.environment_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn create_gateway(
        &self,
        options: &CreateGatewayOptions,
    ) -> Result<DetailedResponse<Gateway>> {
        self.create_gateway_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_gateway_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateGatewayOptions,
    ) -> Result<DetailedResponse<Gateway>> {
        options.validate()?;
        let request = self
            .request(Method::POST, GATEWAYS, "CreateGateway")
            .path_param("environment_id", &options.environment_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn get_gateway(
        &self,
        options: &GetGatewayOptions,
    ) -> Result<DetailedResponse<Gateway>> {
        self.get_gateway_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_gateway_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetGatewayOptions,
    ) -> Result<DetailedResponse<Gateway>> {
        options.validate()?;
        let request = self
            .request(Method::GET, GATEWAY, "GetGateway")
            .path_param("environment_id", &options.environment_id)
            .path_param("gateway_id", &options.gateway_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn delete_gateway(
        &self,
        options: &DeleteGatewayOptions,
    ) -> Result<DetailedResponse<GatewayDelete>> {
        self.delete_gateway_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_gateway_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteGatewayOptions,
    ) -> Result<DetailedResponse<GatewayDelete>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, GATEWAY, "DeleteGateway")
            .path_param("environment_id", &options.environment_id)
            .path_param("gateway_id", &options.gateway_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sharepoint_details_use_dotted_site_collection_key() {
        let opts = CreateCredentialsOptions::new("env")
            .with_source_type("sharepoint")
            .with_credential_details(CredentialDetails {
                credential_type: Some("saml".into()),
                site_collection_path: Some("/sites/docs".into()),
                ..Default::default()
            });
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({
                "source_type": "sharepoint",
                "credential_details": {
                    "credential_type": "saml",
                    "site_collection.path": "/sites/docs"
                }
            })
        );
    }
}
