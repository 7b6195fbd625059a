use super::models::{
    DeleteEnvironmentResponse, Environment, ListCollectionFieldsResponse, ListEnvironmentsResponse,
};
use super::DiscoveryV1;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, RequestContext};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

const ENVIRONMENTS: &str = "/v1/environments";
const ENVIRONMENT: &str = "/v1/environments/{environment_id}";

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateEnvironmentOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Plan size; `LT` when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateEnvironmentOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

option_setters!(CreateEnvironmentOptions {
    with_description => description: String,
    with_size => size: String,
});
request_options!(CreateEnvironmentOptions; name);

#[derive(Debug, Clone, Default)]
pub struct ListEnvironmentsOptions {
    /// Exact environment name to match.
    pub name: Option<String>,
    pub headers: HashMap<String, String>,
}

impl ListEnvironmentsOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

option_setters!(ListEnvironmentsOptions { with_name => name: String });
request_options!(ListEnvironmentsOptions);

#[derive(Debug, Clone, Default)]
pub struct GetEnvironmentOptions {
    pub environment_id: String,
    pub headers: HashMap<String, String>,
}

impl GetEnvironmentOptions {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            ..Default::default()
        }
    }
}

request_options!(GetEnvironmentOptions; environment_id);

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateEnvironmentOptions {
    #[serde(skip)]
    pub environment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only upgrades are accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateEnvironmentOptions {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(UpdateEnvironmentOptions {
    with_name => name: String,
    with_description => description: String,
    with_size => size: String,
});
request_options!(UpdateEnvironmentOptions; environment_id);

#[derive(Debug, Clone, Default)]
pub struct DeleteEnvironmentOptions {
    pub environment_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteEnvironmentOptions {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            ..Default::default()
        }
    }
}

request_options!(DeleteEnvironmentOptions; environment_id);

/// Fields shared by several collections of one environment.
#[derive(Debug, Clone, Default)]
pub struct ListFieldsOptions {
    pub environment_id: String,
    pub collection_ids: Vec<String>,
    pub headers: HashMap<String, String>,
}

impl ListFieldsOptions {
    pub fn new(environment_id: impl Into<String>, collection_ids: Vec<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_ids,
            ..Default::default()
        }
    }
}

request_options!(ListFieldsOptions; environment_id, collection_ids);

impl DiscoveryV1 {
    /// Answers `201 Created`.
    pub async fn create_environment(
        &self,
        options: &CreateEnvironmentOptions,
    ) -> Result<DetailedResponse<Environment>> {
        self.create_environment_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_environment_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateEnvironmentOptions,
    ) -> Result<DetailedResponse<Environment>> {
        options.validate()?;
        let request = self
            .request(Method::POST, ENVIRONMENTS, "CreateEnvironment")
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn list_environments(
        &self,
        options: &ListEnvironmentsOptions,
    ) -> Result<DetailedResponse<ListEnvironmentsResponse>> {
        self.list_environments_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_environments_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListEnvironmentsOptions,
    ) -> Result<DetailedResponse<ListEnvironmentsResponse>> {
        options.validate()?;
        let request = self
            .request(Method::GET, ENVIRONMENTS, "ListEnvironments")
            .query_opt("name", options.name.as_ref())
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn get_environment(
        &self,
        options: &GetEnvironmentOptions,
    ) -> Result<DetailedResponse<Environment>> {
        self.get_environment_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_environment_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetEnvironmentOptions,
    ) -> Result<DetailedResponse<Environment>> {
        options.validate()?;
        let request = self
            .request(Method::GET, ENVIRONMENT, "GetEnvironment")
            .path_param("environment_id", &options.environment_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn update_environment(
        &self,
        options: &UpdateEnvironmentOptions,
    ) -> Result<DetailedResponse<Environment>> {
        self.update_environment_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn update_environment_with_context(
        &self,
        ctx: &RequestContext,
        options: &UpdateEnvironmentOptions,
    ) -> Result<DetailedResponse<Environment>> {
        options.validate()?;
        let request = self
            .request(Method::PUT, ENVIRONMENT, "UpdateEnvironment")
            .path_param("environment_id", &options.environment_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn delete_environment(
        &self,
        options: &DeleteEnvironmentOptions,
    ) -> Result<DetailedResponse<DeleteEnvironmentResponse>> {
        self.delete_environment_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_environment_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteEnvironmentOptions,
    ) -> Result<DetailedResponse<DeleteEnvironmentResponse>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, ENVIRONMENT, "DeleteEnvironment")
            .path_param("environment_id", &options.environment_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn list_fields(
        &self,
        options: &ListFieldsOptions,
    ) -> Result<DetailedResponse<ListCollectionFieldsResponse>> {
        self.list_fields_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_fields_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListFieldsOptions,
    ) -> Result<DetailedResponse<ListCollectionFieldsResponse>> {
        options.validate()?;
        let request = self
            .request(Method::GET, "/v1/environments/{environment_id}/fields", "ListFields")
            .path_param("environment_id", &options.environment_id)
            .query_list("collection_ids", &options.collection_ids)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }
}
