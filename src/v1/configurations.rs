//! Document processing configurations: conversion, enrichment and
//! normalization steps plus an optional crawl source.

use super::models::{
    Configuration, DeleteConfigurationResponse, Enrichment, ListConfigurationsResponse,
    NormalizationOperation, Source,
};
use super::DiscoveryV1;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, RequestContext};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

const CONFIGURATIONS: &str = "/v1/environments/{environment_id}/configurations";
const CONFIGURATION: &str = "/v1/environments/{environment_id}/configurations/{configuration_id}";

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateConfigurationOptions {
    #[serde(skip)]
    pub environment_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichments: Option<Vec<Enrichment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalizations: Option<Vec<NormalizationOperation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateConfigurationOptions {
    pub fn new(environment_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

option_setters!(CreateConfigurationOptions {
    with_description => description: String,
    with_conversions => conversions: Value,
    with_enrichments => enrichments: Vec<Enrichment>,
    with_normalizations => normalizations: Vec<NormalizationOperation>,
    with_source => source: Source,
});
request_options!(CreateConfigurationOptions; environment_id, name);

#[derive(Debug, Clone, Default)]
pub struct ListConfigurationsOptions {
    pub environment_id: String,
    pub name: Option<String>,
    pub headers: HashMap<String, String>,
}

impl ListConfigurationsOptions {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(ListConfigurationsOptions { with_name => name: String });
request_options!(ListConfigurationsOptions; environment_id);

#[derive(Debug, Clone, Default)]
pub struct GetConfigurationOptions {
    pub environment_id: String,
    pub configuration_id: String,
    pub headers: HashMap<String, String>,
}

impl GetConfigurationOptions {
    pub fn new(environment_id: impl Into<String>, configuration_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            configuration_id: configuration_id.into(),
            ..Default::default()
        }
    }
}

request_options!(GetConfigurationOptions; environment_id, configuration_id);

/// Replaces the whole configuration; omitted steps are removed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateConfigurationOptions {
    #[serde(skip)]
    pub environment_id: String,
    #[serde(skip)]
    pub configuration_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichments: Option<Vec<Enrichment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalizations: Option<Vec<NormalizationOperation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateConfigurationOptions {
    pub fn new(
        environment_id: impl Into<String>,
        configuration_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            configuration_id: configuration_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

option_setters!(UpdateConfigurationOptions {
    with_description => description: String,
    with_conversions => conversions: Value,
    with_enrichments => enrichments: Vec<Enrichment>,
    with_normalizations => normalizations: Vec<NormalizationOperation>,
    with_source => source: Source,
});
request_options!(UpdateConfigurationOptions; environment_id, configuration_id, name);

#[derive(Debug, Clone, Default)]
pub struct DeleteConfigurationOptions {
    pub environment_id: String,
    pub configuration_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteConfigurationOptions {
    pub fn new(environment_id: impl Into<String>, configuration_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            configuration_id: configuration_id.into(),
            ..Default::default()
        }
    }
}

request_options!(DeleteConfigurationOptions; environment_id, configuration_id);

impl DiscoveryV1 {
    /// Answers `201 Created`.
    pub async fn create_configuration(
        &self,
        options: &CreateConfigurationOptions,
    ) -> Result<DetailedResponse<Configuration>> {
        self.create_configuration_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_configuration_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateConfigurationOptions,
    ) -> Result<DetailedResponse<Configuration>> {
        options.validate()?;
        let request = self
            .request(Method::POST, CONFIGURATIONS, "CreateConfiguration")
            .path_param("environment_id", &options.environment_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn list_configurations(
        &self,
        options: &ListConfigurationsOptions,
    ) -> Result<DetailedResponse<ListConfigurationsResponse>> {
        self.list_configurations_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_configurations_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListConfigurationsOptions,
    ) -> Result<DetailedResponse<ListConfigurationsResponse>> {
        options.validate()?;
        let request = self
            .request(Method::GET, CONFIGURATIONS, "ListConfigurations")
            .path_param("environment_id", &options.environment_id)
            .query_opt("name", options.name.as_ref())
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn get_configuration(
        &self,
        options: &GetConfigurationOptions,
    ) -> Result<DetailedResponse<Configuration>> {
        self.get_configuration_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_configuration_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetConfigurationOptions,
    ) -> Result<DetailedResponse<Configuration>> {
        options.validate()?;
        let request = self
            .request(Method::GET, CONFIGURATION, "GetConfiguration")
            .path_param("environment_id", &options.environment_id)
            .path_param("configuration_id", &options.configuration_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn update_configuration(
        &self,
        options: &UpdateConfigurationOptions,
    ) -> Result<DetailedResponse<Configuration>> {
        self.update_configuration_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn update_configuration_with_context(
        &self,
        ctx: &RequestContext,
        options: &UpdateConfigurationOptions,
    ) -> Result<DetailedResponse<Configuration>> {
        options.validate()?;
        let request = self
            .request(Method::PUT, CONFIGURATION, "UpdateConfiguration")
            .path_param("environment_id", &options.environment_id)
            .path_param("configuration_id", &options.configuration_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn delete_configuration(
        &self,
        options: &DeleteConfigurationOptions,
    ) -> Result<DetailedResponse<DeleteConfigurationResponse>> {
        self.delete_configuration_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_configuration_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteConfigurationOptions,
    ) -> Result<DetailedResponse<DeleteConfigurationResponse>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, CONFIGURATION, "DeleteConfiguration")
            .path_param("environment_id", &options.environment_id)
            .path_param("configuration_id", &options.configuration_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_omits_path_params_and_unset_steps() {
        let opts = CreateConfigurationOptions::new("env", "IBM News")
            .with_conversions(json!({"html": {"exclude_tags_completely": ["script"]}}))
            .with_normalizations(vec![NormalizationOperation {
                operation: Some("remove_nulls".into()),
                ..Default::default()
            }]);
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({
                "name": "IBM News",
                "conversions": {"html": {"exclude_tags_completely": ["script"]}},
                "normalizations": [{"operation": "remove_nulls"}]
            })
        );
    }
}
