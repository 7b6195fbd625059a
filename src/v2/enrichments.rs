use super::models::{CreateEnrichment, Enrichment, Enrichments};
use super::DiscoveryV2;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, FilePart, RequestContext};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

const ENRICHMENTS: &str = "/v2/projects/{project_id}/enrichments";
const ENRICHMENT: &str = "/v2/projects/{project_id}/enrichments/{enrichment_id}";

#[derive(Debug, Clone, Default)]
pub struct ListEnrichmentsOptions {
    pub project_id: String,
    pub headers: HashMap<String, String>,
}

impl ListEnrichmentsOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

request_options!(ListEnrichmentsOptions; project_id);

/// Create an enrichment, optionally uploading its dictionary, regex or model file.
#[derive(Debug, Clone, Default)]
pub struct CreateEnrichmentOptions {
    pub project_id: String,
    pub enrichment: Option<CreateEnrichment>,
    pub file: Option<FilePart>,
    pub headers: HashMap<String, String>,
}

impl CreateEnrichmentOptions {
    pub fn new(project_id: impl Into<String>, enrichment: CreateEnrichment) -> Self {
        Self {
            project_id: project_id.into(),
            enrichment: Some(enrichment),
            ..Default::default()
        }
    }
}

option_setters!(CreateEnrichmentOptions { with_file => file: FilePart });
request_options!(CreateEnrichmentOptions; project_id, enrichment);

#[derive(Debug, Clone, Default)]
pub struct GetEnrichmentOptions {
    pub project_id: String,
    pub enrichment_id: String,
    pub headers: HashMap<String, String>,
}

impl GetEnrichmentOptions {
    pub fn new(project_id: impl Into<String>, enrichment_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            enrichment_id: enrichment_id.into(),
            ..Default::default()
        }
    }
}

request_options!(GetEnrichmentOptions; project_id, enrichment_id);

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateEnrichmentOptions {
    #[serde(skip)]
    pub project_id: String,
    #[serde(skip)]
    pub enrichment_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateEnrichmentOptions {
    pub fn new(
        project_id: impl Into<String>,
        enrichment_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            enrichment_id: enrichment_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

option_setters!(UpdateEnrichmentOptions { with_description => description: String });
request_options!(UpdateEnrichmentOptions; project_id, enrichment_id, name);

#[derive(Debug, Clone, Default)]
pub struct DeleteEnrichmentOptions {
    pub project_id: String,
    pub enrichment_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteEnrichmentOptions {
    pub fn new(project_id: impl Into<String>, enrichment_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            enrichment_id: enrichment_id.into(),
            ..Default::default()
        }
    }
}

request_options!(DeleteEnrichmentOptions; project_id, enrichment_id);

impl DiscoveryV2 {
    pub async fn list_enrichments(
        &self,
        options: &ListEnrichmentsOptions,
    ) -> Result<DetailedResponse<Enrichments>> {
        self.list_enrichments_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_enrichments_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListEnrichmentsOptions,
    ) -> Result<DetailedResponse<Enrichments>> {
        options.validate()?;
        let request = self
            .request(Method::GET, ENRICHMENTS, "ListEnrichments")
            .path_param("project_id", &options.project_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Answers `201 Created`.
    pub async fn create_enrichment(
        &self,
        options: &CreateEnrichmentOptions,
    ) -> Result<DetailedResponse<Enrichment>> {
        self.create_enrichment_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_enrichment_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateEnrichmentOptions,
    ) -> Result<DetailedResponse<Enrichment>> {
        options.validate()?;
        let mut request = self
            .request(Method::POST, ENRICHMENTS, "CreateEnrichment")
            .path_param("project_id", &options.project_id)
            .headers(options.headers())
            .form_json("enrichment", &options.enrichment)?;
        if let Some(file) = &options.file {
            request = request.form_file("file", file.clone());
        }
        self.service.send(ctx, request).await
    }

    pub async fn get_enrichment(
        &self,
        options: &GetEnrichmentOptions,
    ) -> Result<DetailedResponse<Enrichment>> {
        self.get_enrichment_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_enrichment_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetEnrichmentOptions,
    ) -> Result<DetailedResponse<Enrichment>> {
        options.validate()?;
        let request = self
            .request(Method::GET, ENRICHMENT, "GetEnrichment")
            .path_param("project_id", &options.project_id)
            .path_param("enrichment_id", &options.enrichment_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn update_enrichment(
        &self,
        options: &UpdateEnrichmentOptions,
    ) -> Result<DetailedResponse<Enrichment>> {
        self.update_enrichment_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn update_enrichment_with_context(
        &self,
        ctx: &RequestContext,
        options: &UpdateEnrichmentOptions,
    ) -> Result<DetailedResponse<Enrichment>> {
        options.validate()?;
        let request = self
            .request(Method::POST, ENRICHMENT, "UpdateEnrichment")
            .path_param("project_id", &options.project_id)
            .path_param("enrichment_id", &options.enrichment_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    /// Answers `204 No Content`.
    pub async fn delete_enrichment(
        &self,
        options: &DeleteEnrichmentOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_enrichment_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_enrichment_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteEnrichmentOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, ENRICHMENT, "DeleteEnrichment")
            .path_param("project_id", &options.project_id)
            .path_param("enrichment_id", &options.enrichment_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }
}
