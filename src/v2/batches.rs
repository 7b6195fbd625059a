//! External enrichment batches: documents are pulled, enriched by a remote
//! service and pushed back.

use super::models::{ListBatchesResponse, PullBatchesResponse};
use super::DiscoveryV2;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, FilePart, RequestContext};
use crate::Result;
use reqwest::Method;
use std::collections::HashMap;

const BATCHES: &str = "/v2/projects/{project_id}/collections/{collection_id}/batches";
const BATCH: &str = "/v2/projects/{project_id}/collections/{collection_id}/batches/{batch_id}";

#[derive(Debug, Clone, Default)]
pub struct ListBatchesOptions {
    pub project_id: String,
    pub collection_id: String,
    pub headers: HashMap<String, String>,
}

impl ListBatchesOptions {
    pub fn new(project_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

request_options!(ListBatchesOptions; project_id, collection_id);

#[derive(Debug, Clone, Default)]
pub struct PullBatchesOptions {
    pub project_id: String,
    pub collection_id: String,
    pub batch_id: String,
    pub headers: HashMap<String, String>,
}

impl PullBatchesOptions {
    pub fn new(
        project_id: impl Into<String>,
        collection_id: impl Into<String>,
        batch_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            batch_id: batch_id.into(),
            ..Default::default()
        }
    }
}

request_options!(PullBatchesOptions; project_id, collection_id, batch_id);

#[derive(Debug, Clone, Default)]
pub struct PushBatchesOptions {
    pub project_id: String,
    pub collection_id: String,
    pub batch_id: String,
    /// Enriched documents, gzip-compressed JSON lines.
    pub file: Option<FilePart>,
    pub headers: HashMap<String, String>,
}

impl PushBatchesOptions {
    pub fn new(
        project_id: impl Into<String>,
        collection_id: impl Into<String>,
        batch_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            batch_id: batch_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(PushBatchesOptions { with_file => file: FilePart });
request_options!(PushBatchesOptions; project_id, collection_id, batch_id);

impl DiscoveryV2 {
    pub async fn list_batches(
        &self,
        options: &ListBatchesOptions,
    ) -> Result<DetailedResponse<ListBatchesResponse>> {
        self.list_batches_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_batches_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListBatchesOptions,
    ) -> Result<DetailedResponse<ListBatchesResponse>> {
        options.validate()?;
        let request = self
            .request(Method::GET, BATCHES, "ListBatches")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn pull_batches(
        &self,
        options: &PullBatchesOptions,
    ) -> Result<DetailedResponse<PullBatchesResponse>> {
        self.pull_batches_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn pull_batches_with_context(
        &self,
        ctx: &RequestContext,
        options: &PullBatchesOptions,
    ) -> Result<DetailedResponse<PullBatchesResponse>> {
        options.validate()?;
        let request = self
            .request(Method::GET, BATCH, "PullBatches")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("batch_id", &options.batch_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Push enriched documents back. Answers `202 Accepted` with a JSON boolean.
    pub async fn push_batches(
        &self,
        options: &PushBatchesOptions,
    ) -> Result<DetailedResponse<bool>> {
        self.push_batches_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn push_batches_with_context(
        &self,
        ctx: &RequestContext,
        options: &PushBatchesOptions,
    ) -> Result<DetailedResponse<bool>> {
        options.validate()?;
        let mut request = self
            .request(Method::POST, BATCH, "PushBatches")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("batch_id", &options.batch_id)
            .headers(options.headers());
        if let Some(file) = &options.file {
            request = request.form_file("file", file.clone());
        }
        self.service.send(ctx, request).await
    }
}
