use super::models::AnalyzedDocument;
use super::DiscoveryV2;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, FilePart, RequestContext};
use crate::Result;
use reqwest::Method;
use std::collections::HashMap;

/// Run a document through a collection's enrichments without indexing it.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeDocumentOptions {
    pub project_id: String,
    pub collection_id: String,
    pub file: Option<FilePart>,
    pub filename: Option<String>,
    pub file_content_type: Option<String>,
    /// JSON object sent as the `metadata` part.
    pub metadata: Option<String>,
    pub headers: HashMap<String, String>,
}

impl AnalyzeDocumentOptions {
    pub fn new(project_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(AnalyzeDocumentOptions {
    with_file => file: FilePart,
    with_filename => filename: String,
    with_file_content_type => file_content_type: String,
    with_metadata => metadata: String,
});
request_options!(AnalyzeDocumentOptions; project_id, collection_id);

/// Remove every piece of data tagged with a customer id.
#[derive(Debug, Clone, Default)]
pub struct DeleteUserDataOptions {
    pub customer_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteUserDataOptions {
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            ..Default::default()
        }
    }
}

request_options!(DeleteUserDataOptions; customer_id);

impl DiscoveryV2 {
    pub async fn analyze_document(
        &self,
        options: &AnalyzeDocumentOptions,
    ) -> Result<DetailedResponse<AnalyzedDocument>> {
        self.analyze_document_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn analyze_document_with_context(
        &self,
        ctx: &RequestContext,
        options: &AnalyzeDocumentOptions,
    ) -> Result<DetailedResponse<AnalyzedDocument>> {
        options.validate()?;
        let request = self
            .request(
                Method::POST,
                "/v2/projects/{project_id}/collections/{collection_id}/analyze",
                "AnalyzeDocument",
            )
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        let request = request.document_parts(
            options.file.as_ref(),
            options.filename.as_ref(),
            options.file_content_type.as_ref(),
            options.metadata.as_ref(),
        )?;
        self.service.send(ctx, request).await
    }

    /// Answers `200 OK` with an empty body.
    pub async fn delete_user_data(
        &self,
        options: &DeleteUserDataOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_user_data_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_user_data_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteUserDataOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, "/v2/user_data", "DeleteUserData")
            .query("customer_id", &options.customer_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }
}
