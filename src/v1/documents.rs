use super::models::{DeleteDocumentResponse, DocumentAccepted, DocumentStatus};
use super::DiscoveryV1;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, FilePart, RequestContext};
use crate::Result;
use reqwest::Method;
use std::collections::HashMap;

const DOCUMENTS: &str = "/v1/environments/{environment_id}/collections/{collection_id}/documents";
const DOCUMENT: &str =
    "/v1/environments/{environment_id}/collections/{collection_id}/documents/{document_id}";

/// Ingest a document. Supply `file`, `metadata`, or both.
#[derive(Debug, Clone, Default)]
pub struct AddDocumentOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub file: Option<FilePart>,
    pub filename: Option<String>,
    pub file_content_type: Option<String>,
    /// JSON object, at most 1 MB.
    pub metadata: Option<String>,
    pub headers: HashMap<String, String>,
}

impl AddDocumentOptions {
    pub fn new(environment_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(AddDocumentOptions {
    with_file => file: FilePart,
    with_filename => filename: String,
    with_file_content_type => file_content_type: String,
    with_metadata => metadata: String,
});
request_options!(AddDocumentOptions; environment_id, collection_id);

#[derive(Debug, Clone, Default)]
pub struct GetDocumentStatusOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub document_id: String,
    pub headers: HashMap<String, String>,
}

impl GetDocumentStatusOptions {
    pub fn new(
        environment_id: impl Into<String>,
        collection_id: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            document_id: document_id.into(),
            ..Default::default()
        }
    }
}

request_options!(GetDocumentStatusOptions; environment_id, collection_id, document_id);

/// Replace a document, or create it under the given id.
#[derive(Debug, Clone, Default)]
pub struct UpdateDocumentOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub document_id: String,
    pub file: Option<FilePart>,
    pub filename: Option<String>,
    pub file_content_type: Option<String>,
    pub metadata: Option<String>,
    pub headers: HashMap<String, String>,
}

impl UpdateDocumentOptions {
    pub fn new(
        environment_id: impl Into<String>,
        collection_id: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            document_id: document_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(UpdateDocumentOptions {
    with_file => file: FilePart,
    with_filename => filename: String,
    with_file_content_type => file_content_type: String,
    with_metadata => metadata: String,
});
request_options!(UpdateDocumentOptions; environment_id, collection_id, document_id);

pub type DeleteDocumentOptions = GetDocumentStatusOptions;

impl DiscoveryV1 {
    /// Answers `202 Accepted`; processing continues asynchronously.
    pub async fn add_document(
        &self,
        options: &AddDocumentOptions,
    ) -> Result<DetailedResponse<DocumentAccepted>> {
        self.add_document_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn add_document_with_context(
        &self,
        ctx: &RequestContext,
        options: &AddDocumentOptions,
    ) -> Result<DetailedResponse<DocumentAccepted>> {
        options.validate()?;
        let request = self
            .request(Method::POST, DOCUMENTS, "AddDocument")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers())
            .document_parts(
                options.file.as_ref(),
                options.filename.as_ref(),
                options.file_content_type.as_ref(),
                options.metadata.as_ref(),
            )?;
        self.service.send(ctx, request).await
    }

    pub async fn get_document_status(
        &self,
        options: &GetDocumentStatusOptions,
    ) -> Result<DetailedResponse<DocumentStatus>> {
        self.get_document_status_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_document_status_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetDocumentStatusOptions,
    ) -> Result<DetailedResponse<DocumentStatus>> {
        options.validate()?;
        let request = self
            .request(Method::GET, DOCUMENT, "GetDocumentStatus")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("document_id", &options.document_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Answers `202 Accepted`.
    pub async fn update_document(
        &self,
        options: &UpdateDocumentOptions,
    ) -> Result<DetailedResponse<DocumentAccepted>> {
        self.update_document_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn update_document_with_context(
        &self,
        ctx: &RequestContext,
        options: &UpdateDocumentOptions,
    ) -> Result<DetailedResponse<DocumentAccepted>> {
        options.validate()?;
        let request = self
            .request(Method::POST, DOCUMENT, "UpdateDocument")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("document_id", &options.document_id)
            .headers(options.headers())
            .document_parts(
                options.file.as_ref(),
                options.filename.as_ref(),
                options.file_content_type.as_ref(),
                options.metadata.as_ref(),
            )?;
        self.service.send(ctx, request).await
    }

    pub async fn delete_document(
        &self,
        options: &DeleteDocumentOptions,
    ) -> Result<DetailedResponse<DeleteDocumentResponse>> {
        self.delete_document_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_document_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteDocumentOptions,
    ) -> Result<DetailedResponse<DeleteDocumentResponse>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, DOCUMENT, "DeleteDocument")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("document_id", &options.document_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }
}
