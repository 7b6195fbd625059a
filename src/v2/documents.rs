use super::models::{DeleteDocumentResponse, DocumentAccepted, DocumentDetails, ListDocumentsResponse};
use super::DiscoveryV2;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, FilePart, RequestContext};
use crate::Result;
use reqwest::Method;
use std::collections::HashMap;

const DOCUMENTS: &str = "/v2/projects/{project_id}/collections/{collection_id}/documents";
const DOCUMENT: &str =
    "/v2/projects/{project_id}/collections/{collection_id}/documents/{document_id}";
const FORCE_HEADER: &str = "X-Watson-Discovery-Force";

#[derive(Debug, Clone, Default)]
pub struct ListDocumentsOptions {
    pub project_id: String,
    pub collection_id: String,
    pub count: Option<i64>,
    /// Comma-separated statuses, e.g. `available,failed`.
    pub status: Option<String>,
    pub has_notices: Option<bool>,
    pub is_parent: Option<bool>,
    pub parent_document_id: Option<String>,
    pub sha256: Option<String>,
    pub headers: HashMap<String, String>,
}

impl ListDocumentsOptions {
    pub fn new(project_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(ListDocumentsOptions {
    with_count => count: i64,
    with_status => status: String,
    with_has_notices => has_notices: bool,
    with_is_parent => is_parent: bool,
    with_parent_document_id => parent_document_id: String,
    with_sha256 => sha256: String,
});
request_options!(ListDocumentsOptions; project_id, collection_id);

#[derive(Debug, Clone, Default)]
pub struct AddDocumentOptions {
    pub project_id: String,
    pub collection_id: String,
    pub file: Option<FilePart>,
    /// Overrides the file name carried by `file`.
    pub filename: Option<String>,
    pub file_content_type: Option<String>,
    /// JSON object serialized as a string.
    pub metadata: Option<String>,
    /// Replace an existing document with the same identity.
    pub x_watson_discovery_force: Option<bool>,
    pub headers: HashMap<String, String>,
}

impl AddDocumentOptions {
    pub fn new(project_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
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
    with_x_watson_discovery_force => x_watson_discovery_force: bool,
});
request_options!(AddDocumentOptions; project_id, collection_id);

#[derive(Debug, Clone, Default)]
pub struct GetDocumentOptions {
    pub project_id: String,
    pub collection_id: String,
    pub document_id: String,
    pub headers: HashMap<String, String>,
}

impl GetDocumentOptions {
    pub fn new(
        project_id: impl Into<String>,
        collection_id: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            document_id: document_id.into(),
            ..Default::default()
        }
    }
}

request_options!(GetDocumentOptions; project_id, collection_id, document_id);

#[derive(Debug, Clone, Default)]
pub struct UpdateDocumentOptions {
    pub project_id: String,
    pub collection_id: String,
    pub document_id: String,
    pub file: Option<FilePart>,
    pub filename: Option<String>,
    pub file_content_type: Option<String>,
    pub metadata: Option<String>,
    pub x_watson_discovery_force: Option<bool>,
    pub headers: HashMap<String, String>,
}

impl UpdateDocumentOptions {
    pub fn new(
        project_id: impl Into<String>,
        collection_id: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
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
    with_x_watson_discovery_force => x_watson_discovery_force: bool,
});
request_options!(UpdateDocumentOptions; project_id, collection_id, document_id);

#[derive(Debug, Clone, Default)]
pub struct DeleteDocumentOptions {
    pub project_id: String,
    pub collection_id: String,
    pub document_id: String,
    pub x_watson_discovery_force: Option<bool>,
    pub headers: HashMap<String, String>,
}

impl DeleteDocumentOptions {
    pub fn new(
        project_id: impl Into<String>,
        collection_id: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            document_id: document_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(DeleteDocumentOptions {
    with_x_watson_discovery_force => x_watson_discovery_force: bool,
});
request_options!(DeleteDocumentOptions; project_id, collection_id, document_id);

impl DiscoveryV2 {
    pub async fn list_documents(
        &self,
        options: &ListDocumentsOptions,
    ) -> Result<DetailedResponse<ListDocumentsResponse>> {
        self.list_documents_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_documents_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListDocumentsOptions,
    ) -> Result<DetailedResponse<ListDocumentsResponse>> {
        options.validate()?;
        let request = self
            .request(Method::GET, DOCUMENTS, "ListDocuments")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .query_opt("count", options.count)
            .query_opt("status", options.status.as_ref())
            .query_opt("has_notices", options.has_notices)
            .query_opt("is_parent", options.is_parent)
            .query_opt("parent_document_id", options.parent_document_id.as_ref())
            .query_opt("sha256", options.sha256.as_ref())
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Upload a document for asynchronous ingestion. Answers `202 Accepted`.
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
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .header_opt(FORCE_HEADER, options.x_watson_discovery_force)
            .headers(options.headers());
        let request = request.document_parts(
            options.file.as_ref(),
            options.filename.as_ref(),
            options.file_content_type.as_ref(),
            options.metadata.as_ref(),
        )?;
        self.service.send(ctx, request).await
    }

    pub async fn get_document(
        &self,
        options: &GetDocumentOptions,
    ) -> Result<DetailedResponse<DocumentDetails>> {
        self.get_document_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_document_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetDocumentOptions,
    ) -> Result<DetailedResponse<DocumentDetails>> {
        options.validate()?;
        let request = self
            .request(Method::GET, DOCUMENT, "GetDocument")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("document_id", &options.document_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Replace a document's content or metadata. Answers `202 Accepted`.
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
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("document_id", &options.document_id)
            .header_opt(FORCE_HEADER, options.x_watson_discovery_force)
            .headers(options.headers());
        let request = request.document_parts(
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
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("document_id", &options.document_id)
            .header_opt(FORCE_HEADER, options.x_watson_discovery_force)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }
}
