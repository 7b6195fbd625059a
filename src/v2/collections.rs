use super::models::{
    CollectionDetails, CollectionEnrichment, ComponentSettingsResponse, Expansion, Expansions,
    ListCollectionsResponse, StopWordList,
};
use super::DiscoveryV2;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, RequestContext};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

const COLLECTIONS: &str = "/v2/projects/{project_id}/collections";
const COLLECTION: &str = "/v2/projects/{project_id}/collections/{collection_id}";
const STOPWORDS: &str = "/v2/projects/{project_id}/collections/{collection_id}/stopwords";
const EXPANSIONS: &str = "/v2/projects/{project_id}/collections/{collection_id}/expansions";

#[derive(Debug, Clone, Default)]
pub struct ListCollectionsOptions {
    pub project_id: String,
    pub headers: HashMap<String, String>,
}

impl ListCollectionsOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

request_options!(ListCollectionsOptions; project_id);

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCollectionOptions {
    #[serde(skip)]
    pub project_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO 639-1 language code; the service defaults to `en`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichments: Option<Vec<CollectionEnrichment>>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateCollectionOptions {
    pub fn new(project_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

option_setters!(CreateCollectionOptions {
    with_description => description: String,
    with_language => language: String,
    with_enrichments => enrichments: Vec<CollectionEnrichment>,
});
request_options!(CreateCollectionOptions; project_id, name);

#[derive(Debug, Clone, Default)]
pub struct GetCollectionOptions {
    pub project_id: String,
    pub collection_id: String,
    pub headers: HashMap<String, String>,
}

impl GetCollectionOptions {
    pub fn new(project_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

request_options!(GetCollectionOptions; project_id, collection_id);

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCollectionOptions {
    #[serde(skip)]
    pub project_id: String,
    #[serde(skip)]
    pub collection_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichments: Option<Vec<CollectionEnrichment>>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateCollectionOptions {
    pub fn new(project_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(UpdateCollectionOptions {
    with_name => name: String,
    with_description => description: String,
    with_enrichments => enrichments: Vec<CollectionEnrichment>,
});
request_options!(UpdateCollectionOptions; project_id, collection_id);

#[derive(Debug, Clone, Default)]
pub struct DeleteCollectionOptions {
    pub project_id: String,
    pub collection_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteCollectionOptions {
    pub fn new(project_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

request_options!(DeleteCollectionOptions; project_id, collection_id);

#[derive(Debug, Clone, Default)]
pub struct GetComponentSettingsOptions {
    pub project_id: String,
    pub headers: HashMap<String, String>,
}

impl GetComponentSettingsOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

request_options!(GetComponentSettingsOptions; project_id);

#[derive(Debug, Clone, Default)]
pub struct GetStopwordListOptions {
    pub project_id: String,
    pub collection_id: String,
    pub headers: HashMap<String, String>,
}

impl GetStopwordListOptions {
    pub fn new(project_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

request_options!(GetStopwordListOptions; project_id, collection_id);

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateStopwordListOptions {
    #[serde(skip)]
    pub project_id: String,
    #[serde(skip)]
    pub collection_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords: Option<Vec<String>>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateStopwordListOptions {
    pub fn new(project_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(CreateStopwordListOptions { with_stopwords => stopwords: Vec<String> });
request_options!(CreateStopwordListOptions; project_id, collection_id);

#[derive(Debug, Clone, Default)]
pub struct DeleteStopwordListOptions {
    pub project_id: String,
    pub collection_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteStopwordListOptions {
    pub fn new(project_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

request_options!(DeleteStopwordListOptions; project_id, collection_id);

#[derive(Debug, Clone, Default)]
pub struct ListExpansionsOptions {
    pub project_id: String,
    pub collection_id: String,
    pub headers: HashMap<String, String>,
}

impl ListExpansionsOptions {
    pub fn new(project_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

request_options!(ListExpansionsOptions; project_id, collection_id);

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateExpansionsOptions {
    #[serde(skip)]
    pub project_id: String,
    #[serde(skip)]
    pub collection_id: String,
    /// Replaces the whole expansion list of the collection.
    pub expansions: Vec<Expansion>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateExpansionsOptions {
    pub fn new(
        project_id: impl Into<String>,
        collection_id: impl Into<String>,
        expansions: Vec<Expansion>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            expansions,
            headers: HashMap::new(),
        }
    }
}

request_options!(CreateExpansionsOptions; project_id, collection_id, expansions);

#[derive(Debug, Clone, Default)]
pub struct DeleteExpansionsOptions {
    pub project_id: String,
    pub collection_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteExpansionsOptions {
    pub fn new(project_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

request_options!(DeleteExpansionsOptions; project_id, collection_id);

impl DiscoveryV2 {
    pub async fn list_collections(
        &self,
        options: &ListCollectionsOptions,
    ) -> Result<DetailedResponse<ListCollectionsResponse>> {
        self.list_collections_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_collections_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListCollectionsOptions,
    ) -> Result<DetailedResponse<ListCollectionsResponse>> {
        options.validate()?;
        let request = self
            .request(Method::GET, COLLECTIONS, "ListCollections")
            .path_param("project_id", &options.project_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Create a collection in a project. Answers `201 Created`.
    pub async fn create_collection(
        &self,
        options: &CreateCollectionOptions,
    ) -> Result<DetailedResponse<CollectionDetails>> {
        self.create_collection_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_collection_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateCollectionOptions,
    ) -> Result<DetailedResponse<CollectionDetails>> {
        options.validate()?;
        let request = self
            .request(Method::POST, COLLECTIONS, "CreateCollection")
            .path_param("project_id", &options.project_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn get_collection(
        &self,
        options: &GetCollectionOptions,
    ) -> Result<DetailedResponse<CollectionDetails>> {
        self.get_collection_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_collection_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetCollectionOptions,
    ) -> Result<DetailedResponse<CollectionDetails>> {
        options.validate()?;
        let request = self
            .request(Method::GET, COLLECTION, "GetCollection")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn update_collection(
        &self,
        options: &UpdateCollectionOptions,
    ) -> Result<DetailedResponse<CollectionDetails>> {
        self.update_collection_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn update_collection_with_context(
        &self,
        ctx: &RequestContext,
        options: &UpdateCollectionOptions,
    ) -> Result<DetailedResponse<CollectionDetails>> {
        options.validate()?;
        let request = self
            .request(Method::POST, COLLECTION, "UpdateCollection")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    /// Delete a collection and its documents. Answers `204 No Content`.
    pub async fn delete_collection(
        &self,
        options: &DeleteCollectionOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_collection_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_collection_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteCollectionOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, COLLECTION, "DeleteCollection")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }

    /// Search UI settings of a project.
    pub async fn get_component_settings(
        &self,
        options: &GetComponentSettingsOptions,
    ) -> Result<DetailedResponse<ComponentSettingsResponse>> {
        self.get_component_settings_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_component_settings_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetComponentSettingsOptions,
    ) -> Result<DetailedResponse<ComponentSettingsResponse>> {
        options.validate()?;
        let request = self
            .request(
                Method::GET,
                "/v2/projects/{project_id}/component_settings",
                "GetComponentSettings",
            )
            .path_param("project_id", &options.project_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn get_stopword_list(
        &self,
        options: &GetStopwordListOptions,
    ) -> Result<DetailedResponse<StopWordList>> {
        self.get_stopword_list_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_stopword_list_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetStopwordListOptions,
    ) -> Result<DetailedResponse<StopWordList>> {
        options.validate()?;
        let request = self
            .request(Method::GET, STOPWORDS, "GetStopwordList")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Replace the custom stopword list of a collection.
    pub async fn create_stopword_list(
        &self,
        options: &CreateStopwordListOptions,
    ) -> Result<DetailedResponse<StopWordList>> {
        self.create_stopword_list_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_stopword_list_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateStopwordListOptions,
    ) -> Result<DetailedResponse<StopWordList>> {
        options.validate()?;
        let request = self
            .request(Method::POST, STOPWORDS, "CreateStopwordList")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    /// Answers `204 No Content`.
    pub async fn delete_stopword_list(
        &self,
        options: &DeleteStopwordListOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_stopword_list_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_stopword_list_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteStopwordListOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, STOPWORDS, "DeleteStopwordList")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }

    pub async fn list_expansions(
        &self,
        options: &ListExpansionsOptions,
    ) -> Result<DetailedResponse<Expansions>> {
        self.list_expansions_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_expansions_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListExpansionsOptions,
    ) -> Result<DetailedResponse<Expansions>> {
        options.validate()?;
        let request = self
            .request(Method::GET, EXPANSIONS, "ListExpansions")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn create_expansions(
        &self,
        options: &CreateExpansionsOptions,
    ) -> Result<DetailedResponse<Expansions>> {
        self.create_expansions_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_expansions_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateExpansionsOptions,
    ) -> Result<DetailedResponse<Expansions>> {
        options.validate()?;
        let request = self
            .request(Method::POST, EXPANSIONS, "CreateExpansions")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    /// Answers `204 No Content`.
    pub async fn delete_expansions(
        &self,
        options: &DeleteExpansionsOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_expansions_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_expansions_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteExpansionsOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, EXPANSIONS, "DeleteExpansions")
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }
}
