use super::models::{
    Collection, DeleteCollectionResponse, Expansion, Expansions, ListCollectionFieldsResponse,
    ListCollectionsResponse, TokenDictRule, TokenDictStatusResponse,
};
use super::DiscoveryV1;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, FilePart, RequestContext};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

const COLLECTIONS: &str = "/v1/environments/{environment_id}/collections";
const COLLECTION: &str = "/v1/environments/{environment_id}/collections/{collection_id}";
const EXPANSIONS: &str = "/v1/environments/{environment_id}/collections/{collection_id}/expansions";
const TOKENIZATION_DICTIONARY: &str = "/v1/environments/{environment_id}/collections/{collection_id}/word_lists/tokenization_dictionary";
const STOPWORDS: &str =
    "/v1/environments/{environment_id}/collections/{collection_id}/word_lists/stopwords";

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCollectionOptions {
    #[serde(skip)]
    pub environment_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateCollectionOptions {
    pub fn new(environment_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

option_setters!(CreateCollectionOptions {
    with_description => description: String,
    with_configuration_id => configuration_id: String,
    with_language => language: String,
});
request_options!(CreateCollectionOptions; environment_id, name);

#[derive(Debug, Clone, Default)]
pub struct ListCollectionsOptions {
    pub environment_id: String,
    pub name: Option<String>,
    pub headers: HashMap<String, String>,
}

impl ListCollectionsOptions {
    pub fn new(environment_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(ListCollectionsOptions { with_name => name: String });
request_options!(ListCollectionsOptions; environment_id);

/// Path parameters naming one collection; shared by the read-only and delete calls.
#[derive(Debug, Clone, Default)]
pub struct CollectionPathOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub headers: HashMap<String, String>,
}

impl CollectionPathOptions {
    pub fn new(environment_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

request_options!(CollectionPathOptions; environment_id, collection_id);

pub type GetCollectionOptions = CollectionPathOptions;
pub type DeleteCollectionOptions = CollectionPathOptions;
pub type ListCollectionFieldsOptions = CollectionPathOptions;
pub type ListExpansionsOptions = CollectionPathOptions;
pub type DeleteExpansionsOptions = CollectionPathOptions;
pub type GetTokenizationDictionaryStatusOptions = CollectionPathOptions;
pub type DeleteTokenizationDictionaryOptions = CollectionPathOptions;
pub type GetStopwordListStatusOptions = CollectionPathOptions;
pub type DeleteStopwordListOptions = CollectionPathOptions;

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCollectionOptions {
    #[serde(skip)]
    pub environment_id: String,
    #[serde(skip)]
    pub collection_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_id: Option<String>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateCollectionOptions {
    pub fn new(
        environment_id: impl Into<String>,
        collection_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

option_setters!(UpdateCollectionOptions {
    with_description => description: String,
    with_configuration_id => configuration_id: String,
});
request_options!(UpdateCollectionOptions; environment_id, collection_id, name);

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateExpansionsOptions {
    #[serde(skip)]
    pub environment_id: String,
    #[serde(skip)]
    pub collection_id: String,
    pub expansions: Vec<Expansion>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateExpansionsOptions {
    pub fn new(
        environment_id: impl Into<String>,
        collection_id: impl Into<String>,
        expansions: Vec<Expansion>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            expansions,
            ..Default::default()
        }
    }
}

request_options!(CreateExpansionsOptions; environment_id, collection_id, expansions);

/// Japanese collections only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTokenizationDictionaryOptions {
    #[serde(skip)]
    pub environment_id: String,
    #[serde(skip)]
    pub collection_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokenization_rules: Option<Vec<TokenDictRule>>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateTokenizationDictionaryOptions {
    pub fn new(environment_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(CreateTokenizationDictionaryOptions {
    with_tokenization_rules => tokenization_rules: Vec<TokenDictRule>,
});
request_options!(CreateTokenizationDictionaryOptions; environment_id, collection_id);

/// Upload a plain-text stopword file, one word per line.
#[derive(Debug, Clone, Default)]
pub struct CreateStopwordListOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub stopword_file: Option<FilePart>,
    pub stopword_filename: String,
    pub headers: HashMap<String, String>,
}

impl CreateStopwordListOptions {
    pub fn new(
        environment_id: impl Into<String>,
        collection_id: impl Into<String>,
        stopword_file: FilePart,
        stopword_filename: impl Into<String>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            stopword_file: Some(stopword_file),
            stopword_filename: stopword_filename.into(),
            ..Default::default()
        }
    }
}

request_options!(CreateStopwordListOptions; environment_id, collection_id, stopword_file, stopword_filename);

impl DiscoveryV1 {
    /// Answers `201 Created`.
    pub async fn create_collection(
        &self,
        options: &CreateCollectionOptions,
    ) -> Result<DetailedResponse<Collection>> {
        self.create_collection_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_collection_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateCollectionOptions,
    ) -> Result<DetailedResponse<Collection>> {
        options.validate()?;
        let request = self
            .request(Method::POST, COLLECTIONS, "CreateCollection")
            .path_param("environment_id", &options.environment_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

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
            .path_param("environment_id", &options.environment_id)
            .query_opt("name", options.name.as_ref())
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn get_collection(
        &self,
        options: &GetCollectionOptions,
    ) -> Result<DetailedResponse<Collection>> {
        self.get_collection_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_collection_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetCollectionOptions,
    ) -> Result<DetailedResponse<Collection>> {
        options.validate()?;
        let request = self
            .request(Method::GET, COLLECTION, "GetCollection")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Answers `201 Created`.
    pub async fn update_collection(
        &self,
        options: &UpdateCollectionOptions,
    ) -> Result<DetailedResponse<Collection>> {
        self.update_collection_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn update_collection_with_context(
        &self,
        ctx: &RequestContext,
        options: &UpdateCollectionOptions,
    ) -> Result<DetailedResponse<Collection>> {
        options.validate()?;
        let request = self
            .request(Method::PUT, COLLECTION, "UpdateCollection")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn delete_collection(
        &self,
        options: &DeleteCollectionOptions,
    ) -> Result<DetailedResponse<DeleteCollectionResponse>> {
        self.delete_collection_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_collection_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteCollectionOptions,
    ) -> Result<DetailedResponse<DeleteCollectionResponse>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, COLLECTION, "DeleteCollection")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn list_collection_fields(
        &self,
        options: &ListCollectionFieldsOptions,
    ) -> Result<DetailedResponse<ListCollectionFieldsResponse>> {
        self.list_collection_fields_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_collection_fields_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListCollectionFieldsOptions,
    ) -> Result<DetailedResponse<ListCollectionFieldsResponse>> {
        options.validate()?;
        let request = self
            .request(
                Method::GET,
                "/v1/environments/{environment_id}/collections/{collection_id}/fields",
                "ListCollectionFields",
            )
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
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
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Replaces the collection's expansion list. Answers `201 Created`.
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
            .path_param("environment_id", &options.environment_id)
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
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }

    pub async fn get_tokenization_dictionary_status(
        &self,
        options: &GetTokenizationDictionaryStatusOptions,
    ) -> Result<DetailedResponse<TokenDictStatusResponse>> {
        self.get_tokenization_dictionary_status_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_tokenization_dictionary_status_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetTokenizationDictionaryStatusOptions,
    ) -> Result<DetailedResponse<TokenDictStatusResponse>> {
        options.validate()?;
        let request = self
            .request(
                Method::GET,
                TOKENIZATION_DICTIONARY,
                "GetTokenizationDictionaryStatus",
            )
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Answers `202 Accepted`; the dictionary is built asynchronously.
    pub async fn create_tokenization_dictionary(
        &self,
        options: &CreateTokenizationDictionaryOptions,
    ) -> Result<DetailedResponse<TokenDictStatusResponse>> {
        self.create_tokenization_dictionary_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_tokenization_dictionary_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateTokenizationDictionaryOptions,
    ) -> Result<DetailedResponse<TokenDictStatusResponse>> {
        options.validate()?;
        let request = self
            .request(
                Method::POST,
                TOKENIZATION_DICTIONARY,
                "CreateTokenizationDictionary",
            )
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn delete_tokenization_dictionary(
        &self,
        options: &DeleteTokenizationDictionaryOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_tokenization_dictionary_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_tokenization_dictionary_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteTokenizationDictionaryOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(
                Method::DELETE,
                TOKENIZATION_DICTIONARY,
                "DeleteTokenizationDictionary",
            )
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }

    pub async fn get_stopword_list_status(
        &self,
        options: &GetStopwordListStatusOptions,
    ) -> Result<DetailedResponse<TokenDictStatusResponse>> {
        self.get_stopword_list_status_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_stopword_list_status_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetStopwordListStatusOptions,
    ) -> Result<DetailedResponse<TokenDictStatusResponse>> {
        options.validate()?;
        let request = self
            .request(Method::GET, STOPWORDS, "GetStopwordListStatus")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn create_stopword_list(
        &self,
        options: &CreateStopwordListOptions,
    ) -> Result<DetailedResponse<TokenDictStatusResponse>> {
        self.create_stopword_list_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_stopword_list_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateStopwordListOptions,
    ) -> Result<DetailedResponse<TokenDictStatusResponse>> {
        options.validate()?;
        let mut request = self
            .request(Method::POST, STOPWORDS, "CreateStopwordList")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        if let Some(file) = &options.stopword_file {
            let part = file
                .clone()
                .with_filename(options.stopword_filename.clone())
                .with_content_type("application/octet-stream");
            request = request.form_file("stopword_file", part);
        }
        self.service.send(ctx, request).await
    }

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
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }
}
