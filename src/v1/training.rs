use super::models::{TrainingDataSet, TrainingExample, TrainingExampleList, TrainingQuery};
use super::DiscoveryV1;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, RequestContext};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

const TRAINING_DATA: &str =
    "/v1/environments/{environment_id}/collections/{collection_id}/training_data";
const TRAINING_QUERY: &str =
    "/v1/environments/{environment_id}/collections/{collection_id}/training_data/{query_id}";
const EXAMPLES: &str = "/v1/environments/{environment_id}/collections/{collection_id}/training_data/{query_id}/examples";
const EXAMPLE: &str = "/v1/environments/{environment_id}/collections/{collection_id}/training_data/{query_id}/examples/{example_id}";

#[derive(Debug, Clone, Default)]
pub struct TrainingDataOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub headers: HashMap<String, String>,
}

impl TrainingDataOptions {
    pub fn new(environment_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

request_options!(TrainingDataOptions; environment_id, collection_id);

pub type ListTrainingDataOptions = TrainingDataOptions;
pub type DeleteAllTrainingDataOptions = TrainingDataOptions;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AddTrainingDataOptions {
    #[serde(skip)]
    pub environment_id: String,
    #[serde(skip)]
    pub collection_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_language_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<TrainingExample>>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl AddTrainingDataOptions {
    pub fn new(environment_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(AddTrainingDataOptions {
    with_natural_language_query => natural_language_query: String,
    with_filter => filter: String,
    with_examples => examples: Vec<TrainingExample>,
});
request_options!(AddTrainingDataOptions; environment_id, collection_id);

#[derive(Debug, Clone, Default)]
pub struct TrainingQueryOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub query_id: String,
    pub headers: HashMap<String, String>,
}

impl TrainingQueryOptions {
    pub fn new(
        environment_id: impl Into<String>,
        collection_id: impl Into<String>,
        query_id: impl Into<String>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            query_id: query_id.into(),
            ..Default::default()
        }
    }
}

request_options!(TrainingQueryOptions; environment_id, collection_id, query_id);

pub type GetTrainingDataOptions = TrainingQueryOptions;
pub type DeleteTrainingDataOptions = TrainingQueryOptions;
pub type ListTrainingExamplesOptions = TrainingQueryOptions;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTrainingExampleOptions {
    #[serde(skip)]
    pub environment_id: String,
    #[serde(skip)]
    pub collection_id: String,
    #[serde(skip)]
    pub query_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<i64>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateTrainingExampleOptions {
    pub fn new(
        environment_id: impl Into<String>,
        collection_id: impl Into<String>,
        query_id: impl Into<String>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            query_id: query_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(CreateTrainingExampleOptions {
    with_document_id => document_id: String,
    with_cross_reference => cross_reference: String,
    with_relevance => relevance: i64,
});
request_options!(CreateTrainingExampleOptions; environment_id, collection_id, query_id);

#[derive(Debug, Clone, Default)]
pub struct TrainingExampleOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub query_id: String,
    pub example_id: String,
    pub headers: HashMap<String, String>,
}

impl TrainingExampleOptions {
    pub fn new(
        environment_id: impl Into<String>,
        collection_id: impl Into<String>,
        query_id: impl Into<String>,
        example_id: impl Into<String>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            query_id: query_id.into(),
            example_id: example_id.into(),
            ..Default::default()
        }
    }
}

request_options!(TrainingExampleOptions; environment_id, collection_id, query_id, example_id);

pub type GetTrainingExampleOptions = TrainingExampleOptions;
pub type DeleteTrainingExampleOptions = TrainingExampleOptions;

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTrainingExampleOptions {
    #[serde(skip)]
    pub environment_id: String,
    #[serde(skip)]
    pub collection_id: String,
    #[serde(skip)]
    pub query_id: String,
    #[serde(skip)]
    pub example_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<i64>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateTrainingExampleOptions {
    pub fn new(
        environment_id: impl Into<String>,
        collection_id: impl Into<String>,
        query_id: impl Into<String>,
        example_id: impl Into<String>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            query_id: query_id.into(),
            example_id: example_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(UpdateTrainingExampleOptions {
    with_cross_reference => cross_reference: String,
    with_relevance => relevance: i64,
});
request_options!(UpdateTrainingExampleOptions; environment_id, collection_id, query_id, example_id);

impl DiscoveryV1 {
    pub async fn list_training_data(
        &self,
        options: &ListTrainingDataOptions,
    ) -> Result<DetailedResponse<TrainingDataSet>> {
        self.list_training_data_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_training_data_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListTrainingDataOptions,
    ) -> Result<DetailedResponse<TrainingDataSet>> {
        options.validate()?;
        let request = self
            .request(Method::GET, TRAINING_DATA, "ListTrainingData")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn add_training_data(
        &self,
        options: &AddTrainingDataOptions,
    ) -> Result<DetailedResponse<TrainingQuery>> {
        self.add_training_data_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn add_training_data_with_context(
        &self,
        ctx: &RequestContext,
        options: &AddTrainingDataOptions,
    ) -> Result<DetailedResponse<TrainingQuery>> {
        options.validate()?;
        let request = self
            .request(Method::POST, TRAINING_DATA, "AddTrainingData")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    /// Answers `204 No Content`.
    pub async fn delete_all_training_data(
        &self,
        options: &DeleteAllTrainingDataOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_all_training_data_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_all_training_data_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteAllTrainingDataOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, TRAINING_DATA, "DeleteAllTrainingData")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }

    pub async fn get_training_data(
        &self,
        options: &GetTrainingDataOptions,
    ) -> Result<DetailedResponse<TrainingQuery>> {
        self.get_training_data_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_training_data_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetTrainingDataOptions,
    ) -> Result<DetailedResponse<TrainingQuery>> {
        options.validate()?;
        let request = self
            .request(Method::GET, TRAINING_QUERY, "GetTrainingData")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("query_id", &options.query_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Answers `204 No Content`.
    pub async fn delete_training_data(
        &self,
        options: &DeleteTrainingDataOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_training_data_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_training_data_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteTrainingDataOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, TRAINING_QUERY, "DeleteTrainingData")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("query_id", &options.query_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }

    pub async fn list_training_examples(
        &self,
        options: &ListTrainingExamplesOptions,
    ) -> Result<DetailedResponse<TrainingExampleList>> {
        self.list_training_examples_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_training_examples_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListTrainingExamplesOptions,
    ) -> Result<DetailedResponse<TrainingExampleList>> {
        options.validate()?;
        let request = self
            .request(Method::GET, EXAMPLES, "ListTrainingExamples")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("query_id", &options.query_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Answers `201 Created`.
    pub async fn create_training_example(
        &self,
        options: &CreateTrainingExampleOptions,
    ) -> Result<DetailedResponse<TrainingExample>> {
        self.create_training_example_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_training_example_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateTrainingExampleOptions,
    ) -> Result<DetailedResponse<TrainingExample>> {
        options.validate()?;
        let request = self
            .request(Method::POST, EXAMPLES, "CreateTrainingExample")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("query_id", &options.query_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    /// Answers `204 No Content`.
    pub async fn delete_training_example(
        &self,
        options: &DeleteTrainingExampleOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_training_example_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_training_example_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteTrainingExampleOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, EXAMPLE, "DeleteTrainingExample")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("query_id", &options.query_id)
            .path_param("example_id", &options.example_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }

    pub async fn update_training_example(
        &self,
        options: &UpdateTrainingExampleOptions,
    ) -> Result<DetailedResponse<TrainingExample>> {
        self.update_training_example_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn update_training_example_with_context(
        &self,
        ctx: &RequestContext,
        options: &UpdateTrainingExampleOptions,
    ) -> Result<DetailedResponse<TrainingExample>> {
        options.validate()?;
        let request = self
            .request(Method::PUT, EXAMPLE, "UpdateTrainingExample")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("query_id", &options.query_id)
            .path_param("example_id", &options.example_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn get_training_example(
        &self,
        options: &GetTrainingExampleOptions,
    ) -> Result<DetailedResponse<TrainingExample>> {
        self.get_training_example_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_training_example_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetTrainingExampleOptions,
    ) -> Result<DetailedResponse<TrainingExample>> {
        options.validate()?;
        let request = self
            .request(Method::GET, EXAMPLE, "GetTrainingExample")
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .path_param("query_id", &options.query_id)
            .path_param("example_id", &options.example_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }
}
