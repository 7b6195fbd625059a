use super::models::{TrainingExample, TrainingQuery, TrainingQuerySet};
use super::DiscoveryV2;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, RequestContext};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

const QUERIES: &str = "/v2/projects/{project_id}/training_data/queries";
const QUERY: &str = "/v2/projects/{project_id}/training_data/queries/{query_id}";

#[derive(Debug, Clone, Default)]
pub struct ListTrainingQueriesOptions {
    pub project_id: String,
    pub headers: HashMap<String, String>,
}

impl ListTrainingQueriesOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

request_options!(ListTrainingQueriesOptions; project_id);

#[derive(Debug, Clone, Default)]
pub struct DeleteTrainingQueriesOptions {
    pub project_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteTrainingQueriesOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

request_options!(DeleteTrainingQueriesOptions; project_id);

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTrainingQueryOptions {
    #[serde(skip)]
    pub project_id: String,
    pub natural_language_query: String,
    pub examples: Vec<TrainingExample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateTrainingQueryOptions {
    pub fn new(
        project_id: impl Into<String>,
        natural_language_query: impl Into<String>,
        examples: Vec<TrainingExample>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            natural_language_query: natural_language_query.into(),
            examples,
            ..Default::default()
        }
    }
}

option_setters!(CreateTrainingQueryOptions { with_filter => filter: String });
request_options!(CreateTrainingQueryOptions; project_id, natural_language_query, examples);

#[derive(Debug, Clone, Default)]
pub struct GetTrainingQueryOptions {
    pub project_id: String,
    pub query_id: String,
    pub headers: HashMap<String, String>,
}

impl GetTrainingQueryOptions {
    pub fn new(project_id: impl Into<String>, query_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            query_id: query_id.into(),
            ..Default::default()
        }
    }
}

request_options!(GetTrainingQueryOptions; project_id, query_id);

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTrainingQueryOptions {
    #[serde(skip)]
    pub project_id: String,
    #[serde(skip)]
    pub query_id: String,
    pub natural_language_query: String,
    pub examples: Vec<TrainingExample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateTrainingQueryOptions {
    pub fn new(
        project_id: impl Into<String>,
        query_id: impl Into<String>,
        natural_language_query: impl Into<String>,
        examples: Vec<TrainingExample>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            query_id: query_id.into(),
            natural_language_query: natural_language_query.into(),
            examples,
            ..Default::default()
        }
    }
}

option_setters!(UpdateTrainingQueryOptions { with_filter => filter: String });
request_options!(UpdateTrainingQueryOptions; project_id, query_id, natural_language_query, examples);

#[derive(Debug, Clone, Default)]
pub struct DeleteTrainingQueryOptions {
    pub project_id: String,
    pub query_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteTrainingQueryOptions {
    pub fn new(project_id: impl Into<String>, query_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            query_id: query_id.into(),
            ..Default::default()
        }
    }
}

request_options!(DeleteTrainingQueryOptions; project_id, query_id);

impl DiscoveryV2 {
    pub async fn list_training_queries(
        &self,
        options: &ListTrainingQueriesOptions,
    ) -> Result<DetailedResponse<TrainingQuerySet>> {
        self.list_training_queries_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_training_queries_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListTrainingQueriesOptions,
    ) -> Result<DetailedResponse<TrainingQuerySet>> {
        options.validate()?;
        let request = self
            .request(Method::GET, QUERIES, "ListTrainingQueries")
            .path_param("project_id", &options.project_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Remove all training queries of a project. Answers `204 No Content`.
    pub async fn delete_training_queries(
        &self,
        options: &DeleteTrainingQueriesOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_training_queries_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_training_queries_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteTrainingQueriesOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, QUERIES, "DeleteTrainingQueries")
            .path_param("project_id", &options.project_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }

    /// Answers `201 Created`.
    pub async fn create_training_query(
        &self,
        options: &CreateTrainingQueryOptions,
    ) -> Result<DetailedResponse<TrainingQuery>> {
        self.create_training_query_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_training_query_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateTrainingQueryOptions,
    ) -> Result<DetailedResponse<TrainingQuery>> {
        options.validate()?;
        let request = self
            .request(Method::POST, QUERIES, "CreateTrainingQuery")
            .path_param("project_id", &options.project_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn get_training_query(
        &self,
        options: &GetTrainingQueryOptions,
    ) -> Result<DetailedResponse<TrainingQuery>> {
        self.get_training_query_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_training_query_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetTrainingQueryOptions,
    ) -> Result<DetailedResponse<TrainingQuery>> {
        options.validate()?;
        let request = self
            .request(Method::GET, QUERY, "GetTrainingQuery")
            .path_param("project_id", &options.project_id)
            .path_param("query_id", &options.query_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Answers `201 Created`.
    pub async fn update_training_query(
        &self,
        options: &UpdateTrainingQueryOptions,
    ) -> Result<DetailedResponse<TrainingQuery>> {
        self.update_training_query_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn update_training_query_with_context(
        &self,
        ctx: &RequestContext,
        options: &UpdateTrainingQueryOptions,
    ) -> Result<DetailedResponse<TrainingQuery>> {
        options.validate()?;
        let request = self
            .request(Method::POST, QUERY, "UpdateTrainingQuery")
            .path_param("project_id", &options.project_id)
            .path_param("query_id", &options.query_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    /// Answers `204 No Content`.
    pub async fn delete_training_query(
        &self,
        options: &DeleteTrainingQueryOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_training_query_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_training_query_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteTrainingQueryOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, QUERY, "DeleteTrainingQuery")
            .path_param("project_id", &options.project_id)
            .path_param("query_id", &options.query_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }
}
