use super::models::{
    Completions, QueryLargePassages, QueryLargeSimilar, QueryLargeSuggestedRefinements,
    QueryLargeTableResults, QueryNoticesResponse, QueryResponse,
};
use super::DiscoveryV2;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, RequestBuilder, RequestContext};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

/// Search request against one or more collections of a project.
///
/// `filter` and `query` use the Discovery Query Language;
/// `natural_language_query` is free text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryOptions {
    #[serde(skip)]
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_language_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelling_suggestions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_results: Option<QueryLargeTableResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_refinements: Option<QueryLargeSuggestedRefinements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passages: Option<QueryLargePassages>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar: Option<QueryLargeSimilar>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl QueryOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(QueryOptions {
    with_collection_ids => collection_ids: Vec<String>,
    with_filter => filter: String,
    with_query => query: String,
    with_natural_language_query => natural_language_query: String,
    with_aggregation => aggregation: String,
    with_count => count: i64,
    with_return => return_: Vec<String>,
    with_offset => offset: i64,
    with_sort => sort: String,
    with_highlight => highlight: bool,
    with_spelling_suggestions => spelling_suggestions: bool,
    with_table_results => table_results: QueryLargeTableResults,
    with_suggested_refinements => suggested_refinements: QueryLargeSuggestedRefinements,
    with_passages => passages: QueryLargePassages,
    with_similar => similar: QueryLargeSimilar,
});
request_options!(QueryOptions; project_id);

#[derive(Debug, Clone, Default)]
pub struct GetAutocompletionOptions {
    pub project_id: String,
    pub prefix: String,
    pub collection_ids: Vec<String>,
    pub field: Option<String>,
    pub count: Option<i64>,
    pub headers: HashMap<String, String>,
}

impl GetAutocompletionOptions {
    pub fn new(project_id: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    pub fn with_collection_ids(mut self, ids: Vec<String>) -> Self {
        self.collection_ids = ids;
        self
    }
}

option_setters!(GetAutocompletionOptions {
    with_field => field: String,
    with_count => count: i64,
});
request_options!(GetAutocompletionOptions; project_id, prefix);

/// Query the notices raised for one collection.
#[derive(Debug, Clone, Default)]
pub struct QueryCollectionNoticesOptions {
    pub project_id: String,
    pub collection_id: String,
    pub filter: Option<String>,
    pub query: Option<String>,
    pub natural_language_query: Option<String>,
    pub count: Option<i64>,
    pub offset: Option<i64>,
    pub headers: HashMap<String, String>,
}

impl QueryCollectionNoticesOptions {
    pub fn new(project_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(QueryCollectionNoticesOptions {
    with_filter => filter: String,
    with_query => query: String,
    with_natural_language_query => natural_language_query: String,
    with_count => count: i64,
    with_offset => offset: i64,
});
request_options!(QueryCollectionNoticesOptions; project_id, collection_id);

/// Query the notices raised across a project.
#[derive(Debug, Clone, Default)]
pub struct QueryNoticesOptions {
    pub project_id: String,
    pub filter: Option<String>,
    pub query: Option<String>,
    pub natural_language_query: Option<String>,
    pub count: Option<i64>,
    pub offset: Option<i64>,
    pub headers: HashMap<String, String>,
}

impl QueryNoticesOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(QueryNoticesOptions {
    with_filter => filter: String,
    with_query => query: String,
    with_natural_language_query => natural_language_query: String,
    with_count => count: i64,
    with_offset => offset: i64,
});
request_options!(QueryNoticesOptions; project_id);

fn notice_query(
    request: RequestBuilder,
    filter: Option<&String>,
    query: Option<&String>,
    natural_language_query: Option<&String>,
    count: Option<i64>,
    offset: Option<i64>,
) -> RequestBuilder {
    request
        .query_opt("filter", filter)
        .query_opt("query", query)
        .query_opt("natural_language_query", natural_language_query)
        .query_opt("count", count)
        .query_opt("offset", offset)
}

impl DiscoveryV2 {
    /// Search a project.
    pub async fn query(&self, options: &QueryOptions) -> Result<DetailedResponse<QueryResponse>> {
        self.query_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn query_with_context(
        &self,
        ctx: &RequestContext,
        options: &QueryOptions,
    ) -> Result<DetailedResponse<QueryResponse>> {
        options.validate()?;
        let request = self
            .request(Method::POST, "/v2/projects/{project_id}/query", "Query")
            .path_param("project_id", &options.project_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    /// Suggest completions for a query prefix.
    pub async fn get_autocompletion(
        &self,
        options: &GetAutocompletionOptions,
    ) -> Result<DetailedResponse<Completions>> {
        self.get_autocompletion_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_autocompletion_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetAutocompletionOptions,
    ) -> Result<DetailedResponse<Completions>> {
        options.validate()?;
        let request = self
            .request(
                Method::GET,
                "/v2/projects/{project_id}/autocompletion",
                "GetAutocompletion",
            )
            .path_param("project_id", &options.project_id)
            .query("prefix", &options.prefix)
            .query_list("collection_ids", &options.collection_ids)
            .query_opt("field", options.field.as_ref())
            .query_opt("count", options.count)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn query_collection_notices(
        &self,
        options: &QueryCollectionNoticesOptions,
    ) -> Result<DetailedResponse<QueryNoticesResponse>> {
        self.query_collection_notices_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn query_collection_notices_with_context(
        &self,
        ctx: &RequestContext,
        options: &QueryCollectionNoticesOptions,
    ) -> Result<DetailedResponse<QueryNoticesResponse>> {
        options.validate()?;
        let request = self
            .request(
                Method::GET,
                "/v2/projects/{project_id}/collections/{collection_id}/notices",
                "QueryCollectionNotices",
            )
            .path_param("project_id", &options.project_id)
            .path_param("collection_id", &options.collection_id)
            .headers(options.headers());
        let request = notice_query(
            request,
            options.filter.as_ref(),
            options.query.as_ref(),
            options.natural_language_query.as_ref(),
            options.count,
            options.offset,
        );
        self.service.send(ctx, request).await
    }

    pub async fn query_notices(
        &self,
        options: &QueryNoticesOptions,
    ) -> Result<DetailedResponse<QueryNoticesResponse>> {
        self.query_notices_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn query_notices_with_context(
        &self,
        ctx: &RequestContext,
        options: &QueryNoticesOptions,
    ) -> Result<DetailedResponse<QueryNoticesResponse>> {
        options.validate()?;
        let request = self
            .request(
                Method::GET,
                "/v2/projects/{project_id}/notices",
                "QueryNotices",
            )
            .path_param("project_id", &options.project_id)
            .headers(options.headers());
        let request = notice_query(
            request,
            options.filter.as_ref(),
            options.query.as_ref(),
            options.natural_language_query.as_ref(),
            options.count,
            options.offset,
        );
        self.service.send(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_body_uses_wire_names() {
        let opts = QueryOptions::new("p")
            .with_natural_language_query("what is ibm")
            .with_return(vec!["title".to_string()])
            .with_passages(QueryLargePassages {
                enabled: Some(true),
                max_per_document: Some(2),
                ..Default::default()
            })
            .with_header("X-Test", "1");
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({
                "natural_language_query": "what is ibm",
                "return": ["title"],
                "passages": {"enabled": true, "max_per_document": 2}
            })
        );
    }
}
