//! Search, notice queries and autocompletion.
//!
//! v1 query bodies use dotted keys (`passages.fields`) and send lists as
//! comma-separated strings.

use super::models::{Completions, QueryNoticesResponse, QueryResponse};
use super::{comma_joined, comma_joined_opt, DiscoveryV1};
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, RequestContext};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

const LOGGING_OPT_OUT_HEADER: &str = "X-Watson-Logging-Opt-Out";

/// Query one collection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryOptions {
    #[serde(skip)]
    pub environment_id: String,
    #[serde(skip)]
    pub collection_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_language_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(
        rename = "return",
        serialize_with = "comma_joined_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub return_: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Field names, `-` prefixed for descending order.
    #[serde(serialize_with = "comma_joined_opt", skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
    #[serde(
        rename = "passages.fields",
        serialize_with = "comma_joined_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub passages_fields: Option<Vec<String>>,
    #[serde(rename = "passages.count", skip_serializing_if = "Option::is_none")]
    pub passages_count: Option<i64>,
    #[serde(rename = "passages.characters", skip_serializing_if = "Option::is_none")]
    pub passages_characters: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduplicate: Option<bool>,
    #[serde(rename = "deduplicate.field", skip_serializing_if = "Option::is_none")]
    pub deduplicate_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar: Option<bool>,
    #[serde(
        rename = "similar.document_ids",
        serialize_with = "comma_joined_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub similar_document_ids: Option<Vec<String>>,
    #[serde(
        rename = "similar.fields",
        serialize_with = "comma_joined_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub similar_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelling_suggestions: Option<bool>,
    /// Sent as `X-Watson-Logging-Opt-Out`.
    #[serde(skip)]
    pub logging_opt_out: Option<bool>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl QueryOptions {
    pub fn new(environment_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(QueryOptions {
    with_filter => filter: String,
    with_query => query: String,
    with_natural_language_query => natural_language_query: String,
    with_passages => passages: bool,
    with_aggregation => aggregation: String,
    with_count => count: i64,
    with_return => return_: Vec<String>,
    with_offset => offset: i64,
    with_sort => sort: Vec<String>,
    with_highlight => highlight: bool,
    with_passages_fields => passages_fields: Vec<String>,
    with_passages_count => passages_count: i64,
    with_passages_characters => passages_characters: i64,
    with_deduplicate => deduplicate: bool,
    with_deduplicate_field => deduplicate_field: String,
    with_similar => similar: bool,
    with_similar_document_ids => similar_document_ids: Vec<String>,
    with_similar_fields => similar_fields: Vec<String>,
    with_bias => bias: String,
    with_spelling_suggestions => spelling_suggestions: bool,
    with_logging_opt_out => logging_opt_out: bool,
});
request_options!(QueryOptions; environment_id, collection_id);

#[derive(Debug, Clone, Default)]
pub struct QueryNoticesOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub filter: Option<String>,
    pub query: Option<String>,
    pub natural_language_query: Option<String>,
    pub passages: Option<bool>,
    pub aggregation: Option<String>,
    pub count: Option<i64>,
    pub return_: Option<Vec<String>>,
    pub offset: Option<i64>,
    pub sort: Option<Vec<String>>,
    pub highlight: Option<bool>,
    pub passages_fields: Option<Vec<String>>,
    pub passages_count: Option<i64>,
    pub passages_characters: Option<i64>,
    pub deduplicate_field: Option<String>,
    pub similar: Option<bool>,
    pub similar_document_ids: Option<Vec<String>>,
    pub similar_fields: Option<Vec<String>>,
    pub headers: HashMap<String, String>,
}

impl QueryNoticesOptions {
    pub fn new(environment_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(QueryNoticesOptions {
    with_filter => filter: String,
    with_query => query: String,
    with_natural_language_query => natural_language_query: String,
    with_passages => passages: bool,
    with_aggregation => aggregation: String,
    with_count => count: i64,
    with_return => return_: Vec<String>,
    with_offset => offset: i64,
    with_sort => sort: Vec<String>,
    with_highlight => highlight: bool,
    with_passages_fields => passages_fields: Vec<String>,
    with_passages_count => passages_count: i64,
    with_passages_characters => passages_characters: i64,
    with_deduplicate_field => deduplicate_field: String,
    with_similar => similar: bool,
    with_similar_document_ids => similar_document_ids: Vec<String>,
    with_similar_fields => similar_fields: Vec<String>,
});
request_options!(QueryNoticesOptions; environment_id, collection_id);

/// Query several collections of one environment at once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FederatedQueryOptions {
    #[serde(skip)]
    pub environment_id: String,
    #[serde(serialize_with = "comma_joined")]
    pub collection_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_language_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(
        rename = "return",
        serialize_with = "comma_joined_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub return_: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(serialize_with = "comma_joined_opt", skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
    #[serde(
        rename = "passages.fields",
        serialize_with = "comma_joined_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub passages_fields: Option<Vec<String>>,
    #[serde(rename = "passages.count", skip_serializing_if = "Option::is_none")]
    pub passages_count: Option<i64>,
    #[serde(rename = "passages.characters", skip_serializing_if = "Option::is_none")]
    pub passages_characters: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduplicate: Option<bool>,
    #[serde(rename = "deduplicate.field", skip_serializing_if = "Option::is_none")]
    pub deduplicate_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar: Option<bool>,
    #[serde(
        rename = "similar.document_ids",
        serialize_with = "comma_joined_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub similar_document_ids: Option<Vec<String>>,
    #[serde(
        rename = "similar.fields",
        serialize_with = "comma_joined_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub similar_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias: Option<String>,
    #[serde(skip)]
    pub logging_opt_out: Option<bool>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl FederatedQueryOptions {
    pub fn new(environment_id: impl Into<String>, collection_ids: Vec<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_ids,
            ..Default::default()
        }
    }
}

option_setters!(FederatedQueryOptions {
    with_filter => filter: String,
    with_query => query: String,
    with_natural_language_query => natural_language_query: String,
    with_passages => passages: bool,
    with_aggregation => aggregation: String,
    with_count => count: i64,
    with_return => return_: Vec<String>,
    with_offset => offset: i64,
    with_sort => sort: Vec<String>,
    with_highlight => highlight: bool,
    with_passages_fields => passages_fields: Vec<String>,
    with_passages_count => passages_count: i64,
    with_passages_characters => passages_characters: i64,
    with_deduplicate => deduplicate: bool,
    with_deduplicate_field => deduplicate_field: String,
    with_similar => similar: bool,
    with_similar_document_ids => similar_document_ids: Vec<String>,
    with_similar_fields => similar_fields: Vec<String>,
    with_bias => bias: String,
    with_logging_opt_out => logging_opt_out: bool,
});
request_options!(FederatedQueryOptions; environment_id, collection_ids);

#[derive(Debug, Clone, Default)]
pub struct FederatedQueryNoticesOptions {
    pub environment_id: String,
    pub collection_ids: Vec<String>,
    pub filter: Option<String>,
    pub query: Option<String>,
    pub natural_language_query: Option<String>,
    pub aggregation: Option<String>,
    pub count: Option<i64>,
    pub return_: Option<Vec<String>>,
    pub offset: Option<i64>,
    pub sort: Option<Vec<String>>,
    pub highlight: Option<bool>,
    pub deduplicate_field: Option<String>,
    pub similar: Option<bool>,
    pub similar_document_ids: Option<Vec<String>>,
    pub similar_fields: Option<Vec<String>>,
    pub headers: HashMap<String, String>,
}

impl FederatedQueryNoticesOptions {
    pub fn new(environment_id: impl Into<String>, collection_ids: Vec<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_ids,
            ..Default::default()
        }
    }
}

option_setters!(FederatedQueryNoticesOptions {
    with_filter => filter: String,
    with_query => query: String,
    with_natural_language_query => natural_language_query: String,
    with_aggregation => aggregation: String,
    with_count => count: i64,
    with_return => return_: Vec<String>,
    with_offset => offset: i64,
    with_sort => sort: Vec<String>,
    with_highlight => highlight: bool,
    with_deduplicate_field => deduplicate_field: String,
    with_similar => similar: bool,
    with_similar_document_ids => similar_document_ids: Vec<String>,
    with_similar_fields => similar_fields: Vec<String>,
});
request_options!(FederatedQueryNoticesOptions; environment_id, collection_ids);

#[derive(Debug, Clone, Default)]
pub struct GetAutocompletionOptions {
    pub environment_id: String,
    pub collection_id: String,
    pub prefix: String,
    pub field: Option<String>,
    pub count: Option<i64>,
    pub headers: HashMap<String, String>,
}

impl GetAutocompletionOptions {
    pub fn new(
        environment_id: impl Into<String>,
        collection_id: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            collection_id: collection_id.into(),
            prefix: prefix.into(),
            ..Default::default()
        }
    }
}

option_setters!(GetAutocompletionOptions {
    with_field => field: String,
    with_count => count: i64,
});
request_options!(GetAutocompletionOptions; environment_id, collection_id, prefix);

fn list(values: &Option<Vec<String>>) -> &[String] {
    values.as_deref().unwrap_or_default()
}

impl DiscoveryV1 {
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
            .request(
                Method::POST,
                "/v1/environments/{environment_id}/collections/{collection_id}/query",
                "Query",
            )
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .header_opt(LOGGING_OPT_OUT_HEADER, options.logging_opt_out)
            .headers(options.headers())
            .serialize_body(options)?;
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
                "/v1/environments/{environment_id}/collections/{collection_id}/notices",
                "QueryNotices",
            )
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .query_opt("filter", options.filter.as_ref())
            .query_opt("query", options.query.as_ref())
            .query_opt("natural_language_query", options.natural_language_query.as_ref())
            .query_opt("passages", options.passages)
            .query_opt("aggregation", options.aggregation.as_ref())
            .query_opt("count", options.count)
            .query_list("return", list(&options.return_))
            .query_opt("offset", options.offset)
            .query_list("sort", list(&options.sort))
            .query_opt("highlight", options.highlight)
            .query_list("passages.fields", list(&options.passages_fields))
            .query_opt("passages.count", options.passages_count)
            .query_opt("passages.characters", options.passages_characters)
            .query_opt("deduplicate.field", options.deduplicate_field.as_ref())
            .query_opt("similar", options.similar)
            .query_list("similar.document_ids", list(&options.similar_document_ids))
            .query_list("similar.fields", list(&options.similar_fields))
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn federated_query(
        &self,
        options: &FederatedQueryOptions,
    ) -> Result<DetailedResponse<QueryResponse>> {
        self.federated_query_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn federated_query_with_context(
        &self,
        ctx: &RequestContext,
        options: &FederatedQueryOptions,
    ) -> Result<DetailedResponse<QueryResponse>> {
        options.validate()?;
        let request = self
            .request(
                Method::POST,
                "/v1/environments/{environment_id}/query",
                "FederatedQuery",
            )
            .path_param("environment_id", &options.environment_id)
            .header_opt(LOGGING_OPT_OUT_HEADER, options.logging_opt_out)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn federated_query_notices(
        &self,
        options: &FederatedQueryNoticesOptions,
    ) -> Result<DetailedResponse<QueryNoticesResponse>> {
        self.federated_query_notices_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn federated_query_notices_with_context(
        &self,
        ctx: &RequestContext,
        options: &FederatedQueryNoticesOptions,
    ) -> Result<DetailedResponse<QueryNoticesResponse>> {
        options.validate()?;
        let request = self
            .request(
                Method::GET,
                "/v1/environments/{environment_id}/notices",
                "FederatedQueryNotices",
            )
            .path_param("environment_id", &options.environment_id)
            .query_list("collection_ids", &options.collection_ids)
            .query_opt("filter", options.filter.as_ref())
            .query_opt("query", options.query.as_ref())
            .query_opt("natural_language_query", options.natural_language_query.as_ref())
            .query_opt("aggregation", options.aggregation.as_ref())
            .query_opt("count", options.count)
            .query_list("return", list(&options.return_))
            .query_opt("offset", options.offset)
            .query_list("sort", list(&options.sort))
            .query_opt("highlight", options.highlight)
            .query_opt("deduplicate.field", options.deduplicate_field.as_ref())
            .query_opt("similar", options.similar)
            .query_list("similar.document_ids", list(&options.similar_document_ids))
            .query_list("similar.fields", list(&options.similar_fields))
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

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
                "/v1/environments/{environment_id}/collections/{collection_id}/autocompletion",
                "GetAutocompletion",
            )
            .path_param("environment_id", &options.environment_id)
            .path_param("collection_id", &options.collection_id)
            .query("prefix", &options.prefix)
            .query_opt("field", options.field.as_ref())
            .query_opt("count", options.count)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_body_uses_dotted_keys_and_joined_lists() {
        let opts = QueryOptions::new("env", "col")
            .with_natural_language_query("IBM")
            .with_return(vec!["title".to_string(), "url".to_string()])
            .with_passages_fields(vec!["text".to_string()])
            .with_passages_count(3)
            .with_logging_opt_out(true);
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({
                "natural_language_query": "IBM",
                "return": "title,url",
                "passages.fields": "text",
                "passages.count": 3
            })
        );
    }

    #[test]
    fn federated_body_joins_collection_ids() {
        let opts = FederatedQueryOptions::new("env", vec!["a".to_string(), "b".to_string()])
            .with_sort(vec!["-date".to_string()]);
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({"collection_ids": "a,b", "sort": "-date"})
        );
    }

    #[test]
    fn federated_notices_require_collection_ids() {
        let err = FederatedQueryNoticesOptions::new("env", vec![])
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("collection_ids"));
    }
}
