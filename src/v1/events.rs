//! Usage events, query logs, metrics and user-data deletion.

use super::models::{
    CreateEventResponse, EventData, LogQueryResponse, MetricResponse, MetricTokenResponse,
};
use super::DiscoveryV1;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, RequestBuilder, RequestContext};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

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

/// Record a click on a query result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateEventOptions {
    /// Only `click` is accepted.
    #[serde(rename = "type")]
    pub type_: String,
    pub data: Option<EventData>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateEventOptions {
    pub fn new(type_: impl Into<String>, data: EventData) -> Self {
        Self {
            type_: type_.into(),
            data: Some(data),
            ..Default::default()
        }
    }
}

request_options!(CreateEventOptions; type_, data);

#[derive(Debug, Clone, Default)]
pub struct QueryLogOptions {
    pub filter: Option<String>,
    pub query: Option<String>,
    pub count: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<Vec<String>>,
    pub headers: HashMap<String, String>,
}

impl QueryLogOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

option_setters!(QueryLogOptions {
    with_filter => filter: String,
    with_query => query: String,
    with_count => count: i64,
    with_offset => offset: i64,
    with_sort => sort: Vec<String>,
});
request_options!(QueryLogOptions);

/// Time window and result filter shared by the rate metrics.
///
/// Times are RFC 3339 strings; `result_type` is `document` to restrict to
/// document results.
#[derive(Debug, Clone, Default)]
pub struct MetricsOptions {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub result_type: Option<String>,
    pub headers: HashMap<String, String>,
}

impl MetricsOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

option_setters!(MetricsOptions {
    with_start_time => start_time: String,
    with_end_time => end_time: String,
    with_result_type => result_type: String,
});
request_options!(MetricsOptions);

pub type GetMetricsQueryOptions = MetricsOptions;
pub type GetMetricsQueryEventOptions = MetricsOptions;
pub type GetMetricsQueryNoResultsOptions = MetricsOptions;
pub type GetMetricsEventRateOptions = MetricsOptions;

#[derive(Debug, Clone, Default)]
pub struct GetMetricsQueryTokenEventOptions {
    pub count: Option<i64>,
    pub headers: HashMap<String, String>,
}

impl GetMetricsQueryTokenEventOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

option_setters!(GetMetricsQueryTokenEventOptions { with_count => count: i64 });
request_options!(GetMetricsQueryTokenEventOptions);

impl MetricsOptions {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .query_opt("start_time", self.start_time.as_ref())
            .query_opt("end_time", self.end_time.as_ref())
            .query_opt("result_type", self.result_type.as_ref())
            .headers(self.headers())
    }
}

impl DiscoveryV1 {
    /// Delete all data associated with a customer id. Answers `200 OK` with no body.
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
            .request(Method::DELETE, "/v1/user_data", "DeleteUserData")
            .query("customer_id", &options.customer_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }

    /// Answers `201 Created`.
    pub async fn create_event(
        &self,
        options: &CreateEventOptions,
    ) -> Result<DetailedResponse<CreateEventResponse>> {
        self.create_event_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_event_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateEventOptions,
    ) -> Result<DetailedResponse<CreateEventResponse>> {
        options.validate()?;
        let request = self
            .request(Method::POST, "/v1/events", "CreateEvent")
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    /// Search the log of queries and events.
    pub async fn query_log(
        &self,
        options: &QueryLogOptions,
    ) -> Result<DetailedResponse<LogQueryResponse>> {
        self.query_log_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn query_log_with_context(
        &self,
        ctx: &RequestContext,
        options: &QueryLogOptions,
    ) -> Result<DetailedResponse<LogQueryResponse>> {
        options.validate()?;
        let request = self
            .request(Method::GET, "/v1/logs", "QueryLog")
            .query_opt("filter", options.filter.as_ref())
            .query_opt("query", options.query.as_ref())
            .query_opt("count", options.count)
            .query_opt("offset", options.offset)
            .query_list("sort", options.sort.as_deref().unwrap_or_default())
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Number of queries over time.
    pub async fn get_metrics_query(
        &self,
        options: &GetMetricsQueryOptions,
    ) -> Result<DetailedResponse<MetricResponse>> {
        self.get_metrics_query_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_metrics_query_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetMetricsQueryOptions,
    ) -> Result<DetailedResponse<MetricResponse>> {
        options.validate()?;
        let request = options.apply(self.request(
            Method::GET,
            "/v1/metrics/number_of_queries",
            "GetMetricsQuery",
        ));
        self.service.send(ctx, request).await
    }

    /// Number of queries with at least one click event.
    pub async fn get_metrics_query_event(
        &self,
        options: &GetMetricsQueryEventOptions,
    ) -> Result<DetailedResponse<MetricResponse>> {
        self.get_metrics_query_event_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_metrics_query_event_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetMetricsQueryEventOptions,
    ) -> Result<DetailedResponse<MetricResponse>> {
        options.validate()?;
        let request = options.apply(self.request(
            Method::GET,
            "/v1/metrics/number_of_queries_with_event",
            "GetMetricsQueryEvent",
        ));
        self.service.send(ctx, request).await
    }

    /// Number of queries that returned no results.
    pub async fn get_metrics_query_no_results(
        &self,
        options: &GetMetricsQueryNoResultsOptions,
    ) -> Result<DetailedResponse<MetricResponse>> {
        self.get_metrics_query_no_results_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_metrics_query_no_results_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetMetricsQueryNoResultsOptions,
    ) -> Result<DetailedResponse<MetricResponse>> {
        options.validate()?;
        let request = options.apply(self.request(
            Method::GET,
            "/v1/metrics/number_of_queries_with_no_search_results",
            "GetMetricsQueryNoResults",
        ));
        self.service.send(ctx, request).await
    }

    /// Fraction of queries that produced a click event.
    pub async fn get_metrics_event_rate(
        &self,
        options: &GetMetricsEventRateOptions,
    ) -> Result<DetailedResponse<MetricResponse>> {
        self.get_metrics_event_rate_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_metrics_event_rate_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetMetricsEventRateOptions,
    ) -> Result<DetailedResponse<MetricResponse>> {
        options.validate()?;
        let request = options.apply(self.request(
            Method::GET,
            "/v1/metrics/event_rate",
            "GetMetricsEventRate",
        ));
        self.service.send(ctx, request).await
    }

    /// Most frequent query tokens with their event rate.
    pub async fn get_metrics_query_token_event(
        &self,
        options: &GetMetricsQueryTokenEventOptions,
    ) -> Result<DetailedResponse<MetricTokenResponse>> {
        self.get_metrics_query_token_event_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_metrics_query_token_event_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetMetricsQueryTokenEventOptions,
    ) -> Result<DetailedResponse<MetricTokenResponse>> {
        options.validate()?;
        let request = self
            .request(
                Method::GET,
                "/v1/metrics/top_query_tokens_with_event_rate",
                "GetMetricsQueryTokenEvent",
            )
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
    fn event_body_is_tagged_with_type() {
        let opts = CreateEventOptions::new(
            "click",
            EventData {
                environment_id: Some("env".into()),
                session_token: Some("tok".into()),
                collection_id: Some("col".into()),
                document_id: Some("doc".into()),
                ..Default::default()
            },
        );
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({
                "type": "click",
                "data": {
                    "environment_id": "env",
                    "session_token": "tok",
                    "collection_id": "col",
                    "document_id": "doc"
                }
            })
        );
    }

    #[test]
    fn event_without_data_fails_validation() {
        let opts = CreateEventOptions {
            type_: "click".into(),
            ..Default::default()
        };
        let err = opts.validate().unwrap_err();
        assert!(err.to_string().contains("data"));
    }
}
