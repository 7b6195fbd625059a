//! v1 client behaviour against a mock service.

#[macro_use]
mod common;

use common::{MockServerFixture, V1_VERSION};
use discovery_sdk::auth::BasicAuthenticator;
use discovery_sdk::v1::*;
use discovery_sdk::{FilePart, RequestContext};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn list_environments_uses_basic_auth_and_version() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("GET", "/v1/environments")
        .await
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("version".into(), V1_VERSION.into()),
            Matcher::UrlEncoded("name".into(), "news".into()),
        ]))
        .match_header("authorization", "Basic dXNlcjpwYXNz")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"environments":[{"environment_id":"env-1","name":"news","read_only":true}]}"#)
        .create_async()
        .await;

    let client =
        fixture.v1_client_with(Arc::new(BasicAuthenticator::new("user", "pass").unwrap()));
    let response = client
        .list_environments(&ListEnvironmentsOptions::new().with_name("news"))
        .await
        .unwrap();

    mock.assert_async().await;
    let environments = response.result().unwrap().environments.as_ref().unwrap();
    assert_eq!(environments[0].environment_id.as_deref(), Some("env-1"));
}

#[tokio::test]
async fn federated_query_posts_joined_lists_and_opt_out_header() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("POST", "/v1/environments/env/query")
        .await
        .match_header("x-watson-logging-opt-out", "true")
        .match_body(Matcher::Json(json!({
            "collection_ids": "a,b",
            "natural_language_query": "budget",
            "passages.fields": "text,title",
            "count": 3
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"matching_results":2,"results":[{"id":"d1","collection_id":"a","year":2019}]}"#)
        .create_async()
        .await;

    let opts = FederatedQueryOptions::new("env", vec!["a".into(), "b".into()])
        .with_natural_language_query("budget")
        .with_passages_fields(vec!["text".to_string(), "title".to_string()])
        .with_count(3)
        .with_logging_opt_out(true);
    let response = fixture.v1_client().federated_query(&opts).await.unwrap();

    mock.assert_async().await;
    let result = response.result().unwrap();
    assert_eq!(result.matching_results, Some(2));
    let first = &result.results.as_ref().unwrap()[0];
    assert_eq!(first.extra.get("year"), Some(&json!(2019)));
}

#[tokio::test]
async fn federated_query_requires_collection_ids() {
    let fixture = MockServerFixture::new().await;
    let err = fixture
        .v1_client()
        .federated_query(&FederatedQueryOptions::new("env", Vec::new()))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("collection_ids"));
}

#[tokio::test]
async fn query_notices_sends_dotted_query_parameters() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("GET", "/v1/environments/env/collections/col/notices")
        .await
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "notices.code:error".into()),
            Matcher::UrlEncoded("passages.count".into(), "2".into()),
            Matcher::UrlEncoded("similar.fields".into(), "title,body".into()),
            Matcher::UrlEncoded("version".into(), V1_VERSION.into()),
        ]))
        .with_status(200)
        .with_body(r#"{"matching_results":0,"results":[]}"#)
        .create_async()
        .await;

    let opts = QueryNoticesOptions::new("env", "col")
        .with_query("notices.code:error")
        .with_passages_count(2)
        .with_similar_fields(vec!["title".to_string(), "body".to_string()]);
    let response = fixture.v1_client().query_notices(&opts).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.result().unwrap().matching_results, Some(0));
}

#[tokio::test]
async fn list_fields_needs_collection_ids() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("GET", "/v1/environments/env/fields")
        .await
        .expect(0)
        .create_async()
        .await;

    let err = fixture
        .v1_client()
        .list_fields(&ListFieldsOptions::new("env", Vec::new()))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    mock.assert_async().await;
}

#[tokio::test]
async fn list_fields_joins_collection_ids() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("GET", "/v1/environments/env/fields")
        .await
        .match_query(Matcher::UrlEncoded("collection_ids".into(), "c1,c2".into()))
        .with_status(200)
        .with_body(r#"{"fields":[{"field":"title","type":"string"}]}"#)
        .create_async()
        .await;

    let response = fixture
        .v1_client()
        .list_fields(&ListFieldsOptions::new("env", vec!["c1".into(), "c2".into()]))
        .await
        .unwrap();

    mock.assert_async().await;
    let fields = response.result().unwrap().fields.as_ref().unwrap();
    assert_eq!(fields[0].type_.as_deref(), Some("string"));
}

#[tokio::test]
async fn create_stopword_list_uploads_named_file() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("POST", "/v1/environments/env/collections/col/word_lists/stopwords")
        .await
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".into()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="stopword_file"; filename="stopwords.txt""#.into()),
            Matcher::Regex("the\na\nan".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"status":"pending","type":"stopwords"}"#)
        .create_async()
        .await;

    let opts = CreateStopwordListOptions::new(
        "env",
        "col",
        FilePart::new(&b"the\na\nan"[..]),
        "stopwords.txt",
    );
    let response = fixture.v1_client().create_stopword_list(&opts).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.result().unwrap().status.as_deref(), Some("pending"));
}

#[tokio::test]
async fn metrics_pass_time_window() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("GET", "/v1/metrics/event_rate")
        .await
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("start_time".into(), "2019-01-01T00:00:00Z".into()),
            Matcher::UrlEncoded("result_type".into(), "document".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "aggregations": [{
                    "interval": "1d",
                    "event_type": "click",
                    "results": [{"key": 1546300800000i64, "matching_results": 10, "event_rate": 0.4}]
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let opts = GetMetricsEventRateOptions::new()
        .with_start_time("2019-01-01T00:00:00Z")
        .with_result_type("document");
    let response = fixture.v1_client().get_metrics_event_rate(&opts).await.unwrap();

    mock.assert_async().await;
    let aggregation = &response.result().unwrap().aggregations.as_ref().unwrap()[0];
    let point = &aggregation.results.as_ref().unwrap()[0];
    assert_eq!(point.event_rate, Some(0.4));
}

#[tokio::test]
async fn delete_user_data_sends_customer_id() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("DELETE", "/v1/user_data")
        .await
        .match_query(Matcher::UrlEncoded("customer_id".into(), "cust-9".into()))
        .with_status(200)
        .create_async()
        .await;

    let response = fixture
        .v1_client()
        .delete_user_data(&DeleteUserDataOptions::new("cust-9"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(response.result().is_none());
}

#[tokio::test]
async fn create_event_answers_created() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock("POST", "/v1/events")
        .await
        .match_body(Matcher::PartialJson(json!({"type": "click"})))
        .with_status(201)
        .with_body(r#"{"type":"click","data":{"environment_id":"env","session_token":"tok"}}"#)
        .create_async()
        .await;

    let opts = CreateEventOptions::new(
        "click",
        EventData {
            environment_id: Some("env".into()),
            session_token: Some("tok".into()),
            ..Default::default()
        },
    );
    let response = fixture.v1_client().create_event(&opts).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status_code, 201);
    assert_eq!(response.result().unwrap().type_.as_deref(), Some("click"));
}

fn operations() -> Vec<common::OperationCase<DiscoveryV1>> {
    vec![
        operation_case!(DiscoveryV1, "POST", "/v1/environments/env/collections", false, |c, ctx| c
            .create_collection_with_context(&ctx, &CreateCollectionOptions::new("env", "news"))),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/collections", false, |c, ctx| c
            .list_collections_with_context(&ctx, &ListCollectionsOptions::new("env"))),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/collections/col", false, |c, ctx| c
            .get_collection_with_context(&ctx, &GetCollectionOptions::new("env", "col"))),
        operation_case!(DiscoveryV1, "PUT", "/v1/environments/env/collections/col", false, |c, ctx| c
            .update_collection_with_context(
                &ctx,
                &UpdateCollectionOptions::new("env", "col", "renamed"),
            )),
        operation_case!(DiscoveryV1, "DELETE", "/v1/environments/env/collections/col", false, |c, ctx| c
            .delete_collection_with_context(&ctx, &DeleteCollectionOptions::new("env", "col"))),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/collections/col/fields", false, |c, ctx| c
            .list_collection_fields_with_context(
                &ctx,
                &ListCollectionFieldsOptions::new("env", "col"),
            )),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/collections/col/expansions", false, |c, ctx| c
            .list_expansions_with_context(&ctx, &ListExpansionsOptions::new("env", "col"))),
        operation_case!(DiscoveryV1, "POST", "/v1/environments/env/collections/col/expansions", false, |c, ctx| c
            .create_expansions_with_context(
                &ctx,
                &CreateExpansionsOptions::new("env", "col", vec![Expansion::default()]),
            )),
        operation_case!(DiscoveryV1, "DELETE", "/v1/environments/env/collections/col/expansions", true, |c, ctx| c
            .delete_expansions_with_context(&ctx, &DeleteExpansionsOptions::new("env", "col"))),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/collections/col/word_lists/tokenization_dictionary", false, |c, ctx| c
            .get_tokenization_dictionary_status_with_context(
                &ctx,
                &GetTokenizationDictionaryStatusOptions::new("env", "col"),
            )),
        operation_case!(DiscoveryV1, "POST", "/v1/environments/env/collections/col/word_lists/tokenization_dictionary", false, |c, ctx| c
            .create_tokenization_dictionary_with_context(
                &ctx,
                &CreateTokenizationDictionaryOptions::new("env", "col"),
            )),
        operation_case!(DiscoveryV1, "DELETE", "/v1/environments/env/collections/col/word_lists/tokenization_dictionary", true, |c, ctx| c
            .delete_tokenization_dictionary_with_context(
                &ctx,
                &DeleteTokenizationDictionaryOptions::new("env", "col"),
            )),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/collections/col/word_lists/stopwords", false, |c, ctx| c
            .get_stopword_list_status_with_context(
                &ctx,
                &GetStopwordListStatusOptions::new("env", "col"),
            )),
        operation_case!(DiscoveryV1, "POST", "/v1/environments/env/collections/col/word_lists/stopwords", false, |c, ctx| c
            .create_stopword_list_with_context(
                &ctx,
                &CreateStopwordListOptions::new("env", "col", FilePart::new("the\n"), "stopwords.txt"),
            )),
        operation_case!(DiscoveryV1, "DELETE", "/v1/environments/env/collections/col/word_lists/stopwords", true, |c, ctx| c
            .delete_stopword_list_with_context(
                &ctx,
                &DeleteStopwordListOptions::new("env", "col"),
            )),
        operation_case!(DiscoveryV1, "POST", "/v1/environments/env/configurations", false, |c, ctx| c
            .create_configuration_with_context(
                &ctx,
                &CreateConfigurationOptions::new("env", "default"),
            )),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/configurations", false, |c, ctx| c
            .list_configurations_with_context(&ctx, &ListConfigurationsOptions::new("env"))),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/configurations/cfg", false, |c, ctx| c
            .get_configuration_with_context(&ctx, &GetConfigurationOptions::new("env", "cfg"))),
        operation_case!(DiscoveryV1, "PUT", "/v1/environments/env/configurations/cfg", false, |c, ctx| c
            .update_configuration_with_context(
                &ctx,
                &UpdateConfigurationOptions::new("env", "cfg", "renamed"),
            )),
        operation_case!(DiscoveryV1, "DELETE", "/v1/environments/env/configurations/cfg", false, |c, ctx| c
            .delete_configuration_with_context(
                &ctx,
                &DeleteConfigurationOptions::new("env", "cfg"),
            )),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/credentials", false, |c, ctx| c
            .list_credentials_with_context(&ctx, &ListCredentialsOptions::new("env"))),
        operation_case!(DiscoveryV1, "POST", "/v1/environments/env/credentials", false, |c, ctx| c
            .create_credentials_with_context(&ctx, &CreateCredentialsOptions::new("env"))),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/credentials/cred", false, |c, ctx| c
            .get_credentials_with_context(&ctx, &GetCredentialsOptions::new("env", "cred"))),
        operation_case!(DiscoveryV1, "PUT", "/v1/environments/env/credentials/cred", false, |c, ctx| c
            .update_credentials_with_context(&ctx, &UpdateCredentialsOptions::new("env", "cred"))),
        operation_case!(DiscoveryV1, "DELETE", "/v1/environments/env/credentials/cred", false, |c, ctx| c
            .delete_credentials_with_context(&ctx, &DeleteCredentialsOptions::new("env", "cred"))),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/gateways", false, |c, ctx| c
            .list_gateways_with_context(&ctx, &ListGatewaysOptions::new("env"))),
        operation_case!(DiscoveryV1, "POST", "/v1/environments/env/gateways", false, |c, ctx| c
            .create_gateway_with_context(&ctx, &CreateGatewayOptions::new("env"))),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/gateways/gw", false, |c, ctx| c
            .get_gateway_with_context(&ctx, &GetGatewayOptions::new("env", "gw"))),
        operation_case!(DiscoveryV1, "DELETE", "/v1/environments/env/gateways/gw", false, |c, ctx| c
            .delete_gateway_with_context(&ctx, &DeleteGatewayOptions::new("env", "gw"))),
        operation_case!(DiscoveryV1, "POST", "/v1/environments/env/collections/col/documents", false, |c, ctx| c
            .add_document_with_context(
                &ctx,
                &AddDocumentOptions::new("env", "col").with_metadata("{}"),
            )),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/collections/col/documents/doc", false, |c, ctx| c
            .get_document_status_with_context(
                &ctx,
                &GetDocumentStatusOptions::new("env", "col", "doc"),
            )),
        operation_case!(DiscoveryV1, "POST", "/v1/environments/env/collections/col/documents/doc", false, |c, ctx| c
            .update_document_with_context(
                &ctx,
                &UpdateDocumentOptions::new("env", "col", "doc").with_metadata("{}"),
            )),
        operation_case!(DiscoveryV1, "DELETE", "/v1/environments/env/collections/col/documents/doc", false, |c, ctx| c
            .delete_document_with_context(&ctx, &DeleteDocumentOptions::new("env", "col", "doc"))),
        operation_case!(DiscoveryV1, "POST", "/v1/environments", false, |c, ctx| c
            .create_environment_with_context(&ctx, &CreateEnvironmentOptions::new("news"))),
        operation_case!(DiscoveryV1, "GET", "/v1/environments", false, |c, ctx| c
            .list_environments_with_context(&ctx, &ListEnvironmentsOptions::new())),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env", false, |c, ctx| c
            .get_environment_with_context(&ctx, &GetEnvironmentOptions::new("env"))),
        operation_case!(DiscoveryV1, "PUT", "/v1/environments/env", false, |c, ctx| c
            .update_environment_with_context(&ctx, &UpdateEnvironmentOptions::new("env"))),
        operation_case!(DiscoveryV1, "DELETE", "/v1/environments/env", false, |c, ctx| c
            .delete_environment_with_context(&ctx, &DeleteEnvironmentOptions::new("env"))),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/fields", false, |c, ctx| c
            .list_fields_with_context(
                &ctx,
                &ListFieldsOptions::new("env", vec!["col".to_string()]),
            )),
        operation_case!(DiscoveryV1, "DELETE", "/v1/user_data", true, |c, ctx| c
            .delete_user_data_with_context(&ctx, &DeleteUserDataOptions::new("customer"))),
        operation_case!(DiscoveryV1, "POST", "/v1/events", false, |c, ctx| c
            .create_event_with_context(
                &ctx,
                &CreateEventOptions::new("click", EventData::default()),
            )),
        operation_case!(DiscoveryV1, "GET", "/v1/logs", false, |c, ctx| c
            .query_log_with_context(&ctx, &QueryLogOptions::new())),
        operation_case!(DiscoveryV1, "GET", "/v1/metrics/number_of_queries", false, |c, ctx| c
            .get_metrics_query_with_context(&ctx, &GetMetricsQueryOptions::new())),
        operation_case!(DiscoveryV1, "GET", "/v1/metrics/number_of_queries_with_event", false, |c, ctx| c
            .get_metrics_query_event_with_context(&ctx, &GetMetricsQueryEventOptions::new())),
        operation_case!(DiscoveryV1, "GET", "/v1/metrics/number_of_queries_with_no_search_results", false, |c, ctx| c
            .get_metrics_query_no_results_with_context(
                &ctx,
                &GetMetricsQueryNoResultsOptions::new(),
            )),
        operation_case!(DiscoveryV1, "GET", "/v1/metrics/event_rate", false, |c, ctx| c
            .get_metrics_event_rate_with_context(&ctx, &GetMetricsEventRateOptions::new())),
        operation_case!(DiscoveryV1, "GET", "/v1/metrics/top_query_tokens_with_event_rate", false, |c, ctx| c
            .get_metrics_query_token_event_with_context(
                &ctx,
                &GetMetricsQueryTokenEventOptions::new(),
            )),
        operation_case!(DiscoveryV1, "POST", "/v1/environments/env/collections/col/query", false, |c, ctx| c
            .query_with_context(&ctx, &QueryOptions::new("env", "col"))),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/collections/col/notices", false, |c, ctx| c
            .query_notices_with_context(&ctx, &QueryNoticesOptions::new("env", "col"))),
        operation_case!(DiscoveryV1, "POST", "/v1/environments/env/query", false, |c, ctx| c
            .federated_query_with_context(
                &ctx,
                &FederatedQueryOptions::new("env", vec!["col".to_string()]),
            )),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/notices", false, |c, ctx| c
            .federated_query_notices_with_context(
                &ctx,
                &FederatedQueryNoticesOptions::new("env", vec!["col".to_string()]),
            )),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/collections/col/autocompletion", false, |c, ctx| c
            .get_autocompletion_with_context(
                &ctx,
                &GetAutocompletionOptions::new("env", "col", "sol"),
            )),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/collections/col/training_data", false, |c, ctx| c
            .list_training_data_with_context(&ctx, &ListTrainingDataOptions::new("env", "col"))),
        operation_case!(DiscoveryV1, "POST", "/v1/environments/env/collections/col/training_data", false, |c, ctx| c
            .add_training_data_with_context(&ctx, &AddTrainingDataOptions::new("env", "col"))),
        operation_case!(DiscoveryV1, "DELETE", "/v1/environments/env/collections/col/training_data", true, |c, ctx| c
            .delete_all_training_data_with_context(
                &ctx,
                &DeleteAllTrainingDataOptions::new("env", "col"),
            )),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/collections/col/training_data/q", false, |c, ctx| c
            .get_training_data_with_context(&ctx, &GetTrainingDataOptions::new("env", "col", "q"))),
        operation_case!(DiscoveryV1, "DELETE", "/v1/environments/env/collections/col/training_data/q", true, |c, ctx| c
            .delete_training_data_with_context(
                &ctx,
                &DeleteTrainingDataOptions::new("env", "col", "q"),
            )),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/collections/col/training_data/q/examples", false, |c, ctx| c
            .list_training_examples_with_context(
                &ctx,
                &ListTrainingExamplesOptions::new("env", "col", "q"),
            )),
        operation_case!(DiscoveryV1, "POST", "/v1/environments/env/collections/col/training_data/q/examples", false, |c, ctx| c
            .create_training_example_with_context(
                &ctx,
                &CreateTrainingExampleOptions::new("env", "col", "q"),
            )),
        operation_case!(DiscoveryV1, "DELETE", "/v1/environments/env/collections/col/training_data/q/examples/ex", true, |c, ctx| c
            .delete_training_example_with_context(
                &ctx,
                &DeleteTrainingExampleOptions::new("env", "col", "q", "ex"),
            )),
        operation_case!(DiscoveryV1, "PUT", "/v1/environments/env/collections/col/training_data/q/examples/ex", false, |c, ctx| c
            .update_training_example_with_context(
                &ctx,
                &UpdateTrainingExampleOptions::new("env", "col", "q", "ex"),
            )),
        operation_case!(DiscoveryV1, "GET", "/v1/environments/env/collections/col/training_data/q/examples/ex", false, |c, ctx| c
            .get_training_example_with_context(
                &ctx,
                &GetTrainingExampleOptions::new("env", "col", "q", "ex"),
            )),
    ]
}

#[tokio::test]
async fn every_operation_reaches_its_route_with_version() {
    let fixture = MockServerFixture::new().await;
    let cases = operations();
    assert_eq!(cases.len(), 62);
    fixture
        .assert_routes(&fixture.v1_client(), V1_VERSION, &cases)
        .await;
}

#[tokio::test]
async fn every_operation_needs_a_service_url() {
    let fixture = MockServerFixture::new().await;
    let mut client = fixture.v1_client();
    client.set_service_url("").unwrap();
    common::assert_missing_service_url(&client, &operations()).await;
}

#[tokio::test]
async fn every_operation_reports_malformed_json_with_and_without_retries() {
    let fixture = MockServerFixture::new().await;
    let mut client = fixture.v1_client();
    let cases = operations();
    fixture.assert_malformed_json_handling(&client, &cases).await;
    client.enable_retries(2, Duration::from_secs(1));
    fixture.assert_malformed_json_handling(&client, &cases).await;
}

#[tokio::test]
async fn every_operation_honours_an_expired_deadline() {
    let fixture = MockServerFixture::new().await;
    fixture
        .assert_expired_deadline_sends_nothing(&fixture.v1_client(), &operations())
        .await;
}
