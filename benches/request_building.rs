//! Benchmarks for request shaping
//!
//! This benchmark measures:
//! - URL resolution with path parameters and query lists
//! - Query body serialization
//! - Full preparation including SDK headers and authentication

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use reqwest::Method;
use std::sync::Arc;

use discovery_sdk::auth::BearerTokenAuthenticator;
use discovery_sdk::client::RequestBuilder;
use discovery_sdk::v2::{DiscoveryV2, DiscoveryV2Options, QueryOptions};

const SERVICE_URL: &str = "https://api.us-south.discovery.watson.cloud.ibm.com";

fn query_builder(collections: usize) -> RequestBuilder {
    let ids: Vec<String> = (0..collections).map(|i| format!("collection-{}", i)).collect();
    RequestBuilder::new(
        Method::GET,
        "/v2/projects/{project_id}/collections/{collection_id}/documents",
        "ListDocuments",
    )
    .query("version", "2020-08-30")
    .path_param("project_id", "project with spaces")
    .path_param("collection_id", "c/1")
    .query_list("collection_ids", &ids)
    .query_opt("count", Some(50))
}

fn bench_url_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("url_resolution");

    for collections in [1usize, 10, 100] {
        let builder = query_builder(collections);
        group.throughput(Throughput::Elements(collections as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(collections),
            &builder,
            |b, builder| b.iter(|| black_box(builder).build_url(SERVICE_URL).unwrap()),
        );
    }

    group.finish();
}

fn bench_body_serialization(c: &mut Criterion) {
    let opts = QueryOptions::new("project")
        .with_collection_ids(vec!["a".to_string(), "b".to_string()])
        .with_natural_language_query("how do solar panels work")
        .with_aggregation("term(enriched_text.entities.type,count:10)")
        .with_count(25)
        .with_return(vec!["title".to_string(), "text".to_string()]);

    c.bench_function("serialize_query_body", |b| {
        b.iter(|| serde_json::to_vec(black_box(&opts)).unwrap())
    });
}

fn bench_prepare(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let client = DiscoveryV2::new(DiscoveryV2Options {
        version: "2020-08-30".into(),
        service_url: Some(SERVICE_URL.into()),
        authenticator: Some(Arc::new(BearerTokenAuthenticator::new("token").unwrap())),
        service_name: None,
    })
    .unwrap();

    c.bench_function("prepare_request", |b| {
        b.to_async(&rt).iter(|| async {
            client
                .service()
                .prepare(query_builder(10))
                .await
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_url_resolution,
    bench_body_serialization,
    bench_prepare,
);
criterion_main!(benches);
