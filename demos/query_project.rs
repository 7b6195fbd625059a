//! Query a Discovery v2 project
//!
//! Credentials come from the environment:
//! - DISCOVERY_APIKEY (and optionally DISCOVERY_URL)
//! - DISCOVERY_PROJECT_ID for the project to search
//!
//! Usage:
//!   DISCOVERY_APIKEY=... DISCOVERY_PROJECT_ID=... cargo run --example query_project -- "solar panels"

use discovery_sdk::v2::{DiscoveryV2, DiscoveryV2Options, QueryAggregation, QueryOptions};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let project_id = std::env::var("DISCOVERY_PROJECT_ID")?;
    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "what is discovery".to_string());

    let mut discovery = DiscoveryV2::new(DiscoveryV2Options {
        version: "2020-08-30".into(),
        ..Default::default()
    })?;
    discovery.enable_retries(3, Duration::from_secs(10));

    let response = discovery
        .query(
            &QueryOptions::new(project_id)
                .with_natural_language_query(text)
                .with_count(5)
                .with_aggregation("term(enriched_text.entities.type,count:5)"),
        )
        .await?;

    let Some(result) = response.result() else {
        println!("empty response (HTTP {})", response.status_code);
        return Ok(());
    };
    println!("{} matching documents", result.matching_results.unwrap_or(0));
    for doc in result.results.iter().flatten() {
        println!("- {}", doc.document_id.as_deref().unwrap_or("?"));
    }
    for aggregation in result.aggregations.iter().flatten() {
        if let QueryAggregation::Term(term) = aggregation {
            for bucket in term.results.iter().flatten() {
                println!(
                    "  {}: {}",
                    bucket.key.as_deref().unwrap_or("?"),
                    bucket.matching_results.unwrap_or(0)
                );
            }
        }
    }
    Ok(())
}
