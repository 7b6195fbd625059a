//! # discovery-sdk
//!
//! Typed async client for the Discovery document-search service.
//!
//! Two API generations are exposed side by side: [`v1`] (environments,
//! configurations and collections) and [`v2`] (projects, collections and
//! enrichments). Both are thin, generated-style surfaces over one shared core:
//!
//! - [`auth`]: pluggable authenticators (none, basic, bearer, IAM, Cloud Pak for Data)
//! - [`client`]: request shaping, dispatch with optional retries, response decoding
//! - [`config`]: external configuration from environment, credentials file and `VCAP_SERVICES`
//!
//! Every operation takes an options struct, validates it before any network
//! activity and returns a [`DetailedResponse`] carrying the status code,
//! headers and decoded body.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use discovery_sdk::auth::IamAuthenticator;
//! use discovery_sdk::v2::{DiscoveryV2, DiscoveryV2Options, QueryOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> discovery_sdk::Result<()> {
//!     let discovery = DiscoveryV2::new(DiscoveryV2Options {
//!         version: "2020-08-30".into(),
//!         authenticator: Some(Arc::new(IamAuthenticator::new("my-apikey")?)),
//!         ..Default::default()
//!     })?;
//!
//!     let response = discovery
//!         .query(&QueryOptions::new("my-project").with_natural_language_query("solar panels"))
//!         .await?;
//!     if let Some(result) = response.result() {
//!         println!("{} matches", result.matching_results.unwrap_or(0));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`v1`] | Discovery v1 client and models |
//! | [`v2`] | Discovery v2 client and models |
//! | [`auth`] | Authenticators and their external configuration |
//! | [`client`] | Shared request/response core |
//! | [`aggregation`] | Query aggregation results shared by both versions |
//! | [`config`] | Service property resolution |
//! | [`transport`] | HTTP execution and retry loop |

pub mod aggregation;
pub mod auth;
pub mod client;
pub mod config;
pub mod transport;

#[cfg(feature = "v1")]
pub mod v1;

#[cfg(feature = "v2")]
pub mod v2;

pub use auth::Authenticator;
pub use client::{DetailedResponse, FilePart, RawResponse, RequestContext, RequestOptions};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
