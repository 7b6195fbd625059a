//! Shared request/response machinery used by the v1 and v2 service clients.
//!
//! Every operation follows the same path: options are validated, shaped into a
//! [`RequestBuilder`], prepared by [`BaseService`] (URL, SDK headers,
//! authentication) and executed by the transport.

pub mod builder;
pub mod context;
pub mod core;
pub mod options;
pub(crate) mod policy;
pub mod request;
pub mod response;

pub use builder::{
    service_url_for_region, BaseServiceBuilder, DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL,
};
pub use context::RequestContext;
pub use core::BaseService;
pub use options::RequestOptions;
pub use policy::RetryPolicy;
pub use request::{FilePart, FormPart, RequestBody, RequestBuilder};
pub use response::{DetailedResponse, RawResponse};
