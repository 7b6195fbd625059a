//! HTTP execution layer shared by every service client.

pub mod http;

pub use http::{HttpTransport, PreparedRequest};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Connection-level failures and per-request timeouts.
    pub fn is_network(&self) -> bool {
        match self {
            TransportError::Http(e) => e.is_connect() || e.is_timeout(),
            TransportError::Other(_) => false,
        }
    }
}
