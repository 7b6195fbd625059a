use crate::client::response::RawResponse;
use std::time::Duration;
use thiserror::Error;

/// Structured error context attached to locally raised errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Option field or configuration key that caused the error (e.g. "project_id", "IAM_APIKEY")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g. expected format, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g. "GetCollection", "iam_authenticator")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the Discovery SDK.
///
/// Locally detected problems (`Validation`, `Configuration`) never reach the
/// network. `Remote` and `Decode` carry the raw response so callers can still
/// inspect status, headers and the literal body.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Authentication error: {message}{}", format_context(.context))]
    Authentication {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("Request deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Remote error: HTTP {status}: {message}")]
    Remote {
        status: u16,
        message: String,
        response: Box<RawResponse>,
    },

    #[error("Response decode error (HTTP {}): {source}", .response.status_code)]
    Decode {
        source: serde_json::Error,
        response: Box<RawResponse>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn authentication_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Authentication {
            message: msg.into(),
            context,
        }
    }

    /// Missing or empty required option field.
    pub fn missing_parameter(field: &str) -> Self {
        Error::validation_with_context(
            format!("missing required parameter '{}'", field),
            ErrorContext::new().with_field_path(field),
        )
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Validation { context, .. }
            | Error::Authentication { context, .. } => Some(context),
            _ => None,
        }
    }

    /// The raw HTTP response, present whenever the request reached the server.
    pub fn raw_response(&self) -> Option<&RawResponse> {
        match self {
            Error::Remote { response, .. } | Error::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// HTTP status code of the failed exchange, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        self.raw_response().map(|r| r.status_code)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, Error::DeadlineExceeded(_))
    }

    /// Whether the retry policy would treat this failure as transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(e) => e.is_network(),
            Error::Remote { status, .. } => {
                crate::client::policy::RetryPolicy::is_retryable_status(*status)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_names_the_field() {
        let err = Error::missing_parameter("project_id");
        assert!(err.is_validation());
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("project_id")
        );
        assert!(err.to_string().contains("project_id"));
    }

    #[test]
    fn context_is_rendered_in_display() {
        let err = Error::configuration_with_context(
            "unrecognized authentication type",
            ErrorContext::new()
                .with_field_path("AUTH_TYPE")
                .with_details("got 'kerberos'"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("Configuration error: unrecognized authentication type"));
        assert!(msg.contains("field: AUTH_TYPE"));
        assert!(msg.contains("details: got 'kerberos'"));
    }

    #[test]
    fn local_errors_carry_no_response() {
        assert!(Error::configuration("missing service URL").raw_response().is_none());
        assert!(Error::Cancelled.status_code().is_none());
    }
}
