//! Response envelopes returned by every operation.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// Undecoded HTTP response as received from the service.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status_code: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Body as UTF-8 text (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// First non-empty value among the given header names.
    pub fn header_first(&self, names: &[&str]) -> Option<String> {
        for name in names {
            if let Some(v) = self.headers.get(*name) {
                if let Ok(s) = v.to_str() {
                    let s = s.trim();
                    if !s.is_empty() {
                        return Some(s.to_string());
                    }
                }
            }
        }
        None
    }
}

/// Successful operation outcome: HTTP metadata plus the decoded result.
///
/// `result` is `None` when the service answered 2xx with an empty body.
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    pub status_code: u16,
    pub headers: HeaderMap,
    pub result: Option<T>,
    pub raw_body: Bytes,
}

impl<T> DetailedResponse<T> {
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<T> {
        self.result
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl<T: DeserializeOwned> DetailedResponse<T> {
    /// Decode a 2xx response. Empty (or whitespace-only) bodies yield `result: None`.
    pub(crate) fn from_raw(raw: RawResponse) -> crate::Result<Self> {
        if raw.body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Self {
                status_code: raw.status_code,
                headers: raw.headers,
                result: None,
                raw_body: raw.body,
            });
        }
        match serde_json::from_slice::<T>(&raw.body) {
            Ok(value) => Ok(Self {
                status_code: raw.status_code,
                headers: raw.headers,
                result: Some(value),
                raw_body: raw.body,
            }),
            Err(source) => Err(crate::Error::Decode {
                source,
                response: Box::new(raw),
            }),
        }
    }
}

/// Extract a human-readable message from a service error body.
pub(crate) fn error_message_from_body(body: &[u8]) -> Option<String> {
    let json: serde_json::Value = serde_json::from_slice(body).ok()?;
    for key in ["error", "message", "errorMessage", "msg"] {
        if let Some(s) = json.get(key).and_then(|v| v.as_str()) {
            return Some(s.to_string());
        }
        // {"error": {"message": "..."}}
        if let Some(s) = json
            .get(key)
            .and_then(|v| v.get("message"))
            .and_then(|v| v.as_str())
        {
            return Some(s.to_string());
        }
    }
    json.get("errors")
        .and_then(|v| v.as_array())
        .and_then(|a| a.first())
        .and_then(|e| e.get("message"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Collection {
        collection_id: Option<String>,
    }

    fn raw(status: u16, body: &'static str) -> RawResponse {
        RawResponse {
            status_code: status,
            headers: HeaderMap::new(),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[test]
    fn empty_body_has_no_result() {
        let resp = DetailedResponse::<Collection>::from_raw(raw(204, "")).unwrap();
        assert_eq!(resp.status_code, 204);
        assert!(resp.result.is_none());
    }

    #[test]
    fn json_body_is_decoded() {
        let resp =
            DetailedResponse::<Collection>::from_raw(raw(200, r#"{"collection_id":"c1"}"#)).unwrap();
        assert_eq!(resp.result.unwrap().collection_id.as_deref(), Some("c1"));
    }

    #[test]
    fn malformed_body_keeps_raw_response() {
        let err = DetailedResponse::<Collection>::from_raw(raw(200, "} this is not valid json {"))
            .unwrap_err();
        assert!(matches!(err, crate::Error::Decode { .. }));
        let raw = err.raw_response().unwrap();
        assert_eq!(raw.status_code, 200);
        assert_eq!(raw.text(), "} this is not valid json {");
    }

    #[test]
    fn error_message_shapes() {
        assert_eq!(
            error_message_from_body(br#"{"error":"Collection not found","code":404}"#).as_deref(),
            Some("Collection not found")
        );
        assert_eq!(
            error_message_from_body(br#"{"errors":[{"code":"bad","message":"Invalid project"}]}"#)
                .as_deref(),
            Some("Invalid project")
        );
        assert_eq!(
            error_message_from_body(br#"{"error":{"message":"nested"}}"#).as_deref(),
            Some("nested")
        );
        assert!(error_message_from_body(b"<html>").is_none());
    }
}
