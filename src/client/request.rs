//! Request shaping: path templates, query parameters, headers and bodies.

use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use std::collections::HashMap;
use url::Url;

/// Binary payload for multipart uploads.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub data: Bytes,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

impl FilePart {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            filename: None,
            content_type: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, using its file name for the part.
    pub async fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let mut part = Self::new(data);
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            part.filename = Some(name.to_string());
        }
        Ok(part)
    }
}

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
        content_type: Option<String>,
    },
    File {
        name: String,
        file: FilePart,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    /// Build a fresh reqwest form; forms are single-use so this runs once per attempt.
    pub(crate) fn to_form(parts: &[FormPart]) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in parts {
            form = match part {
                FormPart::Text {
                    name,
                    value,
                    content_type,
                } => {
                    let mut p = reqwest::multipart::Part::text(value.clone());
                    if let Some(ct) = content_type {
                        p = p.mime_str(ct).map_err(|e| {
                            Error::configuration(format!("Invalid content type '{}': {}", ct, e))
                        })?;
                    }
                    form.part(name.clone(), p)
                }
                FormPart::File { name, file } => {
                    let mut p = reqwest::multipart::Part::bytes(file.data.to_vec());
                    p = p.file_name(file.filename.clone().unwrap_or_else(|| name.clone()));
                    let ct = file
                        .content_type
                        .as_deref()
                        .unwrap_or("application/octet-stream");
                    p = p.mime_str(ct).map_err(|e| {
                        Error::configuration(format!("Invalid content type '{}': {}", ct, e))
                    })?;
                    form.part(name.clone(), p)
                }
            };
        }
        Ok(form)
    }
}

/// Builder for a single service request.
///
/// Path parameters are substituted segment by segment and percent-encoded
/// when the final URL is resolved against the service URL.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    path_template: &'static str,
    path_params: Vec<(&'static str, String)>,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: RequestBody,
    operation_id: &'static str,
}

impl RequestBuilder {
    pub fn new(method: Method, path_template: &'static str, operation_id: &'static str) -> Self {
        Self {
            method,
            path_template,
            path_params: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            operation_id,
        }
    }

    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Append a query parameter only when the value is set.
    pub fn query_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(name, v),
            None => self,
        }
    }

    /// Append a comma-joined list parameter when the list is non-empty.
    pub fn query_list(self, name: &str, values: &[String]) -> Self {
        if values.is_empty() {
            self
        } else {
            self.query(name, values.join(","))
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.header(name, v.to_string()),
            None => self,
        }
    }

    /// Merge per-call headers; they are applied after (and override) SDK defaults.
    pub fn headers(mut self, headers: &HashMap<String, String>) -> Self {
        for (k, v) in headers {
            self.headers.push((k.clone(), v.clone()));
        }
        self
    }

    pub fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn serialize_body<T: serde::Serialize>(self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        Ok(self.json_body(value))
    }

    pub fn form_text(self, name: &str, value: impl Into<String>) -> Self {
        self.form_part(FormPart::Text {
            name: name.to_string(),
            value: value.into(),
            content_type: None,
        })
    }

    /// Add a JSON-encoded text part with `application/json` content type.
    pub fn form_json<T: serde::Serialize>(self, name: &str, value: &T) -> Result<Self> {
        let encoded = serde_json::to_string(value)?;
        Ok(self.form_part(FormPart::Text {
            name: name.to_string(),
            value: encoded,
            content_type: Some("application/json".to_string()),
        }))
    }

    pub fn form_file(self, name: &str, file: FilePart) -> Self {
        self.form_part(FormPart::File {
            name: name.to_string(),
            file,
        })
    }

    /// Attach the `file` and `metadata` parts of a document upload.
    ///
    /// At least one of the two must be present. `filename` and
    /// `file_content_type` override what the file part carries.
    pub(crate) fn document_parts(
        mut self,
        file: Option<&FilePart>,
        filename: Option<&String>,
        file_content_type: Option<&String>,
        metadata: Option<&String>,
    ) -> Result<Self> {
        if file.is_none() && metadata.is_none() {
            return Err(Error::validation_with_context(
                "at least one of file or metadata must be supplied",
                ErrorContext::new().with_field_path("file"),
            ));
        }
        if let Some(file) = file {
            let mut part = file.clone();
            if let Some(name) = filename {
                part.filename = Some(name.clone());
            }
            if let Some(ct) = file_content_type {
                part.content_type = Some(ct.clone());
            }
            self = self.form_file("file", part);
        }
        if let Some(metadata) = metadata {
            self = self.form_text("metadata", metadata.clone());
        }
        Ok(self)
    }

    fn form_part(mut self, part: FormPart) -> Self {
        match &mut self.body {
            RequestBody::Multipart(parts) => parts.push(part),
            _ => self.body = RequestBody::Multipart(vec![part]),
        }
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn operation_id(&self) -> &'static str {
        self.operation_id
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub(crate) fn into_body(self) -> RequestBody {
        self.body
    }

    /// Resolve the full request URL against `service_url`.
    pub fn build_url(&self, service_url: &str) -> Result<Url> {
        if service_url.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "missing service URL",
                ErrorContext::new().with_source(self.operation_id),
            ));
        }
        let mut url = Url::parse(service_url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid service URL '{}': {}", service_url, e),
                ErrorContext::new().with_source(self.operation_id),
            )
        })?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                Error::configuration(format!("service URL '{}' cannot be a base", service_url))
            })?;
            segments.pop_if_empty();
            for segment in self.path_template.split('/').filter(|s| !s.is_empty()) {
                match segment
                    .strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                {
                    Some(name) => {
                        let value = self
                            .path_params
                            .iter()
                            .find(|(n, _)| *n == name)
                            .map(|(_, v)| v.as_str())
                            .ok_or_else(|| Error::missing_parameter(name))?;
                        segments.push(value);
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &self.query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Convert accumulated headers into a `HeaderMap`; later entries win.
    pub fn build_headers(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        for (k, v) in &self.headers {
            let name = HeaderName::from_bytes(k.as_bytes()).map_err(|e| {
                Error::validation_with_context(
                    format!("invalid header name '{}': {}", k, e),
                    ErrorContext::new().with_field_path("headers"),
                )
            })?;
            let value = HeaderValue::from_str(v).map_err(|e| {
                Error::validation_with_context(
                    format!("invalid value for header '{}': {}", k, e),
                    ErrorContext::new().with_field_path("headers"),
                )
            })?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_params_are_substituted_and_encoded() {
        let req = RequestBuilder::new(
            Method::GET,
            "/v2/projects/{project_id}/collections/{collection_id}",
            "GetCollection",
        )
        .path_param("project_id", "p 1")
        .path_param("collection_id", "a/b");
        let url = req.build_url("https://api.example.com/instances/42/").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/instances/42/v2/projects/p%201/collections/a%2Fb"
        );
    }

    #[test]
    fn query_lists_are_comma_joined_and_optionals_skipped() {
        let req = RequestBuilder::new(Method::GET, "/v2/projects/{project_id}/fields", "ListFields")
            .path_param("project_id", "p")
            .query("version", "2020-08-30")
            .query_list("collection_ids", &["a".to_string(), "b".to_string()])
            .query_opt::<i64>("count", None)
            .query_list("empty", &[]);
        let url = req.build_url("https://api.example.com").unwrap();
        assert_eq!(url.path(), "/v2/projects/p/fields");
        assert_eq!(url.query(), Some("version=2020-08-30&collection_ids=a%2Cb"));
    }

    #[test]
    fn empty_service_url_is_rejected() {
        let req = RequestBuilder::new(Method::GET, "/v2/projects", "ListProjects");
        let err = req.build_url("").unwrap_err();
        assert!(err.to_string().contains("missing service URL"));
    }

    #[test]
    fn later_headers_override_earlier() {
        let mut custom = HashMap::new();
        custom.insert("X-Test".to_string(), "custom".to_string());
        let req = RequestBuilder::new(Method::GET, "/v2/projects", "ListProjects")
            .header("X-Test", "default")
            .headers(&custom);
        let headers = req.build_headers().unwrap();
        assert_eq!(headers.get("x-test").unwrap(), "custom");
    }

    #[test]
    fn form_parts_accumulate() {
        let req = RequestBuilder::new(Method::POST, "/v1/docs", "AddDocument")
            .form_file("file", FilePart::new(&b"hello"[..]).with_filename("a.txt"))
            .form_text("metadata", r#"{"k":"v"}"#);
        match req.body() {
            RequestBody::Multipart(parts) => assert_eq!(parts.len(), 2),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn document_upload_needs_file_or_metadata() {
        let req = RequestBuilder::new(Method::POST, "/v1/docs", "AddDocument");
        let err = req.document_parts(None, None, None, None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn document_filename_and_content_type_override_file_part() {
        let file = FilePart::new(&b"{}"[..]).with_filename("orig.json");
        let req = RequestBuilder::new(Method::POST, "/v1/docs", "AddDocument")
            .document_parts(
                Some(&file),
                Some(&"renamed.json".to_string()),
                Some(&"application/json".to_string()),
                Some(&r#"{"author":"me"}"#.to_string()),
            )
            .unwrap();
        let RequestBody::Multipart(parts) = req.body() else {
            panic!("expected multipart body");
        };
        assert_eq!(parts.len(), 2);
        match &parts[0] {
            FormPart::File { name, file } => {
                assert_eq!(name, "file");
                assert_eq!(file.filename.as_deref(), Some("renamed.json"));
                assert_eq!(file.content_type.as_deref(), Some("application/json"));
            }
            other => panic!("unexpected part {:?}", other),
        }
        assert!(matches!(&parts[1], FormPart::Text { name, .. } if name == "metadata"));
    }
}
