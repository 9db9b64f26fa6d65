//! Request descriptors and the transport seam.
//!
//! [`Transport`] sends one [`ApiRequest`] and returns the decoded response.
//! Any non-2xx answer comes back as a [`TransportError`] carrying the status
//! and body; a failure with no response at all carries none.

use crate::error::TransportError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

/// Expected shape of a successful response body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseKind {
    /// Decode the body as JSON
    #[default]
    Json,
    /// Keep the raw bytes (file downloads)
    Binary,
}

/// Outgoing request descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL, starting with `/`
    pub path: String,
    /// Query string pairs, repeated keys allowed
    pub query: Vec<(String, String)>,
    /// Extra headers
    pub headers: BTreeMap<String, String>,
    /// JSON body
    pub body: Option<Value>,
    /// Expected response kind
    pub response_kind: ResponseKind,
}

impl ApiRequest {
    /// Request with no query, headers or body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            body: None,
            response_kind: ResponseKind::Json,
        }
    }

    /// `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT` request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `PATCH` request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Builder: set the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Builder: replace the query pairs.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Builder: set a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Builder: expect a binary body.
    #[must_use]
    pub const fn binary(mut self) -> Self {
        self.response_kind = ResponseKind::Binary;
        self
    }

    /// Header value, if set.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Flatten a serializable parameter object into query pairs.
///
/// `null` fields are dropped, arrays become repeated keys and nested objects
/// are sent as JSON text.
#[must_use]
pub fn query_pairs<P: Serialize + ?Sized>(params: &P) -> Vec<(String, String)> {
    let Ok(Value::Object(map)) = serde_json::to_value(params) else {
        return Vec::new();
    };

    let mut pairs = Vec::new();
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(values) => pairs.extend(
                values
                    .iter()
                    .filter(|v| !v.is_null())
                    .map(|v| (key.clone(), scalar_text(v))),
            ),
            other => pairs.push((key, scalar_text(&other))),
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Successful response body.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    /// Decoded JSON; `Null` for an empty body
    Json(Value),
    /// Raw bytes
    Binary(Vec<u8>),
}

/// Successful response.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Body
    pub body: ResponseBody,
}

impl RawResponse {
    /// 200 response with a JSON body.
    #[must_use]
    pub const fn json(body: Value) -> Self {
        Self {
            status: 200,
            body: ResponseBody::Json(body),
        }
    }

    /// 200 response with a binary body.
    #[must_use]
    pub const fn binary(bytes: Vec<u8>) -> Self {
        Self {
            status: 200,
            body: ResponseBody::Binary(bytes),
        }
    }

    /// JSON body; a binary body is decoded when it holds JSON, else `Null`.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self.body {
            ResponseBody::Json(value) => value,
            ResponseBody::Binary(bytes) => serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        }
    }

    /// Body bytes; a JSON body is re-serialized.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self.body {
            ResponseBody::Binary(bytes) => bytes,
            ResponseBody::Json(Value::Null) => Vec::new(),
            ResponseBody::Json(value) => value.to_string().into_bytes(),
        }
    }
}

/// Sends requests to the API.
pub trait Transport: Send + Sync {
    /// Send a request.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] without a response when nothing was
    /// received, and with one for any non-2xx status.
    fn execute(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// Production transport over `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Build a transport with a fixed base URL and request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, %url, "Sending request");

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), %url, "Request failed");
            return Err(TransportError::status(status.as_u16(), decode_body(&bytes)));
        }

        let body = match request.response_kind {
            ResponseKind::Json => ResponseBody::Json(decode_body(&bytes)),
            ResponseKind::Binary => ResponseBody::Binary(bytes.to_vec()),
        };
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Decode a body as JSON, falling back to a JSON string of the raw text.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
