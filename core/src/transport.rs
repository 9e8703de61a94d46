//! Transport core: one logical call in, one typed result or `ApiError` out.
//!
//! # Design
//! The call is split into three steps so the two ends stay pure:
//! - `build_http_request` turns an `ApiRequest` plus a configuration snapshot
//!   into a plain-data `HttpRequest` (URL, merged headers, body).
//! - `Transport::send` performs the single network round trip with reqwest.
//! - `classify_response` turns the plain-data `HttpResponse` into an
//!   `Envelope` (JSON, text or binary) or a uniform `ApiError`.
//!
//! Nothing here retries, caches or mutates shared state. Header precedence
//! is fixed: the defaults (`Authorization`, `Content-Type`) come first and
//! caller overrides are applied on top, in order, and always win.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::{Config, SharedConfig};
use crate::error::{ApiError, ConfigError, FieldError};
use crate::http::{Body, HttpMethod, HttpRequest, HttpResponse};
use crate::query::QueryParams;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// A caller adjustment to the default header set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderOverride {
    /// Replace the header if present (case-insensitive), otherwise append it.
    Set(String, String),
    /// Drop every header with this name.
    Remove(String),
}

/// Logical request descriptor built by the resource modules.
///
/// `path` is relative to the configured base URL. Discarded after one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: QueryParams,
    pub headers: Vec<HeaderOverride>,
    pub body: Option<Body>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderOverride::Set(name.into(), value.into()));
        self
    }

    pub fn without_header(mut self, name: impl Into<String>) -> Self {
        self.headers.push(HeaderOverride::Remove(name.into()));
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `payload` as the JSON body.
    pub fn json<T: Serialize + ?Sized>(self, payload: &T) -> Result<Self, ApiError> {
        let text = serde_json::to_string(payload)
            .map_err(|e| ApiError::encode(format!("failed to serialize request body: {e}")))?;
        Ok(self.body(Body::Text(text)))
    }
}

/// Default headers for an authenticated JSON call.
pub fn default_headers(config: &Config) -> Vec<(String, String)> {
    vec![
        (AUTHORIZATION.to_string(), format!("Bearer {}", config.api_key)),
        (CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()),
    ]
}

/// Apply `overrides` to `defaults` in order. Existing headers keep their
/// position when replaced; new headers are appended.
pub fn merge_headers(
    mut headers: Vec<(String, String)>,
    overrides: &[HeaderOverride],
) -> Vec<(String, String)> {
    for header in overrides {
        match header {
            HeaderOverride::Set(name, value) => {
                match headers.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(name)) {
                    Some(existing) => existing.1 = value.clone(),
                    None => headers.push((name.clone(), value.clone())),
                }
            }
            HeaderOverride::Remove(name) => headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name)),
        }
    }
    headers
}

/// Resolve a logical request against a configuration snapshot.
pub fn build_http_request(config: &Config, request: ApiRequest) -> HttpRequest {
    let mut url = format!("{}{}", config.base_url.trim_end_matches('/'), request.path);
    if !request.query.is_empty() {
        url.push('?');
        url.push_str(&request.query.to_query_string());
    }
    HttpRequest {
        method: request.method,
        url,
        headers: merge_headers(default_headers(config), &request.headers),
        body: request.body,
    }
}

/// Classified success payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
    Binary(Vec<u8>),
}

/// A classified success response.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub status: u16,
    pub payload: Payload,
}

impl Envelope {
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let status = self.status;
        let decoded = match self.payload {
            Payload::Json(value) => serde_json::from_value(value),
            Payload::Text(text) => serde_json::from_str(&text),
            Payload::Binary(_) => {
                return Err(ApiError::decode(status, "expected JSON, received a binary payload"));
            }
        };
        decoded.map_err(|e| ApiError::decode(status, format!("failed to decode response: {e}")))
    }

    pub fn into_text(self) -> Result<String, ApiError> {
        match self.payload {
            Payload::Text(text) => Ok(text),
            Payload::Json(Value::String(text)) => Ok(text),
            Payload::Json(value) => Ok(value.to_string()),
            Payload::Binary(bytes) => String::from_utf8(bytes)
                .map_err(|_| ApiError::decode(self.status, "expected text, received non UTF-8 bytes")),
        }
    }

    pub fn into_bytes(self) -> Result<Vec<u8>, ApiError> {
        match self.payload {
            Payload::Binary(bytes) => Ok(bytes),
            Payload::Text(_) | Payload::Json(_) => Err(ApiError::decode(
                self.status,
                "expected a binary payload, received a structured response",
            )),
        }
    }
}

/// Classify a received response into an `Envelope` or an `ApiError`.
pub fn classify_response(response: HttpResponse) -> Result<Envelope, ApiError> {
    if !response.is_success() {
        let err = failure(&response);
        warn!(status = err.status, message = %err.message, "request failed");
        return Err(err);
    }

    let status = response.status;
    let content_type = response.content_type().unwrap_or_default().to_ascii_lowercase();
    trace!(status, content_type = %content_type, len = response.body.len(), "classifying response");

    let payload = if content_type.contains("json") {
        Payload::Json(parse_json(status, &response.body)?)
    } else if content_type.starts_with("text/") {
        Payload::Text(String::from_utf8_lossy(&response.body).into_owned())
    } else if content_type.contains("pdf") || content_type.starts_with("application/octet-stream") {
        Payload::Binary(response.body)
    } else {
        Payload::Json(parse_json(status, &response.body)?)
    };
    Ok(Envelope { status, payload })
}

fn parse_json(status: u16, body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::decode(status, format!("failed to parse JSON response: {e}")))
}

fn failure(response: &HttpResponse) -> ApiError {
    let reason = if response.reason.is_empty() {
        "Unknown Status"
    } else {
        response.reason.as_str()
    };
    let status_line = format!("HTTP {}: {}", response.status, reason);

    let Ok(body) = serde_json::from_slice::<Value>(&response.body) else {
        return ApiError::http(response.status, status_line, None);
    };
    match body.get("errors") {
        // An `errors` array decides the message on its own, even when empty.
        Some(Value::Array(items)) => {
            let message = items
                .first()
                .and_then(|first| first.get("msg"))
                .and_then(Value::as_str)
                .filter(|msg| !msg.is_empty())
                .map(str::to_string)
                .unwrap_or(status_line);
            let errors = (!items.is_empty()).then(|| items.iter().map(field_error).collect());
            ApiError::http(response.status, message, errors)
        }
        _ => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(status_line);
            ApiError::http(response.status, message, None)
        }
    }
}

fn field_error(item: &Value) -> FieldError {
    let text = |key: &str| item.get(key).and_then(Value::as_str).map(str::to_string);
    FieldError {
        msg: text("msg").unwrap_or_default(),
        param: text("param"),
        location: text("location"),
    }
}

/// Executes logical requests against the configured service.
///
/// Cheap to clone: `reqwest::Client` and `SharedConfig` are both `Arc`s.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    config: SharedConfig,
}

impl Transport {
    pub fn new(config: SharedConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    pub async fn execute(&self, request: ApiRequest) -> Result<Envelope, ApiError> {
        let request = build_http_request(&self.config.snapshot(), request);
        let response = self.send(request).await?;
        classify_response(response)
    }

    pub async fn json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.execute(request).await?.into_json()
    }

    pub async fn text(&self, request: ApiRequest) -> Result<String, ApiError> {
        self.execute(request).await?.into_text()
    }

    pub async fn binary(&self, request: ApiRequest) -> Result<Vec<u8>, ApiError> {
        self.execute(request).await?.into_bytes()
    }

    /// Perform the round trip. Any failure before a full response is read
    /// becomes a status 0 network error.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(
            method = request.method.as_str(),
            url = %request.url,
            has_body = request.body.is_some(),
            "dispatching request"
        );

        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body.into_bytes());
        }

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(network_error)?.to_vec();

        debug!(status = status.as_u16(), len = body.len(), "response received");
        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

fn network_error(err: reqwest::Error) -> ApiError {
    let message = error_chain(&err);
    warn!(error = %message, "no response received");
    ApiError::network(message)
}

/// `err` followed by each of its sources, joined with `": "`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.ends_with(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
