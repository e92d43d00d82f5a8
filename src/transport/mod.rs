//! Transport subsystem.
//!
//! # Data Flow
//! ```text
//! Client::fetch(method, path, payload, options)
//!     → ApiRequest (base url + path, merged options, request id)
//!     → Transport::request (reqwest or recording)
//!     → ApiResponse
//!     → parse.rs (optional post-step selected by options.parse)
//!     → Reply
//! ```
//!
//! # Design Decisions
//! - The transport is injected as `Arc<dyn Transport>`; the client never retries
//! - Timeouts and connection handling belong to the transport
//! - Transport failures are passed through as `ApiError::Transport`

pub mod http;
pub mod options;
pub mod parse;
pub mod recording;

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use futures_util::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiResult;

pub use http::HttpTransport;
pub use options::{BodyEncoding, RequestOptions};
pub use parse::{Blob, ParseMode, Reply};
pub use recording::RecordingTransport;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// HTTP verbs a domain function may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const ALL: [Method; 4] = [Method::Get, Method::Post, Method::Put, Method::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// GET requests are sent without a body.
    pub fn carries_body(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    /// Case-insensitive: `get`, `Get` and `GET` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported HTTP method '{}'", s))
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fully shaped request, ready for the transport.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub request_id: Uuid,
    pub method: Method,
    /// Absolute URL: the client's base URL followed by the resolved path.
    pub url: String,
    pub payload: Value,
    pub options: RequestOptions,
}

/// Response returned by a transport.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// An empty `200 OK`.
    pub fn ok() -> Self {
        Self::new(StatusCode::OK, HeaderMap::new(), Bytes::new())
    }

    /// Add a header, ignoring names or values that are not valid HTTP.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// The injected HTTP capability.
///
/// Implementations own retries, timeouts and connection management; the
/// client only shapes the request and awaits the result.
pub trait Transport: Send + Sync {
    fn request(&self, request: ApiRequest) -> BoxFuture<'_, ApiResult<ApiResponse>>;
}
