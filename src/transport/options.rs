//! Per-request transport options.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the payload is placed in the request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    /// `multipart/form-data` body with a single `json` part holding the
    /// serialized payload.
    #[default]
    Form,
    /// `application/x-www-form-urlencoded` body with the same `json` field.
    Urlencoded,
    /// Raw JSON body.
    Json,
}

/// Options handed to the transport with every request.
///
/// Every field is optional so that layers can be merged: client defaults,
/// then the function's configured options, then per-call options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    /// Extra request headers.
    pub headers: BTreeMap<String, String>,

    /// Response parser to apply (`json`, `text`, `arrayBuffer`, `blob`, `formData`).
    pub parse: Option<String>,

    /// Whole-request timeout in milliseconds, enforced by the transport.
    #[serde(alias = "timeoutMs")]
    pub timeout_ms: Option<u64>,

    /// Body encoding (default: multipart form).
    pub body: Option<BodyEncoding>,

    /// Turn non-2xx responses into errors.
    #[serde(alias = "errorForStatus")]
    pub error_for_status: Option<bool>,
}

impl RequestOptions {
    /// Overlay `other` on top of `self`.
    ///
    /// Fields set in `other` win; headers are merged key by key.
    pub fn merged(&self, other: &RequestOptions) -> RequestOptions {
        let mut headers = self.headers.clone();
        headers.extend(other.headers.iter().map(|(k, v)| (k.clone(), v.clone())));

        RequestOptions {
            headers,
            parse: other.parse.clone().or_else(|| self.parse.clone()),
            timeout_ms: other.timeout_ms.or(self.timeout_ms),
            body: other.body.or(self.body),
            error_for_status: other.error_for_status.or(self.error_for_status),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_parse(mut self, parse: impl Into<String>) -> Self {
        self.parse = Some(parse.into());
        self
    }

    pub fn body_encoding(&self) -> BodyEncoding {
        self.body.unwrap_or_default()
    }

    pub fn fails_on_status(&self) -> bool {
        self.error_for_status.unwrap_or(false)
    }
}
