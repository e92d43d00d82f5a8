//! reqwest-backed transport.
//!
//! # Responsibilities
//! - Turn an `ApiRequest` into a reqwest call (headers, timeout, body)
//! - Tag every request with `x-request-id`
//! - Hand back status, headers and the full body
//!
//! # Design Decisions
//! - Non-2xx responses are returned, not raised; the client decides
//! - GET carries no body; other verbs send the payload as configured

use std::time::{Duration, Instant};

use futures_util::future::BoxFuture;
use reqwest::multipart;
use reqwest::Client;

use crate::error::ApiResult;
use crate::transport::{ApiRequest, ApiResponse, BodyEncoding, Transport, X_REQUEST_ID};

/// Form field that carries the serialized payload.
pub const FORM_PAYLOAD_FIELD: &str = "json";

/// Transport performing real HTTP calls through a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Wrap a preconfigured client (proxies, TLS, pooling).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let started = Instant::now();
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .header(X_REQUEST_ID, request.request_id.to_string());

        for (name, value) in &request.options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(ms) = request.options.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        if request.method.carries_body() {
            builder = match request.options.body_encoding() {
                BodyEncoding::Form => builder.multipart(
                    multipart::Form::new().text(FORM_PAYLOAD_FIELD, request.payload.to_string()),
                ),
                BodyEncoding::Urlencoded => {
                    builder.form(&[(FORM_PAYLOAD_FIELD, request.payload.to_string())])
                }
                BodyEncoding::Json => builder.json(&request.payload),
            };
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(
                request_id = %request.request_id,
                url = %request.url,
                error = %e,
                "Request failed"
            );
            e
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        tracing::debug!(
            request_id = %request.request_id,
            method = %request.method,
            url = %request.url,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Response received"
        );

        Ok(ApiResponse::new(status, headers, body))
    }
}

impl Transport for HttpTransport {
    fn request(&self, request: ApiRequest) -> BoxFuture<'_, ApiResult<ApiResponse>> {
        Box::pin(self.send(request))
    }
}
