//! Error taxonomy for the API client.
//!
//! Configuration errors (`MissingUrl`, `InvalidDomains`, `InvalidDomain`,
//! `ReservedName`, `ArgumentParse`) are returned directly by the setup
//! calls. Everything else is produced while a request future runs.

use thiserror::Error;

/// Errors raised by the client, its route table and its domains.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client was constructed without a base URL.
    #[error("URL is required")]
    MissingUrl,

    /// A `domains` entry in the client options is not a configuration object.
    #[error("Expecting objects in domains, got {found} for '{name}'")]
    InvalidDomains { name: String, found: &'static str },

    /// A domain spec is not a configuration object, or one of its functions is malformed.
    #[error("Invalid domain '{name}': {reason}")]
    InvalidDomain { name: String, reason: String },

    /// A domain function uses one of the reserved verb names.
    #[error("You can not define a function with the following reserved name: {0}")]
    ReservedName(String),

    /// Bulk domain registration received a shape it cannot split into name/spec pairs.
    #[error("Could not parse arguments: {0}")]
    ArgumentParse(String),

    /// No route is registered under the requested key.
    #[error("API Route [{0}] does not exist")]
    RouteNotFound(String),

    /// The domain exists but has no function with this name.
    #[error("Domain '{domain}' has no function '{function}'")]
    FunctionNotFound { domain: String, function: String },

    /// The requested response parser is unknown or unavailable for this response.
    #[error("Could not parse the results with [{0}]")]
    UnsupportedParse(String),

    /// The response body did not decode with the requested parser.
    #[error("Failed to decode response as {mode}: {reason}")]
    Decode { mode: &'static str, reason: String },

    /// Non-2xx response while `error_for_status` is enabled.
    #[error("HTTP {status}: {body_preview}")]
    HttpStatus { status: u16, body_preview: String },

    /// Failure reported by the underlying transport, passed through unchanged.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
    /// Returns true for errors raised while configuring the client.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ApiError::MissingUrl
                | ApiError::InvalidDomains { .. }
                | ApiError::InvalidDomain { .. }
                | ApiError::ReservedName(_)
                | ApiError::ArgumentParse(_)
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(Box::new(err))
    }
}

/// Result type for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Short name of a JSON value's kind, used in error messages.
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
