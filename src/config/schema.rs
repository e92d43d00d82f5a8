//! Configuration schema definitions.
//!
//! This module defines the on-disk configuration for a client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::ClientOptions;
use crate::routing::RouteTable;
use crate::transport::RequestOptions;

/// Root configuration for an API client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every route is appended to.
    pub url: String,

    /// Route key → URL template.
    pub routes: RouteTable,

    /// Domain name → function table. Kept loosely typed so validation can
    /// report every problem instead of the first serde error.
    pub domains: Map<String, Value>,

    /// Default transport options.
    pub options: RequestOptions,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ClientConfig {
    /// Split into the client constructor arguments.
    pub fn into_parts(self) -> (String, ClientOptions) {
        (
            self.url,
            ClientOptions {
                routes: self.routes,
                domains: self.domains,
                options: self.options,
            },
        )
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
