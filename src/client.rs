//! The API client: base URL, route table, domains and transport.
//!
//! # Responsibilities
//! - Validate construction input (URL, initial domains)
//! - Shape requests (`fetch` and the verb shorthands)
//! - Resolve routes and register domains
//!
//! # Design Decisions
//! - Setup takes `&mut self`, calls take `&self`: configure before use
//! - Setup errors are returned immediately; request errors only surface
//!   when the returned future is awaited
//! - Bulk registration stops at the first bad entry; earlier entries stay

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::{DomainRef, DomainRegistry, DomainSpec};
use crate::error::{kind_of, ApiError, ApiResult};
use crate::routing::RouteTable;
use crate::transport::{
    parse, ApiRequest, HttpTransport, Method, Reply, RequestOptions, Transport,
};

/// Longest body excerpt kept in `ApiError::HttpStatus`.
const BODY_PREVIEW_CHARS: usize = 256;

/// Construction options for [`Client`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Initial route table.
    pub routes: RouteTable,

    /// Initial domains: name → function map. Every value must be an object.
    pub domains: Map<String, Value>,

    /// Default transport options for every request.
    pub options: RequestOptions,
}

/// Named-route HTTP client.
pub struct Client {
    url: String,
    routes: RouteTable,
    domains: DomainRegistry,
    options: RequestOptions,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client that talks HTTP through reqwest.
    pub fn new(url: impl Into<String>, options: ClientOptions) -> ApiResult<Self> {
        Self::with_transport(url, options, Arc::new(HttpTransport::new()))
    }

    /// Create a client over an injected transport.
    pub fn with_transport(
        url: impl Into<String>,
        options: ClientOptions,
        transport: Arc<dyn Transport>,
    ) -> ApiResult<Self> {
        let url = url.into();
        if url.is_empty() {
            return Err(ApiError::MissingUrl);
        }

        if let Some((name, value)) = options.domains.iter().find(|(_, v)| !v.is_object()) {
            return Err(ApiError::InvalidDomains {
                name: name.clone(),
                found: kind_of(value),
            });
        }

        let mut client = Self {
            url,
            routes: options.routes,
            domains: DomainRegistry::new(),
            options: options.options,
            transport,
        };

        for (name, spec) in &options.domains {
            client.add_domain_value(name, spec)?;
        }

        tracing::debug!(
            url = %client.url,
            routes = client.routes.len(),
            domains = client.domains.len(),
            "Client created"
        );

        Ok(client)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Read-only view of the registered domains.
    pub fn domains(&self) -> &DomainRegistry {
        &self.domains
    }

    /// Look up a registered domain.
    pub fn domain(&self, name: &str) -> Option<DomainRef<'_>> {
        self.domains.get(name).map(|d| DomainRef::new(self, d))
    }

    // --- Requests -------------------------------------------------------

    /// Issue one request to `url + path`.
    ///
    /// A `Null` payload is sent as an empty object. `options` are layered
    /// over the client defaults.
    pub async fn fetch(
        &self,
        method: Method,
        path: &str,
        data: Value,
        options: Option<RequestOptions>,
    ) -> ApiResult<Reply> {
        let options = match options {
            Some(call) => self.options.merged(&call),
            None => self.options.clone(),
        };
        let payload = if data.is_null() {
            Value::Object(Map::new())
        } else {
            data
        };

        let parser = options.parse.clone();
        let fails_on_status = options.fails_on_status();
        let request = ApiRequest {
            request_id: Uuid::new_v4(),
            method,
            url: format!("{}{}", self.url, path),
            payload,
            options,
        };

        tracing::debug!(
            request_id = %request.request_id,
            method = %method,
            url = %request.url,
            "Dispatching request"
        );

        let response = self.transport.request(request).await?;

        if fails_on_status && !response.is_success() {
            let body = String::from_utf8_lossy(response.body());
            return Err(ApiError::HttpStatus {
                status: response.status().as_u16(),
                body_preview: body.chars().take(BODY_PREVIEW_CHARS).collect(),
            });
        }

        parse::apply(parser.as_deref(), response)
    }

    pub async fn get(
        &self,
        path: &str,
        data: Value,
        options: Option<RequestOptions>,
    ) -> ApiResult<Reply> {
        self.fetch(Method::Get, path, data, options).await
    }

    pub async fn post(
        &self,
        path: &str,
        data: Value,
        options: Option<RequestOptions>,
    ) -> ApiResult<Reply> {
        self.fetch(Method::Post, path, data, options).await
    }

    pub async fn put(
        &self,
        path: &str,
        data: Value,
        options: Option<RequestOptions>,
    ) -> ApiResult<Reply> {
        self.fetch(Method::Put, path, data, options).await
    }

    pub async fn delete(
        &self,
        path: &str,
        data: Value,
        options: Option<RequestOptions>,
    ) -> ApiResult<Reply> {
        self.fetch(Method::Delete, path, data, options).await
    }

    // --- Routes ---------------------------------------------------------

    pub fn get_route(&self, key: &str, data: &Value) -> ApiResult<String> {
        self.routes.resolve(key, data)
    }

    /// Resolve the conventional `<domain>.<function>` route.
    pub fn build_route(&self, domain: &str, function: &str, data: &Value) -> ApiResult<String> {
        self.routes.resolve(&RouteTable::build_key(domain, function), data)
    }

    pub fn add_routes<I, K, V>(&mut self, routes: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.routes.add_routes(routes);
        self
    }

    pub fn set_routes<I, K, V>(&mut self, routes: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.routes.set_routes(routes);
        self
    }

    // --- Domains --------------------------------------------------------

    /// Register a typed domain spec under `name`, replacing any previous one.
    pub fn add_domain(&mut self, name: &str, spec: DomainSpec) -> ApiResult<&mut Self> {
        self.domains.register(name, spec)?;
        Ok(self)
    }

    /// Register a domain from loosely typed configuration.
    pub fn add_domain_value(&mut self, name: &str, spec: &Value) -> ApiResult<&mut Self> {
        let spec = DomainSpec::from_value(name, spec)?;
        self.add_domain(name, spec)
    }

    /// Register `(name, spec)` pairs in order.
    pub fn add_pairs<I, K>(&mut self, pairs: I) -> ApiResult<&mut Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        for (name, spec) in pairs {
            self.add_domain_value(name.as_ref(), &spec)?;
        }
        Ok(self)
    }

    /// Register domains from a flat `[name, spec, name, spec, ...]` list.
    pub fn add_list(&mut self, list: &[Value]) -> ApiResult<&mut Self> {
        if list.len() % 2 != 0 {
            return Err(ApiError::ArgumentParse(format!(
                "expected name/spec pairs, got {} items",
                list.len()
            )));
        }

        for pair in list.chunks_exact(2) {
            let name = pair[0].as_str().ok_or_else(|| {
                ApiError::ArgumentParse(format!(
                    "domain name must be a string, got {}",
                    kind_of(&pair[0])
                ))
            })?;
            self.add_domain_value(name, &pair[1])?;
        }
        Ok(self)
    }

    /// Register domains from a `{ name: spec, ... }` object.
    pub fn add_map(&mut self, map: &Value) -> ApiResult<&mut Self> {
        let map = map.as_object().ok_or_else(|| {
            ApiError::ArgumentParse(format!("expected an object of domains, got {}", kind_of(map)))
        })?;

        for (name, spec) in map {
            self.add_domain_value(name, spec)?;
        }
        Ok(self)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.url)
            .field("routes", &self.routes)
            .field("domains", &self.domains)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
