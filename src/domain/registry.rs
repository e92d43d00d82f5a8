//! Registered domains and their call surface.
//!
//! # Responsibilities
//! - Hold one `Domain` per registered name
//! - Turn a function call into route resolution plus one transport request
//!
//! # Design Decisions
//! - Domains are immutable once built; re-registering a name replaces it
//! - `DomainRef` borrows the owning client, so routes added after
//!   registration are seen by later calls

use std::collections::BTreeMap;

use serde_json::Value;

use crate::client::Client;
use crate::domain::spec::{DomainSpec, FunctionSpec};
use crate::error::{ApiError, ApiResult};
use crate::transport::{Method, Reply, RequestOptions};

/// A named group of endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    name: String,
    functions: BTreeMap<String, FunctionSpec>,
}

impl Domain {
    fn new(name: String, spec: DomainSpec) -> Self {
        Self {
            name,
            functions: spec.into_functions(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = (&str, &FunctionSpec)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Name → domain map owned by the client.
#[derive(Debug, Clone, Default)]
pub struct DomainRegistry {
    domains: BTreeMap<String, Domain>,
}

impl DomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `spec` and store it under `name`, replacing any previous domain.
    pub(crate) fn register(&mut self, name: &str, spec: DomainSpec) -> ApiResult<()> {
        spec.validate()?;

        let functions = spec.len();
        let replaced = self
            .domains
            .insert(name.to_string(), Domain::new(name.to_string(), spec))
            .is_some();

        tracing::info!(domain = %name, functions, replaced, "Domain registered");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Domain> {
        self.domains.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.domains.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Domain> {
        self.domains.values()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// A registered domain bound to its client.
#[derive(Clone, Copy)]
pub struct DomainRef<'a> {
    client: &'a Client,
    domain: &'a Domain,
}

impl<'a> DomainRef<'a> {
    pub(crate) fn new(client: &'a Client, domain: &'a Domain) -> Self {
        Self { client, domain }
    }

    pub fn name(&self) -> &'a str {
        self.domain.name()
    }

    pub fn domain(&self) -> &'a Domain {
        self.domain
    }

    pub fn client(&self) -> &'a Client {
        self.client
    }

    /// Names of the configured functions.
    pub fn functions(&self) -> impl Iterator<Item = &'a str> {
        let domain: &'a Domain = self.domain;
        domain.functions.keys().map(String::as_str)
    }

    pub fn has_function(&self, function: &str) -> bool {
        self.domain.functions.contains_key(function)
    }

    pub fn get_route(&self, key: &str, data: &Value) -> ApiResult<String> {
        self.client.get_route(key, data)
    }

    /// Path a call to `function` with `data` would hit.
    pub fn route_for(&self, function: &str, data: &Value) -> ApiResult<String> {
        let spec = self.spec(function)?;
        match &spec.route {
            Some(key) => self.client.get_route(key, data),
            None => self.client.build_route(self.name(), function, data),
        }
    }

    /// Invoke `function` with `data`.
    pub async fn call(&self, function: &str, data: Value) -> ApiResult<Reply> {
        self.call_with(function, data, RequestOptions::default()).await
    }

    /// Invoke `function`, layering `options` over the function's own options.
    pub async fn call_with(
        &self,
        function: &str,
        data: Value,
        options: RequestOptions,
    ) -> ApiResult<Reply> {
        let spec = self.spec(function)?;
        let path = self.route_for(function, &data)?;
        let options = spec.options.clone().unwrap_or_default().merged(&options);

        tracing::debug!(
            domain = %self.name(),
            function = %function,
            method = %spec.method,
            path = %path,
            "Calling domain function"
        );

        self.client.fetch(spec.method, &path, data, Some(options)).await
    }

    pub async fn get(
        &self,
        path: &str,
        data: Value,
        options: Option<RequestOptions>,
    ) -> ApiResult<Reply> {
        self.client.fetch(Method::Get, path, data, options).await
    }

    pub async fn post(
        &self,
        path: &str,
        data: Value,
        options: Option<RequestOptions>,
    ) -> ApiResult<Reply> {
        self.client.fetch(Method::Post, path, data, options).await
    }

    pub async fn put(
        &self,
        path: &str,
        data: Value,
        options: Option<RequestOptions>,
    ) -> ApiResult<Reply> {
        self.client.fetch(Method::Put, path, data, options).await
    }

    pub async fn delete(
        &self,
        path: &str,
        data: Value,
        options: Option<RequestOptions>,
    ) -> ApiResult<Reply> {
        self.client.fetch(Method::Delete, path, data, options).await
    }

    fn spec(&self, function: &str) -> ApiResult<&'a FunctionSpec> {
        self.domain
            .function(function)
            .ok_or_else(|| ApiError::FunctionNotFound {
                domain: self.name().to_string(),
                function: function.to_string(),
            })
    }
}

impl std::fmt::Debug for DomainRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainRef")
            .field("domain", self.domain)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_replace() {
        let mut registry = DomainRegistry::new();
        let spec = DomainSpec::new().function("show", FunctionSpec::new(Method::Get));
        registry.register("users", spec).unwrap();
        assert!(registry.get("users").unwrap().function("show").is_some());

        let spec = DomainSpec::new().function("list", FunctionSpec::new(Method::Get));
        registry.register("users", spec).unwrap();
        let users = registry.get("users").unwrap();
        assert!(users.function("show").is_none());
        assert!(users.function("list").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_rejects_reserved() {
        let mut registry = DomainRegistry::new();
        let spec = DomainSpec::new().function("get", FunctionSpec::new(Method::Get));
        assert!(matches!(
            registry.register("users", spec),
            Err(ApiError::ReservedName(_))
        ));
        assert!(registry.is_empty());
    }
}
