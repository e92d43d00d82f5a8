//! Route table lookup.
//!
//! # Responsibilities
//! - Store route key → URL template pairs
//! - Resolve a key plus payload into a concrete path
//! - Merge or replace the table on request
//!
//! # Design Decisions
//! - Keys are opaque strings; `<domain>.<function>` is only a convention
//! - Explicit `RouteNotFound` rather than a silent default
//! - Never pruned: entries change only through `add_routes` / `set_routes`

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::routing::template;

/// Mapping of route keys to URL templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: HashMap<String, String>,
}

impl RouteTable {
    /// Create an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose the conventional key for a domain function.
    pub fn build_key(domain: &str, function: &str) -> String {
        format!("{}.{}", domain, function)
    }

    /// Resolve `key` into a path, substituting its placeholder from `data`.
    pub fn resolve(&self, key: &str, data: &Value) -> ApiResult<String> {
        let template = self
            .routes
            .get(key)
            .ok_or_else(|| ApiError::RouteNotFound(key.to_string()))?;

        let path = template::render(template, data);
        tracing::debug!(key = %key, path = %path, "Route resolved");
        Ok(path)
    }

    /// Shallow-merge `routes` into the table; incoming keys win.
    pub fn add_routes<I, K, V>(&mut self, routes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.routes
            .extend(routes.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// Replace the whole table.
    pub fn set_routes<I, K, V>(&mut self, routes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.routes = routes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.routes.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.routes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over `(key, template)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = RouteTable::new();
        table.add_routes(iter);
        table
    }
}

impl From<HashMap<String, String>> for RouteTable {
    fn from(routes: HashMap<String, String>) -> Self {
        Self { routes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> RouteTable {
        RouteTable::from_iter([
            ("status.get", "/status"),
            ("users.show", "/users/:id"),
        ])
    }

    #[test]
    fn test_resolve_plain_template_ignores_data() {
        let routes = table();
        for data in [Value::Null, json!({}), json!({"id": 1}), json!([1, 2])] {
            assert_eq!(routes.resolve("status.get", &data).unwrap(), "/status");
        }
    }

    #[test]
    fn test_resolve_substitutes_placeholder() {
        let routes = table();
        assert_eq!(routes.resolve("users.show", &json!({"id": 7})).unwrap(), "/users/7");
        assert_eq!(routes.resolve("users.show", &json!({})).unwrap(), "/users/:id");
    }

    #[test]
    fn test_resolve_missing_key() {
        let err = table().resolve("users.delete", &Value::Null).unwrap_err();
        assert!(matches!(err, ApiError::RouteNotFound(ref k) if k == "users.delete"));
    }

    #[test]
    fn test_build_key() {
        assert_eq!(RouteTable::build_key("users", "show"), "users.show");
        assert_eq!(RouteTable::build_key("", ""), ".");
    }

    #[test]
    fn test_add_then_set_routes() {
        let mut routes = RouteTable::new();
        routes.add_routes([("a", "/1")]);
        routes.add_routes([("b", "/2")]);
        assert!(routes.contains("a"));
        assert!(routes.contains("b"));

        routes.add_routes([("a", "/one")]);
        assert_eq!(routes.get("a"), Some("/one"));

        routes.set_routes([("b", "/2")]);
        assert_eq!(routes.len(), 1);
        assert!(!routes.contains("a"));
        assert_eq!(routes.get("b"), Some("/2"));
    }
}
