//! Domain configuration types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{kind_of, ApiError, ApiResult};
use crate::transport::{Method, RequestOptions};

/// Function names taken by the verb shorthands on every domain.
pub const RESERVED_NAMES: [&str; 4] = ["get", "post", "put", "delete"];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// One callable endpoint of a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// HTTP verb used for the call.
    pub method: Method,

    /// Explicit route key; defaults to `<domain>.<function>`.
    #[serde(default)]
    pub route: Option<String>,

    /// Options layered over the client defaults for this function.
    #[serde(default)]
    pub options: Option<RequestOptions>,
}

impl FunctionSpec {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            route: None,
            options: None,
        }
    }

    pub fn route(mut self, key: impl Into<String>) -> Self {
        self.route = Some(key.into());
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Function name → endpoint description for a single domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainSpec {
    functions: BTreeMap<String, FunctionSpec>,
}

impl DomainSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; names are checked at registration.
    pub fn function(mut self, name: impl Into<String>, spec: FunctionSpec) -> Self {
        self.functions.insert(name.into(), spec);
        self
    }

    /// Parse a spec from loosely typed configuration.
    ///
    /// The value must be an object. Reserved names are rejected whatever
    /// their value; entries whose value is not an object are skipped.
    pub fn from_value(domain: &str, value: &Value) -> ApiResult<Self> {
        let map = value.as_object().ok_or_else(|| ApiError::InvalidDomain {
            name: domain.to_string(),
            reason: format!("expected an object, got {}", kind_of(value)),
        })?;

        let mut functions = BTreeMap::new();
        for (key, prop) in map {
            if is_reserved(key) {
                return Err(ApiError::ReservedName(key.clone()));
            }
            if !prop.is_object() {
                tracing::debug!(domain, function = %key, "Skipping non-object function entry");
                continue;
            }
            let spec: FunctionSpec =
                serde_json::from_value(prop.clone()).map_err(|e| ApiError::InvalidDomain {
                    name: domain.to_string(),
                    reason: format!("function '{}': {}", key, e),
                })?;
            functions.insert(key.clone(), spec);
        }

        Ok(Self { functions })
    }

    /// Reject reserved function names.
    pub fn validate(&self) -> ApiResult<()> {
        match self.functions.keys().find(|name| is_reserved(name)) {
            Some(name) => Err(ApiError::ReservedName(name.clone())),
            None => Ok(()),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FunctionSpec)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn into_functions(self) -> BTreeMap<String, FunctionSpec> {
        self.functions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        let spec = DomainSpec::from_value(
            "users",
            &json!({
                "show": {"method": "GET"},
                "create": {"method": "post", "route": "users.list", "options": {"parse": "json"}},
                "note": "ignored"
            }),
        )
        .unwrap();

        assert_eq!(spec.len(), 2);
        assert_eq!(spec.get("show").unwrap().method, Method::Get);
        let create = spec.get("create").unwrap();
        assert_eq!(create.method, Method::Post);
        assert_eq!(create.route.as_deref(), Some("users.list"));
        assert_eq!(create.options.as_ref().unwrap().parse.as_deref(), Some("json"));
        assert!(spec.get("note").is_none());
    }

    #[test]
    fn test_from_value_rejects_array() {
        let err = DomainSpec::from_value("users", &json!([{"method": "GET"}])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidDomain { ref name, .. } if name == "users"));
    }

    #[test]
    fn test_reserved_names() {
        let err = DomainSpec::from_value("users", &json!({"get": {"method": "GET"}})).unwrap_err();
        assert!(matches!(err, ApiError::ReservedName(ref n) if n == "get"));

        // Reserved even when the entry would otherwise be skipped.
        let err = DomainSpec::from_value("users", &json!({"delete": true})).unwrap_err();
        assert!(matches!(err, ApiError::ReservedName(_)));

        let spec = DomainSpec::new().function("put", FunctionSpec::new(Method::Put));
        assert!(matches!(spec.validate(), Err(ApiError::ReservedName(_))));
    }

    #[test]
    fn test_bad_method_is_invalid_domain() {
        let err =
            DomainSpec::from_value("users", &json!({"patch": {"method": "PATCH"}})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidDomain { .. }));
        assert!(err.to_string().contains("patch"));
    }
}
