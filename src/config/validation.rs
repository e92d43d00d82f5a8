//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (explicit route keys exist in `routes`)
//! - Reject reserved function names and unknown HTTP methods
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use serde_json::Value;

use crate::config::schema::ClientConfig;
use crate::domain::spec::is_reserved;
use crate::error::kind_of;
use crate::transport::{Method, ParseMode};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingUrl,
    DomainNotObject { domain: String, found: &'static str },
    ReservedName { domain: String, function: String },
    MissingMethod { domain: String, function: String },
    UnknownMethod { domain: String, function: String, method: String },
    UnknownRoute { domain: String, function: String, route: String },
    UnknownParser { scope: String, parser: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingUrl => write!(f, "url is required"),
            ValidationError::DomainNotObject { domain, found } => {
                write!(f, "domain '{}' must be a table, got {}", domain, found)
            }
            ValidationError::ReservedName { domain, function } => {
                write!(f, "{}.{}: reserved function name", domain, function)
            }
            ValidationError::MissingMethod { domain, function } => {
                write!(f, "{}.{}: method is required", domain, function)
            }
            ValidationError::UnknownMethod { domain, function, method } => {
                write!(f, "{}.{}: unsupported method '{}'", domain, function, method)
            }
            ValidationError::UnknownRoute { domain, function, route } => {
                write!(f, "{}.{}: route '{}' is not defined", domain, function, route)
            }
            ValidationError::UnknownParser { scope, parser } => {
                write!(f, "{}: unknown parser '{}'", scope, parser)
            }
        }
    }
}

/// Check a loaded configuration, collecting every problem found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.url.is_empty() {
        errors.push(ValidationError::MissingUrl);
    }

    check_parser("options", config.options.parse.as_deref(), &mut errors);

    for (domain, spec) in &config.domains {
        let Some(functions) = spec.as_object() else {
            errors.push(ValidationError::DomainNotObject {
                domain: domain.clone(),
                found: kind_of(spec),
            });
            continue;
        };

        for (function, entry) in functions {
            if is_reserved(function) {
                errors.push(ValidationError::ReservedName {
                    domain: domain.clone(),
                    function: function.clone(),
                });
                continue;
            }
            if entry.is_object() {
                check_function(config, domain, function, entry, &mut errors);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_function(
    config: &ClientConfig,
    domain: &str,
    function: &str,
    entry: &Value,
    errors: &mut Vec<ValidationError>,
) {
    match entry.get("method").and_then(Value::as_str) {
        None => errors.push(ValidationError::MissingMethod {
            domain: domain.to_string(),
            function: function.to_string(),
        }),
        Some(method) if method.parse::<Method>().is_err() => {
            errors.push(ValidationError::UnknownMethod {
                domain: domain.to_string(),
                function: function.to_string(),
                method: method.to_string(),
            })
        }
        Some(_) => {}
    }

    if let Some(route) = entry.get("route").and_then(Value::as_str) {
        if !config.routes.contains(route) {
            errors.push(ValidationError::UnknownRoute {
                domain: domain.to_string(),
                function: function.to_string(),
                route: route.to_string(),
            });
        }
    }

    let parser = entry
        .get("options")
        .and_then(|o| o.get("parse"))
        .and_then(Value::as_str);
    check_parser(&format!("{}.{}", domain, function), parser, errors);
}

fn check_parser(scope: &str, parser: Option<&str>, errors: &mut Vec<ValidationError>) {
    if let Some(parser) = parser {
        if parser.parse::<ParseMode>().is_err() {
            errors.push(ValidationError::UnknownParser {
                scope: scope.to_string(),
                parser: parser.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(domains: Value) -> ClientConfig {
        let mut config = ClientConfig {
            url: "http://x".into(),
            ..Default::default()
        };
        config.routes.add_routes([("shared.list", "/list")]);
        config.domains = domains.as_object().cloned().unwrap_or_default();
        config
    }

    #[test]
    fn test_valid_config() {
        let config = config(json!({
            "users": {
                "show": {"method": "get"},
                "all": {"method": "GET", "route": "shared.list", "options": {"parse": "json"}}
            }
        }));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = config(json!({
            "users": {
                "get": {"method": "GET"},
                "show": {},
                "patch": {"method": "PATCH"},
                "all": {"method": "GET", "route": "nowhere", "options": {"parse": "xml"}}
            },
            "broken": [1, 2]
        }));
        config.url = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 7);
        assert!(errors.contains(&ValidationError::MissingUrl));
        assert!(errors.contains(&ValidationError::DomainNotObject {
            domain: "broken".into(),
            found: "array"
        }));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::ReservedName { .. })));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingMethod { .. })));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::UnknownMethod { .. })));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::UnknownRoute { .. })));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::UnknownParser { .. })));
    }
}
