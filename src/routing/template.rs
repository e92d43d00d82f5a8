//! Route template placeholders.
//!
//! # Responsibilities
//! - Locate the first `:variable` placeholder in a template
//! - Substitute it from the request payload when the payload has that key
//!
//! # Design Decisions
//! - Only the first placeholder is considered; later ones stay literal
//! - The placeholder name runs from the colon to the next `/`, `:`, `?` or `#`,
//!   so `/users/:id/posts` names `id` and `/users/:user-id` names `user-id`
//! - A missing value is not an error: the template is returned unchanged

use serde_json::Value;

/// Characters that end a placeholder name.
const NAME_TERMINATORS: [char; 4] = ['/', ':', '?', '#'];

/// The first placeholder found in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Variable name without the leading colon.
    pub name: &'a str,
    /// Byte offset of the colon.
    pub start: usize,
    /// Byte offset one past the end of the name.
    pub end: usize,
}

/// Find the first `:name` placeholder in `template`.
///
/// Only the first colon is considered; an empty name after it means the
/// template has no placeholder.
pub fn first_placeholder(template: &str) -> Option<Placeholder<'_>> {
    let start = template.find(':')?;
    let rest = &template[start + 1..];
    let len = rest.find(NAME_TERMINATORS).unwrap_or(rest.len());

    if len == 0 {
        return None;
    }

    Some(Placeholder {
        name: &rest[..len],
        start,
        end: start + 1 + len,
    })
}

/// Render a payload value the way it appears inside a path.
pub fn path_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Substitute the first placeholder of `template` from `data`.
///
/// Returns the template untouched when it has no placeholder, when `data`
/// is not an object, or when the object lacks the placeholder's key.
pub fn render(template: &str, data: &Value) -> String {
    let Some(placeholder) = first_placeholder(template) else {
        return template.to_string();
    };

    match data.as_object().and_then(|map| map.get(placeholder.name)) {
        Some(value) => {
            let mut out = String::with_capacity(template.len());
            out.push_str(&template[..placeholder.start]);
            out.push_str(&path_value(value));
            out.push_str(&template[placeholder.end..]);
            out
        }
        None => {
            tracing::warn!(
                template = %template,
                placeholder = placeholder.name,
                "No value for route placeholder, leaving it in place"
            );
            template.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_placeholder() {
        let p = first_placeholder("/users/:id").unwrap();
        assert_eq!(p.name, "id");
        assert_eq!(&"/users/:id"[p.start..p.end], ":id");

        let p = first_placeholder("/users/:user_id/posts/:post").unwrap();
        assert_eq!(p.name, "user_id");

        assert!(first_placeholder("/users").is_none());
        assert!(first_placeholder("/odd/:/path").is_none());

        let p = first_placeholder("/users/:user-id/posts").unwrap();
        assert_eq!(p.name, "user-id");
        assert_eq!(p.end, "/users/:user-id".len());
    }

    #[test]
    fn test_render_substitutes_value() {
        assert_eq!(render("/users/:id", &json!({"id": 7})), "/users/7");
        assert_eq!(render("/users/:id/posts", &json!({"id": "abc"})), "/users/abc/posts");
        assert_eq!(render("/flags/:on", &json!({"on": true})), "/flags/true");
    }

    #[test]
    fn test_render_hyphenated_and_dotted_names() {
        assert_eq!(render("/users/:user-id", &json!({"user-id": 5})), "/users/5");
        assert_eq!(
            render("/users/:user-id", &json!({"user": 1, "user-id": 5})),
            "/users/5"
        );
        assert_eq!(
            render("/users/:user-id", &json!({"user": 1})),
            "/users/:user-id"
        );
        assert_eq!(render("/files/:file.name?x=1", &json!({"file.name": "a"})), "/files/a?x=1");
    }

    #[test]
    fn test_render_keeps_literal_when_missing() {
        assert_eq!(render("/users/:id", &json!({"name": "x"})), "/users/:id");
        assert_eq!(render("/users/:id", &Value::Null), "/users/:id");
        assert_eq!(render("/users/:id", &json!([7])), "/users/:id");
    }

    #[test]
    fn test_render_only_first_placeholder() {
        let data = json!({"a": 1, "b": 2});
        assert_eq!(render("/x/:a/y/:b", &data), "/x/1/y/:b");
    }

    #[test]
    fn test_render_without_placeholder_ignores_data() {
        assert_eq!(render("/status", &json!({"id": 1})), "/status");
    }
}
