//! Response post-processing.
//!
//! The parser named in the request options runs after the transport
//! completes. Unknown parser names, and parsers the response cannot serve,
//! fail with `UnsupportedParse`.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::transport::ApiResponse;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Available response parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Json,
    Text,
    ArrayBuffer,
    Blob,
    FormData,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Json => "json",
            ParseMode::Text => "text",
            ParseMode::ArrayBuffer => "arrayBuffer",
            ParseMode::Blob => "blob",
            ParseMode::FormData => "formData",
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParseMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ParseMode::Json),
            "text" => Ok(ParseMode::Text),
            "arrayBuffer" | "array_buffer" => Ok(ParseMode::ArrayBuffer),
            "blob" => Ok(ParseMode::Blob),
            "formData" | "form_data" => Ok(ParseMode::FormData),
            other => Err(ApiError::UnsupportedParse(other.to_string())),
        }
    }
}

/// Raw bytes tagged with their content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// What a request resolves to.
#[derive(Debug, Clone)]
pub enum Reply {
    /// No parser requested: the transport response as-is.
    Response(ApiResponse),
    Json(Value),
    Text(String),
    Bytes(Bytes),
    Blob(Blob),
    Form(Vec<(String, String)>),
}

impl Reply {
    /// The unparsed response, if no parser was requested.
    pub fn into_response(self) -> Option<ApiResponse> {
        match self {
            Reply::Response(resp) => Some(resp),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Reply::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Deserialize a JSON reply into `T`.
    pub fn json<T: DeserializeOwned>(self) -> ApiResult<T> {
        match self {
            Reply::Json(v) => serde_json::from_value(v).map_err(|e| ApiError::Decode {
                mode: "json",
                reason: e.to_string(),
            }),
            Reply::Response(resp) => {
                serde_json::from_slice(resp.body()).map_err(|e| ApiError::Decode {
                    mode: "json",
                    reason: e.to_string(),
                })
            }
            _ => Err(ApiError::UnsupportedParse("json".to_string())),
        }
    }
}

/// Apply the parser named by `parse` to `response`.
pub fn apply(parse: Option<&str>, response: ApiResponse) -> ApiResult<Reply> {
    let Some(name) = parse else {
        return Ok(Reply::Response(response));
    };

    let mode: ParseMode = name.parse()?;
    let content_type = response.content_type().map(str::to_string);
    let body = response.into_body();

    match mode {
        ParseMode::Json => serde_json::from_slice(&body)
            .map(Reply::Json)
            .map_err(|e| ApiError::Decode {
                mode: "json",
                reason: e.to_string(),
            }),
        ParseMode::Text => Ok(Reply::Text(String::from_utf8_lossy(&body).into_owned())),
        ParseMode::ArrayBuffer => Ok(Reply::Bytes(body)),
        ParseMode::Blob => Ok(Reply::Blob(Blob {
            content_type,
            bytes: body,
        })),
        ParseMode::FormData => {
            let is_form = content_type
                .as_deref()
                .map(|ct| ct.trim_start().starts_with(FORM_URLENCODED))
                .unwrap_or(false);
            if !is_form {
                return Err(ApiError::UnsupportedParse(mode.to_string()));
            }
            serde_urlencoded::from_bytes::<Vec<(String, String)>>(&body)
                .map(Reply::Form)
                .map_err(|e| ApiError::Decode {
                    mode: "formData",
                    reason: e.to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn json_response() -> ApiResponse {
        ApiResponse::ok()
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":7,"name":"ada"}"#)
    }

    #[test]
    fn test_no_parser_returns_response() {
        let reply = apply(None, json_response()).unwrap();
        assert!(reply.into_response().is_some());
    }

    #[test]
    fn test_json_and_text() {
        let reply = apply(Some("json"), json_response()).unwrap();
        assert_eq!(reply.as_json(), Some(&json!({"id": 7, "name": "ada"})));

        let reply = apply(Some("text"), json_response()).unwrap();
        assert_eq!(reply.as_text(), Some(r#"{"id":7,"name":"ada"}"#));
    }

    #[test]
    fn test_json_decode_failure() {
        let resp = ApiResponse::ok().with_body("not json");
        let err = apply(Some("json"), resp).unwrap_err();
        assert!(matches!(err, ApiError::Decode { mode: "json", .. }));
    }

    #[test]
    fn test_blob_keeps_content_type() {
        let reply = apply(Some("blob"), json_response()).unwrap();
        match reply {
            Reply::Blob(blob) => {
                assert_eq!(blob.content_type.as_deref(), Some("application/json"));
                assert_eq!(blob.bytes.len(), 21);
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_form_data_requires_form_body() {
        let err = apply(Some("formData"), json_response()).unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedParse(ref m) if m == "formData"));

        let resp = ApiResponse::ok()
            .with_header("content-type", "application/x-www-form-urlencoded")
            .with_body("a=1&b=two");
        match apply(Some("form_data"), resp).unwrap() {
            Reply::Form(pairs) => assert_eq!(
                pairs,
                vec![("a".to_string(), "1".to_string()), ("b".to_string(), "two".to_string())]
            ),
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_parser() {
        let err = apply(Some("xml"), json_response()).unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedParse(ref m) if m == "xml"));
    }

    #[test]
    fn test_reply_json_into_type() {
        #[derive(serde::Deserialize)]
        struct User {
            id: u32,
        }
        let user: User = apply(Some("json"), json_response()).unwrap().json().unwrap();
        assert_eq!(user.id, 7);
    }
}
