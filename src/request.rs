//! The canonical in-memory request model.
//!
//! Everything in here is a plain data container built once per invocation.
//! The constructors enforce the invariants that the rest of the crate
//! relies on: a normalized method from the known verb set, a non-empty
//! absolute path, and lowercase header names.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// The known HTTP verb set. Anything else in an inbound event is treated
/// as a malformed envelope, not a routing miss.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Trace,
    Connect,
}

impl Method {
    /// Parse a verb case-insensitively.
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "HEAD" => Some(Method::Head),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "DELETE" => Some(Method::Delete),
            "PATCH" => Some(Method::Patch),
            "OPTIONS" => Some(Method::Options),
            "TRACE" => Some(Method::Trace),
            "CONNECT" => Some(Method::Connect),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum InvalidRequest {
    #[error("request path is empty")]
    EmptyPath,

    #[error("request path `{0}` does not start with `/`")]
    RelativePath(String),
}

/// A reconstructed HTTP request, decoupled from the gateway's envelope
/// shape. Never mutated after construction.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(
        method: Method,
        path: String,
        headers: HashMap<String, String>,
        query: HashMap<String, String>,
        body: Option<Vec<u8>>,
    ) -> Result<Self, InvalidRequest> {
        if path.is_empty() {
            return Err(InvalidRequest::EmptyPath);
        }

        if !path.starts_with('/') {
            return Err(InvalidRequest::RelativePath(path));
        }

        // Gateways are inconsistent about header capitalization, so
        // normalize once here and let everyone downstream assume lowercase.
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();

        Ok(HttpRequest {
            method,
            path,
            headers,
            query,
            body,
        })
    }
}

fn default_version() -> String {
    "1.0.0".to_owned()
}

/// The typed body of `POST /platform`. Optional fields are filled with
/// their defaults during deserialization; handlers never see a null.
#[derive(Debug, Deserialize)]
pub struct PlatformRequest {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: String,
}

impl PlatformRequest {
    /// Parse and validate a raw request body. The error string is the
    /// validation detail that ends up in the 422 response.
    pub fn from_body(raw: &[u8]) -> Result<Self, String> {
        let request: PlatformRequest =
            serde_json::from_slice(raw).map_err(|err| err.to_string())?;

        if request.name.is_empty() {
            return Err("field `name` must be non-empty".to_owned());
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_case_insensitive() {
        assert_eq!(Method::parse("get"), Some(Method::Get));
        assert_eq!(Method::parse("GET"), Some(Method::Get));
        assert_eq!(Method::parse("Post"), Some(Method::Post));
        assert_eq!(Method::parse("BREW"), None);
        assert_eq!(Method::parse(""), None);
    }

    #[test]
    fn test_method_display_uppercase() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_request_path_invariants() {
        let r = HttpRequest::new(
            Method::Get,
            String::new(),
            HashMap::new(),
            HashMap::new(),
            None,
        );
        assert!(matches!(r, Err(InvalidRequest::EmptyPath)));

        let r = HttpRequest::new(
            Method::Get,
            "health".to_owned(),
            HashMap::new(),
            HashMap::new(),
            None,
        );
        assert!(matches!(r, Err(InvalidRequest::RelativePath(_))));
    }

    #[test]
    fn test_request_headers_lowercased() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_owned(), "application/json".to_owned());
        headers.insert("X-Request-Id".to_owned(), "abc".to_owned());

        let r = HttpRequest::new(
            Method::Post,
            "/platform".to_owned(),
            headers,
            HashMap::new(),
            None,
        )
        .unwrap();

        assert_eq!(r.headers.get("content-type").unwrap(), "application/json");
        assert_eq!(r.headers.get("x-request-id").unwrap(), "abc");
        assert!(!r.headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_platform_request_defaults() {
        let req = PlatformRequest::from_body(br#"{"name": "Acme"}"#).unwrap();
        assert_eq!(req.name, "Acme");
        assert_eq!(req.version, "1.0.0");
        assert_eq!(req.description, "");
    }

    #[test]
    fn test_platform_request_explicit_fields() {
        let req = PlatformRequest::from_body(
            br#"{"name": "Acme", "version": "2.1", "description": "a thing"}"#,
        )
        .unwrap();
        assert_eq!(req.version, "2.1");
        assert_eq!(req.description, "a thing");
    }

    #[test]
    fn test_platform_request_missing_name() {
        let err = PlatformRequest::from_body(br#"{"version": "2.1"}"#).unwrap_err();
        assert!(err.contains("name"), "unexpected detail: {err}");
    }

    #[test]
    fn test_platform_request_empty_name() {
        let err = PlatformRequest::from_body(br#"{"name": ""}"#).unwrap_err();
        assert!(err.contains("non-empty"), "unexpected detail: {err}");
    }

    #[test]
    fn test_platform_request_malformed_json() {
        assert!(PlatformRequest::from_body(b"{not json").is_err());
        assert!(PlatformRequest::from_body(b"").is_err());
    }
}
