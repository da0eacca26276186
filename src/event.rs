//! Translation between API Gateway proxy events and the request model.
//!
//! The proxy-event protocol delivers each HTTP call as one JSON envelope
//! and expects one JSON envelope back. Decoding is forward-compatible:
//! fields we don't know about (`requestContext`, `resource`, and whatever
//! the gateway grows next) are ignored. Missing *required* fields are not
//! papered over, though -- an envelope without a method or path is a
//! malformed invocation, and we fail it loudly rather than guess.
//!
//! Encoding always produces a well-formed JSON response with a status
//! code. Callers never see a bare error string or an empty body.

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::dispatch::DispatchError;
use crate::request::{HttpRequest, InvalidRequest, Method};

/// The inbound envelope is unrecognized or self-inconsistent. These are
/// invocation errors, reported to the Lambda runtime rather than mapped
/// to an HTTP status: there is no well-formed request to answer.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unrecognized proxy event: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("unknown HTTP method `{0}`")]
    UnknownMethod(String),

    #[error(transparent)]
    Request(#[from] InvalidRequest),

    #[error("request body is flagged base64 but does not decode: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// The API Gateway REST proxy event, reduced to the fields we consume.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GatewayEvent {
    http_method: String,
    path: String,
    #[serde(default)]
    headers: Option<HashMap<String, String>>,
    #[serde(default)]
    query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    is_base64_encoded: bool,
}

/// The response envelope the gateway expects back.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// Reconstruct a canonical [`HttpRequest`] from a proxy event.
pub fn decode(event: Value) -> Result<HttpRequest, DecodeError> {
    let event: GatewayEvent = serde_json::from_value(event)?;

    let method = Method::parse(&event.http_method)
        .ok_or_else(|| DecodeError::UnknownMethod(event.http_method.clone()))?;

    let body = match event.body {
        Some(text) if event.is_base64_encoded => Some(STANDARD.decode(text.as_bytes())?),
        Some(text) => Some(text.into_bytes()),
        None => None,
    };

    Ok(HttpRequest::new(
        method,
        event.path,
        event.headers.unwrap_or_default(),
        event.query_string_parameters.unwrap_or_default(),
        body,
    )?)
}

/// Wrap a successful handler result in a 200 envelope.
pub fn respond(result: &Value) -> GatewayResponse {
    envelope(200, result.to_string())
}

/// Map a dispatch failure to its error envelope. Internal failure detail
/// stays in the logs; the 500 body is deliberately generic.
pub fn respond_error(error: &DispatchError) -> GatewayResponse {
    let (status, body) = match error {
        DispatchError::NotFound => (404, json!({ "error": "not found" })),
        DispatchError::ValidationFailed(detail) => (
            422,
            json!({ "error": "validation failed", "detail": detail }),
        ),
        DispatchError::HandlerFailed => (500, json!({ "error": "internal server error" })),
    };

    envelope(status, body.to_string())
}

fn envelope(status_code: u16, body: String) -> GatewayResponse {
    let mut headers = HashMap::new();
    headers.insert("content-type".to_owned(), "application/json".to_owned());

    GatewayResponse {
        status_code,
        headers,
        body,
        is_base64_encoded: false,
    }
}
