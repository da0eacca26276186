//! Request dispatch.
//!
//! This is the composition point of the core: route lookup, optional body
//! validation, handler invocation. It is also the single place where an
//! unexpected handler failure is caught, logged, and reclassified, so
//! nothing propagates past here untranslated.

use anyhow::anyhow;
use lambda_runtime::tracing;
use serde_json::Value;
use thiserror::Error;

use crate::handlers;
use crate::request::{HttpRequest, PlatformRequest};
use crate::routes::{Endpoint, Router};

/// The ways a dispatch can fail. Each variant maps to exactly one HTTP
/// status in the response envelope.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No route matches the request's method and path.
    #[error("not found")]
    NotFound,

    /// The request body does not conform to the route's typed body. The
    /// payload is the detail surfaced to the client.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// A handler failed unexpectedly. The detail has already been logged
    /// and is deliberately not carried in this variant.
    #[error("internal handler failure")]
    HandlerFailed,
}

/// Run one request through the route table and its handler.
///
/// Stateless: every call starts from scratch, so repeated dispatches of
/// the same request produce identical results.
pub fn dispatch(router: &Router, request: &HttpRequest) -> Result<Value, DispatchError> {
    let route = router
        .resolve(request.method, &request.path)
        .ok_or(DispatchError::NotFound)?;

    // An absent body on a typed-body route fails validation the same way
    // a malformed one does.
    let body = if route.expects_body {
        let raw = request.body.as_deref().unwrap_or_default();
        Some(PlatformRequest::from_body(raw).map_err(DispatchError::ValidationFailed)?)
    } else {
        None
    };

    let result = match (route.endpoint, body) {
        (Endpoint::Health, _) => Ok(handlers::health()),
        (Endpoint::Root, _) => Ok(handlers::root()),
        (Endpoint::Platform, Some(typed)) => handlers::platform(typed),
        (Endpoint::Platform, None) => Err(anyhow!("platform route resolved without a typed body")),
    };

    result.map_err(|err| {
        tracing::error!(
            "handler for {} {} failed: {err:#}",
            request.method,
            request.path
        );
        DispatchError::HandlerFailed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;
    use std::collections::HashMap;

    fn request(method: Method, path: &str, body: Option<&[u8]>) -> HttpRequest {
        HttpRequest::new(
            method,
            path.to_owned(),
            HashMap::new(),
            HashMap::new(),
            body.map(<[u8]>::to_vec),
        )
        .unwrap()
    }

    #[test]
    fn test_dispatch_health() {
        let router = Router::new();
        let value = dispatch(&router, &request(Method::Get, "/health", None)).unwrap();
        assert_eq!(value["status"], "healthy");
    }

    #[test]
    fn test_dispatch_unknown_route() {
        let router = Router::new();
        let err = dispatch(&router, &request(Method::Get, "/unknown", None)).unwrap_err();
        assert!(matches!(err, DispatchError::NotFound));

        let err = dispatch(&router, &request(Method::Post, "/health", None)).unwrap_err();
        assert!(matches!(err, DispatchError::NotFound));
    }

    #[test]
    fn test_dispatch_platform() {
        let router = Router::new();
        let value = dispatch(
            &router,
            &request(Method::Post, "/platform", Some(br#"{"name": "Acme"}"#)),
        )
        .unwrap();
        assert_eq!(value["message"], "Welcome to Acme! Running version 1.0.0.");
    }

    #[test]
    fn test_dispatch_platform_missing_body() {
        let router = Router::new();
        let err = dispatch(&router, &request(Method::Post, "/platform", None)).unwrap_err();
        assert!(matches!(err, DispatchError::ValidationFailed(_)));
    }

    #[test]
    fn test_dispatch_platform_bad_body() {
        let router = Router::new();

        let err = dispatch(
            &router,
            &request(Method::Post, "/platform", Some(br#"{"version": "2"}"#)),
        )
        .unwrap_err();
        match err {
            DispatchError::ValidationFailed(detail) => {
                assert!(detail.contains("name"), "unexpected detail: {detail}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
