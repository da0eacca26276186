//! The endpoint handlers.
//!
//! Handlers are plain synchronous functions that build JSON values. They
//! know nothing about the gateway envelope; the dispatcher feeds them and
//! the event adapter wraps whatever they return.

use anyhow::Result;
use lambda_runtime::tracing;
use serde_json::{json, Value};

use crate::request::PlatformRequest;

/// Health check endpoint.
pub fn health() -> Value {
    json!({
        "status": "healthy",
        "service": "example-python-lambda",
    })
}

/// Root endpoint.
pub fn root() -> Value {
    json!({
        "message": "Hello from Python Lambda!",
    })
}

/// Platform endpoint that processes platform data.
///
/// The welcome message is built up in a fixed order: the base greeting,
/// then a version clause when `version` is non-empty, then a description
/// clause when `description` is non-empty. Clients parse this text, so the
/// order and punctuation are part of the interface.
pub fn platform(request: PlatformRequest) -> Result<Value> {
    tracing::info!(
        "processing platform request: name={} version={} description={}",
        request.name,
        request.version,
        request.description
    );

    let mut message = format!("Welcome to {}!", request.name);

    if !request.version.is_empty() {
        message.push_str(&format!(" Running version {}.", request.version));
    }

    if !request.description.is_empty() {
        message.push_str(&format!(" Description: {}", request.description));
    }

    Ok(json!({
        "message": message,
        "platform": {
            "name": request.name,
            "version": request.version,
            "description": request.description,
            "status": "active",
            "uptime": "99.9%",
        },
        "metadata": {
            "processed_at": "2024-01-01T00:00:00Z",
            "lambda_version": "python3.12",
            "region": "us-east-1",
        },
    }))
}
