//! The AWS/Lambda-powered platform service
//!
//! This library crate implements a small HTTP service (health check, root
//! greeting, and a platform data-processing endpoint) for deployment
//! behind AWS API Gateway's "proxy event" integration: each invocation
//! delivers one HTTP call as a JSON envelope and expects one JSON envelope
//! back.
//!
//! The interesting part is the adaptation layer, not the handlers. An
//! inbound event is decoded into a canonical request ([`event`]),
//! dispatched through an explicit, immutable route table ([`routes`],
//! [`dispatch`]), and the outcome -- success or classified failure -- is
//! encoded back into the gateway's response envelope. Buffered lambdas can
//! only emit JSON, which suits us fine: every response body here is JSON
//! anyway.

use lambda_runtime::{tracing, Error};
use serde_json::Value;

pub mod dispatch;
pub mod event;
pub mod handlers;
pub mod request;
pub mod routes;

/// Process-wide state: just the route table, built once and read-only
/// afterwards. There is deliberately no other shared state, so concurrent
/// invocations need no coordination.
pub struct Service {
    router: routes::Router,
}

impl Service {
    /// Create a service with the fixed route table. Does not touch global
    /// logging state, which makes it usable from tests.
    pub fn new() -> Self {
        Service {
            router: routes::Router::new(),
        }
    }

    /// Set up logging and create the state object for the platform
    /// service Lambda. Called once at process start.
    pub fn init() -> Result<Self, Error> {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_target(false) // don't print the module name
            .without_time() // don't print time (CloudWatch has it)
            .init();

        Ok(Self::new())
    }

    /// Handle one proxy-event invocation.
    ///
    /// Routed requests always come back as an envelope, whatever their
    /// outcome. The only `Err` here is a malformed inbound envelope,
    /// which surfaces as an invocation error to the runtime. Everything
    /// in between is synchronous in-memory work.
    pub fn handle_event(&self, payload: Value) -> Result<event::GatewayResponse, Error> {
        let request = event::decode(payload)?;

        let response = match dispatch::dispatch(&self.router, &request) {
            Ok(result) => event::respond(&result),
            Err(error) => event::respond_error(&error),
        };

        Ok(response)
    }
}

impl Default for Service {
    fn default() -> Self {
        Self::new()
    }
}
