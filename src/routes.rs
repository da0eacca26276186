//! The routing table.
//!
//! Routes are explicit data rather than a registration mechanism: the full
//! table is written out in [`Router::new`], built once at process start,
//! and never mutated afterwards, so lookups are safe from any number of
//! concurrent invocations.

use crate::request::Method;

/// Names a member of the handler set. The dispatcher turns this into an
/// actual function call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Endpoint {
    Health,
    Root,
    Platform,
}

#[derive(Debug)]
pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub endpoint: Endpoint,
    /// Whether the handler takes a validated, typed request body.
    pub expects_body: bool,
}

#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Router {
            routes: vec![
                Route {
                    method: Method::Get,
                    path: "/health",
                    endpoint: Endpoint::Health,
                    expects_body: false,
                },
                Route {
                    method: Method::Get,
                    path: "/",
                    endpoint: Endpoint::Root,
                    expects_body: false,
                },
                Route {
                    method: Method::Post,
                    path: "/platform",
                    endpoint: Endpoint::Platform,
                    expects_body: true,
                },
            ],
        }
    }

    /// Exact-match lookup on method and path. No wildcards and no path
    /// parameters; anything unmatched is a 404 at the dispatch layer.
    pub fn resolve(&self, method: Method, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.method == method && route.path == path)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
