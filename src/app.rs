use crate::cors::{Cors, CorsDecision, CorsRequest};
use crate::headers::apply as apply_headers;
use crate::http::{Request, Response};
use crate::policy::{CorsPolicy, ValidationError};
use crate::router::{Handler, Router};
use indexmap::IndexMap;
use thiserror::Error;

/// Startup-time assembly failures. All of them halt `build`; none can occur
/// once an [`App`] exists.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("route {method} {path} is claimed by both `{first}` and `{second}`")]
    DuplicateRoute {
        method: String,
        path: String,
        first: String,
        second: String,
    },
    #[error("router `{router}` declares path `{path}`, which must start with `/`")]
    InvalidRoutePath { router: String, path: String },
    #[error(transparent)]
    Policy(#[from] ValidationError),
}

/// Collects a policy and route modules, then assembles an [`App`].
#[derive(Default)]
pub struct AppBuilder {
    policy: CorsPolicy,
    routers: Vec<Router>,
}

impl AppBuilder {
    /// Injects the cross-origin policy. Defaults to [`CorsPolicy::default`]
    /// when never called.
    pub fn cors(mut self, policy: CorsPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Registers a route module. Conflicts are reported by [`Self::build`],
    /// not here, so mounting order carries no hidden meaning.
    pub fn mount(mut self, router: Router) -> Self {
        self.routers.push(router);
        self
    }

    /// Validates the policy and the combined route table. Duplicate
    /// method/path claims and malformed paths fail here, at startup.
    pub fn build(self) -> Result<App, AppError> {
        if self.policy.origins.is_wildcard() {
            tracing::warn!("cors policy allows any origin; restrict allowed origins in production");
        }
        let cors = Cors::new(self.policy)?;

        let mut table: IndexMap<(String, String), MountedRoute> = IndexMap::new();
        for router in self.routers {
            let (name, routes) = router.into_parts();
            for route in routes {
                if !route.path.starts_with('/') {
                    return Err(AppError::InvalidRoutePath {
                        router: name,
                        path: route.path,
                    });
                }
                let key = (route.method, route.path);
                if let Some(existing) = table.get(&key) {
                    return Err(AppError::DuplicateRoute {
                        method: key.0,
                        path: key.1,
                        first: existing.router.clone(),
                        second: name,
                    });
                }
                table.insert(
                    key,
                    MountedRoute {
                        router: name.clone(),
                        handler: route.handler,
                    },
                );
            }
        }

        tracing::info!(routes = table.len(), "application assembled");
        Ok(App { cors, table })
    }
}

struct MountedRoute {
    router: String,
    handler: Handler,
}

/// An assembled application: an immutable route table behind a validated
/// CORS policy. Cheap to share; `handle` takes `&self`.
pub struct App {
    cors: Cors,
    table: IndexMap<(String, String), MountedRoute>,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::default()
    }

    /// Evaluates the CORS policy, then dispatches. Preflights are answered
    /// here and never reach a handler; unmatched paths fall through to a
    /// plain 404.
    pub fn handle(&self, request: &Request) -> Response {
        let context = CorsRequest::from_request(request);
        match self.cors.check(&context) {
            CorsDecision::PreflightAccepted { status, headers } => {
                let mut response = Response::with_status(status);
                apply_headers(&mut response.headers, &headers);
                response
            }
            CorsDecision::PreflightRejected { headers, rejection } => {
                tracing::debug!(%rejection, "preflight refused");
                let mut response =
                    Response::text(400, format!("cross-origin request refused: {rejection}"));
                apply_headers(&mut response.headers, &headers);
                response
            }
            CorsDecision::Forward { headers } => {
                let mut response = self.dispatch(request);
                apply_headers(&mut response.headers, &headers);
                response
            }
            CorsDecision::NotApplicable => self.dispatch(request),
        }
    }

    fn dispatch(&self, request: &Request) -> Response {
        let key = (
            request.method().to_ascii_uppercase(),
            request.path().to_string(),
        );
        match self.table.get(&key) {
            Some(mounted) => (mounted.handler)(request),
            None => {
                tracing::debug!(method = %key.0, path = %key.1, "no route matched");
                Response::text(404, "Not Found")
            }
        }
    }

    /// The mounted routes, in mount order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.table
            .keys()
            .map(|(method, path)| (method.as_str(), path.as_str()))
    }

    pub fn policy(&self) -> &CorsPolicy {
        self.cors.policy()
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;
