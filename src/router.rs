use crate::constants::method;
use crate::http::{Request, Response};
use std::fmt;
use std::sync::Arc;

/// A route handler. Shared across worker threads by the application, so it
/// must be `Send + Sync`.
pub type Handler = Arc<dyn Fn(&Request) -> Response + Send + Sync>;

/// One method/path/handler triple.
#[derive(Clone)]
pub struct Route {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) handler: Handler,
}

impl Route {
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A named group of routes, mounted onto an application as a unit. Route
/// modules are plain values; nothing is registered globally.
#[derive(Clone, Default)]
pub struct Router {
    name: String,
    routes: Vec<Route>,
}

impl Router {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routes: Vec::new(),
        }
    }

    /// Registers a handler. Methods are normalized to uppercase; paths are
    /// matched exactly. Conflicts surface when the application is built.
    pub fn route<F>(mut self, method: &str, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.routes.push(Route {
            method: method.to_ascii_uppercase(),
            path: path.into(),
            handler: Arc::new(handler),
        });
        self
    }

    pub fn get<F>(self, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.route(method::GET, path, handler)
    }

    pub fn post<F>(self, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.route(method::POST, path, handler)
    }

    pub fn put<F>(self, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.route(method::PUT, path, handler)
    }

    pub fn delete<F>(self, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.route(method::DELETE, path, handler)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Route>) {
        (self.name, self.routes)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("name", &self.name)
            .field("routes", &self.routes.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;
