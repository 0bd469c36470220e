//! Radix-tree request router.
//!
//! One matchit tree per HTTP method plus a GET fallback. matchit prefers
//! static segments over parameters, so `/fruits/new` and `/fruits/seed`
//! always win over `/fruits/{id}` no matter the registration order — the
//! precedence the route table depends on.

use std::collections::HashMap;
use std::sync::Arc;

use http::StatusCode;
use matchit::Router as PathTree;

use crate::handler::{BoxedHandler, ErasedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::store::FruitStore;

/// The application router.
///
/// Built once at startup around the process-wide store handle; every
/// dispatched handler receives a clone of that handle.
pub struct Router {
    store: Arc<dyn FruitStore>,
    routes: HashMap<Method, PathTree<BoxedHandler>>,
    fallback: Option<BoxedHandler>,
}

impl Router {
    pub fn new(store: Arc<dyn FruitStore>) -> Self {
        Self {
            store,
            routes: HashMap::new(),
            fallback: None,
        }
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, path, handler)
    }

    /// Register a handler for a method + path pair. Path parameters use
    /// `{name}` syntax and are read back with `req.param("name")`.
    ///
    /// # Panics
    ///
    /// Panics on a malformed or conflicting path. Routes are registered
    /// once at startup, so this is a programming error, not a runtime one.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Register the handler for GET requests that match no declared route.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    /// Routes one request to its handler and awaits the response.
    ///
    /// Unmatched GETs go to the fallback; unmatched requests with any
    /// other method get a bare 404 (only a GET catch-all is declared).
    pub(crate) async fn dispatch(&self, mut req: Request) -> Response {
        if let Some((handler, params)) = self.lookup(req.method(), req.path()) {
            req.set_params(params);
            return handler.call(Arc::clone(&self.store), req).await;
        }
        if req.method() == Method::Get {
            if let Some(fallback) = &self.fallback {
                return fallback.call(Arc::clone(&self.store), req).await;
            }
        }
        Response::status(StatusCode::NOT_FOUND)
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}
