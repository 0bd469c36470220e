//! Incoming HTTP request type, as seen by handlers.
//!
//! The server buffers the body and resolves the method override before a
//! `Request` is built, so handlers always see the effective verb.

use std::collections::HashMap;

use bytes::Bytes;

use crate::method::Method;

/// An incoming HTTP request with its body buffered and route parameters
/// resolved.
pub struct Request {
    method: Method,
    path: String,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(method: Method, path: impl Into<String>, body: Bytes) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            params: HashMap::new(),
        }
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The buffered request body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/fruits/{id}`, `req.param("id")` on `/fruits/64f0…`
    /// returns `Some("64f0…")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_resolve_by_name() {
        let mut req = Request::new(Method::Get, "/fruits/abc", Bytes::new());
        req.set_params(HashMap::from([("id".to_owned(), "abc".to_owned())]));
        assert_eq!(req.param("id"), Some("abc"));
        assert_eq!(req.param("name"), None);
    }
}
