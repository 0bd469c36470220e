//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.

use bytes::Bytes;
use http::{StatusCode, header};
use http_body_util::Full;

use crate::error::Error;

/// An outgoing HTTP response.
///
/// Handlers build one with a constructor and return it (usually inside a
/// `Result`, which [`IntoResponse`] flattens into the error page).
pub struct Response {
    status: StatusCode,
    headers: Vec<(header::HeaderName, String)>,
    body: Bytes,
}

impl Response {
    /// `200 OK` with a `text/html` body.
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            headers: vec![(header::CONTENT_TYPE, "text/html; charset=utf-8".to_owned())],
            body: Bytes::from(body.into()),
        }
    }

    /// A plain-text body with the given status. Used for error pages.
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![(header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned())],
            body: Bytes::from(body.into()),
        }
    }

    /// `302 Found` redirect to `location`, no body.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FOUND,
            headers: vec![(header::LOCATION, location.into())],
            body: Bytes::new(),
        }
    }

    /// Status-only response, no body.
    pub fn status(status: StatusCode) -> Self {
        Self { status, headers: Vec::new(), body: Bytes::new() }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// The `location` header, if this is a redirect.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| *name == header::LOCATION)
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub(crate) fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        builder
            .body(Full::new(self.body))
            .unwrap_or_else(|_| http::Response::new(Full::new(Bytes::new())))
    }
}

/// Conversion into an HTTP [`Response`].
///
/// The `Result<Response, Error>` impl is where the flat error policy
/// lives: any handler failure becomes a status from
/// [`Error::status`] with the raw error text as the body.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for Result<Response, Error> {
    fn into_response(self) -> Response {
        match self {
            Ok(response) => response,
            Err(err) => Response::text(err.status(), err.to_string()),
        }
    }
}
