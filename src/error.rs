//! Error taxonomy and the error-to-status mapping.

use http::StatusCode;
use thiserror::Error;

/// The error type surfaced by store operations and form parsing.
///
/// Infrastructure failures outside a request (binding the listener,
/// reaching the store at startup) are fatal and never become an `Error`;
/// everything that happens inside a handler funnels through here.
#[derive(Debug, Error)]
pub enum Error {
    /// No record exists for the given id, or the id string is not a
    /// well-formed ObjectId. Both cases look identical to the caller.
    #[error("no fruit with id `{0}`")]
    NotFound(String),

    /// A form body could not be parsed into a fruit input.
    #[error("invalid fruit input: {0}")]
    Validation(String),

    /// The document store rejected an operation or was unreachable.
    #[error("store error: {0}")]
    Store(#[from] mongodb::error::Error),
}

impl Error {
    /// Maps each failure kind to the HTTP status a handler responds with.
    ///
    /// Every variant maps to 400. The original system made no status-level
    /// distinction between not-found, bad input, and store failures; the
    /// table keeps that behavior while leaving one obvious place to change
    /// it (e.g. `NotFound` → 404) later.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::BAD_REQUEST,
        }
    }
}
