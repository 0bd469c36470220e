//! # fruitstand
//!
//! A small CRUD web application for a fruit inventory: HTML views over a
//! MongoDB collection, served by hyper.
//!
//! The interesting part is deliberately thin — every route is one store
//! round trip and one response:
//!
//! - [`routes`] maps the nine routes onto [`store::FruitStore`] operations
//! - [`router`] dispatches on method + path (static segments beat `{id}`)
//! - [`middleware`] rewrites `_method`-tunnelled POSTs before matching
//! - [`views`] renders the list/detail/new/edit pages as HTML strings
//!
//! Every handler failure — missing record, malformed id, bad form, store
//! error — is answered uniformly as `400` with the raw error text.

mod config;
mod error;
mod fruit;
mod handler;
mod method;
mod middleware;
mod request;
mod response;
mod router;
mod routes;
mod server;
mod store;
mod views;

pub use config::Config;
pub use error::Error;
pub use fruit::{Fruit, FruitInput};
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use routes::router;
pub use server::Server;
pub use store::{FruitStore, MemoryStore, MongoStore};
