//! Process configuration, read from the environment once at startup.

use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
const DEFAULT_MONGO_DB: &str = "fruits";

/// Everything the process needs to know before it can serve traffic.
#[derive(Clone, Debug)]
pub struct Config {
    /// TCP port to listen on (`PORT`, default 3000).
    pub port: u16,
    /// Connection string for the document store (`MONGO_URI`).
    pub mongo_uri: String,
    /// Database name holding the fruits collection (`MONGO_DB`).
    pub mongo_db: String,
}

impl Config {
    /// Reads configuration from the environment, falling back to defaults
    /// for anything unset. A `PORT` value that is not a number falls back
    /// to the default rather than aborting.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let mongo_uri =
            env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_MONGO_URI.to_owned());
        let mongo_db =
            env::var("MONGO_DB").unwrap_or_else(|_| DEFAULT_MONGO_DB.to_owned());
        Self { port, mongo_uri, mongo_db }
    }

    /// The socket address the server binds to.
    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
