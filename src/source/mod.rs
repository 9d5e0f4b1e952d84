//! Where document records come from.
//!
//! - [`file`] — a JSON export on disk.
//! - [`api`] — the backend REST API, fetched concurrently per driver.
//!
//! Both produce a [`DocumentSet`]. Authentication is delegated to a
//! [`TokenProvider`]; this crate never obtains credentials itself.

pub mod api;
pub mod file;

use crate::models::{Document, Driver};

/// Roster plus documents, as loaded from a source.
#[derive(Debug, Default)]
pub struct DocumentSet {
    pub drivers: Vec<Driver>,
    pub documents: Vec<Document>,
}

/// Supplies the bearer token attached to API requests.
pub trait TokenProvider {
    fn token(&self) -> Option<String>;
}

/// Reads the token from an environment variable.
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl TokenProvider for EnvToken {
    fn token(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}
