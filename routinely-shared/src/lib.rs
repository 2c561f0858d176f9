//! # Routinely Shared Library
//!
//! This crate contains the data layer and auth primitives used by the
//! Routinely web server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Credential hashing
//! - `session`: Server-side session store and request context
//! - `db`: Connection pool, migrations, and seed loading

pub mod auth;
pub mod db;
pub mod models;
pub mod session;

/// Current version of the Routinely shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
