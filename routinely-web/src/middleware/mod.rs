/// Middleware modules for the web server
///
/// This module contains custom middleware for:
/// - Cache-disabling response headers

pub mod no_cache;
