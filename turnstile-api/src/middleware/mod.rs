/// Middleware modules for the API server
///
/// This module contains custom middleware for:
/// - Uniform error response bodies

pub mod envelope;
