//! # Turnstile Core
//!
//! Domain library for the Turnstile backend: stateless token-based
//! authentication and request authorization.
//!
//! ## Module Organization
//!
//! - `auth`: session token codec, credential verification, request
//!   authentication and the access policy
//! - `store`: user persistence capability and its in-memory implementation
//! - `config`: authentication configuration

pub mod auth;
pub mod config;
pub mod store;

/// Current version of the Turnstile core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
