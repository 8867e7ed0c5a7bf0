/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (signup, signin)
/// - `users`: User resource endpoints

pub mod health;
pub mod auth;
pub mod users;
