//! API request handlers.

/// Authentication handlers (signup, login).
pub mod auth;
/// Health check handler.
pub mod health;
/// Authenticated user profile handlers.
pub mod users;
