//! # Vendra
//!
//! A multi-vendor commerce backend whose core is a pluggable bearer-token
//! identity and access layer: per-route guard dispatch, stateless JWT
//! verification into a typed principal, and a credential issuance flow
//! (signup/login).
//!
//! ## Overview
//!
//! Vendra can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `vendra-server` binary
//! 2. **As a library** - Wire the auth core into your own Axum application
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use vendra::{auth::TokenCodec, db::UserStore, AppState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(vendra::Config::from_env()?);
//!     let store = Arc::new(UserStore::new_memory().await?);
//!     let state = AppState::build(config, store)?;
//!     let app = vendra::api::routes::create_router(state);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - Guards, dispatcher, token codec, credential service
//! - [`api`] - REST API handlers and routes
//! - [`db`] - Principal storage (libsql)
//! - [`types`] - Wire types and error handling
//! - [`utils`] - Configuration
//!
//! ## Configuration
//!
//! Environment variables (a `.env` file is honored):
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | `JWT_SECRET` | *required* | Token signing secret |
//! | `JWT_ISSUER` | `vendra` | Token `iss` claim |
//! | `JWT_AUDIENCE` | `vendra-api` | Token `aud` claim |
//! | `JWT_TTL_SECONDS` | `3600` | Access token lifetime |
//! | `JWT_LEEWAY_SECONDS` | `0` | Clock-skew tolerance |
//! | `HOST` / `PORT` | `127.0.0.1` / `3000` | Bind address |
//! | `DATABASE_PATH` | in-memory | libsql database file |

/// HTTP API handlers and routes.
pub mod api;
/// Identity and access management core.
pub mod auth;
/// Principal storage.
pub mod db;
/// Common wire types and error handling.
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use auth::{AuthenticationService, CurrentUser, TokenCodec};
pub use db::UserStore;
pub use types::{ActiveUser, AppError, Result};
pub use utils::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Process-wide configuration, read-only after startup
    pub config: Arc<Config>,
    /// Principal store
    pub store: Arc<UserStore>,
    /// Token codec shared by the credential service and the bearer guard
    pub codec: Arc<TokenCodec>,
    /// Credential service
    pub auth_service: Arc<AuthenticationService>,
}

impl AppState {
    /// Wires the auth services from configuration and a store.
    ///
    /// Fails with a configuration error (and the process must not serve)
    /// when the signing secret is unusable.
    pub fn build(config: Arc<Config>, store: Arc<UserStore>) -> Result<Self> {
        let codec = Arc::new(TokenCodec::new(
            config.auth.jwt_secret.clone(),
            config.auth.jwt_issuer.clone(),
            config.auth.jwt_audience.clone(),
            config.auth.jwt_ttl,
            config.auth.jwt_leeway,
        )?);
        let auth_service = Arc::new(AuthenticationService::new(store.clone(), codec.clone()));

        Ok(Self {
            config,
            store,
            codec,
            auth_service,
        })
    }
}
