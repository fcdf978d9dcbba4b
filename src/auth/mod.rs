//! Identity and access management core.
//!
//! This module decides, per request, whether the caller must present a valid
//! bearer credential, and if so verifies and decodes it into a typed principal
//! for downstream handlers.
//!
//! # Module Structure
//!
//! - [`auth::hashing`](crate::auth::hashing) - One-way password hashing (Argon2id)
//! - [`auth::token`](crate::auth::token) - Bearer token signing and verification
//! - [`auth::service`](crate::auth::service) - Registration and login
//! - [`auth::guard`](crate::auth::guard) - Route auth metadata, guards, and the dispatcher
//! - [`auth::extractor`](crate::auth::extractor) - Principal extraction in handlers
//!
//! # Dispatch
//!
//! Routes declare accepted auth modes in a [`guard::RouteAuthRegistry`] while
//! the router is built; unannotated routes default to `Bearer`. The
//! [`guard::authenticate`] middleware resolves the effective spec for each
//! request and runs the matching guards in order, short-circuiting on the
//! first success or on a definitive authentication failure.
//!
//! # Usage
//!
//! ```ignore
//! use vendra::auth::guard::{authenticate, AuthState, GuardSet, RouteAuthRegistry, RouteAuthSpec};
//!
//! let registry = RouteAuthRegistry::new()
//!     .group("/api/v1/user", RouteAuthSpec::none())
//!     .route(Method::GET, "/api/v1/user/me", RouteAuthSpec::bearer());
//!
//! let auth_state = AuthState {
//!     registry: Arc::new(registry),
//!     guards: Arc::new(GuardSet::new(codec)),
//! };
//! let app = router.layer(middleware::from_fn_with_state(auth_state, authenticate));
//! ```
//!
//! ## Reading the principal in handlers
//!
//! ```ignore
//! async fn me(user: CurrentUser) -> Result<Json<ActiveUser>> {
//!     Ok(Json(user.require()?))
//! }
//! ```

/// Principal extraction for handlers behind the bearer guard.
pub mod extractor;
/// Route auth metadata, guard strategies, and the dispatcher middleware.
pub mod guard;
/// Password hashing and verification.
pub mod hashing;
/// Registration and login against the principal store.
pub mod service;
/// Bearer token signing and verification.
pub mod token;

pub use extractor::CurrentUser;
pub use guard::{authenticate, AuthState, AuthType, GuardSet, RouteAuthRegistry, RouteAuthSpec};
pub use hashing::CredentialHasher;
pub use service::AuthenticationService;
pub use token::TokenCodec;
