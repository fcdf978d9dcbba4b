//! HTTP API layer, built on Axum.
//!
//! # API Endpoints
//!
//! ## Users (`/api/v1/user`)
//! - `POST /api/v1/user/signup` - Register a new user and business (open)
//! - `POST /api/v1/user/login` - Login and receive a bearer token (open)
//! - `GET /api/v1/user/me` - Decoded claims of the presented token (bearer)
//!
//! ## Health (`/api/v1/health`)
//! - `GET /api/v1/health` - Liveness probe (open)
//!
//! # Authentication
//!
//! Every route not registered as open requires a token in the
//! `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! # OpenAPI Documentation
//!
//! With the `swagger-ui` feature enabled, interactive API documentation is
//! served at `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route auth registration.
pub mod routes;

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::signup,
        handlers::auth::login,
        handlers::users::me,
        handlers::health::health,
    ),
    components(schemas(
        crate::types::SignupRequest,
        crate::types::LoginRequest,
        crate::types::AuthData,
        crate::types::ActiveUser,
        handlers::health::HealthData,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Authenticated user profile"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
