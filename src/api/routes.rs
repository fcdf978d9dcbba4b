use crate::auth::{authenticate, AuthState, GuardSet, RouteAuthRegistry, RouteAuthSpec};
use crate::AppState;
use axum::{
    http::Method,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Auth metadata for the application's routes, registered next to the routes
/// they annotate: the `user` group is open (signup/login), the profile route
/// overrides the group back to bearer, and anything unlisted falls back to
/// the bearer default.
fn route_auth_registry() -> RouteAuthRegistry {
    let registry = RouteAuthRegistry::new()
        .group("/api/v1/user", RouteAuthSpec::none())
        .route(Method::GET, "/api/v1/user/me", RouteAuthSpec::bearer())
        .route(Method::GET, "/api/v1/health", RouteAuthSpec::none());

    // API docs are public.
    #[cfg(feature = "swagger-ui")]
    let registry = registry
        .group("/swagger-ui", RouteAuthSpec::none())
        .group("/api-docs", RouteAuthSpec::none());

    registry
}

/// Builds the application router with auth dispatch layered over every route,
/// the Swagger UI included.
pub fn create_router(state: AppState) -> Router {
    let auth_state = AuthState {
        registry: Arc::new(route_auth_registry()),
        guards: Arc::new(GuardSet::new(state.codec.clone())),
    };

    let router = Router::new()
        .route("/api/v1/user/signup", post(crate::api::handlers::auth::signup))
        .route("/api/v1/user/login", post(crate::api::handlers::auth::login))
        .route("/api/v1/user/me", get(crate::api::handlers::users::me))
        .route("/api/v1/health", get(crate::api::handlers::health::health));

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", crate::api::ApiDoc::openapi()),
        )
    };

    router
        .layer(middleware::from_fn_with_state(auth_state, authenticate))
        .with_state(state)
}
