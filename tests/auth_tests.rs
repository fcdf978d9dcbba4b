use axum::http::{Method, StatusCode};
use axum::routing::get;
use axum::{middleware, Router};
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;

use vendra::{
    api::routes::create_router,
    auth::{authenticate, AuthState, GuardSet, RouteAuthRegistry, RouteAuthSpec},
    db::UserStore,
    AppState, Config, CurrentUser,
};

fn test_config() -> Arc<Config> {
    Arc::new(Config {
        server: vendra::utils::config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: vendra::utils::config::DatabaseConfig { path: None },
        auth: vendra::utils::config::AuthConfig {
            jwt_secret: "test-secret-key-that-is-at-least-32-chars".to_string(),
            jwt_issuer: "vendra".to_string(),
            jwt_audience: "vendra-api".to_string(),
            jwt_ttl: 3600,
            jwt_leeway: 0,
        },
    })
}

async fn create_test_state() -> AppState {
    let store = Arc::new(UserStore::new_memory().await.expect("should open store"));
    AppState::build(test_config(), store).expect("should build state")
}

/// Create a test server running the full application router
async fn create_test_server() -> TestServer {
    let app = create_router(create_test_state().await);
    TestServer::new(app).expect("Failed to create test server")
}

fn signup_body(email: &str, business: &str) -> serde_json::Value {
    json!({
        "name": "Ada",
        "email": email,
        "password": "Secret123!",
        "confirmPassword": "Secret123!",
        "businessName": business,
        "cacNumber": "RC-123456"
    })
}

// ============= Health Check Tests =============

#[tokio::test]
async fn test_health_is_open() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
}

// ============= Signup Tests =============

#[tokio::test]
async fn test_signup_returns_token() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/user/signup")
        .json(&signup_body("a@b.com", "Ada Stores"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert!(body["data"]["accessToken"].is_string());
    assert!(!body["data"]["accessToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let server = create_test_server().await;

    server
        .post("/api/v1/user/signup")
        .json(&signup_body("a@b.com", "Ada Stores"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/v1/user/signup")
        .json(&signup_body("a@b.com", "Other Stores"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_signup_duplicate_business_name_conflicts() {
    let server = create_test_server().await;

    server
        .post("/api/v1/user/signup")
        .json(&signup_body("a@b.com", "Ada Stores"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/v1/user/signup")
        .json(&signup_body("c@d.com", "Ada Stores"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_password_mismatch_rejected() {
    let server = create_test_server().await;

    let mut body = signup_body("a@b.com", "Ada Stores");
    body["confirmPassword"] = json!("Different123!");
    let response = server.post("/api/v1/user/signup").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let payload: serde_json::Value = response.json();
    assert_eq!(payload["status"], "error");
}

#[tokio::test]
async fn test_concurrent_signups_single_winner() {
    let server = Arc::new(create_test_server().await);

    let mut handles = Vec::new();
    for _ in 0..5 {
        let server = server.clone();
        handles.push(tokio::spawn(async move {
            server
                .post("/api/v1/user/signup")
                .json(&signup_body("race@b.com", "Race Stores"))
                .await
                .status_code()
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("task should not panic") {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status: {}", other),
        }
    }

    assert_eq!(created, 1, "exactly one signup should win");
    assert_eq!(conflicts, 4);
}

// ============= Login Tests =============

#[tokio::test]
async fn test_signup_then_login() {
    let server = create_test_server().await;

    server
        .post("/api/v1/user/signup")
        .json(&signup_body("a@b.com", "Ada Stores"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/v1/user/login")
        .json(&json!({
            "email": "a@b.com",
            "password": "Secret123!"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert!(!body["data"]["accessToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let server = create_test_server().await;

    server
        .post("/api/v1/user/signup")
        .json(&signup_body("a@b.com", "Ada Stores"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/v1/user/login")
        .json(&json!({
            "email": "a@b.com",
            "password": "WrongPass123!"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email_is_unauthorized() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/user/login")
        .json(&json!({
            "email": "ghost@b.com",
            "password": "Secret123!"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

// ============= Guard Dispatch Tests =============

#[tokio::test]
async fn test_protected_route_without_header_is_unauthorized() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/user/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_protected_route_with_wrong_scheme_is_unauthorized() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/user/me")
        .add_header("Authorization", "Basic dXNlcjpwYXNz")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_tampered_token_is_unauthorized() {
    let server = create_test_server().await;

    let signup = server
        .post("/api/v1/user/signup")
        .json(&signup_body("a@b.com", "Ada Stores"))
        .await;
    let body: serde_json::Value = signup.json();
    let token = body["data"]["accessToken"].as_str().unwrap();
    let mut tampered = token.to_string();
    tampered.push('x');

    let response = server
        .get("/api/v1/user/me")
        .add_header("Authorization", format!("Bearer {}", tampered))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_claims_of_presented_token() {
    let server = create_test_server().await;

    let signup = server
        .post("/api/v1/user/signup")
        .json(&signup_body("a@b.com", "Ada Stores"))
        .await;
    let body: serde_json::Value = signup.json();
    let token = body["data"]["accessToken"].as_str().unwrap();

    let response = server
        .get("/api/v1/user/me")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["email"], "a@b.com");
    assert_eq!(body["data"]["name"], "Ada Stores");
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"]["sub"].is_string());
}

#[tokio::test]
async fn test_open_group_reaches_handler_without_header() {
    // Signup sits in the open `user` group; a bad body must reach the
    // handler (400), not be stopped by the dispatcher (401).
    let server = create_test_server().await;

    let mut body = signup_body("a@b.com", "Ada Stores");
    body["password"] = json!("short");
    body["confirmPassword"] = json!("short");
    let response = server.post("/api/v1/user/signup").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// ============= Default-Mode Tests =============

/// Routes never registered in the auth metadata must default to Bearer.
#[tokio::test]
async fn test_unannotated_route_defaults_to_bearer() {
    let state = create_test_state().await;
    let auth_state = AuthState {
        registry: Arc::new(RouteAuthRegistry::new()),
        guards: Arc::new(GuardSet::new(state.codec.clone())),
    };

    async fn handler(user: CurrentUser) -> String {
        user.sub().unwrap_or("anonymous").to_string()
    }

    let app: Router = Router::new()
        .route("/api/v1/shops", get(handler))
        .layer(middleware::from_fn_with_state(auth_state, authenticate));
    let server = TestServer::new(app).expect("Failed to create test server");

    let response = server.get("/api/v1/shops").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let codec = state.codec.clone();
    let token = codec
        .sign("user-123", "ada@example.com", "user", "Ada Stores")
        .expect("should sign");
    let response = server
        .get("/api/v1/shops")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;

    response.assert_status_ok();
    response.assert_text("user-123");
}

/// Method-level metadata must win over the group annotation.
#[tokio::test]
async fn test_route_annotation_overrides_group() {
    let state = create_test_state().await;
    let registry = RouteAuthRegistry::new()
        .group("/api/v1/reports", RouteAuthSpec::bearer())
        .route(Method::GET, "/api/v1/reports/public", RouteAuthSpec::none());
    let auth_state = AuthState {
        registry: Arc::new(registry),
        guards: Arc::new(GuardSet::new(state.codec.clone())),
    };

    let app: Router = Router::new()
        .route("/api/v1/reports/public", get(|| async { "open" }))
        .route("/api/v1/reports/private", get(|| async { "private" }))
        .layer(middleware::from_fn_with_state(auth_state, authenticate));
    let server = TestServer::new(app).expect("Failed to create test server");

    server.get("/api/v1/reports/public").await.assert_status_ok();
    server
        .get("/api/v1/reports/private")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
