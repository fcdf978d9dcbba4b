use crate::{
    types::{ApiResponse, AuthData, LoginRequest, Result, SignupRequest},
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};

/// Register a new user and business
#[utoipa::path(
    post,
    path = "/api/v1/user/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<AuthData>),
        (status = 400, description = "Invalid input or password mismatch"),
        (status = 409, description = "Email or business name already registered")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthData>>)> {
    let issued = state.auth_service.register(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Created User Successfully", issued)),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/v1/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthData>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthData>>> {
    let issued = state.auth_service.login(&payload).await?;

    Ok(Json(ApiResponse::success("Login Successful", issued)))
}
