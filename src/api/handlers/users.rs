use crate::{
    auth::CurrentUser,
    types::{ActiveUser, ApiResponse, Result},
};
use axum::Json;

/// Return the authenticated principal's decoded claims
#[utoipa::path(
    get,
    path = "/api/v1/user/me",
    responses(
        (status = 200, description = "Authenticated user profile", body = ApiResponse<ActiveUser>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn me(user: CurrentUser) -> Result<Json<ApiResponse<ActiveUser>>> {
    let principal = user.require()?;

    Ok(Json(ApiResponse::success(
        "Fetched user profile",
        principal,
    )))
}
