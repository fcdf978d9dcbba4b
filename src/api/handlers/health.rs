use crate::types::ApiResponse;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthData {
    pub version: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is up", body = ApiResponse<HealthData>)
    ),
    tag = "health"
)]
pub async fn health() -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse::success(
        "ok",
        HealthData {
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    ))
}
