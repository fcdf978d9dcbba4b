//! Common wire types and error handling.
//!
//! Every endpoint responds with the same envelope: `{status, message, data}`.
//! Errors are modeled by [`AppError`], which carries the taxonomy the rest of
//! the crate reports failures through and knows how to render itself as an
//! envelope with the matching HTTP status code.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub business_name: String,
    pub cac_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload of a successful signup/login: the issued bearer token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub access_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Uniform response envelope used by every endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            data: None,
        }
    }
}

// ============= Authentication Types =============

/// Claims embedded in an issued token (wire shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub name: String,
    pub iss: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
}

/// Request-scoped projection of a verified token.
///
/// Attached to the request extensions by the bearer guard after signature,
/// issuer, audience, and expiry all validated; dropped with the request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActiveUser {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<Claims> for ActiveUser {
    fn from(claims: Claims) -> Self {
        Self {
            sub: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        }
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or inconsistent input; user-correctable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uniqueness violation (duplicate email / business name).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, invalid, or expired credential; failed login.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing signing secret or misconfigured issuer/audience.
    /// Fatal at startup; never expected mid-request.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            // Storage and config internals are logged, never leaked.
            AppError::Config(msg) | AppError::Database(msg) | AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        (status, axum::Json(ApiResponse::error(message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_camel_case_token() {
        let envelope = ApiResponse::success(
            "Created User Successfully",
            AuthData {
                access_token: "abc".to_string(),
            },
        );
        let json = serde_json::to_value(&envelope).expect("should serialize");

        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["accessToken"], "abc");
    }

    #[test]
    fn error_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::error("nope")).expect("should serialize");

        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "nope");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn signup_request_accepts_wire_field_names() {
        let body = serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "Secret123!",
            "confirmPassword": "Secret123!",
            "businessName": "Ada Stores",
            "cacNumber": "RC-123456"
        });
        let req: SignupRequest = serde_json::from_value(body).expect("should deserialize");

        assert_eq!(req.confirm_password, "Secret123!");
        assert_eq!(req.business_name, "Ada Stores");
        assert_eq!(req.cac_number, "RC-123456");
    }
}
