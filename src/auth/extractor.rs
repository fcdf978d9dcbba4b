use crate::types::{ActiveUser, AppError, Result};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Extractor for the request-scoped principal.
///
/// Reads the [`ActiveUser`] the bearer guard attached to the request. On
/// routes marked open the guard never runs, so extraction is infallible and
/// yields `None` instead of rejecting.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<ActiveUser>);

impl CurrentUser {
    pub fn sub(&self) -> Option<&str> {
        self.0.as_ref().map(|u| u.sub.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.0.as_ref().map(|u| u.email.as_str())
    }

    pub fn role(&self) -> Option<&str> {
        self.0.as_ref().map(|u| u.role.as_str())
    }

    pub fn name(&self) -> Option<&str> {
        self.0.as_ref().map(|u| u.name.as_str())
    }

    /// Unwraps the principal for handlers that must run behind the bearer
    /// guard.
    pub fn require(self) -> Result<ActiveUser> {
        self.0
            .ok_or_else(|| AppError::Auth("Please login to access this page".to_string()))
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        Ok(CurrentUser(parts.extensions.get::<ActiveUser>().cloned()))
    }
}
