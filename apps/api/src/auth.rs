//! Caller identity, taken from headers set by the authenticating gateway.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The signed-in user. Rejects with 401 when either header is missing or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
}

impl AuthenticatedUser {
    /// Case-insensitive comparison against the account email.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header_value(parts, USER_ID_HEADER).ok_or(AppError::Unauthorized)?;
        let email = header_value(parts, USER_EMAIL_HEADER).ok_or(AppError::Unauthorized)?;
        Ok(Self { id, email })
    }
}
