use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Unified error type for handlers. Each variant maps to an HTTP status;
/// the body is `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed input (bad email, weak password, short username, negative
    /// amount). The message is specific and safe to show to the user.
    #[error("{0}")]
    Validation(String),

    /// Email or username already registered, detected by the pre-check.
    #[error("{0}")]
    Duplicate(String),

    /// Storage-level unique constraint fired (racy signup lost). Deliberately
    /// generic: the pre-check is the path that names the offending field.
    #[error("Account already exists")]
    DuplicateIdentity,

    /// Insert referenced a row that does not exist (e.g. expense for a
    /// deleted user).
    #[error("Referenced record does not exist")]
    ReferentialIntegrity,

    /// Unknown email or wrong password. One message for both, so callers
    /// cannot probe which emails are registered.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, malformed, or expired session token.
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Duplicate(_) | ApiError::DuplicateIdentity => StatusCode::CONFLICT,
            ApiError::ReferentialIntegrity => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidCredentials | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            error!(error = %e, "internal error");
        }
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Postgres error codes worth distinguishing at the write boundary.
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return ApiError::DuplicateIdentity,
                Some(FOREIGN_KEY_VIOLATION) => return ApiError::ReferentialIntegrity,
                _ => {}
            }
        }
        ApiError::Internal(anyhow::Error::new(e).context("database error"))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_message_does_not_name_the_field() {
        let msg = ApiError::InvalidCredentials.to_string();
        assert_eq!(msg, "Invalid email or password");
    }

    #[test]
    fn statuses_map_as_expected() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::DuplicateIdentity.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
