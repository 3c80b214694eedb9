use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::auth::session::Session;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracts the live session for the request's bearer token.
///
/// Handlers that take `CurrentSession` can only be reached by a logged-in
/// user; there is no ambient "current user" anywhere else.
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".into()))?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or_else(|| ApiError::Unauthorized("Invalid auth scheme".into()))?;

        let session = state
            .sessions
            .resolve(token)
            .ok_or_else(|| ApiError::Unauthorized("Invalid or expired session".into()))?;

        Ok(CurrentSession(session))
    }
}
