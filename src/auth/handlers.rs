use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, RegisterRequest, SessionResponse},
        extractors::CurrentSession,
        password,
        repo::User,
        validation::{is_valid_email, validate_password, validate_username},
    },
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

/// Register a new account. No session is created; the client logs in
/// afterwards. Field checks run in a fixed order so the first failure is
/// the one reported.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    if !is_valid_email(&payload.email) {
        warn!("register rejected: invalid email format");
        return Err(ApiError::Validation("Invalid email format".into()));
    }
    if let Err(reason) = validate_username(&payload.username) {
        warn!("register rejected: {reason}");
        return Err(ApiError::Validation(reason.into()));
    }
    if let Err(reason) = validate_password(&payload.password) {
        warn!("register rejected: {reason}");
        return Err(ApiError::Validation(reason.into()));
    }
    if payload.password != payload.confirm_password {
        return Err(ApiError::Validation("Passwords do not match".into()));
    }

    // Fast-path duplicate checks for a field-specific message. The UNIQUE
    // constraints below remain the source of truth under concurrent signup.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "register rejected: email taken");
        return Err(ApiError::Duplicate("Email already registered".into()));
    }
    if User::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "register rejected: username taken");
        return Err(ApiError::Duplicate("Username already taken".into()));
    }

    let hash = password::derive_hash(&payload.password);
    let user = User::create(&state.db, &payload.email, &payload.username, &hash).await?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Authenticate and open a session. Unknown email and wrong password are
/// indistinguishable to the caller.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!("login failed: unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !password::verify(&payload.password, &user.password_hash) {
        warn!(user_id = user.id, "login failed: bad password");
        return Err(ApiError::InvalidCredentials);
    }

    let session = state.sessions.create(user.id);
    info!(user_id = user.id, "user logged in");
    Ok(Json(SessionResponse {
        token: session.token,
        user: user.into(),
    }))
}

/// Invalidate the presented session.
#[instrument(skip(state, session))]
pub async fn logout(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> ApiResult<StatusCode> {
    state.sessions.invalidate(&session.token);
    info!(user_id = session.user_id, "user logged out");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, session))]
pub async fn get_me(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> ApiResult<Json<PublicUser>> {
    let user = User::find_by_id(&state.db, session.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(user.into()))
}
